//! 最小生成树（Kruskal / Prim）
//!
//! 非连通图上两种方法都返回最小生成森林。缓存记录产生结果的方法与图的修订标识，
//! 同一方法在图未变化时重复调用不会重新计算。

use super::dense::DenseIndex;
use super::union_find::DisjointSet;
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, Revision};
use crate::types::Weight;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 最小生成树计算方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MstMethod {
    /// Kruskal 算法（排序 + 并查集）
    Kruskal,
    /// Prim 算法（从 ID 最小的顶点开始生长）
    Prim,
    /// 尚未计算
    NotCalculated,
}

impl MstMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MstMethod::Kruskal => "KRUSKAL",
            MstMethod::Prim => "PRIM",
            MstMethod::NotCalculated => "NOT_CALCULATED",
        }
    }
}

impl fmt::Display for MstMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MstMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KRUSKAL" => Ok(MstMethod::Kruskal),
            "PRIM" => Ok(MstMethod::Prim),
            "NOT_CALCULATED" => Ok(MstMethod::NotCalculated),
            other => Err(Error::ParseError(format!("未知的最小生成树方法: {}", other))),
        }
    }
}

/// 最小生成树（森林）结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanningTreeResult {
    /// 产生该结果的方法
    method: MstMethod,
    /// 树边
    edges: Vec<Edge>,
}

impl SpanningTreeResult {
    pub fn method(&self) -> MstMethod {
        self.method
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// 总权重
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(Edge::weight).sum()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Kruskal 算法
///
/// 边按 (权重, 小端点, 大端点) 升序处理；处理完所有边才停止，
/// 因此非连通图得到最小生成森林。
pub fn kruskal(graph: &Graph) -> SpanningTreeResult {
    let index = DenseIndex::new(graph);
    let mut sorted: Vec<&Edge> = graph.edges().collect();
    sorted.sort_by_key(|e| (Weight::new(e.weight()), e.key()));

    let mut sets = DisjointSet::new(index.len());
    let mut edges = Vec::with_capacity(index.len().saturating_sub(1));

    for edge in sorted {
        let (Some(a), Some(b)) = (index.position(edge.v1()), index.position(edge.v2())) else {
            continue;
        };
        if sets.union(a, b) {
            edges.push(edge.clone());
        }
    }

    SpanningTreeResult {
        method: MstMethod::Kruskal,
        edges,
    }
}

/// Prim 算法
///
/// 从 ID 最小的顶点开始；键值相同时选 ID 最小的顶点。
/// 当剩余顶点都不可达时，从其中 ID 最小者重新开始生长，得到生成森林。
pub fn prim(graph: &Graph) -> SpanningTreeResult {
    let index = DenseIndex::new(graph);
    let n = index.len();

    let mut key = vec![Weight::INFINITY; n];
    let mut connector: Vec<Option<usize>> = vec![None; n];
    let mut included = vec![false; n];
    let mut edges = Vec::with_capacity(n.saturating_sub(1));

    if n > 0 {
        key[0] = Weight::ZERO;
    }

    for _ in 0..n {
        // 线性扫描：严格小于才替换，下标小者（即 ID 小者）胜出
        let mut next: Option<usize> = None;
        for v in 0..n {
            if !included[v] && next.map_or(true, |u| key[v] < key[u]) {
                next = Some(v);
            }
        }
        let Some(u) = next else {
            break;
        };
        included[u] = true;

        if let Some(from) = connector[u] {
            if let Some(edge) = graph.edge(index.id(from), index.id(u)) {
                edges.push(edge.clone());
            }
        }

        for (v_id, w) in graph.neighbors(index.id(u)) {
            let Some(v) = index.position(v_id) else {
                continue;
            };
            let w = Weight::new(w);
            if !included[v] && w < key[v] {
                key[v] = w;
                connector[v] = Some(u);
            }
        }
    }

    SpanningTreeResult {
        method: MstMethod::Prim,
        edges,
    }
}

#[derive(Debug, Clone)]
struct Cached {
    revision: Revision,
    result: SpanningTreeResult,
}

/// 最小生成树引擎
///
/// 同一个引擎实例只应与同一个图配合使用。
#[derive(Debug, Clone, Default)]
pub struct SpanningTreeEngine {
    cache: Option<Cached>,
    runs: u64,
}

impl SpanningTreeEngine {
    /// 创建引擎
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh(&self, graph: &Graph) -> Option<&SpanningTreeResult> {
        self.cache
            .as_ref()
            .filter(|cached| cached.revision == graph.revision())
            .map(|cached| &cached.result)
    }

    /// 最近一次有效结果所用的方法；图被修改后为 `NotCalculated`
    pub fn method(&self, graph: &Graph) -> MstMethod {
        self.fresh(graph)
            .map(SpanningTreeResult::method)
            .unwrap_or(MstMethod::NotCalculated)
    }

    /// 按指定方法计算
    pub fn run(&mut self, graph: &Graph, method: MstMethod) -> Result<&SpanningTreeResult> {
        let compute: fn(&Graph) -> SpanningTreeResult = match method {
            MstMethod::Kruskal => kruskal,
            MstMethod::Prim => prim,
            MstMethod::NotCalculated => {
                return Err(Error::Unsupported(
                    "不能以 NOT_CALCULATED 作为计算方法".to_string(),
                ))
            }
        };

        if self.method(graph) == method {
            tracing::trace!(%method, version = graph.version(), "mst cache hit");
        } else {
            tracing::debug!(
                %method,
                vertices = graph.vertex_count(),
                edges = graph.edge_count(),
                version = graph.version(),
                "computing minimum spanning tree"
            );
            let result = compute(graph);
            self.cache = Some(Cached {
                revision: graph.revision(),
                result,
            });
            self.runs += 1;
        }

        self.cache
            .as_ref()
            .map(|cached| &cached.result)
            .ok_or_else(|| Error::InvalidState("最小生成树结果缺失".to_string()))
    }

    /// Kruskal
    pub fn run_kruskal(&mut self, graph: &Graph) -> Result<&SpanningTreeResult> {
        self.run(graph, MstMethod::Kruskal)
    }

    /// Prim
    pub fn run_prim(&mut self, graph: &Graph) -> Result<&SpanningTreeResult> {
        self.run(graph, MstMethod::Prim)
    }

    /// 已缓存且未过期的结果
    pub fn cached(&self, graph: &Graph) -> Option<&SpanningTreeResult> {
        self.fresh(graph)
    }

    /// 实际执行计算的次数
    pub fn runs(&self) -> u64 {
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::graph::VertexId;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    //   1 --4-- 2
    //   | \     |
    //   1   3   2
    //   |     \ |
    //   4 --5-- 3
    fn create_test_graph() -> Graph {
        let mut graph = Graph::new();
        graph.add_vertices(4);
        graph.add_edge(VertexId(1), VertexId(2), 4.0).unwrap();
        graph.add_edge(VertexId(2), VertexId(3), 2.0).unwrap();
        graph.add_edge(VertexId(1), VertexId(3), 3.0).unwrap();
        graph.add_edge(VertexId(1), VertexId(4), 1.0).unwrap();
        graph.add_edge(VertexId(3), VertexId(4), 5.0).unwrap();
        graph
    }

    fn keys(result: &SpanningTreeResult) -> Vec<(u64, u64)> {
        let mut keys: Vec<_> = result
            .edges()
            .iter()
            .map(|e| (e.key().low().as_u64(), e.key().high().as_u64()))
            .collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_kruskal() {
        let graph = create_test_graph();
        let result = kruskal(&graph);
        assert_eq!(result.method(), MstMethod::Kruskal);
        assert_eq!(result.len(), 3);
        assert_eq!(result.total_weight(), 6.0);
        assert_eq!(keys(&result), vec![(1, 3), (1, 4), (2, 3)]);
    }

    #[test]
    fn test_prim() {
        let graph = create_test_graph();
        let result = prim(&graph);
        assert_eq!(result.method(), MstMethod::Prim);
        assert_eq!(result.total_weight(), 6.0);
        assert_eq!(keys(&result), vec![(1, 3), (1, 4), (2, 3)]);
    }

    #[test]
    fn test_disconnected_forest() {
        let mut graph = Graph::new();
        graph.add_vertices(4);
        graph.add_edge(VertexId(1), VertexId(2), 1.0).unwrap();
        graph.add_edge(VertexId(3), VertexId(4), 1.0).unwrap();

        for result in [kruskal(&graph), prim(&graph)] {
            assert_eq!(result.len(), 2);
            assert_eq!(result.total_weight(), 2.0);
        }
    }

    #[test]
    fn test_prim_with_sparse_ids() {
        let mut graph = Graph::new();
        let ids = graph.add_vertices(6);
        graph.remove_vertex(ids[0]).unwrap();
        graph.remove_vertex(ids[2]).unwrap();
        graph.add_edge(ids[1], ids[3], 2.0).unwrap();
        graph.add_edge(ids[3], ids[4], 1.0).unwrap();
        graph.add_edge(ids[4], ids[5], 3.0).unwrap();
        graph.add_edge(ids[1], ids[5], 1.0).unwrap();

        let result = prim(&graph);
        assert_eq!(result.len(), 3);
        assert_eq!(result.total_weight(), 4.0);
        assert_eq!(result.total_weight(), kruskal(&graph).total_weight());
    }

    #[test]
    fn test_empty_and_single_vertex() {
        let mut graph = Graph::new();
        assert!(kruskal(&graph).is_empty());
        assert!(prim(&graph).is_empty());

        graph.add_vertex();
        assert!(kruskal(&graph).is_empty());
        assert!(prim(&graph).is_empty());
    }

    #[test]
    fn test_random_graphs_agree() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let mut graph = Graph::new();
            let n = rng.gen_range(2..30);
            let ids = graph.add_vertices(n);
            // 不同的权重保证最小生成树唯一
            let mut next_weight = 1.0;
            for i in 1..n {
                let j = rng.gen_range(0..i);
                graph.add_edge(ids[i], ids[j], next_weight).unwrap();
                next_weight += 1.0;
            }
            for _ in 0..n * 2 {
                let a = ids[rng.gen_range(0..n)];
                let b = ids[rng.gen_range(0..n)];
                if a != b && !graph.contains_edge(a, b).unwrap() {
                    graph.add_edge(a, b, next_weight).unwrap();
                    next_weight += 1.0;
                }
            }
            // 打乱权重顺序
            let edges: Vec<_> = graph.edges().map(|e| (e.v1(), e.v2())).collect();
            for (a, b) in edges {
                let w = graph.edge_weight(a, b).unwrap() * 7.0 % 101.0 + rng.gen::<f64>() * 1e-3;
                graph.set_edge_weight(a, b, w).unwrap();
            }

            let k = kruskal(&graph);
            let p = prim(&graph);
            assert_eq!(k.len(), n - 1);
            assert_eq!(p.len(), n - 1);
            assert!((k.total_weight() - p.total_weight()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_engine_idempotent() {
        let graph = create_test_graph();
        let mut engine = SpanningTreeEngine::new();
        assert_eq!(engine.method(&graph), MstMethod::NotCalculated);

        let first = engine.run_kruskal(&graph).unwrap().clone();
        let second = engine.run_kruskal(&graph).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(engine.runs(), 1);
        assert_eq!(engine.method(&graph), MstMethod::Kruskal);

        // 换方法会重新计算
        engine.run_prim(&graph).unwrap();
        assert_eq!(engine.runs(), 2);
        assert_eq!(engine.method(&graph), MstMethod::Prim);
        engine.run_prim(&graph).unwrap();
        assert_eq!(engine.runs(), 2);
    }

    #[test]
    fn test_engine_invalidation() {
        let mut graph = create_test_graph();
        let mut engine = SpanningTreeEngine::new();
        assert_eq!(engine.run_kruskal(&graph).unwrap().total_weight(), 6.0);

        graph.set_edge_weight(VertexId(1), VertexId(2), 0.5).unwrap();
        assert_eq!(engine.method(&graph), MstMethod::NotCalculated);
        assert!(engine.cached(&graph).is_none());
        assert_eq!(engine.run_kruskal(&graph).unwrap().total_weight(), 3.5);
        assert_eq!(engine.runs(), 2);
    }

    #[test]
    fn test_not_calculated_is_unsupported() {
        let graph = create_test_graph();
        let mut engine = SpanningTreeEngine::new();
        let err = engine.run(&graph, MstMethod::NotCalculated).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("KRUSKAL".parse::<MstMethod>().unwrap(), MstMethod::Kruskal);
        assert_eq!("prim".parse::<MstMethod>().unwrap(), MstMethod::Prim);
        assert_eq!(
            "NOT_CALCULATED".parse::<MstMethod>().unwrap(),
            MstMethod::NotCalculated
        );
        assert_eq!(
            "BORUVKA".parse::<MstMethod>().unwrap_err().kind(),
            ErrorKind::Parse
        );
        assert_eq!(MstMethod::Prim.to_string(), "PRIM");
    }
}
