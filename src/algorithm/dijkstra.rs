//! Dijkstra 单源最短路径
//!
//! 结果按图的修订标识缓存：图被修改、被整体替换或源点变化后，下次查询时重新计算。
//! 代价相同的顶点按 ID 从小到大出队，保证结果确定。

use super::dense::DenseIndex;
use crate::error::{Error, Result};
use crate::graph::{Graph, Revision, VertexId};
use crate::types::Weight;
use priority_queue::PriorityQueue;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// 单个顶点的最短路径信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEntry {
    /// 顶点 ID
    pub id: VertexId,
    /// 到源点的距离（不可达为正无穷）
    pub distance: f64,
    /// 前驱顶点（源点和不可达顶点为 None）
    pub predecessor: Option<VertexId>,
}

/// 最短路径结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPathResult {
    /// 源点
    source: VertexId,
    /// 每个顶点一条记录，按 ID 升序
    entries: Vec<PathEntry>,
}

impl ShortestPathResult {
    /// 获取源点
    pub fn source(&self) -> VertexId {
        self.source
    }

    fn entry(&self, id: VertexId) -> Result<&PathEntry> {
        self.entries
            .binary_search_by_key(&id, |e| e.id)
            .map(|i| &self.entries[i])
            .map_err(|_| Error::vertex_not_found(id))
    }

    /// 获取距离
    pub fn distance(&self, id: VertexId) -> Result<f64> {
        self.entry(id).map(|e| e.distance)
    }

    /// 获取前驱
    pub fn predecessor(&self, id: VertexId) -> Result<Option<VertexId>> {
        self.entry(id).map(|e| e.predecessor)
    }

    /// 顶点是否可达
    pub fn is_reachable(&self, id: VertexId) -> Result<bool> {
        self.entry(id).map(|e| e.distance.is_finite())
    }

    /// 从源点到目标的顶点序列；不可达时返回 None
    pub fn path_to(&self, id: VertexId) -> Result<Option<Vec<VertexId>>> {
        if !self.is_reachable(id)? {
            return Ok(None);
        }

        let mut path = vec![id];
        let mut current = id;
        while let Some(prev) = self.predecessor(current)? {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Ok(Some(path))
    }

    /// 遍历所有记录
    pub fn iter(&self) -> impl Iterator<Item = &PathEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 运行 Dijkstra 算法
pub fn dijkstra(graph: &Graph, source: VertexId) -> Result<ShortestPathResult> {
    let index = DenseIndex::new(graph);
    let start = index
        .position(source)
        .ok_or_else(|| Error::vertex_not_found(source))?;

    let n = index.len();
    let mut distance = vec![Weight::INFINITY; n];
    let mut predecessor: Vec<Option<VertexId>> = vec![None; n];
    let mut settled = vec![false; n];

    // 优先级取反：代价小者优先，代价相同时 ID 小者优先
    let mut queue: PriorityQueue<usize, Reverse<(Weight, VertexId)>> = PriorityQueue::new();
    distance[start] = Weight::ZERO;
    queue.push(start, Reverse((Weight::ZERO, source)));

    while let Some((u, Reverse((dist_u, u_id)))) = queue.pop() {
        settled[u] = true;

        for (v_id, w) in graph.neighbors(u_id) {
            let Some(v) = index.position(v_id) else {
                continue;
            };
            if settled[v] {
                continue;
            }

            let candidate = dist_u + Weight::new(w);
            if candidate < distance[v] {
                distance[v] = candidate;
                predecessor[v] = Some(u_id);
                queue.push_increase(v, Reverse((candidate, v_id)));
            }
        }
    }

    let entries = index
        .ids()
        .iter()
        .enumerate()
        .map(|(i, &id)| PathEntry {
            id,
            distance: distance[i].value(),
            predecessor: predecessor[i],
        })
        .collect();

    Ok(ShortestPathResult { source, entries })
}

#[derive(Debug, Clone)]
struct Cached {
    revision: Revision,
    result: ShortestPathResult,
}

/// 最短路径引擎
///
/// 持有源点与缓存结果；缓存记录计算时图的修订标识。
/// 同一个引擎实例只应与同一个图配合使用。
#[derive(Debug, Clone, Default)]
pub struct ShortestPathEngine {
    source: Option<VertexId>,
    cache: Option<Cached>,
    runs: u64,
}

impl ShortestPathEngine {
    /// 创建引擎（未设置源点）
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取源点
    pub fn source(&self) -> Option<VertexId> {
        self.source
    }

    /// 设置源点，并使缓存失效
    pub fn set_source(&mut self, graph: &Graph, id: VertexId) -> Result<()> {
        if !graph.contains_vertex(id) {
            return Err(Error::vertex_not_found(id));
        }
        self.source = Some(id);
        self.cache = None;
        Ok(())
    }

    /// 清除源点
    pub fn clear_source(&mut self) {
        self.source = None;
        self.cache = None;
    }

    /// 缓存是否与图的当前状态一致
    pub fn is_fresh(&self, graph: &Graph) -> bool {
        match (&self.cache, self.source) {
            (Some(cached), Some(source)) => {
                cached.revision == graph.revision() && cached.result.source == source
            }
            _ => false,
        }
    }

    /// 计算最短路径；缓存有效时直接返回
    pub fn compute(&mut self, graph: &Graph) -> Result<&ShortestPathResult> {
        let source = self
            .source
            .ok_or_else(|| Error::InvalidState("未设置源点".to_string()))?;

        if self.is_fresh(graph) {
            tracing::trace!(source = %source, version = graph.version(), "dijkstra cache hit");
        } else {
            tracing::debug!(
                source = %source,
                vertices = graph.vertex_count(),
                edges = graph.edge_count(),
                version = graph.version(),
                "running dijkstra"
            );
            let result = dijkstra(graph, source)?;
            self.cache = Some(Cached {
                revision: graph.revision(),
                result,
            });
            self.runs += 1;
        }

        self.cache
            .as_ref()
            .map(|cached| &cached.result)
            .ok_or_else(|| Error::InvalidState("最短路径结果缺失".to_string()))
    }

    /// 获取距离（必要时先计算）
    pub fn distance(&mut self, graph: &Graph, id: VertexId) -> Result<f64> {
        self.compute(graph)?.distance(id)
    }

    /// 获取前驱（必要时先计算）
    pub fn predecessor(&mut self, graph: &Graph, id: VertexId) -> Result<Option<VertexId>> {
        self.compute(graph)?.predecessor(id)
    }

    /// 获取从源点出发的路径（必要时先计算）
    pub fn path_to(&mut self, graph: &Graph, id: VertexId) -> Result<Option<Vec<VertexId>>> {
        self.compute(graph)?.path_to(id)
    }

    /// 已缓存且未过期的结果
    pub fn cached(&self, graph: &Graph) -> Option<&ShortestPathResult> {
        if self.is_fresh(graph) {
            self.cache.as_ref().map(|cached| &cached.result)
        } else {
            None
        }
    }

    /// 实际执行计算的次数
    pub fn runs(&self) -> u64 {
        self.runs
    }
}
