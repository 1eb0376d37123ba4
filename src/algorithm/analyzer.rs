//! 图分析器
//!
//! 将图与最短路径、最小生成树两个引擎组合在一起。图只能经由
//! `graph_mut()` 修改，修改推进版本号，两个引擎在下次查询时自动重算。

use super::dijkstra::{ShortestPathEngine, ShortestPathResult};
use super::mst::{MstMethod, SpanningTreeEngine, SpanningTreeResult};
use crate::error::Result;
use crate::graph::{Edge, Graph, VertexId};

/// 图分析器
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    graph: Graph,
    shortest: ShortestPathEngine,
    spanning: SpanningTreeEngine,
}

impl Analyzer {
    /// 创建空分析器
    pub fn new() -> Self {
        Self::default()
    }

    /// 基于已有的图创建
    pub fn from_graph(graph: Graph) -> Self {
        Self {
            graph,
            ..Self::default()
        }
    }

    /// 获取图
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// 获取可修改的图
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// 取出图
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    // ==================== 最短路径 ====================

    /// 设置源点
    pub fn set_source(&mut self, id: VertexId) -> Result<()> {
        self.shortest.set_source(&self.graph, id)
    }

    /// 获取源点
    pub fn source(&self) -> Option<VertexId> {
        self.shortest.source()
    }

    /// 清除源点
    pub fn clear_source(&mut self) {
        self.shortest.clear_source();
    }

    /// 计算最短路径
    pub fn compute_shortest_paths(&mut self) -> Result<&ShortestPathResult> {
        self.shortest.compute(&self.graph)
    }

    /// 获取到源点的距离
    pub fn distance(&mut self, id: VertexId) -> Result<f64> {
        self.shortest.distance(&self.graph, id)
    }

    /// 获取前驱
    pub fn predecessor(&mut self, id: VertexId) -> Result<Option<VertexId>> {
        self.shortest.predecessor(&self.graph, id)
    }

    /// 获取从源点到目标的路径
    pub fn path_to(&mut self, id: VertexId) -> Result<Option<Vec<VertexId>>> {
        self.shortest.path_to(&self.graph, id)
    }

    /// 最短路径引擎
    pub fn shortest_path_engine(&self) -> &ShortestPathEngine {
        &self.shortest
    }

    // ==================== 最小生成树 ====================

    /// 按指定方法计算最小生成树
    pub fn calculate_mst(&mut self, method: MstMethod) -> Result<&SpanningTreeResult> {
        self.spanning.run(&self.graph, method)
    }

    /// Kruskal
    pub fn run_kruskal(&mut self) -> Result<&SpanningTreeResult> {
        self.spanning.run_kruskal(&self.graph)
    }

    /// Prim
    pub fn run_prim(&mut self) -> Result<&SpanningTreeResult> {
        self.spanning.run_prim(&self.graph)
    }

    /// 最近一次有效结果所用的方法
    pub fn mst_method(&self) -> MstMethod {
        self.spanning.method(&self.graph)
    }

    /// 有效的最小生成树边（未计算或已过期时为 None）
    pub fn mst_edges(&self) -> Option<&[Edge]> {
        self.spanning
            .cached(&self.graph)
            .map(SpanningTreeResult::edges)
    }

    /// 最小生成树引擎
    pub fn spanning_tree_engine(&self) -> &SpanningTreeEngine {
        &self.spanning
    }
}

impl From<Graph> for Analyzer {
    fn from(graph: Graph) -> Self {
        Self::from_graph(graph)
    }
}
