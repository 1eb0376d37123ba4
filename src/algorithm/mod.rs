//! 图算法模块
//!
//! 包含 Dijkstra 最短路径和 Kruskal / Prim 最小生成树

mod analyzer;
mod dense;
mod dijkstra;
mod mst;
mod union_find;

pub use analyzer::Analyzer;
pub use dense::DenseIndex;
pub use dijkstra::{dijkstra, PathEntry, ShortestPathEngine, ShortestPathResult};
pub use mst::{kruskal, prim, MstMethod, SpanningTreeEngine, SpanningTreeResult};
pub use union_find::DisjointSet;
