//! WeightGraph - 无向带权图分析库
//!
//! 面向教学与小规模分析场景的无向带权图，支持：
//! - 顶点与边的增删改查（顶点 ID 单调分配、永不复用）
//! - Dijkstra 单源最短路径
//! - Kruskal / Prim 最小生成树（非连通图得到生成森林）
//! - Mermaid 流程图渲染与 `.graph.mmd` 文档读写
//!
//! 算法结果按图的修改版本号缓存，图被修改后自动失效。

pub mod algorithm;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod mermaid;
pub mod types;

// 重导出常用类型
pub use algorithm::{Analyzer, MstMethod, ShortestPathResult, SpanningTreeResult};
pub use config::{DocumentConfig, TextEncoding};
pub use error::{Error, ErrorKind, Result};
pub use graph::{Edge, EdgeKey, Graph, Revision, Vertex, VertexId};
pub use mermaid::{Document, View};
pub use types::Weight;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
