//! Mermaid 流程图渲染与文档持久化

pub mod document;
pub mod encoding;
pub mod render;

pub use document::{Document, Header};
pub use render::{
    render_dijkstra, render_edges, render_graph, render_mst, render_vertices, View,
};
