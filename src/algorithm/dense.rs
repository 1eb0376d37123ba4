//! 稠密索引
//!
//! 顶点 ID 删除后不再连续，算法内部用 0..n 的稠密下标寻址数组。

use crate::graph::{Graph, VertexId};
use std::collections::HashMap;

/// 顶点 ID 与稠密下标的双向映射
#[derive(Debug, Clone)]
pub struct DenseIndex {
    ids: Vec<VertexId>,
    positions: HashMap<VertexId, usize>,
}

impl DenseIndex {
    /// 按 ID 升序为图中所有顶点编号
    pub fn new(graph: &Graph) -> Self {
        let ids = graph.vertex_ids();
        let positions = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        Self { ids, positions }
    }

    /// ID 对应的下标
    pub fn position(&self, id: VertexId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// 下标对应的 ID
    pub fn id(&self, position: usize) -> VertexId {
        self.ids[position]
    }

    pub fn ids(&self) -> &[VertexId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_index_after_removal() {
        let mut graph = Graph::new();
        let ids = graph.add_vertices(5);
        graph.remove_vertex(ids[1]).unwrap();
        graph.remove_vertex(ids[3]).unwrap();

        let index = DenseIndex::new(&graph);
        assert_eq!(index.len(), 3);
        assert_eq!(index.position(VertexId(1)), Some(0));
        assert_eq!(index.position(VertexId(3)), Some(1));
        assert_eq!(index.position(VertexId(5)), Some(2));
        assert_eq!(index.position(VertexId(2)), None);
        assert_eq!(index.id(2), VertexId(5));
    }
}
