//! 边定义
//!
//! 无向带权边；任意一对顶点之间至多一条边

use crate::error::{Error, Result};
use crate::graph::vertex::{VertexId, VertexSet};
use crate::types::Weight;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// 边键（无序顶点对，规范化为 小 ID 在前）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey(VertexId, VertexId);

impl EdgeKey {
    pub fn new(v1: VertexId, v2: VertexId) -> Self {
        if v1 <= v2 {
            Self(v1, v2)
        } else {
            Self(v2, v1)
        }
    }

    /// 较小的端点
    pub fn low(&self) -> VertexId {
        self.0
    }

    /// 较大的端点
    pub fn high(&self) -> VertexId {
        self.1
    }
}

/// 边
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// 第一个端点（保留创建时的顺序）
    v1: VertexId,
    /// 第二个端点
    v2: VertexId,
    /// 权重
    weight: f64,
}

impl Edge {
    /// 创建新边
    pub fn new(v1: VertexId, v2: VertexId, weight: f64) -> Self {
        Self { v1, v2, weight }
    }

    pub fn v1(&self) -> VertexId {
        self.v1
    }

    pub fn v2(&self) -> VertexId {
        self.v2
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// 规范化的边键
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.v1, self.v2)
    }

    /// 边是否以该顶点为端点
    pub fn touches(&self, id: VertexId) -> bool {
        self.v1 == id || self.v2 == id
    }

    /// 边是否连接这两个顶点（不区分方向）
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        self.key() == EdgeKey::new(a, b)
    }

    /// 给定一个端点，返回另一个端点
    pub fn other(&self, id: VertexId) -> Option<VertexId> {
        if self.v1 == id {
            Some(self.v2)
        } else if self.v2 == id {
            Some(self.v1)
        } else {
            None
        }
    }
}

fn check_weight(weight: f64) -> Result<()> {
    if !Weight::new(weight).is_valid() {
        return Err(Error::InvalidArgument(format!(
            "边权重必须为有限非负数, 实际为 {}",
            weight
        )));
    }
    Ok(())
}

/// 边集合
///
/// 端点合法性依赖所属图的顶点集合，因此校验类操作都需要传入 `VertexSet`。
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    /// 边键到边的映射（保持插入顺序）
    edges: IndexMap<EdgeKey, Edge>,
    /// 邻接表
    adjacency: HashMap<VertexId, BTreeSet<VertexId>>,
}

impl EdgeSet {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    fn require_vertex(vertices: &VertexSet, id: VertexId) -> Result<()> {
        if vertices.exists(id) {
            Ok(())
        } else {
            Err(Error::vertex_not_found(id))
        }
    }

    /// 创建边
    pub fn create(
        &mut self,
        vertices: &VertexSet,
        v1: VertexId,
        v2: VertexId,
        weight: f64,
    ) -> Result<()> {
        Self::require_vertex(vertices, v1)?;
        Self::require_vertex(vertices, v2)?;

        let key = EdgeKey::new(v1, v2);
        if self.edges.contains_key(&key) {
            return Err(Error::AlreadyExists(format!(
                "顶点 {} 与 {} 之间的边已存在",
                v1, v2
            )));
        }
        check_weight(weight)?;

        self.edges.insert(key, Edge::new(v1, v2, weight));
        self.adjacency.entry(v1).or_default().insert(v2);
        self.adjacency.entry(v2).or_default().insert(v1);
        Ok(())
    }

    fn unlink(&mut self, a: VertexId, b: VertexId) {
        for (from, to) in [(a, b), (b, a)] {
            if let Some(set) = self.adjacency.get_mut(&from) {
                set.remove(&to);
                if set.is_empty() {
                    self.adjacency.remove(&from);
                }
            }
        }
    }

    /// 删除边
    pub fn remove(&mut self, v1: VertexId, v2: VertexId) -> Result<Edge> {
        let edge = self
            .edges
            .shift_remove(&EdgeKey::new(v1, v2))
            .ok_or_else(|| Error::edge_not_found(v1, v2))?;
        self.unlink(edge.v1, edge.v2);
        Ok(edge)
    }

    /// 删除与顶点关联的所有边，返回被删除的边
    pub fn remove_incident(&mut self, vertices: &VertexSet, id: VertexId) -> Result<Vec<Edge>> {
        Self::require_vertex(vertices, id)?;

        let neighbors: Vec<VertexId> = self
            .adjacency
            .get(&id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();

        let mut removed = Vec::with_capacity(neighbors.len());
        for other in neighbors {
            removed.push(self.remove(id, other)?);
        }
        Ok(removed)
    }

    /// 两点之间是否有边
    pub fn exists(&self, vertices: &VertexSet, v1: VertexId, v2: VertexId) -> Result<bool> {
        Self::require_vertex(vertices, v1)?;
        Self::require_vertex(vertices, v2)?;
        Ok(self.edges.contains_key(&EdgeKey::new(v1, v2)))
    }

    /// 顶点是否有任意关联边
    pub fn exists_any(&self, vertices: &VertexSet, id: VertexId) -> Result<bool> {
        Self::require_vertex(vertices, id)?;
        Ok(self.adjacency.contains_key(&id))
    }

    /// 获取边
    pub fn get(&self, v1: VertexId, v2: VertexId) -> Option<&Edge> {
        self.edges.get(&EdgeKey::new(v1, v2))
    }

    /// 获取权重
    pub fn weight(&self, v1: VertexId, v2: VertexId) -> Result<f64> {
        self.get(v1, v2)
            .map(Edge::weight)
            .ok_or_else(|| Error::edge_not_found(v1, v2))
    }

    /// 修改权重（原地修改，不改变边的身份）
    pub fn set_weight(&mut self, v1: VertexId, v2: VertexId, weight: f64) -> Result<()> {
        let edge = self
            .edges
            .get_mut(&EdgeKey::new(v1, v2))
            .ok_or_else(|| Error::edge_not_found(v1, v2))?;
        check_weight(weight)?;
        edge.weight = weight;
        Ok(())
    }

    /// 获取邻居及对应边权重
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.adjacency
            .get(&id)
            .into_iter()
            .flat_map(|set| set.iter())
            .filter_map(move |&other| self.get(id, other).map(|e| (other, e.weight)))
    }

    /// 顶点的度
    pub fn degree(&self, id: VertexId) -> usize {
        self.adjacency.get(&id).map(|set| set.len()).unwrap_or(0)
    }

    /// 遍历所有边（插入顺序）
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn vertices(n: usize) -> VertexSet {
        let mut set = VertexSet::new();
        set.create_many(n);
        set
    }

    #[test]
    fn test_edge_symmetry() {
        let vs = vertices(3);
        let mut es = EdgeSet::new();
        es.create(&vs, VertexId(1), VertexId(2), 2.5).unwrap();

        assert!(es.exists(&vs, VertexId(1), VertexId(2)).unwrap());
        assert!(es.exists(&vs, VertexId(2), VertexId(1)).unwrap());
        assert_eq!(es.weight(VertexId(2), VertexId(1)).unwrap(), 2.5);
        assert!(!es.exists(&vs, VertexId(1), VertexId(3)).unwrap());
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let vs = vertices(2);
        let mut es = EdgeSet::new();
        es.create(&vs, VertexId(1), VertexId(2), 1.0).unwrap();

        let err = es.create(&vs, VertexId(2), VertexId(1), 5.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(es.weight(VertexId(1), VertexId(2)).unwrap(), 1.0);
        assert_eq!(es.len(), 1);
    }

    #[test]
    fn test_missing_endpoint_rejected() {
        let vs = vertices(1);
        let mut es = EdgeSet::new();

        let err = es.create(&vs, VertexId(1), VertexId(9), 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(es.is_empty());
        assert_eq!(es.degree(VertexId(1)), 0);
    }

    #[test]
    fn test_invalid_weight_rejected() {
        let vs = vertices(2);
        let mut es = EdgeSet::new();
        let err = es.create(&vs, VertexId(1), VertexId(2), -1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        es.create(&vs, VertexId(1), VertexId(2), 1.0).unwrap();
        let err = es.set_weight(VertexId(1), VertexId(2), f64::NAN).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = es.set_weight(VertexId(1), VertexId(2), f64::INFINITY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(es.weight(VertexId(1), VertexId(2)).unwrap(), 1.0);
    }

    #[test]
    fn test_set_weight_in_place() {
        let vs = vertices(3);
        let mut es = EdgeSet::new();
        es.create(&vs, VertexId(1), VertexId(2), 1.0).unwrap();
        es.create(&vs, VertexId(2), VertexId(3), 1.0).unwrap();

        es.set_weight(VertexId(2), VertexId(1), 4.0).unwrap();
        let first = es.iter().next().unwrap();
        assert_eq!((first.v1(), first.v2(), first.weight()), (VertexId(1), VertexId(2), 4.0));

        let err = es.set_weight(VertexId(1), VertexId(3), 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_remove_incident() {
        let vs = vertices(4);
        let mut es = EdgeSet::new();
        es.create(&vs, VertexId(1), VertexId(2), 1.0).unwrap();
        es.create(&vs, VertexId(3), VertexId(1), 1.0).unwrap();
        es.create(&vs, VertexId(3), VertexId(4), 1.0).unwrap();

        let removed = es.remove_incident(&vs, VertexId(1)).unwrap();
        assert_eq!(removed.len(), 2);
        assert!(!es.exists_any(&vs, VertexId(1)).unwrap());
        assert!(!es.exists_any(&vs, VertexId(2)).unwrap());
        assert!(es.exists(&vs, VertexId(3), VertexId(4)).unwrap());

        // 没有边时为空操作
        assert!(es.remove_incident(&vs, VertexId(2)).unwrap().is_empty());
        assert_eq!(
            es.remove_incident(&vs, VertexId(9)).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_remove_missing_edge() {
        let vs = vertices(2);
        let mut es = EdgeSet::new();
        assert_eq!(
            es.remove(VertexId(1), VertexId(2)).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            es.exists_any(&vs, VertexId(5)).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_neighbors() {
        let vs = vertices(3);
        let mut es = EdgeSet::new();
        es.create(&vs, VertexId(2), VertexId(1), 1.5).unwrap();
        es.create(&vs, VertexId(2), VertexId(3), 0.5).unwrap();

        let neighbors: Vec<_> = es.neighbors(VertexId(2)).collect();
        assert_eq!(neighbors, vec![(VertexId(1), 1.5), (VertexId(3), 0.5)]);
        assert_eq!(es.neighbors(VertexId(9)).count(), 0);
    }

    #[test]
    fn test_edge_other() {
        let e = Edge::new(VertexId(4), VertexId(2), 1.0);
        assert_eq!(e.other(VertexId(4)), Some(VertexId(2)));
        assert_eq!(e.other(VertexId(2)), Some(VertexId(4)));
        assert_eq!(e.other(VertexId(1)), None);
        assert_eq!(e.key().low(), VertexId(2));
        assert!(e.connects(VertexId(2), VertexId(4)));
    }
}
