//! 图数据结构
//!
//! 组合顶点集合与边集合；每次成功的修改都会推进版本号，
//! 派生结果（最短路径、最小生成树）据此判断缓存是否过期。

use super::edge::{Edge, EdgeSet};
use super::vertex::{Vertex, VertexId, VertexSet};
use crate::error::{Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

fn next_instance() -> u64 {
    NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed)
}

/// 图的修订标识：实例编号 + 版本号
///
/// 每个图实例（包括克隆出的副本）都有进程内唯一的实例编号，
/// 因此整体替换为另一个版本号相同的图时，修订标识也会不同。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Revision {
    instance: u64,
    version: u64,
}

/// 无向带权图
///
/// `clone()` 为深拷贝：修改副本不会影响原图，副本拥有新的实例编号。
#[derive(Debug)]
pub struct Graph {
    /// 实例编号
    instance: u64,
    /// 顶点集合
    vertices: VertexSet,
    /// 边集合
    edges: EdgeSet,
    /// 修改版本号
    version: u64,
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            instance: next_instance(),
            vertices: VertexSet::default(),
            edges: EdgeSet::default(),
            version: 0,
        }
    }
}

impl Clone for Graph {
    fn clone(&self) -> Self {
        Self {
            instance: next_instance(),
            vertices: self.vertices.clone(),
            edges: self.edges.clone(),
            version: self.version,
        }
    }
}

impl Graph {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前版本号（每次成功修改后递增）
    pub fn version(&self) -> u64 {
        self.version
    }

    /// 当前修订标识，派生结果以此作为缓存键
    pub fn revision(&self) -> Revision {
        Revision {
            instance: self.instance,
            version: self.version,
        }
    }

    fn touch(&mut self) {
        self.version += 1;
    }

    // ==================== 顶点操作 ====================

    /// 添加未命名顶点
    pub fn add_vertex(&mut self) -> VertexId {
        let id = self.vertices.create();
        self.touch();
        id
    }

    /// 添加命名顶点
    pub fn add_named_vertex(&mut self, name: impl Into<String>) -> VertexId {
        let id = self.vertices.create_named(name);
        self.touch();
        id
    }

    /// 批量添加未命名顶点
    pub fn add_vertices(&mut self, n: usize) -> Vec<VertexId> {
        let ids = self.vertices.create_many(n);
        self.touch();
        ids
    }

    /// 批量添加命名顶点
    pub fn add_named_vertices<I, S>(&mut self, names: I) -> Vec<VertexId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids = self.vertices.create_many_named(names);
        self.touch();
        ids
    }

    /// 以指定 ID 插入顶点（持久化文档重建用）
    pub fn insert_vertex(&mut self, id: VertexId, name: impl Into<String>) -> Result<()> {
        self.vertices.insert(id, name)?;
        self.touch();
        Ok(())
    }

    /// 删除顶点：先删除所有关联边，再删除顶点本身
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex> {
        self.edges.remove_incident(&self.vertices, id)?;
        let vertex = self.vertices.remove(id)?;
        self.touch();
        Ok(vertex)
    }

    /// 批量删除顶点
    ///
    /// 先校验全部 ID，任一不存在则整体拒绝。
    pub fn remove_vertices(&mut self, ids: &[VertexId]) -> Result<()> {
        if let Some(&missing) = ids.iter().find(|&&id| !self.vertices.exists(id)) {
            return Err(Error::vertex_not_found(missing));
        }
        for (i, &id) in ids.iter().enumerate() {
            // 重复 ID 只删除一次
            if ids[..i].contains(&id) {
                continue;
            }
            self.remove_vertex(id)?;
        }
        Ok(())
    }

    /// 顶点是否存在
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.exists(id)
    }

    /// 获取顶点名称
    pub fn vertex_name(&self, id: VertexId) -> Result<&str> {
        self.vertices.name(id)
    }

    /// 修改顶点名称
    pub fn set_vertex_name(&mut self, id: VertexId, name: impl Into<String>) -> Result<()> {
        self.vertices.set_name(id, name)?;
        self.touch();
        Ok(())
    }

    /// 所有顶点 ID（升序）
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices.ids()
    }

    /// 遍历顶点
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    // ==================== 边操作 ====================

    /// 添加边
    pub fn add_edge(&mut self, v1: VertexId, v2: VertexId, weight: f64) -> Result<()> {
        self.edges.create(&self.vertices, v1, v2, weight)?;
        self.touch();
        Ok(())
    }

    /// 删除边
    pub fn remove_edge(&mut self, v1: VertexId, v2: VertexId) -> Result<Edge> {
        let edge = self.edges.remove(v1, v2)?;
        self.touch();
        Ok(edge)
    }

    /// 删除顶点的所有关联边
    pub fn remove_all_edges(&mut self, id: VertexId) -> Result<Vec<Edge>> {
        let removed = self.edges.remove_incident(&self.vertices, id)?;
        self.touch();
        Ok(removed)
    }

    /// 删除多个顶点的所有关联边（先校验全部 ID）
    pub fn remove_all_edges_of(&mut self, ids: &[VertexId]) -> Result<Vec<Edge>> {
        if let Some(&missing) = ids.iter().find(|&&id| !self.vertices.exists(id)) {
            return Err(Error::vertex_not_found(missing));
        }
        let mut removed = Vec::new();
        for &id in ids {
            removed.extend(self.edges.remove_incident(&self.vertices, id)?);
        }
        self.touch();
        Ok(removed)
    }

    /// 两点之间是否有边
    pub fn contains_edge(&self, v1: VertexId, v2: VertexId) -> Result<bool> {
        self.edges.exists(&self.vertices, v1, v2)
    }

    /// 顶点是否有任意关联边
    pub fn has_any_edge(&self, id: VertexId) -> Result<bool> {
        self.edges.exists_any(&self.vertices, id)
    }

    /// 获取边权重
    pub fn edge_weight(&self, v1: VertexId, v2: VertexId) -> Result<f64> {
        self.edges.weight(v1, v2)
    }

    /// 修改边权重
    pub fn set_edge_weight(&mut self, v1: VertexId, v2: VertexId, weight: f64) -> Result<()> {
        self.edges.set_weight(v1, v2, weight)?;
        self.touch();
        Ok(())
    }

    /// 获取边
    pub fn edge(&self, v1: VertexId, v2: VertexId) -> Option<&Edge> {
        self.edges.get(v1, v2)
    }

    /// 遍历所有边
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ==================== 邻居查询 ====================

    /// 获取邻居及边权重
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.edges.neighbors(id)
    }

    /// 获取顶点的度
    pub fn degree(&self, id: VertexId) -> usize {
        self.edges.degree(id)
    }
}
