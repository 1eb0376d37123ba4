//! 顶点定义
//!
//! 顶点集合是顶点 ID 的唯一分配者

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 顶点 ID（从 1 开始单调分配，删除后不复用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u64);

impl VertexId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 顶点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    /// 顶点 ID
    id: VertexId,
    /// 显示名称
    name: String,
}

impl Vertex {
    /// 创建未命名顶点（名称为 ID 的十进制字符串）
    pub fn new(id: VertexId) -> Self {
        Self {
            id,
            name: id.to_string(),
        }
    }

    /// 创建命名顶点
    pub fn with_name(id: VertexId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取名称
    pub fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// 顶点集合
#[derive(Debug, Clone, Default)]
pub struct VertexSet {
    /// ID 到顶点的映射（按 ID 有序）
    vertices: BTreeMap<VertexId, Vertex>,
    /// 已分配过的最大 ID
    high_water: u64,
}

impl VertexSet {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> VertexId {
        self.high_water += 1;
        VertexId::new(self.high_water)
    }

    /// 创建未命名顶点
    pub fn create(&mut self) -> VertexId {
        let id = self.next_id();
        self.vertices.insert(id, Vertex::new(id));
        id
    }

    /// 创建命名顶点
    pub fn create_named(&mut self, name: impl Into<String>) -> VertexId {
        let id = self.next_id();
        self.vertices.insert(id, Vertex::with_name(id, name));
        id
    }

    /// 批量创建未命名顶点，按创建顺序返回 ID
    pub fn create_many(&mut self, n: usize) -> Vec<VertexId> {
        (0..n).map(|_| self.create()).collect()
    }

    /// 批量创建命名顶点，按参数顺序返回 ID
    pub fn create_many_named<I, S>(&mut self, names: I) -> Vec<VertexId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .map(|name| self.create_named(name))
            .collect()
    }

    /// 以指定 ID 插入顶点（用于从持久化文档重建图）
    ///
    /// 分配水位线同步提升到该 ID，之后自动分配的 ID 不会与之冲突。
    pub fn insert(&mut self, id: VertexId, name: impl Into<String>) -> Result<()> {
        if id.as_u64() == 0 {
            return Err(Error::InvalidArgument("顶点 ID 必须为正整数".to_string()));
        }
        if self.vertices.contains_key(&id) {
            return Err(Error::AlreadyExists(format!("顶点 {} 已存在", id)));
        }
        self.vertices.insert(id, Vertex::with_name(id, name));
        self.high_water = self.high_water.max(id.as_u64());
        Ok(())
    }

    /// 删除顶点记录（关联边须由调用方先行删除）
    pub fn remove(&mut self, id: VertexId) -> Result<Vertex> {
        self.vertices
            .remove(&id)
            .ok_or_else(|| Error::vertex_not_found(id))
    }

    /// 顶点是否存在
    pub fn exists(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// 获取顶点
    pub fn get(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// 获取名称
    pub fn name(&self, id: VertexId) -> Result<&str> {
        self.vertices
            .get(&id)
            .map(Vertex::name)
            .ok_or_else(|| Error::vertex_not_found(id))
    }

    /// 设置名称
    pub fn set_name(&mut self, id: VertexId, name: impl Into<String>) -> Result<()> {
        let vertex = self
            .vertices
            .get_mut(&id)
            .ok_or_else(|| Error::vertex_not_found(id))?;
        vertex.set_name(name.into());
        Ok(())
    }

    /// 所有顶点 ID（升序）
    pub fn ids(&self) -> Vec<VertexId> {
        self.vertices.keys().copied().collect()
    }

    /// 遍历顶点（按 ID 升序）
    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// 已分配过的最大 ID
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
