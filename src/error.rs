//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// 错误类别（调用方按类别匹配，不关心具体消息）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InvalidState,
    Unsupported,
    InvalidArgument,
    Parse,
    Io,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("未找到: {0}")]
    NotFound(String),

    #[error("已存在: {0}")]
    AlreadyExists(String),

    #[error("状态无效: {0}")]
    InvalidState(String),

    #[error("不支持的操作: {0}")]
    Unsupported(String),

    #[error("参数无效: {0}")]
    InvalidArgument(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// 获取错误类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Error::InvalidState(_) => ErrorKind::InvalidState,
            Error::Unsupported(_) => ErrorKind::Unsupported,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::ParseError(_) => ErrorKind::Parse,
            Error::IoError(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn vertex_not_found(id: impl std::fmt::Display) -> Self {
        Error::NotFound(format!("顶点 {} 不存在", id))
    }

    pub(crate) fn edge_not_found(v1: impl std::fmt::Display, v2: impl std::fmt::Display) -> Self {
        Error::NotFound(format!("顶点 {} 与 {} 之间的边不存在", v1, v2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::vertex_not_found(3).kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::AlreadyExists("x".to_string()).kind(),
            ErrorKind::AlreadyExists
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(Error::from(io).kind(), ErrorKind::Io);
    }

    #[test]
    fn test_error_message() {
        let err = Error::edge_not_found(1, 2);
        assert_eq!(err.to_string(), "未找到: 顶点 1 与 2 之间的边不存在");
    }
}
