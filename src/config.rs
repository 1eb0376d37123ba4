//! 文档配置
//!
//! 控制持久化文档的编码、权重精度与文件扩展名

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 当前文档格式版本
pub const FORMAT_VERSION: u32 = 3;

/// 默认文件扩展名
pub const DEFAULT_EXTENSION: &str = ".graph.mmd";

/// 显示时默认的权重小数位数
pub const DEFAULT_PRECISION: usize = 6;

/// 文本编码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    /// UTF-16 大端序，带 BOM
    Utf16,
    /// UTF-8，不带 BOM
    Utf8,
}

/// 文档配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// 写入时使用的编码（读取时按 BOM 自动识别）
    pub encoding: TextEncoding,
    /// 写入的权重小数位数
    ///
    /// `None`（默认）写出可精确往返的最短表示；`Some(n)` 固定 n 位小数，
    /// 更多的小数位会被舍入，读回的权重可能与原值不同。
    pub precision: Option<usize>,
    /// 文件扩展名
    pub extension: String,
    /// 写入的格式版本
    pub format_version: u32,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::Utf16,
            precision: None,
            extension: DEFAULT_EXTENSION.to_string(),
            format_version: FORMAT_VERSION,
        }
    }
}

impl DocumentConfig {
    /// 设置编码
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// 设置精度
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    /// 设置扩展名
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// 文档标题对应的文件路径
    pub fn file_path(&self, dir: impl AsRef<Path>, title: &str) -> PathBuf {
        dir.as_ref().join(format!("{}{}", title, self.extension))
    }

    /// 由文件名推出文档标题（去掉扩展名）
    pub fn title_of(&self, path: impl AsRef<Path>) -> Option<String> {
        let file_name = path.as_ref().file_name()?.to_str()?;
        Some(
            file_name
                .strip_suffix(self.extension.as_str())
                .unwrap_or(file_name)
                .to_string(),
        )
    }
}
