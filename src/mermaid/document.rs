//! 持久化文档
//!
//! 文档由 YAML 风格的文档头和 Mermaid 图体组成：
//!
//! ```text
//! ---
//! title: <标题>
//! zad: <格式版本>
//! src: <源点 ID，0 表示未设置>
//! mst: <KRUSKAL|PRIM|NOT_CALCULATED>
//! ---
//! graph
//! 	1("a")
//! 	1 ---|1.000000| 2
//! ```
//!
//! 以 `%%` 开头的行为注释，文档头中以 `#` 开头的行为注释。

use super::encoding;
use super::render::{render_graph, unescape_label};
use crate::algorithm::{Analyzer, MstMethod};
use crate::config::{DocumentConfig, FORMAT_VERSION};
use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

const DELIMITER: &str = "---";

/// 文档头
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// 标题
    pub title: String,
    /// 格式版本
    pub format_version: u32,
    /// 最短路径源点
    pub source: Option<VertexId>,
    /// 已计算的最小生成树方法
    pub mst: MstMethod,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            title: String::new(),
            format_version: FORMAT_VERSION,
            source: None,
            mst: MstMethod::NotCalculated,
        }
    }
}

/// 文档
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub header: Header,
    pub graph: Graph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    Header,
    Graph,
    Vertices,
    Edges,
}

impl Document {
    /// 从分析器生成文档
    pub fn from_analyzer(analyzer: &Analyzer, title: impl Into<String>) -> Self {
        Self {
            header: Header {
                title: title.into(),
                format_version: FORMAT_VERSION,
                source: analyzer.source(),
                mst: analyzer.mst_method(),
            },
            graph: analyzer.graph().clone(),
        }
    }

    /// 渲染为文本
    ///
    /// `precision` 为 `None` 时权重按最短可往返表示写出，读回后数值不变。
    pub fn render(&self, precision: Option<usize>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", DELIMITER);
        let _ = writeln!(out, "title: {}", self.header.title);
        let _ = writeln!(out, "zad: {}", self.header.format_version);
        let _ = writeln!(
            out,
            "src: {}",
            self.header.source.map(|id| id.as_u64()).unwrap_or(0)
        );
        let _ = writeln!(out, "mst: {}", self.header.mst);
        let _ = writeln!(out, "{}", DELIMITER);
        out.push_str(&render_graph(&self.graph, precision));
        out
    }

    /// 解析文本
    ///
    /// 不符合语法的行记录警告后跳过；重复的顶点 ID、不存在的端点等语义错误直接返回。
    pub fn parse(text: &str) -> Result<Self> {
        let mut doc = Document::default();
        let mut stage = Stage::Start;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            match stage {
                Stage::Start => {
                    if is_comment(line) {
                        continue;
                    }
                    if line == DELIMITER {
                        stage = Stage::Header;
                    } else {
                        tracing::warn!(line = line_no, content = line, "unknown line");
                    }
                }
                Stage::Header => {
                    if line.starts_with('#') {
                        continue;
                    }
                    if line == DELIMITER {
                        stage = Stage::Graph;
                        continue;
                    }
                    match parse_property(line) {
                        Some((key, value)) => doc.header.apply(key, value)?,
                        None => {
                            tracing::warn!(line = line_no, content = line, "unknown line")
                        }
                    }
                }
                Stage::Graph => {
                    if is_comment(line) {
                        continue;
                    }
                    if line.starts_with("graph") {
                        stage = Stage::Vertices;
                    } else {
                        tracing::warn!(line = line_no, content = line, "unknown line");
                    }
                }
                Stage::Vertices => {
                    if is_comment(line) {
                        continue;
                    }
                    if let Some((v1, v2, weight)) = parse_edge(line) {
                        stage = Stage::Edges;
                        doc.graph.add_edge(v1, v2, weight)?;
                    } else if let Some((id, name)) = parse_vertex(line) {
                        doc.graph.insert_vertex(id, name)?;
                    } else {
                        tracing::warn!(line = line_no, content = line, "unknown line");
                    }
                }
                Stage::Edges => {
                    if is_comment(line) {
                        continue;
                    }
                    if let Some((id, name)) = parse_vertex(line) {
                        tracing::warn!(line = line_no, vertex = %id, "vertex found in edges section");
                        doc.graph.insert_vertex(id, name)?;
                    } else if let Some((v1, v2, weight)) = parse_edge(line) {
                        doc.graph.add_edge(v1, v2, weight)?;
                    } else {
                        tracing::warn!(line = line_no, content = line, "unknown line");
                    }
                }
            }
        }

        if stage == Stage::Header {
            return Err(Error::ParseError("文档头未结束".to_string()));
        }

        tracing::debug!(
            title = %doc.header.title,
            vertices = doc.graph.vertex_count(),
            edges = doc.graph.edge_count(),
            "document parsed"
        );
        Ok(doc)
    }

    /// 转换为分析器
    ///
    /// 恢复源点与最小生成树方法，并立即重新计算。
    pub fn into_analyzer(self) -> Result<Analyzer> {
        let Document { header, graph } = self;
        let mut analyzer = Analyzer::from_graph(graph);

        if let Some(source) = header.source {
            analyzer.set_source(source)?;
            analyzer.compute_shortest_paths()?;
        }
        if header.mst != MstMethod::NotCalculated {
            analyzer.calculate_mst(header.mst)?;
        }
        Ok(analyzer)
    }
}

impl Header {
    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "title" => self.title = value.to_string(),
            "zad" => {
                let version: u32 = value
                    .parse()
                    .map_err(|_| Error::ParseError(format!("无效的格式版本: {}", value)))?;
                if version < FORMAT_VERSION {
                    tracing::warn!(version, current = FORMAT_VERSION, "document format outdated");
                } else if version > FORMAT_VERSION {
                    tracing::warn!(version, current = FORMAT_VERSION, "newer document format detected");
                }
                self.format_version = version;
            }
            "src" => {
                let id: u64 = value
                    .parse()
                    .map_err(|_| Error::ParseError(format!("无效的源点: {}", value)))?;
                self.source = (id != 0).then_some(VertexId(id));
            }
            "mst" => self.mst = value.parse()?,
            _ => tracing::info!(key, value, "unknown property"),
        }
        Ok(())
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with("%%")
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `key: value`
fn parse_property(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let value = value.trim();
    if !is_word(key) || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// `id("name")`
fn parse_vertex(line: &str) -> Option<(VertexId, String)> {
    let (id, rest) = line.split_once('(')?;
    let name = rest.strip_prefix('"')?.strip_suffix("\")")?;
    if !is_digits(id) {
        return None;
    }
    Some((VertexId(id.parse().ok()?), unescape_label(name)))
}

/// `v1 ---|weight| v2`
fn parse_edge(line: &str) -> Option<(VertexId, VertexId, f64)> {
    let (v1, rest) = line.split_once(" ---|")?;
    let (weight, v2) = rest.split_once("| ")?;
    if !is_digits(v1) || !is_digits(v2) {
        return None;
    }
    let mut parts = weight.splitn(2, '.');
    let int_part = parts.next()?;
    let frac_ok = parts
        .next()
        .map_or(true, |frac| frac.bytes().all(|b| b.is_ascii_digit()));
    if !is_digits(int_part) || !frac_ok {
        return None;
    }
    Some((
        VertexId(v1.parse().ok()?),
        VertexId(v2.parse().ok()?),
        weight.parse().ok()?,
    ))
}

impl Analyzer {
    /// 保存到 `dir/<title><扩展名>`，返回写入的路径
    pub fn save(
        &self,
        dir: impl AsRef<Path>,
        title: &str,
        config: &DocumentConfig,
    ) -> Result<PathBuf> {
        let mut doc = Document::from_analyzer(self, title);
        doc.header.format_version = config.format_version;

        let path = config.file_path(dir, title);
        let bytes = encoding::encode(&doc.render(config.precision), config.encoding);
        fs::write(&path, bytes)?;

        tracing::debug!(path = %path.display(), "document saved");
        Ok(path)
    }

    /// 从文件加载
    pub fn load(path: impl AsRef<Path>, config: &DocumentConfig) -> Result<Analyzer> {
        let path = path.as_ref();
        let text = encoding::decode(&fs::read(path)?)?;
        let doc = Document::parse(&text)?;

        if config.title_of(path).as_deref() != Some(doc.header.title.as_str()) {
            tracing::warn!(
                title = %doc.header.title,
                path = %path.display(),
                "title does not match file name"
            );
        }
        doc.into_analyzer()
    }
}
