//! Mermaid 渲染
//!
//! 顶点行 `id("name")`，边行 `v1 ---|weight| v2`，最短路径树边用 `===` 加粗。
//! 名称中的换行、引号和 `#` 写成 Mermaid 实体码（如 `#10;`），保证一个顶点只占一行。

use crate::algorithm::{Analyzer, ShortestPathResult, SpanningTreeResult};
use crate::error::{Error, Result};
use crate::graph::{Edge, EdgeKey, Graph, Vertex};
use std::collections::HashSet;
use std::fmt::Write;

/// 渲染视图
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// 仅顶点
    Vertices,
    /// 仅边
    Edges,
    /// 完整的图
    Graph,
    /// 最短路径结果
    Dijkstra,
    /// 最小生成树结果
    Mst,
}

/// 将名称转义为可放入 `("...")` 的单行标签
pub fn escape_label(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '\n' | '\r' | '"' | '#' => {
                let _ = write!(out, "#{};", u32::from(c));
            }
            _ => out.push(c),
        }
    }
    out
}

/// 还原 [`escape_label`] 写入的实体码；无法识别的 `#` 原样保留
pub fn unescape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut rest = label;
    while let Some(pos) = rest.find('#') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];
        let decoded = tail.split_once(';').and_then(|(code, after)| {
            let valid = !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit());
            valid
                .then(|| code.parse::<u32>().ok().and_then(char::from_u32))
                .flatten()
                .map(|c| (c, after))
        });
        match decoded {
            Some((c, after)) => {
                out.push(c);
                rest = after;
            }
            None => {
                out.push('#');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// 顶点行
pub fn vertex_line(vertex: &Vertex) -> String {
    format!("{}(\"{}\")", vertex.id(), escape_label(vertex.name()))
}

/// 格式化权重：`None` 输出可精确往返的最短表示，`Some(n)` 固定 n 位小数
pub fn format_weight(weight: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, weight),
        None => weight.to_string(),
    }
}

/// 边行
pub fn edge_line(edge: &Edge, precision: Option<usize>) -> String {
    format!(
        "{} ---|{}| {}",
        edge.v1(),
        format_weight(edge.weight(), precision),
        edge.v2()
    )
}

/// 渲染所有顶点
pub fn render_vertices(graph: &Graph) -> String {
    let mut out = String::new();
    for vertex in graph.vertices() {
        let _ = writeln!(out, "\t{}", vertex_line(vertex));
    }
    out
}

/// 渲染所有边
pub fn render_edges(graph: &Graph, precision: Option<usize>) -> String {
    let mut out = String::new();
    for edge in graph.edges() {
        let _ = writeln!(out, "\t{}", edge_line(edge, precision));
    }
    out
}

/// 渲染完整的图
pub fn render_graph(graph: &Graph, precision: Option<usize>) -> String {
    format!(
        "graph\n{}{}",
        render_vertices(graph),
        render_edges(graph, precision)
    )
}

/// 渲染最短路径结果
///
/// 顶点名称前附上距离；每个顶点到其前驱的边加粗，其余边照常输出。
pub fn render_dijkstra(graph: &Graph, result: &ShortestPathResult, precision: usize) -> String {
    let mut vertices = String::new();
    let mut tree_edges = String::new();
    let mut used: HashSet<EdgeKey> = HashSet::new();

    for vertex in graph.vertices() {
        let distance = result.distance(vertex.id()).unwrap_or(f64::INFINITY);
        let _ = writeln!(
            vertices,
            "\t{}(\"({:.*}) {}\")",
            vertex.id(),
            precision,
            distance,
            escape_label(vertex.name())
        );

        if let Ok(Some(prev)) = result.predecessor(vertex.id()) {
            if let Some(edge) = graph.edge(vertex.id(), prev) {
                let _ = writeln!(
                    tree_edges,
                    "\t{} ===|{:.*}| {}",
                    vertex.id(),
                    precision,
                    edge.weight(),
                    prev
                );
                used.insert(edge.key());
            }
        }
    }

    let mut rest = String::new();
    for edge in graph.edges().filter(|e| !used.contains(&e.key())) {
        let _ = writeln!(rest, "\t{}", edge_line(edge, Some(precision)));
    }

    format!("graph\n{}{}{}", vertices, tree_edges, rest)
}

/// 渲染最小生成树结果
pub fn render_mst(graph: &Graph, result: &SpanningTreeResult, precision: usize) -> String {
    let mut out = format!("graph\n{}", render_vertices(graph));
    for edge in result.edges() {
        let _ = writeln!(out, "\t{}", edge_line(edge, Some(precision)));
    }
    out
}

impl Analyzer {
    /// 按视图渲染
    ///
    /// `Dijkstra` 视图在需要时计算最短路径；`Mst` 视图要求已有有效的最小生成树。
    pub fn render(&mut self, view: View, precision: usize) -> Result<String> {
        match view {
            View::Vertices => Ok(render_vertices(self.graph())),
            View::Edges => Ok(render_edges(self.graph(), Some(precision))),
            View::Graph => Ok(render_graph(self.graph(), Some(precision))),
            View::Dijkstra => {
                let result = self.compute_shortest_paths()?.clone();
                Ok(render_dijkstra(self.graph(), &result, precision))
            }
            View::Mst => {
                let result = self
                    .spanning_tree_engine()
                    .cached(self.graph())
                    .ok_or_else(|| {
                        Error::InvalidState("最小生成树尚未计算，请先指定计算方法".to_string())
                    })?;
                Ok(render_mst(self.graph(), result, precision))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::graph::VertexId;

    fn create_analyzer() -> Analyzer {
        let mut graph = Graph::new();
        graph.add_named_vertices(["a", "b", "c"]);
        graph.add_edge(VertexId(1), VertexId(2), 1.0).unwrap();
        graph.add_edge(VertexId(2), VertexId(3), 2.0).unwrap();
        graph.add_edge(VertexId(1), VertexId(3), 5.0).unwrap();
        Analyzer::from_graph(graph)
    }

    #[test]
    fn test_render_graph() {
        let analyzer = create_analyzer();
        let text = render_graph(analyzer.graph(), Some(1));
        assert_eq!(
            text,
            "graph\n\t1(\"a\")\n\t2(\"b\")\n\t3(\"c\")\n\t1 ---|1.0| 2\n\t2 ---|2.0| 3\n\t1 ---|5.0| 3\n"
        );
    }

    #[test]
    fn test_render_dijkstra() {
        let mut analyzer = create_analyzer();
        analyzer.set_source(VertexId(1)).unwrap();
        let text = analyzer.render(View::Dijkstra, 0).unwrap();

        assert!(text.contains("\t3(\"(3) c\")\n"));
        assert!(text.contains("\t2 ===|1| 1\n"));
        assert!(text.contains("\t3 ===|2| 2\n"));
        assert!(text.ends_with("\t1 ---|5| 3\n"));
    }

    #[test]
    fn test_render_mst_requires_calculation() {
        let mut analyzer = create_analyzer();
        let err = analyzer.render(View::Mst, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        analyzer.run_kruskal().unwrap();
        let text = analyzer.render(View::Mst, 0).unwrap();
        assert!(text.contains("\t1 ---|1| 2\n"));
        assert!(text.contains("\t2 ---|2| 3\n"));
        assert!(!text.contains("---|5|"));
    }

    #[test]
    fn test_exact_weights() {
        let mut graph = Graph::new();
        graph.add_vertices(2);
        graph.add_edge(VertexId(1), VertexId(2), 0.1234567).unwrap();

        assert_eq!(render_edges(&graph, None), "\t1 ---|0.1234567| 2\n");
        assert_eq!(render_edges(&graph, Some(6)), "\t1 ---|0.123457| 2\n");
        assert_eq!(format_weight(3.0, None), "3");
    }

    #[test]
    fn test_label_escaping() {
        assert_eq!(escape_label("plain name"), "plain name");
        assert_eq!(escape_label("line1\nline2"), "line1#10;line2");
        assert_eq!(escape_label("say \"hi\" #1"), "say #34;hi#34; #35;1");

        for name in ["line1\nline2", "a\r\nb", "#35; literal", "q\"#", "图 #"] {
            assert_eq!(unescape_label(&escape_label(name)), name);
        }
        // 手写文档中的普通 `#` 原样保留
        assert_eq!(unescape_label("C# #x; #"), "C# #x; #");
    }

    #[test]
    fn test_partial_views() {
        let mut analyzer = create_analyzer();
        assert_eq!(
            analyzer.render(View::Vertices, 0).unwrap(),
            "\t1(\"a\")\n\t2(\"b\")\n\t3(\"c\")\n"
        );
        assert!(analyzer
            .render(View::Edges, 0)
            .unwrap()
            .starts_with("\t1 ---|1| 2"));
    }
}
