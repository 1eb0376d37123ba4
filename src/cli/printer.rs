//! 结果打印器
//!
//! 提供表格和垂直格式的结果输出

use crate::algorithm::{ShortestPathResult, SpanningTreeResult};
use crate::graph::Graph;
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
    precision: usize,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self {
            mode,
            precision: crate::config::DEFAULT_PRECISION,
        }
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 设置权重小数位数
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// 打印通用结果
    pub fn print_result(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        if columns.is_empty() || rows.is_empty() {
            return "Empty set\n".to_string();
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(columns, rows),
            PrintMode::Vertical => self.format_vertical(columns, rows),
        };

        format!("{}\n{} row(s) in set\n", output, rows.len())
    }

    fn format_table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    fn format_vertical(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    /// 打印最短路径表
    pub fn print_shortest_paths(&self, graph: &Graph, result: &ShortestPathResult) -> String {
        let rows: Vec<Vec<String>> = result
            .iter()
            .map(|entry| {
                vec![
                    entry.id.to_string(),
                    graph.vertex_name(entry.id).unwrap_or_default().to_string(),
                    format!("{:.*}", self.precision, entry.distance),
                    entry
                        .predecessor
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();

        self.print_result(&["Vertex", "Name", "Distance", "Predecessor"], &rows)
    }

    /// 打印最小生成树边表
    pub fn print_spanning_tree(&self, result: &SpanningTreeResult) -> String {
        let rows: Vec<Vec<String>> = result
            .edges()
            .iter()
            .map(|edge| {
                vec![
                    edge.v1().to_string(),
                    edge.v2().to_string(),
                    format!("{:.*}", self.precision, edge.weight()),
                ]
            })
            .collect();

        format!(
            "{}Method: {}, total weight: {:.*}\n",
            self.print_result(&["V1", "V2", "Weight"], &rows),
            result.method(),
            self.precision,
            result.total_weight()
        )
    }

    /// 打印统计信息
    pub fn print_stats(&self, graph: &Graph) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", graph.vertex_count().to_string()]);
        table.add_row(row!["Edge Count", graph.edge_count().to_string()]);
        table.add_row(row!["Version", graph.version().to_string()]);
        table.to_string()
    }
}
