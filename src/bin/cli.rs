//! WeightGraph CLI 工具
//!
//! 读取 `.graph.mmd` 文档，运行最短路径或最小生成树并输出结果

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;
use weightgraph::cli::{PrintMode, Printer};
use weightgraph::config::DEFAULT_PRECISION;
use weightgraph::{Analyzer, DocumentConfig, MstMethod, TextEncoding, VertexId, View};

#[derive(Parser, Debug)]
#[command(name = "weightgraph-cli")]
#[command(about = "WeightGraph 命令行工具", version)]
struct Args {
    /// 图文档路径
    file: PathBuf,

    /// 日志详细程度（-v, -vv）
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// 以 JSON 输出
    #[arg(long, global = true)]
    json: bool,

    /// 垂直显示表格
    #[arg(long, global = true)]
    vertical: bool,

    /// 保存时使用 UTF-8 编码
    #[arg(long, global = true)]
    utf8: bool,

    /// 权重小数位数（保存时默认写出精确值）
    #[arg(long, global = true)]
    precision: Option<usize>,

    /// 将结果保存为新文档（与输入文件同目录）
    #[arg(long, global = true)]
    save: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 显示图统计信息
    Info,
    /// 计算单源最短路径
    Dijkstra {
        /// 源点 ID
        #[arg(short, long)]
        source: u64,
        /// 只输出到该顶点的路径
        #[arg(short, long)]
        to: Option<u64>,
    },
    /// 计算最小生成树
    Mst {
        /// KRUSKAL 或 PRIM
        #[arg(short, long, default_value = "kruskal", value_parser = MstMethod::from_str)]
        method: MstMethod,
    },
    /// 输出 Mermaid 流程图
    Render {
        #[arg(long, value_enum, default_value_t = ViewArg::Graph)]
        view: ViewArg,
        /// Dijkstra 视图的源点（默认使用文档中的源点）
        #[arg(short, long)]
        source: Option<u64>,
        /// MST 视图的计算方法（默认使用文档中的方法）
        #[arg(short, long, value_parser = MstMethod::from_str)]
        method: Option<MstMethod>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ViewArg {
    Vertices,
    Edges,
    Graph,
    Dijkstra,
    Mst,
}

impl From<ViewArg> for View {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Vertices => View::Vertices,
            ViewArg::Edges => View::Edges,
            ViewArg::Graph => View::Graph,
            ViewArg::Dijkstra => View::Dijkstra,
            ViewArg::Mst => View::Mst,
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("weightgraph={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = DocumentConfig::default();
    if let Some(precision) = args.precision {
        config = config.with_precision(precision);
    }
    if args.utf8 {
        config = config.with_encoding(TextEncoding::Utf8);
    }

    let mut analyzer = Analyzer::load(&args.file, &config)
        .with_context(|| format!("无法读取文档 {}", args.file.display()))?;
    let mode = if args.vertical {
        PrintMode::Vertical
    } else {
        PrintMode::Table
    };
    let precision = args.precision.unwrap_or(DEFAULT_PRECISION);
    let printer = Printer::new(mode).with_precision(precision);

    match &args.command {
        Command::Info => {
            if args.json {
                let vertices: Vec<_> = analyzer.graph().vertices().collect();
                let edges: Vec<_> = analyzer.graph().edges().collect();
                let info = serde_json::json!({
                    "vertices": vertices,
                    "edges": edges,
                    "source": analyzer.source(),
                    "mst": analyzer.mst_method(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                print!("{}", printer.print_stats(analyzer.graph()));
            }
        }
        Command::Dijkstra { source, to } => {
            analyzer.set_source(VertexId(*source))?;
            match to {
                Some(target) => {
                    let path = analyzer.path_to(VertexId(*target))?;
                    let distance = analyzer.distance(VertexId(*target))?;
                    if args.json {
                        let out = serde_json::json!({ "path": path, "distance": distance });
                        println!("{}", serde_json::to_string_pretty(&out)?);
                    } else {
                        match path {
                            Some(path) => {
                                let hops: Vec<String> =
                                    path.iter().map(|id| id.to_string()).collect();
                                println!(
                                    "{} ({:.*})",
                                    hops.join(" -> "),
                                    precision,
                                    distance
                                );
                            }
                            None => println!("顶点 {} 不可达", target),
                        }
                    }
                }
                None => {
                    let result = analyzer.compute_shortest_paths()?.clone();
                    if args.json {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        print!("{}", printer.print_shortest_paths(analyzer.graph(), &result));
                    }
                }
            }
        }
        Command::Mst { method } => {
            let result = analyzer.calculate_mst(*method)?.clone();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", printer.print_spanning_tree(&result));
            }
        }
        Command::Render {
            view,
            source,
            method,
        } => {
            if let Some(source) = source {
                analyzer.set_source(VertexId(*source))?;
            }
            if let Some(method) = method {
                analyzer.calculate_mst(*method)?;
            }
            print!("{}", analyzer.render((*view).into(), precision)?);
        }
    }

    if let Some(title) = &args.save {
        let dir = args
            .file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let path = analyzer.save(dir, title, &config)?;
        eprintln!("已保存: {}", path.display());
    }

    Ok(())
}
