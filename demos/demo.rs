//! WeightGraph 演示脚本
//!
//! 构建一个小图，计算最短路径与最小生成树，渲染并保存为文档

use weightgraph::{Analyzer, DocumentConfig, Graph, MstMethod, VertexId, View};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("WeightGraph 演示");
    println!("================\n");

    // 1. 构建图
    let mut graph = Graph::new();
    let ids = graph.add_named_vertices(["Gdańsk", "Toruń", "Łódź", "Warszawa", "Kraków"]);
    graph.add_edge(ids[0], ids[1], 1.5)?;
    graph.add_edge(ids[1], ids[2], 2.0)?;
    graph.add_edge(ids[1], ids[3], 2.5)?;
    graph.add_edge(ids[2], ids[3], 1.5)?;
    graph.add_edge(ids[2], ids[4], 3.0)?;
    graph.add_edge(ids[3], ids[4], 3.5)?;
    println!(
        "1. 图: {} 顶点, {} 边\n",
        graph.vertex_count(),
        graph.edge_count()
    );

    let mut analyzer = Analyzer::from_graph(graph);

    // 2. 最短路径
    println!("2. 从顶点 1 出发的最短路径");
    analyzer.set_source(VertexId(1))?;
    for id in analyzer.graph().vertex_ids() {
        let distance = analyzer.distance(id)?;
        let path = analyzer.path_to(id)?.unwrap_or_default();
        let hops: Vec<String> = path.iter().map(|v| v.to_string()).collect();
        println!("   {} : {:.2}  [{}]", id, distance, hops.join(" -> "));
    }
    println!();

    // 3. 最小生成树
    for method in [MstMethod::Kruskal, MstMethod::Prim] {
        let result = analyzer.calculate_mst(method)?;
        println!(
            "3. {}: {} 条边, 总权重 {:.2}",
            result.method(),
            result.len(),
            result.total_weight()
        );
    }
    println!();

    // 4. Mermaid 渲染
    println!("4. Mermaid (Dijkstra 视图):");
    println!("{}", analyzer.render(View::Dijkstra, 2)?);

    // 5. 修改后结果自动失效
    analyzer.graph_mut().set_edge_weight(ids[0], ids[1], 10.0)?;
    println!(
        "5. 修改权重后 MST 状态: {}, 到顶点 5 的距离: {:.2}\n",
        analyzer.mst_method(),
        analyzer.distance(ids[4])?
    );

    // 6. 保存并重新加载
    let dir = std::env::temp_dir();
    let config = DocumentConfig::default();
    analyzer.run_prim()?;
    let path = analyzer.save(&dir, "demo", &config)?;
    let loaded = Analyzer::load(&path, &config)?;
    println!(
        "6. 已保存到 {}，重新加载: {} 顶点, MST = {}",
        path.display(),
        loaded.graph().vertex_count(),
        loaded.mst_method()
    );

    Ok(())
}
