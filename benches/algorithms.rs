//! 算法基准测试

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use weightgraph::algorithm::{dijkstra, kruskal, prim};
use weightgraph::{Graph, VertexId};

fn random_graph(vertices: usize, edges: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new();
    let ids = graph.add_vertices(vertices);

    // 先连成一条链，保证连通
    for pair in ids.windows(2) {
        graph
            .add_edge(pair[0], pair[1], rng.gen_range(1.0..100.0))
            .unwrap();
    }
    while graph.edge_count() < edges {
        let a = ids[rng.gen_range(0..ids.len())];
        let b = ids[rng.gen_range(0..ids.len())];
        if a != b && !graph.contains_edge(a, b).unwrap() {
            graph.add_edge(a, b, rng.gen_range(1.0..100.0)).unwrap();
        }
    }
    graph
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("algorithms");

    for &size in &[100usize, 1_000] {
        let graph = random_graph(size, size * 4, 7);

        group.bench_with_input(BenchmarkId::new("dijkstra", size), &graph, |b, g| {
            b.iter(|| dijkstra(black_box(g), VertexId(1)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("kruskal", size), &graph, |b, g| {
            b.iter(|| kruskal(black_box(g)))
        });
        group.bench_with_input(BenchmarkId::new("prim", size), &graph, |b, g| {
            b.iter(|| prim(black_box(g)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_algorithms);
criterion_main!(benches);
