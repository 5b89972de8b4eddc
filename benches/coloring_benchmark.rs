use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spargraph::{
    color_distance2,
    graph::generators,
    ColoringConfig, CsrGraph, Distance2Algorithm,
};

fn bench_distance2_coloring(c: &mut Criterion) {
    let graphs: [(&str, CsrGraph); 3] = [
        ("grid_128", generators::grid(128, 128)),
        ("random_20k_d8", generators::random(20_000, 8, 0x5eed)),
        ("star_4k", generators::star(4_000)),
    ];

    let mut group = c.benchmark_group("distance2_coloring");
    group.sample_size(20);

    for (name, graph) in &graphs {
        let transpose = graph.transpose();
        group.throughput(Throughput::Elements(graph.num_edges() as u64));
        for algorithm in Distance2Algorithm::ALL {
            let config = ColoringConfig::new(algorithm).with_chunk_size(64);
            group.bench_with_input(BenchmarkId::new(algorithm.name(), name), graph, |b, g| {
                b.iter(|| black_box(color_distance2(g, &transpose, &config).unwrap().num_colors));
            });
        }
    }
    group.finish();
}

fn bench_serial_only(c: &mut Criterion) {
    // With no speculative rounds everything goes through the serial fallback.
    let graph = generators::random(20_000, 8, 0x5eed);
    let transpose = graph.transpose();
    let config = ColoringConfig::default().with_max_iterations(0);

    c.bench_function("distance2_coloring_serial_fallback", |b| {
        b.iter(|| black_box(color_distance2(&graph, &transpose, &config).unwrap().num_colors));
    });
}

criterion_group!(benches, bench_distance2_coloring, bench_serial_only);
criterion_main!(benches);
