use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hgr_core::rng::RngHandle;
use hgr_graph::{
    gen_random_clustering, gen_random_hypergraph, ClusterOptions, GraphConfig, HierHyperGraph,
};

fn build_graph_bench(c: &mut Criterion) {
    c.bench_function("build_graph_5k", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(42);
            let graph =
                gen_random_hypergraph(GraphConfig::uniform(2, 1), 5_000, 10_000, 6, &mut rng)
                    .unwrap();
            black_box(graph);
        });
    });

    let mut rng = RngHandle::from_seed(42);
    let graph =
        gen_random_hypergraph(GraphConfig::uniform(2, 1), 5_000, 10_000, 6, &mut rng).unwrap();
    let root = Arc::new(HierHyperGraph::from_graph(graph));
    let clusters = gen_random_clustering(root.node_count(), 500, &mut rng).unwrap();

    c.bench_function("cluster_5k_to_500", |b| {
        b.iter(|| {
            let child =
                HierHyperGraph::cluster(&root, &clusters, ClusterOptions::default()).unwrap();
            black_box(child);
        });
    });
}

criterion_group!(benches, build_graph_bench);
criterion_main!(benches);
