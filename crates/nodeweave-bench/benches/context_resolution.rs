use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nodeweave_bench::util;
use nodeweave_context::{ContextOptions, ContextResolver};
use nodeweave_core::NodeId;

fn bench_resolve_1000_nodes(c: &mut Criterion) {
    let nodes = util::generate_knowledge_base(1000, 4);
    let resolver = ContextResolver::new(ContextOptions::default()).unwrap();
    let focal = NodeId::from("node_10");

    c.bench_function("resolve_context_1000_nodes", |b| {
        b.iter(|| {
            let view = resolver.resolve(black_box(&focal), black_box(&nodes)).unwrap();
            black_box(view);
        })
    });
}

criterion_group!(benches, bench_resolve_1000_nodes);
criterion_main!(benches);
