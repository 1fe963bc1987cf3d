use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;

use treecluster::core::method::Method;
use treecluster::core::prepare;
use treecluster::newick;

/// Builds a balanced binary Newick tree with `2^depth` leaves.
fn balanced_newick(depth: usize) -> String {
    fn build(depth: usize, next_leaf: &mut usize) -> String {
        if depth == 0 {
            let label = format!("L{next_leaf}");
            *next_leaf += 1;
            format!("{label}:1")
        } else {
            let left = build(depth - 1, next_leaf);
            let right = build(depth - 1, next_leaf);
            format!("({left},{right}):1")
        }
    }
    let mut next_leaf = 0;
    format!("{};", build(depth, &mut next_leaf))
}

fn partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");
    group.significance_level(0.05).measurement_time(std::time::Duration::new(10, 0));

    for depth in [8usize, 12, 14] {
        let raw = newick::parse_all(&balanced_newick(depth)).unwrap().remove(0);
        let (tree, _leaves) = prepare::normalize(raw, f64::NEG_INFINITY).unwrap();
        let leaf_count = 1usize << depth;

        for method in [Method::MaxClade, Method::AvgClade, Method::MedClade] {
            let bench_name = format!("{method}-{leaf_count}");
            group.bench_function(&bench_name, |b| b.iter_with_large_drop(|| method.run(&tree, 3.0)));
        }
    }

    group.finish();
}

criterion_group!(benches, partition);
criterion_main!(benches);
