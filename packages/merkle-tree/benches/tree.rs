use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use merkle_test_utils::gen_random_leaves;
use merkle_tree::{compute_tree, verify_path};
use rand::rngs::StdRng;
use rand::SeedableRng;

const MAX_LEAVES_LOG2: usize = 16;

fn tree_building_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("SHA256 merkle tree");

    let mut rng = StdRng::seed_from_u64(0);
    let leaves = gen_random_leaves(&mut rng, 1 << MAX_LEAVES_LOG2);

    for i in 10..=MAX_LEAVES_LOG2 {
        // Odd counts exercise unpaired promotion on every level.
        for leaf_count in [1 << i, (1 << i) - 1] {
            group
                .bench_function(BenchmarkId::new("compute_tree", leaf_count), |b| {
                    let leaves_benchmark = leaves[..leaf_count].to_vec();

                    b.iter(|| compute_tree(leaves_benchmark.clone()))
                })
                .sample_size(10);
        }
    }
}

fn path_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("SHA256 merkle path");

    let mut rng = StdRng::seed_from_u64(1);
    let leaves = gen_random_leaves(&mut rng, (1 << MAX_LEAVES_LOG2) - 1);
    let tree = compute_tree(leaves.clone()).unwrap();
    let index = leaves.len() / 3;
    let path = tree.path_by_index(index as i64).unwrap();

    group.bench_function("path_by_index", |b| {
        b.iter(|| tree.path_by_index(index as i64))
    });
    group.bench_function("verify_path", |b| {
        b.iter(|| verify_path(&leaves[index], &path, tree.root()))
    });
}

criterion_group!(bench, tree_building_benchmark, path_benchmark);
criterion_main!(bench);
