use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kd_index::kdtree::{KDTree, KDTreeBuilder, KDTreeIndex, SplitStrategy};
use kd_index::KDTreePoint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NUM_POINTS: usize = 100_000;
const NUM_QUERIES: usize = 1000;

fn random_points(n: usize, seed: u64) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| [rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)])
        .collect()
}

fn construct_kdtree(points: &[[f64; 2]], split: SplitStrategy) -> KDTree<[f64; 2]> {
    let mut builder = KDTreeBuilder::with_capacity(points.len()).with_split(split);
    builder.extend(points.iter().copied());
    builder.finish()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let points = random_points(NUM_POINTS, 0);
    let queries = random_points(NUM_QUERIES, 1);

    c.bench_function("construction (kdtree cycle)", |b| {
        b.iter(|| construct_kdtree(&points, SplitStrategy::Cycle))
    });

    c.bench_function("construction (kdtree widest spread)", |b| {
        b.iter(|| construct_kdtree(&points, SplitStrategy::WidestSpread))
    });

    let kdtree = construct_kdtree(&points, SplitStrategy::Cycle);

    c.bench_function("nearest (kdtree)", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(kdtree.nearest(query, None));
            }
        })
    });

    c.bench_function("nearest (linear scan)", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(
                    points
                        .iter()
                        .filter(|p| *p != query)
                        .map(|p| p.squared_distance(query))
                        .min_by(f64::total_cmp),
                );
            }
        })
    });

    c.bench_function("nearest_k 10 (kdtree)", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(kdtree.nearest_k(10, query));
            }
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
