use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::kdtree::KDTree;
use crate::r#type::KDTreePoint;

/// Deterministic random points in `[0, 100)` along every axis.
pub(crate) fn random_points<const D: usize>(n: usize, seed: u64) -> Vec<[f64; D]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| std::array::from_fn(|_| rng.gen_range(0.0..100.0)))
        .collect()
}

/// Deterministic random points on a small integer grid, so that duplicates and equal
/// distances are common.
pub(crate) fn random_grid_points(n: usize, seed: u64) -> Vec<[i32; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| [rng.gen_range(0..8), rng.gen_range(0..8)])
        .collect()
}

/// Smallest squared distance from `query` to any point not equal to it.
pub(crate) fn brute_force_nearest_distance<E: KDTreePoint>(
    points: &[E],
    query: &E,
) -> Option<f64> {
    points
        .iter()
        .filter(|p| *p != query)
        .map(|p| p.squared_distance(query))
        .min_by(f64::total_cmp)
}

/// Squared distances of the `k` closest points to `query`, ascending.
pub(crate) fn brute_force_k_distances<E: KDTreePoint>(
    points: &[E],
    k: usize,
    query: &E,
) -> Vec<f64> {
    let mut distances: Vec<f64> = points.iter().map(|p| p.squared_distance(query)).collect();
    distances.sort_by(f64::total_cmp);
    distances.truncate(k);
    distances
}

/// Panics if any node of `tree` has a point on the wrong side of its splitting hyperplane.
pub(crate) fn assert_kd_ordered<E: KDTreePoint + std::fmt::Debug>(tree: &KDTree<E>) {
    let KDTree::Node {
        left,
        value,
        split_dim,
        right,
    } = tree
    else {
        return;
    };

    let split = value.coordinate(*split_dim);
    for point in left.iter() {
        assert!(
            point.coordinate(*split_dim) <= split,
            "{point:?} left of {value:?} on axis {split_dim}"
        );
    }
    for point in right.iter() {
        assert!(
            point.coordinate(*split_dim) >= split,
            "{point:?} right of {value:?} on axis {split_dim}"
        );
    }

    assert_kd_ordered(left);
    assert_kd_ordered(right);
}
