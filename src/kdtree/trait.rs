use crate::kdtree::neighbours::{Closest, Neighbours};
use crate::kdtree::traversal::branch_and_bound;
use crate::kdtree::KDTree;
use crate::r#type::KDTreePoint;

/// A trait for searching and accessing data out of a KDTree.
///
/// All searches are exact and read-only; any number of them may run concurrently over one
/// shared tree.
pub trait KDTreeIndex<E: KDTreePoint>: Sized {
    /// The root of the tree to search.
    fn root(&self) -> &KDTree<E>;

    /// The number of items in this KDTree
    fn num_items(&self) -> usize {
        self.root().len()
    }

    /// Search for the point closest to `query`.
    ///
    /// A stored point equal to `query` is never returned: if `query` is in the tree, this
    /// returns the closest *other* point.
    ///
    /// - query: the search point
    /// - max_distance: only return a point whose squared distance to `query` is strictly
    ///   less than this. `None` means unbounded.
    ///
    /// When several points are equally close, which one is returned is unspecified.
    ///
    /// ```
    /// use kd_index::kdtree::{KDTree, KDTreeIndex};
    ///
    /// let tree: KDTree<[f64; 2]> = [[0., 0.], [1., 1.], [5., 5.]].into_iter().collect();
    ///
    /// assert_eq!(tree.nearest(&[4., 4.], None), Some(&[5., 5.]));
    /// // the query itself is skipped
    /// assert_eq!(tree.nearest(&[5., 5.], None), Some(&[1., 1.]));
    /// // (5, 5) is at squared distance 2, not below 1
    /// assert_eq!(tree.nearest(&[4., 4.], Some(1.)), None);
    /// ```
    fn nearest(&self, query: &E, max_distance: Option<f64>) -> Option<&E> {
        self.nearest_with_distance(query, max_distance)
            .map(|(value, _)| value)
    }

    /// Search for the point closest to `query`, returning it with its squared distance.
    ///
    /// See [`nearest`][KDTreeIndex::nearest].
    fn nearest_with_distance(&self, query: &E, max_distance: Option<f64>) -> Option<(&E, f64)> {
        let root = self.root();
        if root.is_empty() {
            return None;
        }

        let max_distance = max_distance.unwrap_or(f64::INFINITY);
        branch_and_bound(root, query, Closest::within(max_distance)).into_inner()
    }

    /// Search for the `k` points closest to `query`, in ascending order of distance.
    ///
    /// Returns `min(k, self.num_items())` points. Unlike [`nearest`][KDTreeIndex::nearest],
    /// a stored point equal to `query` is not skipped: it is returned at distance zero.
    ///
    /// Points at equal distance appear in an unspecified order.
    ///
    /// ```
    /// use kd_index::kdtree::{KDTree, KDTreeIndex};
    ///
    /// let tree: KDTree<[f64; 2]> = [[0., 0.], [1., 1.], [5., 5.]].into_iter().collect();
    ///
    /// assert_eq!(tree.nearest_k(2, &[4., 4.]), vec![&[5., 5.], &[1., 1.]]);
    /// assert_eq!(tree.nearest_k(1, &[5., 5.]), vec![&[5., 5.]]);
    /// assert_eq!(tree.nearest_k(10, &[0., 0.]).len(), 3);
    /// ```
    fn nearest_k(&self, k: usize, query: &E) -> Vec<&E> {
        self.neighbours(k, query).into_values()
    }

    /// Search for the `k` points closest to `query`, returning each with its squared
    /// distance, in ascending order of distance.
    ///
    /// See [`nearest_k`][KDTreeIndex::nearest_k].
    fn nearest_k_with_distances(&self, k: usize, query: &E) -> Vec<(&E, f64)> {
        self.neighbours(k, query).into_inner()
    }

    /// Collect the `k` points closest to `query`.
    fn neighbours(&self, k: usize, query: &E) -> Neighbours<&E> {
        let root = self.root();
        if k == 0 || root.is_empty() {
            return Neighbours::new(k);
        }

        branch_and_bound(root, query, Neighbours::new(k))
    }

    /// Search for the closest point to each of `queries`, in parallel.
    ///
    /// See [`nearest`][KDTreeIndex::nearest].
    #[cfg(feature = "rayon")]
    fn par_nearest(&self, queries: &[E], max_distance: Option<f64>) -> Vec<Option<&E>>
    where
        Self: Sync,
        E: Sync,
    {
        use rayon::prelude::*;

        queries
            .par_iter()
            .map(|query| self.nearest(query, max_distance))
            .collect()
    }

    /// Search for the `k` closest points to each of `queries`, in parallel.
    ///
    /// See [`nearest_k`][KDTreeIndex::nearest_k].
    #[cfg(feature = "rayon")]
    fn par_nearest_k(&self, k: usize, queries: &[E]) -> Vec<Vec<&E>>
    where
        Self: Sync,
        E: Sync,
    {
        use rayon::prelude::*;

        queries
            .par_iter()
            .map(|query| self.nearest_k(k, query))
            .collect()
    }
}

impl<E: KDTreePoint> KDTreeIndex<E> for KDTree<E> {
    fn root(&self) -> &KDTree<E> {
        self
    }
}
