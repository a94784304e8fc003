use std::cmp::Ordering;

use crate::error::{KdIndexError, Result};
use crate::kdtree::KDTree;
use crate::r#type::KDTreePoint;

/// How a [`KDTreeBuilder`] picks the splitting axis of each node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SplitStrategy {
    /// Cycle through all axes with tree depth: `depth % E::DIMENSIONS`.
    #[default]
    Cycle,
    /// Cycle through the given axes with tree depth.
    AxisOrder(Vec<usize>),
    /// Split each subset on the axis with the largest coordinate spread.
    WidestSpread,
}

impl SplitStrategy {
    fn validate(&self, dimensions: usize) -> Result<()> {
        if let Self::AxisOrder(order) = self {
            if order.is_empty() {
                return Err(KdIndexError::General(
                    "Axis order must name at least one axis.".to_string(),
                ));
            }
            if let Some(&split_dim) = order.iter().find(|&&axis| axis >= dimensions) {
                return Err(KdIndexError::InvalidSplitDimension {
                    split_dim,
                    dimensions,
                });
            }
        }
        Ok(())
    }

    fn axis<E: KDTreePoint>(&self, items: &[E], depth: usize) -> usize {
        match self {
            Self::Cycle => depth % E::DIMENSIONS,
            Self::AxisOrder(order) => order[depth % order.len()],
            Self::WidestSpread => widest_axis(items),
        }
    }
}

/// A builder to create a balanced [`KDTree`].
///
/// Each node holds the median of its subset along the node's splitting axis, so the tree
/// height is `ceil(log2(n + 1))`.
///
/// ```
/// use kd_index::kdtree::{KDTreeBuilder, SplitStrategy};
///
/// let mut builder = KDTreeBuilder::new().with_split(SplitStrategy::WidestSpread);
/// builder.add([0., 0.]);
/// builder.add([10., 1.]);
/// builder.add([5., 2.]);
/// let tree = builder.finish();
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.value(), Some(&[5., 2.]));
/// assert_eq!(tree.split_dim(), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct KDTreeBuilder<E> {
    items: Vec<E>,
    split: SplitStrategy,
}

impl<E: KDTreePoint> Default for KDTreeBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: KDTreePoint> KDTreeBuilder<E> {
    /// Create a new builder with the default [`SplitStrategy::Cycle`].
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new builder with room for `num_items` points.
    pub fn with_capacity(num_items: usize) -> Self {
        assert!(E::DIMENSIONS > 0, "Points must have at least one dimension.");
        Self {
            items: Vec::with_capacity(num_items),
            split: SplitStrategy::default(),
        }
    }

    /// Use the provided split strategy.
    ///
    /// Panics if the strategy names an axis `E` does not have; see
    /// [`try_with_split`][Self::try_with_split] for the fallible version.
    pub fn with_split(self, split: SplitStrategy) -> Self {
        match self.try_with_split(split) {
            Ok(builder) => builder,
            Err(err) => panic!("{err}"),
        }
    }

    /// Use the provided split strategy, checking it against the dimensions of `E`.
    pub fn try_with_split(mut self, split: SplitStrategy) -> Result<Self> {
        split.validate(E::DIMENSIONS)?;
        self.split = split;
        Ok(self)
    }

    /// Add a point to the index, returning its insertion index.
    pub fn add(&mut self, item: E) -> usize {
        let index = self.items.len();
        self.items.push(item);
        index
    }

    /// The number of points added so far.
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Consume this builder, performing the k-d sort and generating a KDTree ready for queries.
    pub fn finish(self) -> KDTree<E> {
        build(self.items, 0, &self.split)
    }
}

impl<E: KDTreePoint> Extend<E> for KDTreeBuilder<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<E: KDTreePoint> FromIterator<E> for KDTree<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut builder = KDTreeBuilder::new();
        builder.extend(iter);
        builder.finish()
    }
}

/// Recursively split `items` around the median on the axis chosen for `depth`.
///
/// The recursion depth is the height of the resulting tree, which is logarithmic.
fn build<E: KDTreePoint>(mut items: Vec<E>, depth: usize, split: &SplitStrategy) -> KDTree<E> {
    if items.is_empty() {
        return KDTree::Empty;
    }

    let axis = split.axis(&items, depth);
    let m = items.len() / 2;

    // order items so that [0..m] lie below and [m + 1..] lie above the m-th item on `axis`
    items.select_nth_unstable_by(m, |a, b| compare_on(a, b, axis));

    let upper = items.split_off(m + 1);
    let Some(value) = items.pop() else {
        return KDTree::Empty;
    };

    let left = build(items, depth + 1, split);
    let right = build(upper, depth + 1, split);
    KDTree::node(left, value, axis, right)
}

#[inline]
fn compare_on<E: KDTreePoint>(a: &E, b: &E, axis: usize) -> Ordering {
    a.coordinate(axis).total_cmp(&b.coordinate(axis))
}

fn widest_axis<E: KDTreePoint>(items: &[E]) -> usize {
    let mut best_axis = 0;
    let mut best_spread = f64::NEG_INFINITY;

    for axis in 0..E::DIMENSIONS {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for item in items {
            let v = item.coordinate(axis);
            min = min.min(v);
            max = max.max(v);
        }
        let spread = max - min;
        if spread > best_spread {
            best_spread = spread;
            best_axis = axis;
        }
    }

    best_axis
}
