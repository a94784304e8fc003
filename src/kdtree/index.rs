use std::mem;

use crate::error::{KdIndexError, Result};
use crate::kdtree::traversal::Iter;
use crate::r#type::KDTreePoint;

/// An immutable k-d tree.
///
/// Every [`Node`][KDTree::Node] splits its subtrees on `split_dim`: points reachable through
/// `left` have a coordinate at `split_dim` less than or equal to the node's own, points
/// reachable through `right` a coordinate greater than or equal to it. Queries rely on this
/// ordering but never verify it, so a tree violating it returns wrong results rather than
/// an error. Trees created via [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder] always satisfy
/// it.
///
/// `split_dim` is stored per node and is only ever read by queries, so any axis cycling
/// scheme works.
///
/// Searching, iterating and dropping use heap-allocated stacks and handle trees of any
/// height. The derived `Clone`, `PartialEq` and `Debug` implementations recurse once per
/// level.
#[derive(Debug, Clone, PartialEq)]
pub enum KDTree<E> {
    /// A tree without points.
    Empty,
    /// A point with the two subtrees on either side of its splitting hyperplane.
    Node {
        /// Points with a coordinate `<= value` at `split_dim`
        left: Box<KDTree<E>>,
        /// The point stored at this node
        value: E,
        /// The axis the children of this node are split over
        split_dim: usize,
        /// Points with a coordinate `>= value` at `split_dim`
        right: Box<KDTree<E>>,
    },
}

impl<E> Default for KDTree<E> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<E> KDTree<E> {
    /// Create a tree without points.
    pub fn empty() -> Self {
        Self::Empty
    }

    /// Create a tree holding a single point.
    pub fn leaf(value: E, split_dim: usize) -> Self {
        Self::node(Self::Empty, value, split_dim, Self::Empty)
    }

    /// Create a node from its parts.
    ///
    /// The caller is responsible for the ordering of `left` and `right` relative to `value`
    /// along `split_dim`.
    pub fn node(left: KDTree<E>, value: E, split_dim: usize, right: KDTree<E>) -> Self {
        Self::Node {
            left: Box::new(left),
            value,
            split_dim,
            right: Box::new(right),
        }
    }

    /// Returns `true` if this tree contains no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` if this is a node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Node { left, right, .. } => left.is_empty() && right.is_empty(),
        }
    }

    /// The point stored at the root of this tree.
    pub fn value(&self) -> Option<&E> {
        match self {
            Self::Empty => None,
            Self::Node { value, .. } => Some(value),
        }
    }

    /// The axis the root of this tree is split over.
    pub fn split_dim(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Node { split_dim, .. } => Some(*split_dim),
        }
    }

    /// The subtree on the lower side of the root's splitting hyperplane.
    pub fn left(&self) -> Option<&KDTree<E>> {
        match self {
            Self::Empty => None,
            Self::Node { left, .. } => Some(&**left),
        }
    }

    /// The subtree on the upper side of the root's splitting hyperplane.
    pub fn right(&self) -> Option<&KDTree<E>> {
        match self {
            Self::Empty => None,
            Self::Node { right, .. } => Some(&**right),
        }
    }

    /// The number of points in this tree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// The height of this tree. An empty tree has depth 0, a single leaf depth 1.
    pub fn depth(&self) -> usize {
        let mut stack = vec![(self, 0)];
        let mut max_depth = 0;
        while let Some((tree, level)) = stack.pop() {
            if let Self::Node { left, right, .. } = tree {
                max_depth = max_depth.max(level + 1);
                stack.push((&**left, level + 1));
                stack.push((&**right, level + 1));
            }
        }
        max_depth
    }

    /// Iterate over all points of this tree, in order (left subtree, node, right subtree).
    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(self)
    }
}

impl<E: KDTreePoint> KDTree<E> {
    /// Create a node from its parts, checking that `split_dim` is a valid axis for `E`.
    pub fn try_node(
        left: KDTree<E>,
        value: E,
        split_dim: usize,
        right: KDTree<E>,
    ) -> Result<Self> {
        if split_dim >= E::DIMENSIONS {
            return Err(KdIndexError::InvalidSplitDimension {
                split_dim,
                dimensions: E::DIMENSIONS,
            });
        }
        Ok(Self::node(left, value, split_dim, right))
    }

    /// Returns `true` if a point equal to `element` is stored in this tree.
    ///
    /// Only descends into the subtrees whose half-space can hold `element`.
    pub fn contains(&self, element: &E) -> bool {
        let mut stack = vec![self];
        while let Some(tree) = stack.pop() {
            let Self::Node {
                left,
                value,
                split_dim,
                right,
            } = tree
            else {
                continue;
            };

            if value == element {
                return true;
            }

            let diff = value.coordinate(*split_dim) - element.coordinate(*split_dim);
            if diff >= 0. {
                stack.push(left);
            }
            if diff <= 0. {
                stack.push(right);
            }
        }
        false
    }
}

// Unlink the children before they are dropped so that a degenerate tree is torn down with a
// heap-allocated stack instead of one native call per level.
impl<E> Drop for KDTree<E> {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        if let Self::Node { left, right, .. } = self {
            if left.is_empty() && right.is_empty() {
                return;
            }
            stack.push(mem::take(left));
            stack.push(mem::take(right));
        }
        while let Some(mut subtree) = stack.pop() {
            if let Self::Node { left, right, .. } = subtree.as_mut() {
                if !left.is_empty() {
                    stack.push(mem::take(left));
                }
                if !right.is_empty() {
                    stack.push(mem::take(right));
                }
            }
        }
    }
}

impl<'a, E> IntoIterator for &'a KDTree<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
