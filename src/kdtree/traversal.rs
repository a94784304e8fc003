//! Utilities to traverse the KDTree structure.

use tinyvec::TinyVec;

use crate::kdtree::KDTree;
use crate::r#type::KDTreePoint;

/// An accumulator of search results, moved through a branch-and-bound search.
pub(crate) trait Collector<'a, E: KDTreePoint>: Sized {
    /// Offer a stored value to the collector, returning the updated collector.
    fn consider(self, value: &'a E, query: &E) -> Self;

    /// The squared distance beyond which no value can improve this collector.
    fn bound(&self) -> f64;
}

/// A pending unit of work in [`branch_and_bound`].
#[derive(Debug)]
enum Step<'a, E> {
    /// Inline storage filler, never pushed.
    Idle,
    /// Search the given subtree.
    Descend(&'a KDTree<E>),
    /// The closer subtree of a node has been searched: offer the node's value, then search
    /// the further subtree if the splitting hyperplane is within the collector's bound.
    Settle {
        value: &'a E,
        diff: f64,
        further: &'a KDTree<E>,
    },
}

impl<E> Default for Step<'_, E> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Exact branch-and-bound search of `root` around `query`.
///
/// Each node first searches the subtree on the query's side of its splitting hyperplane,
/// then offers its own value, then searches the other subtree only if the hyperplane is
/// closer than the collector's bound. Every node is visited at most once.
///
/// The recursion is expressed with an explicit work stack so the search depth is not limited
/// by the native call stack.
pub(crate) fn branch_and_bound<'a, E, C>(root: &'a KDTree<E>, query: &E, mut collector: C) -> C
where
    E: KDTreePoint,
    C: Collector<'a, E>,
{
    // Use TinyVec to avoid heap allocations for reasonably balanced trees
    let mut stack: TinyVec<[Step<'a, E>; 32]> = TinyVec::new();
    stack.push(Step::Descend(root));

    while let Some(step) = stack.pop() {
        match step {
            Step::Idle | Step::Descend(KDTree::Empty) => {}
            Step::Descend(KDTree::Node {
                left,
                value,
                split_dim,
                right,
            }) => {
                if left.is_empty() && right.is_empty() {
                    collector = collector.consider(value, query);
                    continue;
                }

                let diff = value.coordinate(*split_dim) - query.coordinate(*split_dim);
                let (closer, further) = if diff > 0. {
                    (&**left, &**right)
                } else {
                    (&**right, &**left)
                };

                // Note: pushed in reverse order of processing
                stack.push(Step::Settle {
                    value,
                    diff,
                    further,
                });
                stack.push(Step::Descend(closer));
            }
            Step::Settle {
                value,
                diff,
                further,
            } => {
                collector = collector.consider(value, query);
                if diff * diff < collector.bound() {
                    stack.push(Step::Descend(further));
                }
            }
        }
    }

    collector
}

/// An in-order iterator over the values of a [`KDTree`].
///
/// Created by [`KDTree::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a, E> {
    /// Values not yet yielded, each with the right subtree to visit after it.
    stack: Vec<(&'a E, &'a KDTree<E>)>,
}

impl<'a, E> Iter<'a, E> {
    pub(crate) fn new(root: &'a KDTree<E>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut tree: &'a KDTree<E>) {
        while let KDTree::Node {
            left, value, right, ..
        } = tree
        {
            self.stack.push((value, &**right));
            tree = &**left;
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let (value, right) = self.stack.pop()?;
        self.push_left_spine(right);
        Some(value)
    }
}
