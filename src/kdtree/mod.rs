//! An implementation of an immutable K-D Tree with exact nearest neighbor search.

#![warn(missing_docs)]

mod builder;
mod index;
mod neighbours;
mod traversal;
mod r#trait;

pub use builder::{KDTreeBuilder, SplitStrategy};
pub use index::KDTree;
pub use neighbours::Neighbours;
pub use r#trait::KDTreeIndex;
pub use traversal::Iter;
