#![doc = include_str!("../README.md")]

mod error;
pub mod kdtree;
mod r#type;

pub use error::KdIndexError;
pub use r#type::{Coord, KDTreePoint};

#[cfg(test)]
pub(crate) mod test;
