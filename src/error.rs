use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KdIndexError {
    #[error("General error: {0}")]
    General(String),

    #[error("Split dimension {split_dim} out of range for {dimensions}-dimensional points.")]
    InvalidSplitDimension { split_dim: usize, dimensions: usize },
}

pub type Result<T> = std::result::Result<T, KdIndexError>;
