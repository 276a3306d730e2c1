//! Error types for meshfilters.

use glam::Vec3;
use thiserror::Error;

use crate::bounds::Bounds;

/// The main error type for dataset and filter operations.
#[derive(Error, Debug)]
pub enum FilterError {
    /// An argument could not be interpreted (unknown axis name, wrong range length, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A slice origin lies outside the dataset's bounding box.
    #[error("slice origin {origin} is outside data bounds {bounds}")]
    BoundsViolation { origin: Vec3, bounds: Bounds },

    /// No usable data array could be resolved for the operation.
    #[error("missing data: {0}")]
    MissingData(String),

    /// A numeric argument is outside its valid envelope.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A cell references a point that does not exist.
    #[error("point index {index} out of bounds for {n_points} points")]
    PointIndexOutOfBounds { index: u32, n_points: usize },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for meshfilters operations.
pub type Result<T> = std::result::Result<T, FilterError>;
