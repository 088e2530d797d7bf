//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `shoal-spatial`.
///
/// Only obstacle construction can fail; queries are total.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("invalid obstacle: {0}")]
    InvalidObstacle(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
