//! Flick error types

use flick_core::SurfaceId;
use thiserror::Error;

use crate::axis::FlickAxes;

/// Gesture engine errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlickError {
    /// The surface cannot scroll along any of the requested axes
    #[error("{surface} cannot scroll {axes}; flicking only works on scrollable surfaces")]
    NotScrollable { surface: SurfaceId, axes: FlickAxes },

    /// Invalid engine configuration
    #[error("Invalid flick configuration: {0}")]
    Config(String),
}

/// Result type for gesture engine operations
pub type Result<T> = std::result::Result<T, FlickError>;
