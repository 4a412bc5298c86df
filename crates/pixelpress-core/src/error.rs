//! Error types shared across the editing pipeline.

use thiserror::Error;

/// Error types for pipeline operations.
///
/// Every fallible stage returns one of these; `run_pipeline` propagates the
/// first failure without executing later stages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Pixel access beyond buffer dimensions.
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Crop or paste region not fully contained within the source bounds.
    #[error("invalid rectangle: {0}")]
    InvalidRect(String),

    /// Convolution kernel with an even or zero side length.
    #[error("convolution kernel side must be odd and >= 1, got {side}")]
    InvalidKernel { side: usize },

    /// Blend of buffers with differing dimensions or channel count.
    #[error("buffer shapes differ: {a} vs {b}")]
    ShapeMismatch { a: String, b: String },

    /// Semantically invalid parameter in a `PipelineConfig`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
