//! Error types for configuration and image output.
//!
//! The light transport itself is total: a miss is `None`, never an error.

use thiserror::Error;

/// Errors raised while validating a render or writing its result.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid resolution {width}x{height}: both dimensions must be non-zero")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    InvalidSamples,

    #[error("Max bounce depth must be at least 1")]
    InvalidDepth,

    #[error("Continuation probability {0} is outside [0, 1)")]
    InvalidContinuation(f32),

    #[error("Bucket size must be at least 1")]
    InvalidBucketSize,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
