//! Error types for pixel-buffer operations.

use thiserror::Error;

/// Error type for pixel-buffer operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffer construction failed.
    #[error(transparent)]
    Buffer(#[from] raster_core::Error),
}

/// Result type for pixel-buffer operations.
pub type OpsResult<T> = Result<T, OpsError>;
