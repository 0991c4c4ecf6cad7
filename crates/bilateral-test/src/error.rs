//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while preparing regression test inputs
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to build a raster
    #[error("failed to build raster: {0}")]
    Raster(#[from] bilateral_core::Error),

    /// Generator arguments cannot describe an image
    #[error("invalid generator arguments: {0}")]
    InvalidArguments(String),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
