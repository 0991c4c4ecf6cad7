//! Error types for bilateral-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error (geometry, allocation)
    #[error("core error: {0}")]
    Core(#[from] bilateral_core::Error),

    /// Invalid parameters, rejected before any work is done
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The caller raised the cancellation flag
    #[error("operation cancelled")]
    Cancelled,
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
