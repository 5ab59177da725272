//! Error types for filtering and pivoting.

use thiserror::Error;

/// Errors that can occur while transforming a dataset.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransformError {
    /// Column not found in the source frame.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    PolarsError(#[from] polars::error::PolarsError),
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
