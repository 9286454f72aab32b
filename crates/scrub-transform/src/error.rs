//! Error types for table transformation.

use thiserror::Error;

/// Errors that abort cleaning of one table.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransformError {
    /// A resolved column disappeared from the frame.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    PolarsError(#[from] polars::error::PolarsError),
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
