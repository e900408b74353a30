//! Error types for column analysis.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by an analyzer. Per-row data problems are findings, not
/// errors; these cover failures that prevent an analyzer from running.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Source file metadata could not be read.
    #[error("failed to read metadata for {path}: {source}")]
    SourceMetadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    /// Column not found in DataFrame.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },
}

impl From<polars::prelude::PolarsError> for AnalyzeError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalyzeError>;
