//! Error types for report persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing a report to disk.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Reports directory could not be created.
    #[error("failed to create reports directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report file could not be written.
    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReportError::Write {
            path: PathBuf::from("data/reports/report_quality_all.md"),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(
            err.to_string(),
            "failed to write report data/reports/report_quality_all.md: disk full"
        );
    }
}
