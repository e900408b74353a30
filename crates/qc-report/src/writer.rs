//! Persistence of rendered reports under timestamped file names.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use qc_model::ReportScope;
use tracing::info;

use crate::error::{ReportError, Result};

/// `report_quality_<context>_<YYYYMMDD_HHMM>.md`, where the context is
/// `all`, `YY` or `HH-LL`.
pub fn report_file_name(scope: &ReportScope, generated_at: NaiveDateTime) -> String {
    format!(
        "report_quality_{}_{}.md",
        scope.context_label(),
        generated_at.format("%Y%m%d_%H%M")
    )
}

/// Writes the report into `dir`, creating the directory when needed.
pub fn write_report(
    dir: &Path,
    scope: &ReportScope,
    content: &str,
    generated_at: NaiveDateTime,
) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(report_file_name(scope, generated_at));
    fs::write(&path, content).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), bytes = content.len(), "markdown report written");
    Ok(path)
}
