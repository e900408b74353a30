//! Run configuration passed explicitly into every command.

use std::path::PathBuf;

use qc_model::YearFilter;

/// Default admissions export, relative to the working directory.
pub const DEFAULT_INPUT: &str = "data/source/spreadsheets/Doentes.csv";
/// Default directory for Markdown reports.
pub const DEFAULT_REPORTS_DIR: &str = "data/reports";
/// Default directory for per-record JSON documents.
pub const DEFAULT_DOCUMENTS_DIR: &str = "data/processed/json";

/// Paths and options for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct QcConfig {
    pub input: PathBuf,
    pub reports_dir: PathBuf,
    pub documents_dir: PathBuf,
    pub year_filter: Option<YearFilter>,
    pub write_markdown: bool,
    /// Colour console tables.
    pub styled_tables: bool,
}

impl Default for QcConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            documents_dir: PathBuf::from(DEFAULT_DOCUMENTS_DIR),
            year_filter: None,
            write_markdown: true,
            styled_tables: false,
        }
    }
}

impl QcConfig {
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    pub fn with_reports_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.reports_dir = dir.into();
        self
    }

    pub fn with_documents_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.documents_dir = dir.into();
        self
    }

    pub fn with_year_filter(mut self, filter: Option<YearFilter>) -> Self {
        self.year_filter = filter;
        self
    }

    pub fn with_markdown(mut self, enable: bool) -> Self {
        self.write_markdown = enable;
        self
    }

    pub fn with_styled_tables(mut self, enable: bool) -> Self {
        self.styled_tables = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_project_layout() {
        let config = QcConfig::default();
        assert_eq!(config.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(config.reports_dir, PathBuf::from("data/reports"));
        assert!(config.year_filter.is_none());
        assert!(config.write_markdown);
        assert!(!config.styled_tables);
    }

    #[test]
    fn test_builder_overrides() {
        let config = QcConfig::default()
            .with_input("in.csv")
            .with_year_filter(Some(YearFilter::single(25)))
            .with_markdown(false);
        assert_eq!(config.input, PathBuf::from("in.csv"));
        assert_eq!(config.year_filter, Some(YearFilter::single(25)));
        assert!(!config.write_markdown);
    }
}
