//! Column analyzer trait and analysis input.
//!
//! Each analyzer covers one column or column group of the admissions table
//! and produces a typed [`Findings`] tree. Analyzers are registered in the
//! [`AnalyzerRegistry`](crate::AnalyzerRegistry), which runs the applicable
//! ones in a fixed order.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use polars::prelude::DataFrame;
use qc_model::{AnalyzerKey, Findings};

use crate::column_reader::ColumnReader;
use crate::error::Result;

/// Read-only input shared by every analyzer in a run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    pub df: &'a DataFrame,
    /// Source file the frame was loaded from.
    pub source: &'a Path,
    /// Reference date for "current year" checks.
    pub today: NaiveDate,
}

impl<'a> AnalysisInput<'a> {
    pub fn new(df: &'a DataFrame, source: &'a Path, today: NaiveDate) -> Self {
        Self { df, source, today }
    }

    pub fn reader(&self) -> ColumnReader<'a> {
        ColumnReader::new(self.df)
    }

    pub fn current_year(&self) -> i32 {
        self.today.year()
    }
}

/// A validation pass over one column or column group.
///
/// Implementations hold only configuration; all data comes from the
/// [`AnalysisInput`], so running an analyzer twice on the same input gives
/// the same findings.
pub trait ColumnAnalyzer: Send + Sync {
    /// Name under which findings are reported.
    fn key(&self) -> AnalyzerKey;

    /// Columns that must be present for the analyzer to run.
    fn required_columns(&self) -> &[&'static str];

    /// True when every required column is present.
    fn is_applicable(&self, df: &DataFrame) -> bool {
        self.required_columns()
            .iter()
            .all(|column| df.column(column).is_ok())
    }

    /// Runs the analysis. Callers check [`is_applicable`](Self::is_applicable)
    /// first; a missing required column surfaces as
    /// [`AnalyzeError::ColumnNotFound`](crate::AnalyzeError::ColumnNotFound).
    fn analyze(&self, input: &AnalysisInput<'_>) -> Result<Findings>;
}
