//! Record number (`processo`) checks.

use std::sync::LazyLock;

use qc_model::{AnalyzerKey, DEFAULT_EXAMPLE_LIMIT, Findings, RecordNumberReport, columns};
use regex::Regex;

use crate::analyzer::{AnalysisInput, ColumnAnalyzer};
use crate::checks::{missing_check, value_check};
use crate::error::Result;

/// Digits, optionally separated by spaces or dashes.
static RECORD_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-]+$").expect("Invalid record number regex"));

pub struct RecordNumberAnalyzer;

impl ColumnAnalyzer for RecordNumberAnalyzer {
    fn key(&self) -> AnalyzerKey {
        AnalyzerKey::Processo
    }

    fn required_columns(&self) -> &[&'static str] {
        &[columns::RECORD_NUMBER]
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Result<Findings> {
        let reader = input.reader();
        let values = reader.texts(columns::RECORD_NUMBER)?;
        let ids = reader.ids();

        Ok(Findings::RecordNumber(RecordNumberReport {
            missing: missing_check(&values, &ids),
            invalid: value_check(
                &values,
                &ids,
                |value| !RECORD_NUMBER_REGEX.is_match(value),
                DEFAULT_EXAMPLE_LIMIT,
            ),
        }))
    }
}
