//! Patient name (`nome`) checks. Only presence is checked; values are never
//! copied into findings.

use qc_model::{AnalyzerKey, Findings, NameReport, columns};

use crate::analyzer::{AnalysisInput, ColumnAnalyzer};
use crate::checks::missing_check;
use crate::error::Result;

pub struct NameAnalyzer;

impl ColumnAnalyzer for NameAnalyzer {
    fn key(&self) -> AnalyzerKey {
        AnalyzerKey::Nome
    }

    fn required_columns(&self) -> &[&'static str] {
        &[columns::NAME]
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Result<Findings> {
        let reader = input.reader();
        let names = reader.texts(columns::NAME)?;
        Ok(Findings::Name(NameReport {
            missing: missing_check(&names, &reader.ids()),
        }))
    }
}
