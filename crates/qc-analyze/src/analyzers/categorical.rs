//! Generic checks for nominal columns (sex, destination, origin).

use qc_model::{AnalyzerKey, CategoricalReport, DEFAULT_EXAMPLE_LIMIT, Findings};

use crate::analyzer::{AnalysisInput, ColumnAnalyzer};
use crate::checks::{frequency_table, missing_check, value_check};
use crate::error::Result;

/// Accepted values of the sex column.
pub const SEX_VALUES: &[&str] = &["M", "F"];

/// Missing values and frequencies for one column, plus unexpected values
/// when a closed set of expected values is configured.
pub struct CategoricalAnalyzer {
    key: AnalyzerKey,
    columns: [&'static str; 1],
    expected: Option<&'static [&'static str]>,
}

impl CategoricalAnalyzer {
    pub fn new(
        key: AnalyzerKey,
        column: &'static str,
        expected: Option<&'static [&'static str]>,
    ) -> Self {
        Self {
            key,
            columns: [column],
            expected,
        }
    }

    pub fn column(&self) -> &'static str {
        self.columns[0]
    }
}

impl ColumnAnalyzer for CategoricalAnalyzer {
    fn key(&self) -> AnalyzerKey {
        self.key
    }

    fn required_columns(&self) -> &[&'static str] {
        &self.columns
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Result<Findings> {
        let reader = input.reader();
        let values = reader.texts(self.column())?;
        let ids = reader.ids();

        let unexpected = self.expected.map(|expected| {
            value_check(
                &values,
                &ids,
                |value| !expected.contains(&value),
                DEFAULT_EXAMPLE_LIMIT,
            )
        });

        Ok(Findings::Categorical(CategoricalReport {
            column: self.column().to_string(),
            expected_values: self
                .expected
                .map(|expected| expected.iter().map(|v| (*v).to_string()).collect()),
            missing: missing_check(&values, &ids),
            frequency: frequency_table(&values),
            unexpected,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::tests::{input, test_df};
    use polars::prelude::DataFrame;

    fn report(analyzer: &CategoricalAnalyzer, df: &DataFrame) -> CategoricalReport {
        let Findings::Categorical(report) = analyzer.analyze(&input(df)).unwrap() else {
            panic!("expected categorical findings");
        };
        report
    }

    #[test]
    fn test_sex_with_expected_values() {
        let analyzer = CategoricalAnalyzer::new(AnalyzerKey::Sexo, "sexo", Some(SEX_VALUES));
        let df = test_df(vec![
            ("ID", vec!["2501", "2502", "2503", "2504", "2505"]),
            ("sexo", vec!["M", "F", "f", "", "M"]),
        ]);
        let report = report(&analyzer, &df);

        assert_eq!(report.missing.count, 1);
        assert_eq!(report.frequency.total, 4);
        assert_eq!(report.frequency.unique_count, 3);
        assert_eq!(report.frequency.entries[0].value, "M");
        assert_eq!(report.frequency.entries[0].count, 2);

        let unexpected = report.unexpected.unwrap();
        assert_eq!(unexpected.checked, 4);
        assert_eq!(unexpected.count, 1);
        assert_eq!(unexpected.examples[0].value, "f");
        assert_eq!(unexpected.examples[0].id.as_deref(), Some("2503"));
    }

    #[test]
    fn test_open_set_skips_unexpected() {
        let analyzer = CategoricalAnalyzer::new(AnalyzerKey::Destino, "destino", None);
        let df = test_df(vec![("destino", vec!["Casa", "Lar", "Casa"])]);
        let report = report(&analyzer, &df);

        assert!(report.unexpected.is_none());
        assert!(report.expected_values.is_none());
        assert_eq!(report.frequency.entries[0].value, "Casa");
        assert!((report.frequency.entries[0].percentage - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_applicability_follows_column() {
        let analyzer = CategoricalAnalyzer::new(AnalyzerKey::Origem, "origem", None);
        let df = test_df(vec![("destino", vec!["Casa"])]);
        assert!(!analyzer.is_applicable(&df));
    }
}
