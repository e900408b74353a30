//! Admission date checks: missing, format and year consistency with the ID.

use qc_model::{
    AdmissionReport, AnalyzerKey, DEFAULT_EXAMPLE_LIMIT, Derived, Findings, UnavailableReason,
    YearConsistencyCheck, YearMismatch, columns, ratio,
};

use crate::analyzer::{AnalysisInput, ColumnAnalyzer};
use crate::checks::{format_check, missing_check};
use crate::dates::{is_well_formed, year_text};
use crate::error::Result;

const YEAR_MISMATCH_LIMIT: usize = 20;

pub struct AdmissionDateAnalyzer;

impl ColumnAnalyzer for AdmissionDateAnalyzer {
    fn key(&self) -> AnalyzerKey {
        AnalyzerKey::DataEnt
    }

    fn required_columns(&self) -> &[&'static str] {
        &[columns::ADMISSION_DATE]
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Result<Findings> {
        let reader = input.reader();
        let dates = reader.texts(columns::ADMISSION_DATE)?;
        let ids = reader.ids();

        let year_consistency = if reader.has_column(columns::ID) {
            Derived::Computed(year_consistency(&dates, &ids))
        } else {
            Derived::Unavailable(UnavailableReason::ColumnMissing {
                column: columns::ID.to_string(),
            })
        };

        Ok(Findings::Admission(AdmissionReport {
            missing: missing_check(&dates, &ids),
            format: format_check(&dates, &ids, is_well_formed, DEFAULT_EXAMPLE_LIMIT),
            year_consistency,
        }))
    }
}

/// Compares the last two digits of the admission year with the ID prefix,
/// over rows with an ID and a well-formed date.
fn year_consistency(dates: &[Option<String>], ids: &[Option<String>]) -> YearConsistencyCheck {
    let mut checked = 0;
    let mut inconsistent_count = 0;
    let mut examples = Vec::new();

    for (row, (date, id)) in dates.iter().zip(ids).enumerate() {
        let (Some(date), Some(id)) = (date, id) else {
            continue;
        };
        let Some(year) = year_text(date) else {
            continue;
        };
        checked += 1;

        let id_prefix: String = id.chars().take(2).collect();
        let year_suffix = &year[year.len() - 2..];
        if id_prefix != year_suffix {
            inconsistent_count += 1;
            if examples.len() < YEAR_MISMATCH_LIMIT {
                examples.push(YearMismatch {
                    row,
                    id: id.clone(),
                    id_prefix,
                    date: date.clone(),
                    year: year.to_string(),
                });
            }
        }
    }

    YearConsistencyCheck {
        checked,
        consistent_count: checked - inconsistent_count,
        inconsistent_count,
        percentage: ratio(inconsistent_count, checked),
        examples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::tests::{input, test_df};

    fn report(columns: Vec<(&str, Vec<&str>)>) -> AdmissionReport {
        let df = test_df(columns);
        let Findings::Admission(report) = AdmissionDateAnalyzer.analyze(&input(&df)).unwrap()
        else {
            panic!("expected admission findings");
        };
        report
    }

    #[test]
    fn test_matching_year_is_consistent() {
        let report = report(vec![("ID", vec!["2501"]), ("data_ent", vec!["01-01-2025"])]);
        let check = report.year_consistency.computed().unwrap();
        assert_eq!(check.checked, 1);
        assert_eq!(check.consistent_count, 1);
        assert_eq!(check.inconsistent_count, 0);
        assert!(check.examples.is_empty());
    }

    #[test]
    fn test_mismatched_year_is_reported_once() {
        let report = report(vec![("ID", vec!["2401"]), ("data_ent", vec!["05-03-2025"])]);
        let check = report.year_consistency.computed().unwrap();
        assert_eq!(check.inconsistent_count, 1);
        assert_eq!(check.examples.len(), 1);
        let example = &check.examples[0];
        assert_eq!(example.id_prefix, "24");
        assert_eq!(example.year, "2025");
        assert_eq!(example.display_row(), 2);
    }

    #[test]
    fn test_mismatch_examples_capped_at_twenty() {
        let ids = vec!["2401"; 25];
        let dates = vec!["05-03-2025"; 25];
        let report = report(vec![("ID", ids), ("data_ent", dates)]);
        let check = report.year_consistency.computed().unwrap();
        assert_eq!(check.inconsistent_count, 25);
        assert_eq!(check.examples.len(), 20);
    }

    #[test]
    fn test_missing_and_format() {
        let report = report(vec![
            ("ID", vec!["2501", "2502", "2503", "2504"]),
            ("data_ent", vec!["01-01-2025", "", "2025-01-01", "1-2-2025"]),
        ]);
        assert_eq!(report.missing.count, 1);
        assert_eq!(report.format.checked, 3);
        assert_eq!(report.format.valid_count, 2);
        assert_eq!(report.format.invalid_count, 1);
        assert_eq!(report.format.examples[0].value, "2025-01-01");
        assert_eq!(report.format.examples[0].id.as_deref(), Some("2503"));

        let check = report.year_consistency.computed().unwrap();
        assert_eq!(check.checked, 2);
    }

    #[test]
    fn test_consistency_needs_id_column() {
        let report = report(vec![("data_ent", vec!["01-01-2025"])]);
        assert_eq!(
            report.year_consistency,
            Derived::Unavailable(UnavailableReason::ColumnMissing {
                column: "ID".to_string()
            })
        );
    }
}
