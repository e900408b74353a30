//! Typed result trees, one per analyzer, and the aggregated report.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::findings::{Derived, FormatCheck, MissingCheck, ValueCheck, ValueExample, display_row};

/// Fixed analyzer names, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKey {
    File,
    Id,
    DataEnt,
    DataAlta,
    DataNasc,
    Processo,
    Nome,
    Sexo,
    Destino,
    Origem,
}

impl AnalyzerKey {
    pub const ALL: [Self; 10] = [
        Self::File,
        Self::Id,
        Self::DataEnt,
        Self::DataAlta,
        Self::DataNasc,
        Self::Processo,
        Self::Nome,
        Self::Sexo,
        Self::Destino,
        Self::Origem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Id => "id",
            Self::DataEnt => "data_ent",
            Self::DataAlta => "data_alta",
            Self::DataNasc => "data_nasc",
            Self::Processo => "processo",
            Self::Nome => "nome",
            Self::Sexo => "sexo",
            Self::Destino => "destino",
            Self::Origem => "origem",
        }
    }

    /// Section title used by both reporters.
    pub fn title(&self) -> &'static str {
        match self {
            Self::File => "File Information",
            Self::Id => "ID Analysis",
            Self::DataEnt => "Admission Date (data_ent)",
            Self::DataAlta => "Discharge Date (data_alta)",
            Self::DataNasc => "Birth Date (data_nasc)",
            Self::Processo => "Record Number (processo)",
            Self::Nome => "Name (nome)",
            Self::Sexo => "Sex (sexo)",
            Self::Destino => "Destination (destino)",
            Self::Origem => "Origin (origem)",
        }
    }
}

impl std::fmt::Display for AnalyzerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// File
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub file_name: String,
    pub file_path: String,
    pub size_kb: f64,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
}

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifierReport {
    pub missing: MissingCheck,
    pub duplicates: DuplicateCheck,
    pub sequences: SequenceCheck,
    pub pattern: PatternCheck,
}

/// IDs occurring more than once. `count` is the number of rows involved;
/// percentage is over all rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateCheck {
    pub count: usize,
    pub percentage: f64,
    /// Number of distinct duplicated IDs.
    pub distinct_count: usize,
    pub groups: Vec<DuplicateGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub id: String,
    /// Zero-based rows, ascending.
    pub rows: Vec<usize>,
}

impl DuplicateGroup {
    pub fn display_rows(&self) -> Vec<usize> {
        self.rows.iter().copied().map(display_row).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceCheck {
    /// One entry per 2-digit year prefix, ascending.
    pub years: Vec<YearSequence>,
}

impl SequenceCheck {
    pub fn total_missing(&self) -> usize {
        self.years
            .iter()
            .filter_map(|year| match &year.status {
                SequenceStatus::Valid { missing_count, .. } => Some(*missing_count),
                SequenceStatus::Invalid { .. } | SequenceStatus::SpanTooWide { .. } => None,
            })
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSequence {
    /// The 2-digit prefix as it appears in the IDs.
    pub year: String,
    /// IDs in this year group.
    pub count: usize,
    pub status: SequenceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SequenceStatus {
    Valid {
        min_serial: u64,
        max_serial: u64,
        missing_count: usize,
        /// `missing_count / (max_serial - min_serial + 1)`.
        missing_percentage: f64,
        /// Every serial absent from `[min_serial, max_serial]`, ascending.
        missing_serials: Vec<u64>,
    },
    /// The group holds an ID whose serial is empty or not numeric.
    Invalid {
        invalid_count: usize,
        examples: Vec<String>,
    },
    /// Serials are numeric but span too many values to list the gaps.
    SpanTooWide { min_serial: u64, max_serial: u64 },
}

/// IDs checked against `^\d{3,5}$`. Percentage is invalid over non-missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternCheck {
    pub checked: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub percentage: f64,
    pub examples: Vec<ValueExample>,
    /// Distinct 2-digit year prefixes seen, ascending.
    pub years: Vec<u8>,
    /// Prefixes more than one year ahead of the current year.
    pub future_years: Vec<u8>,
    /// Prefixes more than ten years behind the current year.
    pub very_old_years: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdmissionReport {
    pub missing: MissingCheck,
    pub format: FormatCheck,
    pub year_consistency: Derived<YearConsistencyCheck>,
}

/// Admission-date year vs. ID prefix, over valid-format dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearConsistencyCheck {
    pub checked: usize,
    pub consistent_count: usize,
    pub inconsistent_count: usize,
    pub percentage: f64,
    pub examples: Vec<YearMismatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearMismatch {
    pub row: usize,
    pub id: String,
    pub id_prefix: String,
    pub date: String,
    pub year: String,
}

impl YearMismatch {
    pub fn display_row(&self) -> usize {
        display_row(self.row)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DischargeReport {
    pub missing: MissingCheck,
    pub format: FormatCheck,
    pub chronology: Derived<ChronologyCheck>,
    pub duration: Derived<DurationStats>,
}

/// Discharge must not precede admission. Percentage is over valid pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChronologyCheck {
    /// Rows with both dates present and real calendar dates.
    pub valid_pairs: usize,
    /// Well-formed rows skipped because a date does not exist on the calendar.
    pub invalid_calendar_dates: usize,
    pub error_count: usize,
    pub percentage: f64,
    /// Every violation, in row order.
    pub errors: Vec<ChronologyError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChronologyError {
    pub row: usize,
    pub id: Option<String>,
    pub admission_date: String,
    pub discharge_date: String,
}

impl ChronologyError {
    pub fn display_row(&self) -> usize {
        display_row(self.row)
    }
}

/// Stay length in days over valid pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub count: usize,
    pub mean_days: f64,
    pub median_days: f64,
    pub min_days: i64,
    pub max_days: i64,
    /// Every stay above the threshold, longest first.
    pub long_stays: Vec<LongStay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongStay {
    pub row: usize,
    pub id: Option<String>,
    pub days: i64,
    pub admission_date: String,
    pub discharge_date: String,
}

impl LongStay {
    pub fn display_row(&self) -> usize {
        display_row(self.row)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthReport {
    pub missing: MissingCheck,
    pub format: FormatCheck,
    pub validity: ValidityCheck,
    pub age: Derived<AgeStats>,
}

/// Birth years outside `[1900, current year]`, over valid-format dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidityCheck {
    pub checked: usize,
    pub too_old_count: usize,
    pub future_count: usize,
    pub percentage: f64,
    pub too_old_examples: Vec<ValueExample>,
    pub future_examples: Vec<ValueExample>,
}

impl ValidityCheck {
    pub fn invalid_count(&self) -> usize {
        self.too_old_count + self.future_count
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeStats {
    pub count: usize,
    pub mean_age: f64,
    pub median_age: f64,
    pub min_age: i32,
    pub max_age: i32,
    /// Decade buckets, ascending.
    pub distribution: Vec<AgeBucket>,
    pub very_young: FlaggedAges,
    pub very_old: FlaggedAges,
    pub negative: FlaggedAges,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeBucket {
    /// First age of the decade (multiple of ten).
    pub start: i32,
    pub count: usize,
    pub percentage: f64,
}

impl AgeBucket {
    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.start + 9)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedAges {
    pub count: usize,
    pub examples: Vec<AgeExample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeExample {
    pub row: usize,
    pub id: Option<String>,
    pub age: i32,
    pub birth_date: String,
    pub admission_date: String,
}

impl AgeExample {
    pub fn display_row(&self) -> usize {
        display_row(self.row)
    }
}

// ---------------------------------------------------------------------------
// Other columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordNumberReport {
    pub missing: MissingCheck,
    /// Values not matching `^[\d\s\-]+$`.
    pub invalid: ValueCheck,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameReport {
    pub missing: MissingCheck,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalReport {
    pub column: String,
    pub expected_values: Option<Vec<String>>,
    pub missing: MissingCheck,
    pub frequency: FrequencyTable,
    /// Present only when an expected set was configured.
    pub unexpected: Option<ValueCheck>,
}

/// Distinct values with counts. Percentages are over non-missing values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyTable {
    pub total: usize,
    pub unique_count: usize,
    /// Sorted by count descending, then value ascending.
    pub entries: Vec<FrequencyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// One analyzer's findings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "findings", rename_all = "snake_case")]
pub enum Findings {
    File(FileReport),
    Identifier(IdentifierReport),
    Admission(AdmissionReport),
    Discharge(DischargeReport),
    Birth(BirthReport),
    RecordNumber(RecordNumberReport),
    Name(NameReport),
    Categorical(CategoricalReport),
}

/// Outcome of running one applicable analyzer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnalyzerOutcome {
    Completed { findings: Findings },
    Failed { error: String },
}

impl AnalyzerOutcome {
    pub fn findings(&self) -> Option<&Findings> {
        match self {
            Self::Completed { findings } => Some(findings),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// All analyzer outcomes from a single run, keyed and ordered by analyzer.
/// Inapplicable analyzers have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualityReport {
    pub outcomes: BTreeMap<AnalyzerKey, AnalyzerOutcome>,
}

impl QualityReport {
    pub fn insert(&mut self, key: AnalyzerKey, outcome: AnalyzerOutcome) {
        self.outcomes.insert(key, outcome);
    }

    pub fn get(&self, key: AnalyzerKey) -> Option<&AnalyzerOutcome> {
        self.outcomes.get(&key)
    }

    pub fn findings(&self, key: AnalyzerKey) -> Option<&Findings> {
        self.get(key).and_then(AnalyzerOutcome::findings)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnalyzerKey, &AnalyzerOutcome)> {
        self.outcomes.iter().map(|(key, outcome)| (*key, outcome))
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_failed()).count()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyzer_keys_are_ordered_for_reports() {
        let mut keys = AnalyzerKey::ALL.to_vec();
        keys.reverse();
        keys.sort();
        assert_eq!(keys, AnalyzerKey::ALL.to_vec());
        assert_eq!(AnalyzerKey::DataAlta.as_str(), "data_alta");
    }

    #[test]
    fn analyzer_key_serializes_as_name() {
        let json = serde_json::to_string(&AnalyzerKey::DataNasc).unwrap();
        assert_eq!(json, "\"data_nasc\"");
    }

    #[test]
    fn age_bucket_label() {
        let bucket = AgeBucket {
            start: 20,
            count: 1,
            percentage: 1.0,
        };
        assert_eq!(bucket.label(), "20-29");
        let negative = AgeBucket {
            start: -10,
            count: 1,
            percentage: 1.0,
        };
        assert_eq!(negative.label(), "-10--1");
    }

    #[test]
    fn total_missing_skips_invalid_groups() {
        let check = SequenceCheck {
            years: vec![
                YearSequence {
                    year: "24".to_string(),
                    count: 2,
                    status: SequenceStatus::Valid {
                        min_serial: 1,
                        max_serial: 4,
                        missing_count: 2,
                        missing_percentage: 0.5,
                        missing_serials: vec![2, 3],
                    },
                },
                YearSequence {
                    year: "25".to_string(),
                    count: 1,
                    status: SequenceStatus::Invalid {
                        invalid_count: 1,
                        examples: vec!["25x".to_string()],
                    },
                },
            ],
        };
        assert_eq!(check.total_missing(), 2);
    }

    #[test]
    fn report_counts_failures() {
        let mut report = QualityReport::default();
        report.insert(
            AnalyzerKey::Nome,
            AnalyzerOutcome::Failed {
                error: "boom".to_string(),
            },
        );
        assert_eq!(report.failed_count(), 1);
        assert!(report.findings(AnalyzerKey::Nome).is_none());
    }
}
