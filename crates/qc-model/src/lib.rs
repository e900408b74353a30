//! Data model for admissions quality control.
//!
//! - [`columns`]: the fixed column vocabulary of the admissions table
//! - [`YearFilter`]: year selector over identifier prefixes
//! - [`findings`] and [`report`]: typed result trees shared by analyzers and
//!   reporters
//! - [`PatientRecord`]: normalized per-patient document

pub mod columns;
pub mod error;
pub mod findings;
pub mod record;
pub mod report;
pub mod scope;
pub mod year_filter;

pub use error::{ModelError, Result};
pub use findings::{
    DEFAULT_EXAMPLE_LIMIT, Derived, FormatCheck, MissingCheck, ROW_OFFSET, RowRef,
    UnavailableReason, ValueCheck, ValueExample, display_row, ratio,
};
pub use record::{PatientRecord, RawRecord, parse_document_date};
pub use report::{
    AdmissionReport, AgeBucket, AgeExample, AgeStats, AnalyzerKey, AnalyzerOutcome, BirthReport,
    CategoricalReport, ChronologyCheck, ChronologyError, DischargeReport, DuplicateCheck,
    DuplicateGroup, DurationStats, FileReport, Findings, FlaggedAges, FrequencyEntry,
    FrequencyTable, IdentifierReport, LongStay, NameReport, PatternCheck, QualityReport,
    RecordNumberReport, SequenceCheck, SequenceStatus, ValidityCheck, YearConsistencyCheck,
    YearMismatch, YearSequence,
};
pub use scope::ReportScope;
pub use year_filter::{YearFilter, passes_filter, year_prefix};
