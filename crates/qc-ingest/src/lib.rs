//! Admissions table ingestion.
//!
//! Loads the exported admissions spreadsheet (CSV) into a Polars
//! [`DataFrame`](polars::prelude::DataFrame) with every column as text,
//! restricts it to a year range and extracts per-patient documents.

mod error;
mod filter;
mod reader;
mod records;

pub use error::{IngestError, Result};
pub use filter::apply_year_filter;
pub use reader::{coerce_text_column, read_admissions};
pub use records::{raw_record, records_from_frame};
