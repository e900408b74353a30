//! Quality-control analysis of the admissions table.
//!
//! Every analyzer implements [`ColumnAnalyzer`] and turns the (possibly
//! filtered) frame into a typed [`Findings`](qc_model::Findings) tree. The
//! [`AnalyzerRegistry`] runs the applicable analyzers once, in report order,
//! and collects their outcomes into a [`QualityReport`](qc_model::QualityReport)
//! that both reporters render.
//!
//! # Example
//!
//! ```ignore
//! let input = AnalysisInput::new(&df, Path::new("Doentes.csv"), today);
//! let report = AnalyzerRegistry::default().run(&input, |key, outcome| {
//!     console.render(key, outcome)
//! });
//! ```

mod analyzer;
pub mod analyzers;
mod checks;
mod column_reader;
pub mod dates;
mod error;
mod registry;

pub use analyzer::{AnalysisInput, ColumnAnalyzer};
pub use column_reader::ColumnReader;
pub use error::{AnalyzeError, Result};
pub use registry::AnalyzerRegistry;
