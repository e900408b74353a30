//! Rendering of admissions quality-control findings.
//!
//! Reporters only format what the analyzers computed; they never derive
//! statistics of their own.
//!
//! - [`ConsoleReporter`]: incremental terminal output
//! - [`render_markdown`] and [`write_report`]: archived Markdown report

mod console;
mod error;
pub mod format;
mod markdown;
mod writer;

pub use console::ConsoleReporter;
pub use error::{ReportError, Result};
pub use markdown::render_markdown;
pub use writer::{report_file_name, write_report};
