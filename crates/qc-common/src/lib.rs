//! Shared utilities for the admissions quality-control crates.
//!
//! Every column in the admissions table is treated as untyped text at the
//! boundary; these helpers turn Polars cells into trimmed strings and decide
//! what counts as a missing value.

pub mod polars;

pub use polars::{any_to_string, cell_text, format_numeric, is_missing_text};
