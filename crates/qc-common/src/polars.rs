//! Polars AnyValue utility functions.
//!
//! This module provides helper functions for reading Polars cells as text,
//! which is how every analyzer consumes the admissions table.

use polars::prelude::{AnyValue, DataFrame};

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null`, formats numeric types without
/// unnecessary trailing zeros so that a float-coerced `2501.0` reads `2501`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use qc_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::Float64(2501.0)), "2501");
/// assert_eq!(any_to_string(AnyValue::String("25001")), "25001");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        // For any other type, use Display but strip outer quotes if present
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Formats a floating-point number as a string without trailing zeros after decimal.
///
/// Only trims trailing zeros if the number contains a decimal point.
///
/// # Examples
///
/// ```
/// use qc_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(40.0), "40");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() || trimmed == "-" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Returns true when a cell's text counts as missing (null, empty or blank).
pub fn is_missing_text(value: &str) -> bool {
    value.trim().is_empty()
}

/// Reads one cell as trimmed text, returning `None` for missing values,
/// absent columns and out-of-range rows.
pub fn cell_text(df: &DataFrame, column: &str, idx: usize) -> Option<String> {
    let series = df.column(column).ok()?;
    let value = series.get(idx).unwrap_or(AnyValue::Null);
    let text = any_to_string(value);
    (!is_missing_text(&text)).then(|| text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_string_integers() {
        assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
        assert_eq!(any_to_string(AnyValue::Int64(-100)), "-100");
        assert_eq!(any_to_string(AnyValue::UInt32(0)), "0");
    }

    #[test]
    fn test_any_to_string_floats() {
        assert_eq!(any_to_string(AnyValue::Float64(1.5)), "1.5");
        assert_eq!(any_to_string(AnyValue::Float64(25001.0)), "25001");
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(1.5), "1.5");
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(100.0), "100");
    }

    #[test]
    fn test_is_missing_text() {
        assert!(is_missing_text(""));
        assert!(is_missing_text("   "));
        assert!(!is_missing_text(" M "));
    }

    #[test]
    fn test_cell_text() {
        let column: Column =
            Series::new("sexo".into(), &[Some(" F "), None, Some("")]).into_column();
        let df = DataFrame::new(vec![column]).unwrap();

        assert_eq!(cell_text(&df, "sexo", 0), Some("F".to_string()));
        assert_eq!(cell_text(&df, "sexo", 1), None);
        assert_eq!(cell_text(&df, "sexo", 2), None);
        assert_eq!(cell_text(&df, "other", 0), None);
        assert_eq!(cell_text(&df, "sexo", 10), None);
    }
}
