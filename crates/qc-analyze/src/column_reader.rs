//! Column reader utilities for analysis.
//!
//! Analyzers read every column as trimmed text. A `ColumnReader` materializes
//! a column once into `Vec<Option<String>>`, where `None` marks a missing
//! (null or blank) cell, so each check can walk plain slices.

use polars::prelude::{AnyValue, Column, DataFrame};
use qc_common::{any_to_string, is_missing_text};
use qc_model::columns;

use crate::error::{AnalyzeError, Result};

/// Text view over the columns of one DataFrame.
#[derive(Debug, Clone, Copy)]
pub struct ColumnReader<'a> {
    df: &'a DataFrame,
}

impl<'a> ColumnReader<'a> {
    #[inline]
    pub fn new(df: &'a DataFrame) -> Self {
        Self { df }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.df.height()
    }

    #[inline]
    pub fn has_column(&self, name: &str) -> bool {
        self.df.column(name).is_ok()
    }

    fn column(&self, name: &str) -> Result<&'a Column> {
        self.df
            .column(name)
            .map_err(|_| AnalyzeError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    /// Trimmed text of every cell, `None` for missing cells.
    pub fn texts(&self, name: &str) -> Result<Vec<Option<String>>> {
        let column = self.column(name)?;
        Ok((0..self.height())
            .map(|idx| {
                let text = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
                (!is_missing_text(&text)).then(|| text.trim().to_string())
            })
            .collect())
    }

    /// Identifier of every row, for labelling examples. All `None` when the
    /// identifier column is absent.
    pub fn ids(&self) -> Vec<Option<String>> {
        self.texts(columns::ID)
            .unwrap_or_else(|_| vec![None; self.height()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_texts_trim_and_mark_missing() {
        let df = DataFrame::new(vec![
            Series::new("sexo".into(), &[Some(" M"), Some("  "), None]).into_column(),
        ])
        .unwrap();
        let reader = ColumnReader::new(&df);

        assert_eq!(
            reader.texts("sexo").unwrap(),
            vec![Some("M".to_string()), None, None]
        );
        assert!(matches!(
            reader.texts("nome"),
            Err(AnalyzeError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_ids_default_to_missing() {
        let df = DataFrame::new(vec![Series::new("nome".into(), &["Ana", "Rui"]).into_column()])
            .unwrap();
        assert_eq!(ColumnReader::new(&df).ids(), vec![None, None]);
    }

    #[test]
    fn test_numeric_cells_read_as_text() {
        let df = DataFrame::new(vec![Series::new("ID".into(), &[2501.0f64]).into_column()])
            .unwrap();
        assert_eq!(
            ColumnReader::new(&df).ids(),
            vec![Some("2501".to_string())]
        );
    }
}
