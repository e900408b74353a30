//! Year-range row filter over the identifier column.

use polars::prelude::{AnyValue, BooleanChunked, DataFrame, NewChunkedArray};
use qc_common::any_to_string;
use qc_model::{YearFilter, columns};

use crate::error::{IngestError, Result};

/// Keeps the rows whose identifier prefix lies inside the filter's range.
///
/// Without a filter the frame is returned unchanged. Rows with an absent or
/// malformed identifier never pass an active filter; a frame without an
/// identifier column cannot be filtered at all.
pub fn apply_year_filter(df: &DataFrame, filter: Option<&YearFilter>) -> Result<DataFrame> {
    let Some(filter) = filter else {
        return Ok(df.clone());
    };

    let ids = df
        .column(columns::ID)
        .map_err(|_| IngestError::ColumnNotFound {
            column: columns::ID.to_string(),
        })?;

    let keep: Vec<bool> = (0..df.height())
        .map(|idx| {
            let id = any_to_string(ids.get(idx).unwrap_or(AnyValue::Null));
            filter.matches_id(Some(id.as_str()))
        })
        .collect();

    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let filtered = df.filter(&mask)?;

    tracing::info!(
        filter = %filter,
        total = df.height(),
        kept = filtered.height(),
        "applied year filter"
    );
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn ids_df(ids: &[Option<&str>]) -> DataFrame {
        DataFrame::new(vec![Series::new("ID".into(), ids).into_column()]).unwrap()
    }

    fn ids_of(df: &DataFrame) -> Vec<String> {
        (0..df.height())
            .map(|idx| any_to_string(df.column("ID").unwrap().get(idx).unwrap()))
            .collect()
    }

    #[test]
    fn test_range_filter_keeps_matching_years() {
        let df = ids_df(&[Some("2501"), Some("2401"), Some("2301"), Some("2201")]);
        let filter = YearFilter::parse("25-23").unwrap();

        let filtered = apply_year_filter(&df, Some(&filter)).unwrap();
        assert_eq!(ids_of(&filtered), vec!["2501", "2401", "2301"]);
    }

    #[test]
    fn test_malformed_ids_fail_active_filter() {
        let df = ids_df(&[Some("2501"), None, Some("2"), Some("ab12"), Some("")]);
        let filter = YearFilter::single(25);

        let filtered = apply_year_filter(&df, Some(&filter)).unwrap();
        assert_eq!(filtered.height(), 1);
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let df = ids_df(&[Some("2501"), None]);
        let filtered = apply_year_filter(&df, None).unwrap();
        assert_eq!(filtered.height(), 2);
    }

    #[test]
    fn test_filter_requires_id_column() {
        let df = DataFrame::new(vec![Series::new("nome".into(), &["Ana"]).into_column()]).unwrap();
        let filter = YearFilter::single(25);
        let result = apply_year_filter(&df, Some(&filter));
        assert!(matches!(result, Err(IngestError::ColumnNotFound { .. })));
    }
}
