use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use qc_analyze::AnalysisInput;

pub fn test_df(columns: Vec<(&str, Vec<Option<String>>)>) -> DataFrame {
    let cols = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    DataFrame::new(cols).unwrap()
}

#[allow(dead_code)]
pub fn text(values: &[&str]) -> Vec<Option<String>> {
    values
        .iter()
        .map(|v| (!v.is_empty()).then(|| (*v).to_string()))
        .collect()
}

pub fn input(df: &DataFrame) -> AnalysisInput<'_> {
    AnalysisInput::new(
        df,
        Path::new("Doentes.csv"),
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
    )
}
