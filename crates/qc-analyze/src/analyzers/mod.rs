//! The admissions column analyzers.

mod admission;
mod birth;
mod categorical;
mod discharge;
mod file;
mod identifier;
mod name;
mod record_number;

pub use admission::AdmissionDateAnalyzer;
pub use birth::{BirthDateAnalyzer, MIN_BIRTH_YEAR};
pub use categorical::{CategoricalAnalyzer, SEX_VALUES};
pub use discharge::{DischargeDateAnalyzer, LONG_STAY_DAYS};
pub use file::FileAnalyzer;
pub use identifier::{IdentifierAnalyzer, MAX_SEQUENCE_SPAN, parse_serial};
pub use name::NameAnalyzer;
pub use record_number::RecordNumberAnalyzer;

#[cfg(test)]
pub(crate) mod tests {
    use std::path::Path;

    use chrono::NaiveDate;
    use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

    use crate::analyzer::AnalysisInput;

    /// Builds a text frame; empty strings become nulls.
    pub fn test_df(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
        let cols = columns
            .into_iter()
            .map(|(name, values)| {
                let values: Vec<Option<&str>> = values
                    .into_iter()
                    .map(|v| (!v.is_empty()).then_some(v))
                    .collect();
                Series::new(name.into(), values).into_column()
            })
            .collect();
        DataFrame::new(cols).unwrap()
    }

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    pub fn input(df: &DataFrame) -> AnalysisInput<'_> {
        AnalysisInput::new(df, Path::new("Doentes.csv"), today())
    }
}
