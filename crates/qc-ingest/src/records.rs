//! Patient documents extracted from the admissions table.

use polars::prelude::DataFrame;
use qc_common::cell_text;
use qc_model::{PatientRecord, RawRecord, columns};

/// Builds one normalized record per row, in frame order.
///
/// A row that cannot become a record (no identifier) yields an error for
/// that row only.
pub fn records_from_frame(df: &DataFrame) -> Vec<qc_model::Result<PatientRecord>> {
    (0..df.height())
        .map(|idx| PatientRecord::from_raw(&raw_record(df, idx)))
        .collect()
}

/// Raw cell text of one row. Absent columns read as missing.
pub fn raw_record(df: &DataFrame, idx: usize) -> RawRecord {
    let cell = |column: &str| cell_text(df, column, idx);
    RawRecord {
        id: cell(columns::ID),
        processo: cell(columns::RECORD_NUMBER),
        nome: cell(columns::NAME),
        data_ent: cell(columns::ADMISSION_DATE),
        data_alta: cell(columns::DISCHARGE_DATE),
        destino: cell(columns::DESTINATION),
        sexo: cell(columns::SEX),
        data_nasc: cell(columns::BIRTH_DATE),
        origem: cell(columns::ORIGIN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};
    use qc_model::ModelError;

    fn test_df(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
        let cols = columns
            .into_iter()
            .map(|(name, values)| Series::new(name.into(), values).into_column())
            .collect();
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn test_records_follow_frame_order() {
        let df = test_df(vec![
            ("ID", vec![Some("2501"), None, Some("2503")]),
            ("nome", vec![Some("Ana"), Some("Rui"), None]),
            ("data_ent", vec![Some("01-01-2025"), None, Some("bad")]),
        ]);

        let records = records_from_frame(&df);
        assert_eq!(records.len(), 3);

        let first = records[0].as_ref().unwrap();
        assert_eq!(first.id, "2501");
        assert_eq!(first.nome, "Ana");
        assert!(first.data_ent.is_some());

        assert_eq!(records[1].as_ref().unwrap_err(), &ModelError::MissingIdentifier);

        let third = records[2].as_ref().unwrap();
        assert_eq!(third.nome, "");
        assert_eq!(third.data_ent, None);
    }

    #[test]
    fn test_absent_columns_read_as_missing() {
        let df = test_df(vec![("ID", vec![Some("2501")])]);
        let raw = raw_record(&df, 0);
        assert_eq!(raw.id.as_deref(), Some("2501"));
        assert_eq!(raw.sexo, None);
        assert_eq!(raw.data_nasc, None);
    }
}
