//! Fixed column vocabulary of the admissions table.
//!
//! Any subset of these columns may be absent from a given export; analyzers
//! test for presence before reading them.

/// Admission identifier: 2-digit year prefix followed by a per-year serial.
pub const ID: &str = "ID";
/// Hospital record number.
pub const RECORD_NUMBER: &str = "processo";
/// Patient name.
pub const NAME: &str = "nome";
/// Admission date (`dd-mm-yyyy`).
pub const ADMISSION_DATE: &str = "data_ent";
/// Discharge date (`dd-mm-yyyy`).
pub const DISCHARGE_DATE: &str = "data_alta";
/// Birth date (`dd-mm-yyyy`).
pub const BIRTH_DATE: &str = "data_nasc";
/// Discharge destination.
pub const DESTINATION: &str = "destino";
/// Patient sex (`M` or `F`).
pub const SEX: &str = "sexo";
/// Admission origin.
pub const ORIGIN: &str = "origem";

/// Every known column, in source-file order.
pub const ALL: [&str; 9] = [
    ID,
    RECORD_NUMBER,
    NAME,
    ADMISSION_DATE,
    DISCHARGE_DATE,
    DESTINATION,
    SEX,
    BIRTH_DATE,
    ORIGIN,
];

/// Human-readable description of a known column.
pub fn describe(column: &str) -> Option<&'static str> {
    match column {
        ID => Some("Admission identifier"),
        RECORD_NUMBER => Some("Medical record number"),
        NAME => Some("Patient name"),
        ADMISSION_DATE => Some("Admission date"),
        DISCHARGE_DATE => Some("Discharge date"),
        BIRTH_DATE => Some("Birth date"),
        DESTINATION => Some("Discharge destination"),
        SEX => Some("Sex"),
        ORIGIN => Some("Admission origin"),
        _ => None,
    }
}
