//! Per-patient document built from one admissions row.
//!
//! Normalization is a single validation step: every field is optional except
//! the identifier, and values that cannot be normalized are dropped with a
//! warning instead of failing the row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::year_filter::year_prefix;

/// Date layout used in source cells and in serialized documents.
pub const DOCUMENT_DATE_FORMAT: &str = "%d-%m-%Y";

/// Raw cell text for one row, as read from the source table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub id: Option<String>,
    pub processo: Option<String>,
    pub nome: Option<String>,
    pub data_ent: Option<String>,
    pub data_alta: Option<String>,
    pub destino: Option<String>,
    pub sexo: Option<String>,
    pub data_nasc: Option<String>,
    pub origem: Option<String>,
}

/// Normalized patient document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub processo: Option<u64>,
    pub nome: String,
    #[serde(with = "document_date")]
    pub data_ent: Option<NaiveDate>,
    #[serde(with = "document_date")]
    pub data_alta: Option<NaiveDate>,
    pub destino: Option<String>,
    pub sexo: Option<String>,
    #[serde(with = "document_date")]
    pub data_nasc: Option<NaiveDate>,
    pub origem: Option<String>,
}

impl PatientRecord {
    /// Validates and normalizes a raw row.
    pub fn from_raw(raw: &RawRecord) -> Result<Self> {
        let id = raw
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(ModelError::MissingIdentifier)?
            .to_string();

        Ok(Self {
            processo: raw.processo.as_deref().and_then(normalize_record_number),
            nome: raw.nome.as_deref().map(str::trim).unwrap_or_default().to_string(),
            data_ent: raw.data_ent.as_deref().and_then(|v| normalize_date(&id, "data_ent", v)),
            data_alta: raw.data_alta.as_deref().and_then(|v| normalize_date(&id, "data_alta", v)),
            data_nasc: raw.data_nasc.as_deref().and_then(|v| normalize_date(&id, "data_nasc", v)),
            destino: raw.destino.as_deref().and_then(normalize_text),
            origem: raw.origem.as_deref().and_then(normalize_text),
            sexo: raw.sexo.as_deref().and_then(|v| normalize_sex(&id, v)),
            id,
        })
    }

    /// 2-digit year encoded in the identifier prefix.
    pub fn year_from_id(&self) -> Option<u8> {
        year_prefix(&self.id)
    }

    /// Pretty-printed JSON document.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Keeps only the digits of a record number; nothing left means absent.
pub fn normalize_record_number(value: &str) -> Option<u64> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let parsed = digits.parse().ok();
    if parsed.is_none() {
        tracing::warn!(value, "record number out of range, dropped");
    }
    parsed
}

/// Parses `dd-mm-yyyy`; single-digit day/month are accepted and a 2-digit
/// year is read as `20yy`.
pub fn parse_document_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.trim().split('-');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = match year.len() {
        2 => 2000 + year.parse::<i32>().ok()?,
        4 => year.parse().ok()?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn normalize_date(id: &str, field: &str, value: &str) -> Option<NaiveDate> {
    if value.trim().is_empty() {
        return None;
    }
    let parsed = parse_document_date(value);
    if parsed.is_none() {
        tracing::warn!(id, field, value, "invalid date format");
    }
    parsed
}

fn normalize_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn normalize_sex(id: &str, value: &str) -> Option<String> {
    let normalized = value.trim().to_uppercase();
    match normalized.as_str() {
        "" => None,
        "M" | "F" => Some(normalized),
        _ => {
            tracing::warn!(id, value = %normalized, "invalid sexo, expected M or F");
            None
        }
    }
}

mod document_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{DOCUMENT_DATE_FORMAT, parse_document_date};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => {
                serializer.serialize_str(&date.format(DOCUMENT_DATE_FORMAT).to_string())
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        match value {
            Some(text) => parse_document_date(&text)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{text}'"))),
            None => Ok(None),
        }
    }
}
