//! CSV loading for the admissions table.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, DataType, SerReader};
use qc_model::columns;

use crate::error::{IngestError, Result};

/// Reads the admissions CSV with every column as text.
///
/// Schema inference is disabled so that identifiers and record numbers keep
/// their source representation. The identifier column is then passed
/// through [`coerce_text_column`], which is a no-op on a freshly read frame.
pub fn read_admissions(path: &Path) -> Result<DataFrame> {
    ensure_has_header(path)?;

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    strip_header_bom(&mut df)?;
    coerce_text_column(&mut df, columns::ID)?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded admissions table"
    );
    Ok(df)
}

/// Casts a column to text in place when it is stored with another type.
///
/// Values are unchanged apart from their representation, so repeated calls
/// are harmless. Returns whether a cast happened; an absent column is left
/// alone.
pub fn coerce_text_column(df: &mut DataFrame, column: &str) -> Result<bool> {
    let Ok(existing) = df.column(column) else {
        return Ok(false);
    };
    if existing.dtype() == &DataType::String {
        return Ok(false);
    }
    let casted = existing.cast(&DataType::String)?;
    df.with_column(casted)?;
    tracing::debug!(column, "coerced column to text");
    Ok(true)
}

fn ensure_has_header(path: &Path) -> Result<()> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut first_line = String::new();
    BufReader::new(file)
        .read_line(&mut first_line)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    if first_line.trim_start_matches('\u{feff}').trim().is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn strip_header_bom(df: &mut DataFrame) -> Result<()> {
    let renames: Vec<(String, String)> = df
        .get_column_names()
        .iter()
        .filter_map(|name| {
            name.strip_prefix('\u{feff}')
                .map(|clean| (name.to_string(), clean.to_string()))
        })
        .collect();
    for (old, new) in renames {
        df.rename(&old, new.into())?;
    }
    Ok(())
}
