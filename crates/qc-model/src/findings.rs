//! Building blocks shared by every analyzer's result tree.
//!
//! Each sub-check carries a count, a percentage in `[0, 1]` over the check's
//! own population, and a bounded list of examples. Examples store zero-based
//! row indices; [`RowRef::display_row`] applies the header offset used in
//! user-facing output.

use serde::Serialize;

/// Offset between a zero-based frame row and the row number shown to users
/// (1-based rows plus the header row).
pub const ROW_OFFSET: usize = 2;

/// Example cap for missing-value row lists and format examples.
pub const DEFAULT_EXAMPLE_LIMIT: usize = 10;

/// `count / total`, or `0.0` for an empty population.
pub fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// A reference to one source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRef {
    /// Zero-based frame index.
    pub row: usize,
    /// Identifier of the row, if present.
    pub id: Option<String>,
}

impl RowRef {
    pub fn new(row: usize, id: Option<String>) -> Self {
        Self { row, id }
    }

    pub fn display_row(&self) -> usize {
        display_row(self.row)
    }
}

/// Converts a zero-based frame index to the row number shown to users.
pub fn display_row(row: usize) -> usize {
    row + ROW_OFFSET
}

/// A row together with the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueExample {
    pub row: usize,
    pub id: Option<String>,
    pub value: String,
}

impl ValueExample {
    pub fn display_row(&self) -> usize {
        display_row(self.row)
    }
}

/// Null or blank values in a column. Percentage is over all rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingCheck {
    pub count: usize,
    pub percentage: f64,
    /// Every missing row, in frame order.
    pub rows: Vec<RowRef>,
}

impl MissingCheck {
    pub fn new(rows: Vec<RowRef>, total: usize) -> Self {
        Self {
            count: rows.len(),
            percentage: ratio(rows.len(), total),
            rows,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.count == 0
    }
}

/// Pattern validation over the non-missing values of a column.
/// Percentage is `invalid_count / checked`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatCheck {
    pub checked: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub percentage: f64,
    pub examples: Vec<ValueExample>,
}

impl FormatCheck {
    pub fn is_clean(&self) -> bool {
        self.invalid_count == 0
    }
}

/// Values that failed a rule, over the non-missing values checked.
/// Used for invalid record numbers and unexpected categorical values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCheck {
    pub checked: usize,
    pub count: usize,
    pub percentage: f64,
    pub examples: Vec<ValueExample>,
}

impl ValueCheck {
    pub fn is_clean(&self) -> bool {
        self.count == 0
    }
}

/// Result of a check that depends on other columns or on parseable input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Derived<T> {
    Computed(T),
    Unavailable(UnavailableReason),
}

impl<T> Derived<T> {
    pub fn computed(&self) -> Option<&T> {
        match self {
            Self::Computed(value) => Some(value),
            Self::Unavailable(_) => None,
        }
    }
}

/// Why a derived check could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnavailableReason {
    /// A column the check pairs with is absent.
    ColumnMissing { column: String },
    /// No row had both values present and well-formed.
    NoPairedRecords,
    /// No value passed the format check.
    NoValidFormats,
    /// No birth year fell inside the accepted range.
    NoValidBirthYears,
}

impl UnavailableReason {
    pub fn message(&self) -> String {
        match self {
            Self::ColumnMissing { column } => format!("{column} column not found"),
            Self::NoPairedRecords => "no records with both dates valid".to_string(),
            Self::NoValidFormats => "no dates with a valid format".to_string(),
            Self::NoValidBirthYears => "no birth years in the accepted range".to_string(),
        }
    }
}
