//! Year selector over the 2-digit year prefix of admission identifiers.
//!
//! A selector is either a single year (`"25"`) or an inclusive range
//! (`"25-20"`, in either order). Years are compared as 2-digit integers and
//! always read as `20YY`; there is no century disambiguation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Inclusive 2-digit year range, normalized so that `high >= low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearFilter {
    high: u8,
    low: u8,
}

impl YearFilter {
    /// Builds a filter from two years given in any order.
    pub fn new(first: u8, second: u8) -> Self {
        if first < second {
            Self {
                high: second,
                low: first,
            }
        } else {
            Self {
                high: first,
                low: second,
            }
        }
    }

    /// Builds a single-year filter.
    pub fn single(year: u8) -> Self {
        Self::new(year, year)
    }

    /// Parses `YY` or `YY-YY`; each part must be exactly two decimal digits.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let invalid = || ModelError::InvalidFilterFormat {
            value: value.to_string(),
        };
        match trimmed.split_once('-') {
            Some((first, second)) => {
                let first = parse_two_digits(first).ok_or_else(invalid)?;
                let second = parse_two_digits(second).ok_or_else(invalid)?;
                Ok(Self::new(first, second))
            }
            None => parse_two_digits(trimmed).map(Self::single).ok_or_else(invalid),
        }
    }

    /// Parses an optional selector; absent or blank input means "no filter".
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>> {
        match value {
            Some(raw) if !raw.trim().is_empty() => Self::parse(raw).map(Some),
            _ => Ok(None),
        }
    }

    /// Parses an optional selector, treating malformed input as "no filter".
    pub fn parse_lenient(value: Option<&str>) -> Option<Self> {
        match Self::parse_optional(value) {
            Ok(filter) => filter,
            Err(error) => {
                tracing::warn!(%error, "ignoring year filter");
                None
            }
        }
    }

    pub fn high(&self) -> u8 {
        self.high
    }

    pub fn low(&self) -> u8 {
        self.low
    }

    pub fn is_single_year(&self) -> bool {
        self.high == self.low
    }

    /// Returns true when a 2-digit year lies inside the range.
    pub fn contains(&self, year: u8) -> bool {
        self.low <= year && year <= self.high
    }

    /// Row predicate: the identifier's year prefix must lie inside the range.
    ///
    /// Absent identifiers, identifiers shorter than two characters and
    /// non-numeric prefixes fail the filter.
    pub fn matches_id(&self, id: Option<&str>) -> bool {
        id.and_then(year_prefix)
            .is_some_and(|year| self.contains(year))
    }

    /// Short label used in report file names (`25` or `25-20`).
    pub fn context_label(&self) -> String {
        if self.is_single_year() {
            format!("{:02}", self.high)
        } else {
            format!("{:02}-{:02}", self.high, self.low)
        }
    }

    /// Human-readable scope (`year 2025` or `years 2020 to 2025`).
    pub fn describe(&self) -> String {
        if self.is_single_year() {
            format!("year 20{:02}", self.high)
        } else {
            format!("years 20{:02} to 20{:02}", self.low, self.high)
        }
    }
}

impl FromStr for YearFilter {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.context_label())
    }
}

/// Applies an optional filter; no filter means every row passes.
pub fn passes_filter(filter: Option<&YearFilter>, id: Option<&str>) -> bool {
    filter.is_none_or(|filter| filter.matches_id(id))
}

/// Extracts the 2-digit year prefix of an identifier.
pub fn year_prefix(id: &str) -> Option<u8> {
    let trimmed = id.trim();
    let prefix = trimmed.get(..2)?;
    parse_two_digits(prefix)
}

fn parse_two_digits(value: &str) -> Option<u8> {
    if value.len() == 2 && value.bytes().all(|b| b.is_ascii_digit()) {
        value.parse().ok()
    } else {
        None
    }
}
