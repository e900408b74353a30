//! `dd-mm-yyyy` date handling.
//!
//! The format check is purely textual. Calendar validity is only needed
//! where two dates are subtracted; age arithmetic works on the numeric parts.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Day and month may have one or two digits; the year has exactly four.
static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}$").expect("Invalid date regex"));

/// Returns true when the (trimmed) value matches `dd-mm-yyyy`.
pub fn is_well_formed(value: &str) -> bool {
    DATE_REGEX.is_match(value)
}

/// Numeric components of a well-formed date, not necessarily a real one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl DateParts {
    /// Splits a well-formed date; `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        if !is_well_formed(value) {
            return None;
        }
        let mut parts = value.split('-');
        Some(Self {
            day: parts.next()?.parse().ok()?,
            month: parts.next()?.parse().ok()?,
            year: parts.next()?.parse().ok()?,
        })
    }

    /// The calendar date, if these parts name one (`31-02-2025` does not).
    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Whole years between a birth date and a later date.
///
/// Year difference, minus one when the month/day of `at` falls before the
/// birthday within the year.
pub fn age_at(birth: DateParts, at: DateParts) -> i32 {
    let before_birthday = (at.month, at.day) < (birth.month, birth.day);
    at.year - birth.year - i32::from(before_birthday)
}

/// Year component as written (`"2025"`) of a well-formed date.
pub fn year_text(value: &str) -> Option<&str> {
    is_well_formed(value)
        .then(|| value.rsplit('-').next())
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(value: &str) -> DateParts {
        DateParts::parse(value).unwrap()
    }

    #[test]
    fn test_format() {
        assert!(is_well_formed("01-01-2025"));
        assert!(is_well_formed("1-1-2025"));
        assert!(is_well_formed("31-02-2025"));
        assert!(!is_well_formed("2025-01-01"));
        assert!(!is_well_formed("01/01/2025"));
        assert!(!is_well_formed("01-01-25"));
        assert!(!is_well_formed("001-01-2025"));
    }

    #[test]
    fn test_parts_and_calendar() {
        assert_eq!(
            parts("5-3-2025"),
            DateParts {
                day: 5,
                month: 3,
                year: 2025
            }
        );
        assert!(parts("31-02-2025").to_date().is_none());
        assert_eq!(
            parts("28-02-2025").to_date(),
            NaiveDate::from_ymd_opt(2025, 2, 28)
        );
        assert!(DateParts::parse("bad").is_none());
    }

    #[test]
    fn test_age_on_birthday() {
        assert_eq!(age_at(parts("01-01-2000"), parts("01-01-2025")), 25);
    }

    #[test]
    fn test_age_day_before_birthday() {
        assert_eq!(age_at(parts("02-01-2000"), parts("01-01-2025")), 24);
        assert_eq!(age_at(parts("15-06-2000"), parts("14-06-2025")), 24);
        assert_eq!(age_at(parts("15-06-2000"), parts("15-07-2025")), 25);
    }

    #[test]
    fn test_negative_age() {
        assert_eq!(age_at(parts("01-01-2026"), parts("01-01-2025")), -1);
    }

    #[test]
    fn test_year_text() {
        assert_eq!(year_text("05-03-2025"), Some("2025"));
        assert_eq!(year_text("05-03-25"), None);
    }
}
