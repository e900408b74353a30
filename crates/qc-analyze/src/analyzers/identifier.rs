//! Identifier checks: missing, duplicates, per-year sequences and pattern.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use qc_model::{
    AnalyzerKey, DuplicateCheck, DuplicateGroup, Findings, IdentifierReport, PatternCheck,
    SequenceCheck, SequenceStatus, YearSequence, columns, ratio, year_prefix,
};
use regex::Regex;

use crate::analyzer::{AnalysisInput, ColumnAnalyzer};
use crate::checks::{missing_check, value_check};
use crate::error::Result;

/// Two year digits followed by a 1-3 digit serial.
static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3,5}$").expect("Invalid ID regex"));

const PATTERN_EXAMPLE_LIMIT: usize = 5;
const SEQUENCE_EXAMPLE_LIMIT: usize = 5;

/// Largest serial range whose gaps are enumerated.
pub const MAX_SEQUENCE_SPAN: u64 = 1_000_000;

pub struct IdentifierAnalyzer;

impl ColumnAnalyzer for IdentifierAnalyzer {
    fn key(&self) -> AnalyzerKey {
        AnalyzerKey::Id
    }

    fn required_columns(&self) -> &[&'static str] {
        &[columns::ID]
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Result<Findings> {
        let ids = input.reader().texts(columns::ID)?;
        let current_year = input.current_year().rem_euclid(100);

        Ok(Findings::Identifier(IdentifierReport {
            missing: missing_check(&ids, &ids),
            duplicates: duplicates(&ids),
            sequences: sequences(&ids),
            pattern: pattern(&ids, current_year),
        }))
    }
}

/// Every ID seen on two or more rows, in order of first appearance.
fn duplicates(ids: &[Option<String>]) -> DuplicateCheck {
    let mut order: Vec<&str> = Vec::new();
    let mut rows_by_id: HashMap<&str, Vec<usize>> = HashMap::new();
    for (row, id) in ids.iter().enumerate() {
        let Some(id) = id.as_deref() else { continue };
        let rows = rows_by_id.entry(id).or_insert_with(|| {
            order.push(id);
            Vec::new()
        });
        rows.push(row);
    }

    let groups: Vec<DuplicateGroup> = order
        .into_iter()
        .filter_map(|id| {
            let rows = rows_by_id.remove(id)?;
            (rows.len() > 1).then(|| DuplicateGroup {
                id: id.to_string(),
                rows,
            })
        })
        .collect();
    let count = groups.iter().map(|group| group.rows.len()).sum();

    DuplicateCheck {
        count,
        percentage: ratio(count, ids.len()),
        distinct_count: groups.len(),
        groups,
    }
}

/// Splits an ID into its 2-character year prefix and serial text.
fn split_id(id: &str) -> (String, String) {
    let prefix: String = id.chars().take(2).collect();
    let serial: String = id.chars().skip(2).collect();
    (prefix, serial)
}

/// Serial number with leading zeros stripped; an all-zero serial is `0`.
/// Empty or non-numeric serials have no number.
pub fn parse_serial(serial: &str) -> Option<u64> {
    if serial.is_empty() || !serial.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let stripped = serial.trim_start_matches('0');
    if stripped.is_empty() {
        Some(0)
    } else {
        stripped.parse().ok()
    }
}

/// Gap analysis per year prefix.
fn sequences(ids: &[Option<String>]) -> SequenceCheck {
    let mut by_year: BTreeMap<String, Vec<(&str, String)>> = BTreeMap::new();
    for id in ids.iter().flatten() {
        let (prefix, serial) = split_id(id);
        by_year.entry(prefix).or_default().push((id.as_str(), serial));
    }

    let years = by_year
        .into_iter()
        .map(|(year, members)| YearSequence {
            year,
            count: members.len(),
            status: sequence_status(&members),
        })
        .collect();
    SequenceCheck { years }
}

fn sequence_status(members: &[(&str, String)]) -> SequenceStatus {
    let mut observed = BTreeSet::new();
    let mut invalid = Vec::new();
    for (id, serial) in members {
        match parse_serial(serial) {
            Some(number) => {
                observed.insert(number);
            }
            None => invalid.push(*id),
        }
    }

    if !invalid.is_empty() {
        return SequenceStatus::Invalid {
            invalid_count: invalid.len(),
            examples: invalid
                .into_iter()
                .take(SEQUENCE_EXAMPLE_LIMIT)
                .map(str::to_string)
                .collect(),
        };
    }

    // Non-empty: every member parsed.
    let (Some(&min_serial), Some(&max_serial)) = (observed.first(), observed.last()) else {
        return SequenceStatus::Invalid {
            invalid_count: 0,
            examples: Vec::new(),
        };
    };
    let Some(span) = max_serial
        .checked_sub(min_serial)
        .and_then(|delta| delta.checked_add(1))
        .filter(|span| *span <= MAX_SEQUENCE_SPAN)
    else {
        return SequenceStatus::SpanTooWide {
            min_serial,
            max_serial,
        };
    };

    let missing_serials: Vec<u64> = (min_serial..=max_serial)
        .filter(|serial| !observed.contains(serial))
        .collect();
    SequenceStatus::Valid {
        min_serial,
        max_serial,
        missing_count: missing_serials.len(),
        missing_percentage: missing_serials.len() as f64 / span as f64,
        missing_serials,
    }
}

/// Regex validation plus the spread of year prefixes.
fn pattern(ids: &[Option<String>], current_year: i32) -> PatternCheck {
    let check = value_check(
        ids,
        ids,
        |id| !ID_REGEX.is_match(id),
        PATTERN_EXAMPLE_LIMIT,
    );

    let years: BTreeSet<u8> = ids.iter().flatten().filter_map(|id| year_prefix(id)).collect();
    let future_years = years
        .iter()
        .copied()
        .filter(|year| i32::from(*year) > current_year + 1)
        .collect();
    let very_old_years = years
        .iter()
        .copied()
        .filter(|year| i32::from(*year) < current_year - 10)
        .collect();

    PatternCheck {
        checked: check.checked,
        valid_count: check.checked - check.count,
        invalid_count: check.count,
        percentage: check.percentage,
        examples: check.examples,
        years: years.into_iter().collect(),
        future_years,
        very_old_years,
    }
}
