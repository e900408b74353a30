//! Sub-checks shared by several analyzers.

use std::collections::HashMap;

use qc_model::{
    FormatCheck, FrequencyEntry, FrequencyTable, MissingCheck, RowRef, ValueCheck, ValueExample,
    ratio,
};

/// Rows whose value is missing. Percentage is over all rows.
pub fn missing_check(values: &[Option<String>], ids: &[Option<String>]) -> MissingCheck {
    let rows = values
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_none())
        .map(|(row, _)| RowRef::new(row, id_at(ids, row)))
        .collect();
    MissingCheck::new(rows, values.len())
}

/// Non-missing values checked against `is_valid`. Percentage is invalid over
/// checked.
pub fn format_check<F>(
    values: &[Option<String>],
    ids: &[Option<String>],
    is_valid: F,
    limit: usize,
) -> FormatCheck
where
    F: Fn(&str) -> bool,
{
    let violations = value_check(values, ids, |value| !is_valid(value), limit);
    FormatCheck {
        checked: violations.checked,
        valid_count: violations.checked - violations.count,
        invalid_count: violations.count,
        percentage: violations.percentage,
        examples: violations.examples,
    }
}

/// Non-missing values flagged by `is_violation`, with up to `limit` examples.
pub fn value_check<F>(
    values: &[Option<String>],
    ids: &[Option<String>],
    is_violation: F,
    limit: usize,
) -> ValueCheck
where
    F: Fn(&str) -> bool,
{
    let mut checked = 0;
    let mut count = 0;
    let mut examples = Vec::new();

    for (row, value) in values.iter().enumerate() {
        let Some(value) = value else { continue };
        checked += 1;
        if is_violation(value) {
            count += 1;
            if examples.len() < limit {
                examples.push(ValueExample {
                    row,
                    id: id_at(ids, row),
                    value: value.clone(),
                });
            }
        }
    }

    ValueCheck {
        checked,
        count,
        percentage: ratio(count, checked),
        examples,
    }
}

/// Counts of each distinct non-missing value, most frequent first.
pub fn frequency_table(values: &[Option<String>]) -> FrequencyTable {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values.iter().flatten() {
        *counts.entry(value.as_str()).or_default() += 1;
    }
    let total: usize = counts.values().sum();

    let mut entries: Vec<FrequencyEntry> = counts
        .into_iter()
        .map(|(value, count)| FrequencyEntry {
            value: value.to_string(),
            count,
            percentage: ratio(count, total),
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));

    FrequencyTable {
        total,
        unique_count: entries.len(),
        entries,
    }
}

pub fn id_at(ids: &[Option<String>], row: usize) -> Option<String> {
    ids.get(row).cloned().flatten()
}

/// Arithmetic mean; `0.0` for no values.
pub fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<i64>() as f64 / values.len() as f64
}

/// Median of the values; the midpoint of the two central values for an even
/// count.
pub fn median(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}
