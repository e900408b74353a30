//! Birth date checks: missing, format, plausibility and age at admission.

use std::collections::BTreeMap;

use qc_model::{
    AgeBucket, AgeExample, AgeStats, AnalyzerKey, BirthReport, DEFAULT_EXAMPLE_LIMIT, Derived,
    Findings, FlaggedAges, UnavailableReason, ValidityCheck, ValueExample, columns, ratio,
};

use crate::analyzer::{AnalysisInput, ColumnAnalyzer};
use crate::checks::{format_check, id_at, mean, median, missing_check};
use crate::dates::{DateParts, age_at, is_well_formed};
use crate::error::Result;

/// Earliest plausible birth year.
pub const MIN_BIRTH_YEAR: i32 = 1900;
const VERY_YOUNG_AGE: i32 = 5;
const VERY_OLD_AGE: i32 = 100;
const AGE_EXAMPLE_LIMIT: usize = 5;

pub struct BirthDateAnalyzer;

impl ColumnAnalyzer for BirthDateAnalyzer {
    fn key(&self) -> AnalyzerKey {
        AnalyzerKey::DataNasc
    }

    fn required_columns(&self) -> &[&'static str] {
        &[columns::BIRTH_DATE]
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Result<Findings> {
        let reader = input.reader();
        let births = reader.texts(columns::BIRTH_DATE)?;
        let ids = reader.ids();
        let current_year = input.current_year();

        let age = if reader.has_column(columns::ADMISSION_DATE) {
            let admissions = reader.texts(columns::ADMISSION_DATE)?;
            age_stats(&births, &admissions, &ids, current_year)
        } else {
            Derived::Unavailable(UnavailableReason::ColumnMissing {
                column: columns::ADMISSION_DATE.to_string(),
            })
        };

        Ok(Findings::Birth(BirthReport {
            missing: missing_check(&births, &ids),
            format: format_check(&births, &ids, is_well_formed, DEFAULT_EXAMPLE_LIMIT),
            validity: validity(&births, &ids, current_year),
            age,
        }))
    }
}

/// Birth years before 1900 or after the current year, over well-formed
/// dates.
fn validity(births: &[Option<String>], ids: &[Option<String>], current_year: i32) -> ValidityCheck {
    let mut checked = 0;
    let mut too_old_count = 0;
    let mut future_count = 0;
    let mut too_old_examples = Vec::new();
    let mut future_examples = Vec::new();

    for (row, birth) in births.iter().enumerate() {
        let Some((birth, parts)) = birth
            .as_deref()
            .and_then(|text| DateParts::parse(text).map(|parts| (text, parts)))
        else {
            continue;
        };
        checked += 1;

        let (count, examples) = if parts.year < MIN_BIRTH_YEAR {
            (&mut too_old_count, &mut too_old_examples)
        } else if parts.year > current_year {
            (&mut future_count, &mut future_examples)
        } else {
            continue;
        };
        *count += 1;
        if examples.len() < DEFAULT_EXAMPLE_LIMIT {
            examples.push(ValueExample {
                row,
                id: id_at(ids, row),
                value: birth.to_string(),
            });
        }
    }

    ValidityCheck {
        checked,
        too_old_count,
        future_count,
        percentage: ratio(too_old_count + future_count, checked),
        too_old_examples,
        future_examples,
    }
}

/// Age at admission for rows with plausible birth years.
fn age_stats(
    births: &[Option<String>],
    admissions: &[Option<String>],
    ids: &[Option<String>],
    current_year: i32,
) -> Derived<AgeStats> {
    let mut present = 0;
    let mut well_formed = 0;
    let mut ages: Vec<AgeExample> = Vec::new();

    for (row, (birth, admission)) in births.iter().zip(admissions).enumerate() {
        let (Some(birth), Some(admission)) = (birth, admission) else {
            continue;
        };
        present += 1;
        let (Some(born), Some(admitted)) = (DateParts::parse(birth), DateParts::parse(admission))
        else {
            continue;
        };
        well_formed += 1;
        if !(MIN_BIRTH_YEAR..=current_year).contains(&born.year) {
            continue;
        }
        ages.push(AgeExample {
            row,
            id: id_at(ids, row),
            age: age_at(born, admitted),
            birth_date: birth.clone(),
            admission_date: admission.clone(),
        });
    }

    if present == 0 {
        return Derived::Unavailable(UnavailableReason::NoPairedRecords);
    }
    if well_formed == 0 {
        return Derived::Unavailable(UnavailableReason::NoValidFormats);
    }
    if ages.is_empty() {
        return Derived::Unavailable(UnavailableReason::NoValidBirthYears);
    }

    let values: Vec<i64> = ages.iter().map(|example| i64::from(example.age)).collect();
    let flagged = |predicate: fn(i32) -> bool| {
        let matching: Vec<&AgeExample> = ages.iter().filter(|e| predicate(e.age)).collect();
        FlaggedAges {
            count: matching.len(),
            examples: matching
                .into_iter()
                .take(AGE_EXAMPLE_LIMIT)
                .cloned()
                .collect(),
        }
    };

    Derived::Computed(AgeStats {
        count: ages.len(),
        mean_age: mean(&values),
        median_age: median(&values),
        min_age: ages.iter().map(|e| e.age).min().unwrap_or_default(),
        max_age: ages.iter().map(|e| e.age).max().unwrap_or_default(),
        distribution: decade_distribution(&ages),
        very_young: flagged(|age| age < VERY_YOUNG_AGE),
        very_old: flagged(|age| age > VERY_OLD_AGE),
        negative: flagged(|age| age < 0),
    })
}

/// Ages bucketed by decade (floor division), ascending.
fn decade_distribution(ages: &[AgeExample]) -> Vec<AgeBucket> {
    let mut buckets: BTreeMap<i32, usize> = BTreeMap::new();
    for example in ages {
        // Floors toward negative infinity: -3 falls in the -10 bucket, not 0.
        *buckets.entry(example.age.div_euclid(10) * 10).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(start, count)| AgeBucket {
            start,
            count,
            percentage: ratio(count, ages.len()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::tests::{input, test_df};

    fn report(columns: Vec<(&str, Vec<&str>)>) -> BirthReport {
        let df = test_df(columns);
        let Findings::Birth(report) = BirthDateAnalyzer.analyze(&input(&df)).unwrap() else {
            panic!("expected birth findings");
        };
        report
    }

    fn single_age(birth: &str, admission: &str) -> i32 {
        let report = report(vec![("data_nasc", vec![birth]), ("data_ent", vec![admission])]);
        report.age.computed().unwrap().min_age
    }

    #[test]
    fn test_age_on_birthday() {
        assert_eq!(single_age("01-01-2000", "01-01-2025"), 25);
    }

    #[test]
    fn test_age_before_birthday() {
        assert_eq!(single_age("02-01-2000", "01-01-2025"), 24);
    }

    #[test]
    fn test_validity_flags_implausible_years() {
        // Reference year 2025.
        let report = report(vec![(
            "data_nasc",
            vec!["01-01-1899", "01-01-1900", "01-01-2025", "01-01-2026", "", "bad"],
        )]);
        let validity = &report.validity;
        assert_eq!(validity.checked, 4);
        assert_eq!(validity.too_old_count, 1);
        assert_eq!(validity.future_count, 1);
        assert_eq!(validity.invalid_count(), 2);
        assert_eq!(validity.too_old_examples[0].value, "01-01-1899");
        assert_eq!(validity.future_examples[0].display_row(), 5);
        assert!((validity.percentage - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_age_distribution_and_flags() {
        let report = report(vec![
            (
                "data_nasc",
                vec!["01-01-2023", "01-06-1920", "01-01-1995", "01-01-2025", "01-01-1850"],
            ),
            (
                "data_ent",
                vec!["01-01-2025", "01-01-2025", "01-01-2025", "01-01-2024", "01-01-2025"],
            ),
        ]);
        let stats = report.age.computed().unwrap();
        // Ages: 2, 104, 30, -1; 1850 excluded.
        assert_eq!(stats.count, 4);
        assert_eq!(stats.min_age, -1);
        assert_eq!(stats.max_age, 104);
        assert!((stats.median_age - 16.0).abs() < f64::EPSILON);

        let buckets: Vec<(String, usize)> = stats
            .distribution
            .iter()
            .map(|bucket| (bucket.label(), bucket.count))
            .collect();
        assert_eq!(
            buckets,
            vec![
                ("-10--1".to_string(), 1),
                ("0-9".to_string(), 1),
                ("30-39".to_string(), 1),
                ("100-109".to_string(), 1),
            ]
        );

        assert_eq!(stats.very_young.count, 2);
        assert_eq!(stats.very_old.count, 1);
        assert_eq!(stats.very_old.examples[0].age, 104);
        assert_eq!(stats.negative.count, 1);
        assert_eq!(stats.negative.examples[0].display_row(), 5);
    }

    #[test]
    fn test_age_unavailable_reasons() {
        let no_admission = report(vec![("data_nasc", vec!["01-01-2000"])]);
        assert!(matches!(
            no_admission.age,
            Derived::Unavailable(UnavailableReason::ColumnMissing { .. })
        ));

        let no_pairs = report(vec![("data_nasc", vec!["01-01-2000"]), ("data_ent", vec![""])]);
        assert_eq!(
            no_pairs.age,
            Derived::Unavailable(UnavailableReason::NoPairedRecords)
        );

        let bad_format = report(vec![("data_nasc", vec!["2000"]), ("data_ent", vec!["01-01-2025"])]);
        assert_eq!(
            bad_format.age,
            Derived::Unavailable(UnavailableReason::NoValidFormats)
        );

        let too_old = report(vec![
            ("data_nasc", vec!["01-01-1800"]),
            ("data_ent", vec!["01-01-2025"]),
        ]);
        assert_eq!(
            too_old.age,
            Derived::Unavailable(UnavailableReason::NoValidBirthYears)
        );
    }
}
