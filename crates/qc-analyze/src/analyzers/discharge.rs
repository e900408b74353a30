//! Discharge date checks: missing, format, chronology and length of stay.

use qc_model::{
    AnalyzerKey, ChronologyCheck, ChronologyError, DEFAULT_EXAMPLE_LIMIT, Derived,
    DischargeReport, DurationStats, Findings, LongStay, UnavailableReason, columns, ratio,
};

use crate::analyzer::{AnalysisInput, ColumnAnalyzer};
use crate::checks::{format_check, id_at, mean, median, missing_check};
use crate::dates::{DateParts, is_well_formed};
use crate::error::Result;

/// Stays longer than this many days are flagged.
pub const LONG_STAY_DAYS: i64 = 60;

pub struct DischargeDateAnalyzer;

impl ColumnAnalyzer for DischargeDateAnalyzer {
    fn key(&self) -> AnalyzerKey {
        AnalyzerKey::DataAlta
    }

    fn required_columns(&self) -> &[&'static str] {
        &[columns::DISCHARGE_DATE]
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Result<Findings> {
        let reader = input.reader();
        let discharges = reader.texts(columns::DISCHARGE_DATE)?;
        let ids = reader.ids();

        let (chronology, duration) = if reader.has_column(columns::ADMISSION_DATE) {
            let admissions = reader.texts(columns::ADMISSION_DATE)?;
            let pairs = stay_pairs(&admissions, &discharges, &ids);
            (
                Derived::Computed(chronology(&pairs)),
                duration(&pairs),
            )
        } else {
            let reason = UnavailableReason::ColumnMissing {
                column: columns::ADMISSION_DATE.to_string(),
            };
            (
                Derived::Unavailable(reason.clone()),
                Derived::Unavailable(reason),
            )
        };

        Ok(Findings::Discharge(DischargeReport {
            missing: missing_check(&discharges, &ids),
            format: format_check(&discharges, &ids, is_well_formed, DEFAULT_EXAMPLE_LIMIT),
            chronology,
            duration,
        }))
    }
}

/// One admission/discharge pair where both dates are well-formed and real.
#[derive(Debug)]
struct Stay<'a> {
    row: usize,
    id: Option<String>,
    admission: &'a str,
    discharge: &'a str,
    days: i64,
}

/// Rows with both dates present and well-formed, split into real stays and
/// a count of pairs that do not name calendar dates.
#[derive(Debug)]
struct StayPairs<'a> {
    present: usize,
    invalid_calendar: usize,
    stays: Vec<Stay<'a>>,
}

fn stay_pairs<'a>(
    admissions: &'a [Option<String>],
    discharges: &'a [Option<String>],
    ids: &[Option<String>],
) -> StayPairs<'a> {
    let mut pairs = StayPairs {
        present: 0,
        invalid_calendar: 0,
        stays: Vec::new(),
    };

    for (row, (admission, discharge)) in admissions.iter().zip(discharges).enumerate() {
        let (Some(admission), Some(discharge)) = (admission, discharge) else {
            continue;
        };
        pairs.present += 1;
        let (Some(admitted), Some(discharged)) =
            (DateParts::parse(admission), DateParts::parse(discharge))
        else {
            continue;
        };
        let (Some(admitted), Some(discharged)) = (admitted.to_date(), discharged.to_date()) else {
            pairs.invalid_calendar += 1;
            continue;
        };
        pairs.stays.push(Stay {
            row,
            id: id_at(ids, row),
            admission,
            discharge,
            days: (discharged - admitted).num_days(),
        });
    }
    pairs
}

/// Every stay whose discharge precedes its admission.
fn chronology(pairs: &StayPairs<'_>) -> ChronologyCheck {
    let errors: Vec<ChronologyError> = pairs
        .stays
        .iter()
        .filter(|stay| stay.days < 0)
        .map(|stay| ChronologyError {
            row: stay.row,
            id: stay.id.clone(),
            admission_date: stay.admission.to_string(),
            discharge_date: stay.discharge.to_string(),
        })
        .collect();

    ChronologyCheck {
        valid_pairs: pairs.stays.len(),
        invalid_calendar_dates: pairs.invalid_calendar,
        error_count: errors.len(),
        percentage: ratio(errors.len(), pairs.stays.len()),
        errors,
    }
}

fn duration(pairs: &StayPairs<'_>) -> Derived<DurationStats> {
    if pairs.present == 0 {
        return Derived::Unavailable(UnavailableReason::NoPairedRecords);
    }
    if pairs.stays.is_empty() {
        return Derived::Unavailable(UnavailableReason::NoValidFormats);
    }

    let days: Vec<i64> = pairs.stays.iter().map(|stay| stay.days).collect();
    let mut long_stays: Vec<LongStay> = pairs
        .stays
        .iter()
        .filter(|stay| stay.days > LONG_STAY_DAYS)
        .map(|stay| LongStay {
            row: stay.row,
            id: stay.id.clone(),
            days: stay.days,
            admission_date: stay.admission.to_string(),
            discharge_date: stay.discharge.to_string(),
        })
        .collect();
    long_stays.sort_by(|a, b| b.days.cmp(&a.days));

    Derived::Computed(DurationStats {
        count: days.len(),
        mean_days: mean(&days),
        median_days: median(&days),
        min_days: days.iter().copied().min().unwrap_or_default(),
        max_days: days.iter().copied().max().unwrap_or_default(),
        long_stays,
    })
}
