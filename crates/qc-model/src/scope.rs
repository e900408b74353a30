//! Scope of a quality-control run: the active filter and record counts.

use serde::Serialize;

use crate::findings::ratio;
use crate::year_filter::YearFilter;

/// Which records a report covers, threaded from the filter phase into the
/// report headers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportScope {
    pub filter: Option<YearFilter>,
    /// Rows in the source file.
    pub total_records: usize,
    /// Rows left after the filter (equal to `total_records` when unfiltered).
    pub filtered_records: usize,
}

impl ReportScope {
    pub fn unfiltered(total_records: usize) -> Self {
        Self {
            filter: None,
            total_records,
            filtered_records: total_records,
        }
    }

    pub fn filtered(filter: YearFilter, total_records: usize, filtered_records: usize) -> Self {
        Self {
            filter: Some(filter),
            total_records,
            filtered_records,
        }
    }

    pub fn is_filtered(&self) -> bool {
        self.filter.is_some()
    }

    /// Share of source rows kept by the filter.
    pub fn coverage(&self) -> f64 {
        ratio(self.filtered_records, self.total_records)
    }

    /// File-name context: `all`, `YY` or `HH-LL`.
    pub fn context_label(&self) -> String {
        self.filter
            .map_or_else(|| "all".to_string(), |filter| filter.context_label())
    }
}
