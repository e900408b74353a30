//! Markdown rendering of an aggregated quality report.

use std::path::Path;

use chrono::NaiveDateTime;
use qc_model::{
    AdmissionReport, AgeStats, AnalyzerOutcome, BirthReport, CategoricalReport, Derived,
    DischargeReport, FileReport, Findings, FlaggedAges, FormatCheck, IdentifierReport,
    MissingCheck, QualityReport, RecordNumberReport, ReportScope, SequenceStatus, ValueCheck,
    ValueExample,
};

use crate::format::{
    ROW_LIST_LIMIT, SERIAL_LIST_LIMIT, id_label, percent, percent_short, row_list, table_cell,
    truncated_list,
};

/// Renders the report document: title, scope banner and one section per
/// analyzer outcome, in report order.
pub fn render_markdown(
    report: &QualityReport,
    scope: &ReportScope,
    source: &Path,
    generated_at: NaiveDateTime,
) -> String {
    let mut doc = format!(
        "# Quality Control Report - {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M")
    );
    doc.push_str(&format!("**File:** {}\n\n", source.display()));
    doc.push_str(&scope_banner(scope));

    let sections: Vec<String> = report
        .iter()
        .map(|(key, outcome)| format!("## {}\n\n{}", key.title(), section(outcome)))
        .collect();
    doc.push_str(&sections.join("\n\n"));
    doc
}

fn scope_banner(scope: &ReportScope) -> String {
    match scope.filter {
        Some(filter) => format!(
            "**Filter:** Showing records from {}\n**Records:** {} of {} total ({})\n\n",
            filter.describe(),
            scope.filtered_records,
            scope.total_records,
            percent_short(scope.coverage())
        ),
        None => format!(
            "**Scope:** Full database (no filters applied)\n**Records:** {}\n\n",
            scope.total_records
        ),
    }
}

fn section(outcome: &AnalyzerOutcome) -> String {
    match outcome {
        AnalyzerOutcome::Failed { error } => format!("- **Analysis failed:** {error}\n"),
        AnalyzerOutcome::Completed { findings } => match findings {
            Findings::File(file) => file_section(file),
            Findings::Identifier(ids) => identifier_section(ids),
            Findings::Admission(admission) => admission_section(admission),
            Findings::Discharge(discharge) => discharge_section(discharge),
            Findings::Birth(birth) => birth_section(birth),
            Findings::RecordNumber(record) => record_number_section(record),
            Findings::Name(name) => missing_line(&name.missing, "Missing Names"),
            Findings::Categorical(categorical) => categorical_section(categorical),
        },
    }
}

fn missing_line(check: &MissingCheck, label: &str) -> String {
    if check.is_clean() {
        return format!("- **{label}:** None\n");
    }
    format!(
        "- **{label}:** {} ({})\n  - Rows: {}\n",
        check.count,
        percent(check.percentage),
        row_list(&check.rows)
    )
}

fn format_line(check: &FormatCheck) -> String {
    let mut content = format!(
        "- **Date Format:** {} of {} non-missing values well-formed\n",
        check.valid_count, check.checked
    );
    if check.is_clean() {
        content.push_str("- **Invalid Date Formats:** None\n");
    } else {
        content.push_str(&format!(
            "- **Invalid Date Formats:** {} ({})\n",
            check.invalid_count,
            percent(check.percentage)
        ));
        content.push_str(&example_lines(&check.examples, check.invalid_count));
    }
    content
}

fn value_check_line(check: &ValueCheck, label: &str) -> String {
    if check.is_clean() {
        return format!("- **{label}:** None ({} checked)\n", check.checked);
    }
    let mut content = format!(
        "- **{label}:** {} of {} checked ({})\n",
        check.count,
        check.checked,
        percent(check.percentage)
    );
    content.push_str(&example_lines(&check.examples, check.count));
    content
}

fn example_lines(examples: &[ValueExample], total: usize) -> String {
    let mut content: String = examples
        .iter()
        .map(|example| {
            format!(
                "  - ID {} has value '{}' (row {})\n",
                id_label(example.id.as_deref()),
                example.value,
                example.display_row()
            )
        })
        .collect();
    content.push_str(&more_line(total, examples.len()));
    content
}

fn more_line(total: usize, shown: usize) -> String {
    if total > shown {
        format!("  - ... and {} more\n", total - shown)
    } else {
        String::new()
    }
}

fn unavailable_line(label: &str, reason: &qc_model::UnavailableReason) -> String {
    format!("- **{label}:** not available ({})\n", reason.message())
}

fn file_section(file: &FileReport) -> String {
    format!(
        "- **File Name:** {}\n- **File Path:** {}\n- **File Size:** {:.2} KB\n- **Total Rows:** {}\n- **Total Columns:** {}\n\n**Columns:** {}\n",
        file.file_name,
        file.file_path,
        file.size_kb,
        file.row_count,
        file.column_count,
        file.columns.join(", ")
    )
}

fn identifier_section(ids: &IdentifierReport) -> String {
    let mut content = missing_line(&ids.missing, "Missing IDs");

    let duplicates = &ids.duplicates;
    if duplicates.count == 0 {
        content.push_str("- **Duplicate IDs:** None\n");
    } else {
        content.push_str(&format!(
            "- **Duplicate IDs:** {} rows ({}), {} distinct values\n",
            duplicates.count,
            percent(duplicates.percentage),
            duplicates.distinct_count
        ));
        for group in duplicates.groups.iter().take(ROW_LIST_LIMIT) {
            content.push_str(&format!(
                "  - ID '{}' in rows: {}\n",
                group.id,
                truncated_list(&group.display_rows(), ROW_LIST_LIMIT)
            ));
        }
        content.push_str(&more_line(
            duplicates.groups.len(),
            duplicates.groups.len().min(ROW_LIST_LIMIT),
        ));
    }

    if !ids.sequences.years.is_empty() {
        content.push_str("\n**ID Sequence Analysis by Year:**\n\n");
        content.push_str("| Year | Count | Min Serial | Max Serial | Missing Values | Missing Serials |\n");
        content.push_str("|------|-------|------------|------------|----------------|-----------------|\n");
        let mut years: Vec<_> = ids.sequences.years.iter().collect();
        years.sort_by(|a, b| a.year.cmp(&b.year));
        for year in years {
            let label = table_cell(&year.year);
            let row = match &year.status {
                SequenceStatus::Valid {
                    min_serial,
                    max_serial,
                    missing_count,
                    missing_percentage,
                    missing_serials,
                } => format!(
                    "| {label} | {} | {min_serial} | {max_serial} | {missing_count} ({}) | {} |\n",
                    year.count,
                    percent_short(*missing_percentage),
                    truncated_list(missing_serials, SERIAL_LIST_LIMIT)
                ),
                SequenceStatus::Invalid {
                    invalid_count,
                    examples,
                } => format!(
                    "| {label} | {} | N/A | N/A | {invalid_count} non-numeric serials | {} |\n",
                    year.count,
                    table_cell(&examples.join(", "))
                ),
                SequenceStatus::SpanTooWide {
                    min_serial,
                    max_serial,
                } => format!(
                    "| {label} | {} | {min_serial} | {max_serial} | range too wide | - |\n",
                    year.count
                ),
            };
            content.push_str(&row);
        }
        content.push_str(&format!(
            "\n- **Total Missing Serials:** {}\n",
            ids.sequences.total_missing()
        ));
    }

    let pattern = &ids.pattern;
    content.push_str("\n**ID Pattern Consistency:**\n\n");
    if pattern.invalid_count == 0 {
        content.push_str(&format!(
            "- All {} IDs follow the expected pattern.\n",
            pattern.checked
        ));
    } else {
        content.push_str(&format!(
            "- Invalid IDs: {} of {} checked ({}), {} valid\n",
            pattern.invalid_count,
            pattern.checked,
            percent(pattern.percentage),
            pattern.valid_count
        ));
        for example in &pattern.examples {
            content.push_str(&format!(
                "  - ID '{}' in row {}\n",
                example.value,
                example.display_row()
            ));
        }
        content.push_str(&more_line(pattern.invalid_count, pattern.examples.len()));
    }
    content.push_str(&year_line("Years in ID prefixes", &pattern.years));
    content.push_str(&year_line("Future years", &pattern.future_years));
    content.push_str(&year_line("Potentially old years", &pattern.very_old_years));
    content
}

fn year_line(label: &str, years: &[u8]) -> String {
    if years.is_empty() {
        return String::new();
    }
    let years: Vec<String> = years.iter().map(|year| format!("{year:02}")).collect();
    format!("- {label}: {}\n", years.join(", "))
}

fn admission_section(admission: &AdmissionReport) -> String {
    let mut content = missing_line(&admission.missing, "Missing Dates");
    content.push_str(&format_line(&admission.format));
    match &admission.year_consistency {
        Derived::Unavailable(reason) => {
            content.push_str(&unavailable_line("Year Consistency", reason));
        }
        Derived::Computed(check) if check.inconsistent_count == 0 => {
            content.push_str(&format!(
                "- **Year Inconsistencies:** None ({} checked)\n",
                check.checked
            ));
        }
        Derived::Computed(check) => {
            content.push_str(&format!(
                "- **Year Inconsistencies:** {} of {} checked ({}), {} consistent\n",
                check.inconsistent_count,
                check.checked,
                percent(check.percentage),
                check.consistent_count
            ));
            for mismatch in &check.examples {
                content.push_str(&format!(
                    "  - ID '{}' (prefix '{}') has date '{}' (year '{}') in row {}\n",
                    mismatch.id,
                    mismatch.id_prefix,
                    mismatch.date,
                    mismatch.year,
                    mismatch.display_row()
                ));
            }
            content.push_str(&more_line(check.inconsistent_count, check.examples.len()));
        }
    }
    content
}

fn discharge_section(discharge: &DischargeReport) -> String {
    let mut content = missing_line(&discharge.missing, "Missing Dates");
    content.push_str(&format_line(&discharge.format));

    match &discharge.chronology {
        Derived::Unavailable(reason) => {
            content.push_str(&unavailable_line("Chronology", reason));
        }
        Derived::Computed(check) => {
            content.push_str(&format!(
                "- **Chronology Errors:** {} of {} date pairs ({})\n",
                check.error_count,
                check.valid_pairs,
                percent(check.percentage)
            ));
            for error in &check.errors {
                content.push_str(&format!(
                    "  - ID {} has admission '{}' and discharge '{}' (row {})\n",
                    id_label(error.id.as_deref()),
                    error.admission_date,
                    error.discharge_date,
                    error.display_row()
                ));
            }
            if check.invalid_calendar_dates > 0 {
                content.push_str(&format!(
                    "- **Impossible Calendar Dates:** {} pairs skipped\n",
                    check.invalid_calendar_dates
                ));
            }
        }
    }

    match &discharge.duration {
        Derived::Unavailable(reason) => {
            content.push_str(&unavailable_line("Stay Duration", reason));
        }
        Derived::Computed(stats) => {
            content.push_str(&format!(
                "\n**Stay Duration:**\n\n- Records: {}\n- Mean: {:.1} days\n- Median: {:.1} days\n- Min: {} days\n- Max: {} days\n",
                stats.count, stats.mean_days, stats.median_days, stats.min_days, stats.max_days
            ));
            if !stats.long_stays.is_empty() {
                content.push_str(&format!(
                    "- Long stays (> 60 days): {}\n",
                    stats.long_stays.len()
                ));
                for stay in stats.long_stays.iter().take(ROW_LIST_LIMIT) {
                    content.push_str(&format!(
                        "  - ID {}: {} days ({} to {}, row {})\n",
                        id_label(stay.id.as_deref()),
                        stay.days,
                        stay.admission_date,
                        stay.discharge_date,
                        stay.display_row()
                    ));
                }
                content.push_str(&more_line(
                    stats.long_stays.len(),
                    stats.long_stays.len().min(ROW_LIST_LIMIT),
                ));
            }
        }
    }
    content
}

fn birth_section(birth: &BirthReport) -> String {
    let mut content = missing_line(&birth.missing, "Missing Dates");
    content.push_str(&format_line(&birth.format));

    let validity = &birth.validity;
    if validity.invalid_count() == 0 {
        content.push_str(&format!(
            "- **Out-of-Range Birth Years:** None ({} checked)\n",
            validity.checked
        ));
    } else {
        content.push_str(&format!(
            "- **Out-of-Range Birth Years:** {} of {} checked ({})\n",
            validity.invalid_count(),
            validity.checked,
            percent(validity.percentage)
        ));
        if validity.too_old_count > 0 {
            content.push_str(&format!(
                "- **Unusually Old Dates:** {}\n",
                validity.too_old_count
            ));
            content.push_str(&example_lines(
                &validity.too_old_examples,
                validity.too_old_count,
            ));
        }
        if validity.future_count > 0 {
            content.push_str(&format!("- **Future Dates:** {}\n", validity.future_count));
            content.push_str(&example_lines(
                &validity.future_examples,
                validity.future_count,
            ));
        }
    }

    match &birth.age {
        Derived::Unavailable(reason) => {
            content.push_str(&unavailable_line("Age at Admission", reason));
        }
        Derived::Computed(stats) => content.push_str(&age_section(stats)),
    }
    content
}

fn age_section(stats: &AgeStats) -> String {
    let mut content = format!(
        "\n**Age Statistics:**\n\n- Records: {}\n- Mean Age: {:.1}\n- Median Age: {:.1}\n- Min Age: {}\n- Max Age: {}\n",
        stats.count, stats.mean_age, stats.median_age, stats.min_age, stats.max_age
    );
    if !stats.distribution.is_empty() {
        content.push_str("\n| Age Range | Count | Percentage |\n|-----------|-------|------------|\n");
        for bucket in &stats.distribution {
            content.push_str(&format!(
                "| {} | {} | {} |\n",
                bucket.label(),
                bucket.count,
                percent_short(bucket.percentage)
            ));
        }
        content.push('\n');
    }
    content.push_str(&flagged_lines("Very young (< 5 years)", &stats.very_young));
    content.push_str(&flagged_lines("Very old (> 100 years)", &stats.very_old));
    content.push_str(&flagged_lines("Negative ages", &stats.negative));
    content
}

fn flagged_lines(label: &str, flagged: &FlaggedAges) -> String {
    let mut content = format!("- {label}: {}\n", flagged.count);
    for example in &flagged.examples {
        content.push_str(&format!(
            "  - ID {}: age {} (born {}, admitted {}, row {})\n",
            id_label(example.id.as_deref()),
            example.age,
            example.birth_date,
            example.admission_date,
            example.display_row()
        ));
    }
    content.push_str(&more_line(flagged.count, flagged.examples.len()));
    content
}

fn record_number_section(record: &RecordNumberReport) -> String {
    let mut content = missing_line(&record.missing, "Missing Values");
    content.push_str(&value_check_line(&record.invalid, "Invalid Values"));
    content
}

fn categorical_section(categorical: &CategoricalReport) -> String {
    let mut content = missing_line(&categorical.missing, "Missing Values");
    let frequency = &categorical.frequency;
    content.push_str(&format!(
        "\n**Value Frequencies** ({} distinct over {} records):\n\n",
        frequency.unique_count, frequency.total
    ));
    for entry in &frequency.entries {
        content.push_str(&format!(
            "- {}: {} ({})\n",
            entry.value,
            entry.count,
            percent(entry.percentage)
        ));
    }
    if let (Some(expected), Some(unexpected)) =
        (&categorical.expected_values, &categorical.unexpected)
    {
        content.push('\n');
        content.push_str(&value_check_line(
            unexpected,
            &format!("Unexpected Values (expected {})", expected.join(", ")),
        ));
    }
    content
}
