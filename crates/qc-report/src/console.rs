//! Incremental console rendering of analyzer findings.
//!
//! The orchestrator calls [`ConsoleReporter::render`] from the registry's
//! per-analyzer callback, so each section is printed as soon as its analyzer
//! finishes. Tables use `comfy-table`; distributions get an ASCII bar column.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use qc_model::{
    AdmissionReport, AgeExample, AgeStats, AnalyzerKey, AnalyzerOutcome, BirthReport,
    CategoricalReport, ChronologyCheck, Derived, DischargeReport, DuplicateCheck, DurationStats,
    FileReport, Findings, FlaggedAges, FormatCheck, FrequencyTable, IdentifierReport,
    MissingCheck, NameReport, PatternCheck, QualityReport, RecordNumberReport, ReportScope,
    SequenceCheck, SequenceStatus, ValidityCheck, ValueCheck, ValueExample, YearConsistencyCheck,
};

use crate::format::{
    ROW_LIST_LIMIT, SERIAL_LIST_LIMIT, bar, column_grid, id_label, percent, percent_short,
    row_list, truncated_list,
};

const SEPARATOR_WIDTH: usize = 80;
const TABLE_WIDTH: u16 = 77;
const INDENT: &str = "   ";

/// Writes human-readable findings to a terminal (or any writer).
///
/// Table colours are off unless enabled with [`ConsoleReporter::with_styling`].
pub struct ConsoleReporter<W: Write> {
    out: W,
    styled: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        let styled = io::stdout().is_terminal();
        Self::new(io::stdout()).with_styling(styled)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, styled: false }
    }

    pub fn with_styling(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints the run banner: source file and the active scope.
    pub fn banner(&mut self, scope: &ReportScope, source: &Path) -> io::Result<()> {
        writeln!(
            self.out,
            "\n🔍 Starting quality control analysis on: {}",
            source.display()
        )?;
        match scope.filter {
            Some(filter) => {
                writeln!(self.out, "📅 Filter: showing records from {}", filter.describe())?;
                writeln!(
                    self.out,
                    "📊 Records: {} of {} total ({})",
                    scope.filtered_records,
                    scope.total_records,
                    percent_short(scope.coverage())
                )?;
            }
            None => {
                writeln!(
                    self.out,
                    "📊 Scope: full database, {} records (no filters applied)",
                    scope.total_records
                )?;
            }
        }
        Ok(())
    }

    /// Renders one analyzer's outcome as a console section.
    pub fn render(&mut self, key: AnalyzerKey, outcome: &AnalyzerOutcome) -> io::Result<()> {
        self.header(section_emoji(key), &key.title().to_uppercase())?;
        match outcome {
            AnalyzerOutcome::Failed { error } => {
                writeln!(self.out, "\n❌ Analysis failed: {error}")?;
            }
            AnalyzerOutcome::Completed { findings } => match findings {
                Findings::File(file) => self.file(file)?,
                Findings::Identifier(ids) => self.identifier(ids)?,
                Findings::Admission(admission) => self.admission(admission)?,
                Findings::Discharge(discharge) => self.discharge(discharge)?,
                Findings::Birth(birth) => self.birth(birth)?,
                Findings::RecordNumber(record) => self.record_number(record)?,
                Findings::Name(name) => self.name(name)?,
                Findings::Categorical(categorical) => self.categorical(categorical)?,
            },
        }
        self.separator()
    }

    /// Prints the closing status line.
    pub fn summary(&mut self, report: &QualityReport) -> io::Result<()> {
        match report.failed_count() {
            0 => writeln!(
                self.out,
                "\n✅ Quality control analysis completed successfully ({} analyzers)",
                report.len()
            ),
            failed => writeln!(
                self.out,
                "\n⚠️ Quality control analysis completed with {failed} failed analyzer(s) out of {}",
                report.len()
            ),
        }
    }

    fn header(&mut self, emoji: &str, title: &str) -> io::Result<()> {
        self.separator()?;
        writeln!(self.out, "{emoji} {title}")?;
        writeln!(self.out, "{}", "=".repeat(SEPARATOR_WIDTH))
    }

    fn separator(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n{}", "=".repeat(SEPARATOR_WIDTH))
    }

    fn new_table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.set_header(headers.iter().map(|label| header_cell(label)).collect::<Vec<_>>());
        apply_table_style(&mut table);
        if self.styled {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        table
    }

    fn table(&mut self, table: &Table) -> io::Result<()> {
        for line in table.lines() {
            writeln!(self.out, "{INDENT}{line}")?;
        }
        Ok(())
    }

    fn numbered<T>(
        &mut self,
        items: &[T],
        total: usize,
        line: impl Fn(&T) -> String,
    ) -> io::Result<()> {
        for (index, item) in items.iter().enumerate() {
            writeln!(self.out, "{INDENT}{}. {}", index + 1, line(item))?;
        }
        if total > items.len() {
            writeln!(self.out, "{INDENT}... and {} more", total - items.len())?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Shared checks
    // -----------------------------------------------------------------------

    fn missing(&mut self, check: &MissingCheck, label: &str) -> io::Result<()> {
        writeln!(self.out, "\n📑 Missing {label}:")?;
        if check.is_clean() {
            writeln!(self.out, "{INDENT}✅ No missing {label} found")
        } else {
            writeln!(
                self.out,
                "{INDENT}⚠️ Found {} missing {label} ({} of total records)",
                check.count,
                percent(check.percentage)
            )?;
            writeln!(self.out, "{INDENT}Rows with issues: {}", row_list(&check.rows))
        }
    }

    fn date_format(&mut self, check: &FormatCheck, label: &str) -> io::Result<()> {
        writeln!(self.out, "\n📋 Date Format Analysis:")?;
        if check.checked == 0 {
            return writeln!(self.out, "{INDENT}ℹ️ No {label} found in the dataset");
        }
        if check.is_clean() {
            writeln!(
                self.out,
                "{INDENT}✅ All {} {label} follow the expected format (dd-mm-yyyy)",
                check.checked
            )
        } else {
            writeln!(
                self.out,
                "{INDENT}⚠️ Found {} {label} with unexpected format ({} of {} non-missing)",
                check.invalid_count,
                percent(check.percentage),
                check.checked
            )?;
            writeln!(
                self.out,
                "{INDENT}Well-formed: {} of {}",
                check.valid_count, check.checked
            )?;
            writeln!(self.out, "\n{INDENT}Records with invalid date formats:")?;
            self.numbered(&check.examples, check.invalid_count, value_line)
        }
    }

    fn value_examples(&mut self, check: &ValueCheck, caption: &str) -> io::Result<()> {
        writeln!(
            self.out,
            "{INDENT}⚠️ Found {} {caption} ({} of {} non-missing)",
            check.count,
            percent(check.percentage),
            check.checked
        )?;
        self.numbered(&check.examples, check.count, value_line)
    }

    // -----------------------------------------------------------------------
    // Sections
    // -----------------------------------------------------------------------

    fn file(&mut self, file: &FileReport) -> io::Result<()> {
        writeln!(self.out, "\n📄 File: {}", file.file_name)?;
        writeln!(self.out, "\n📍 File Location:")?;
        writeln!(self.out, "{INDENT}{}", file.file_path)?;
        writeln!(self.out, "\n💾 File Size: {:.2} KB", file.size_kb)?;
        writeln!(self.out, "\n📋 Column Information:")?;
        writeln!(self.out, "{INDENT}Total Columns: {}", file.column_count)?;
        writeln!(self.out, "\n{INDENT}Column Names:")?;
        for line in column_grid(&file.columns, SEPARATOR_WIDTH) {
            writeln!(self.out, "{INDENT}{line}")?;
        }
        writeln!(self.out, "\n🔢 Row Information:")?;
        writeln!(self.out, "{INDENT}Total Rows: {}", file.row_count)
    }

    fn identifier(&mut self, ids: &IdentifierReport) -> io::Result<()> {
        self.missing(&ids.missing, "IDs")?;
        self.duplicates(&ids.duplicates)?;
        self.sequences(&ids.sequences)?;
        self.pattern(&ids.pattern)
    }

    fn duplicates(&mut self, check: &DuplicateCheck) -> io::Result<()> {
        writeln!(self.out, "\n🔄 Duplicate ID Analysis:")?;
        if check.count == 0 {
            return writeln!(self.out, "{INDENT}✅ No duplicate IDs found");
        }
        writeln!(
            self.out,
            "{INDENT}⚠️ Found {} rows with duplicate IDs ({} of total records)",
            check.count,
            percent(check.percentage)
        )?;
        writeln!(
            self.out,
            "\n{INDENT}Duplicated ID values ({} unique values):",
            check.distinct_count
        )?;
        let shown = &check.groups[..check.groups.len().min(ROW_LIST_LIMIT)];
        for (index, group) in shown.iter().enumerate() {
            writeln!(
                self.out,
                "{INDENT}{}. ID '{}' found in rows: {}",
                index + 1,
                group.id,
                truncated_list(&group.display_rows(), ROW_LIST_LIMIT)
            )?;
        }
        if check.groups.len() > shown.len() {
            writeln!(
                self.out,
                "{INDENT}... and {} more duplicated IDs",
                check.groups.len() - shown.len()
            )?;
        }
        Ok(())
    }

    fn sequences(&mut self, check: &SequenceCheck) -> io::Result<()> {
        if check.years.is_empty() {
            return Ok(());
        }
        self.header("🔢", "ID SEQUENCE ANALYSIS BY YEAR")?;
        writeln!(self.out, "\n📊 ID Analysis by Year:")?;

        let mut years: Vec<_> = check.years.iter().collect();
        years.sort_by(|a, b| b.year.cmp(&a.year));

        let mut table = self.new_table(&[
            "Year",
            "Count",
            "Min Serial",
            "Max Serial",
            "Missing Values",
        ]);
        for column in 1..=3 {
            align_column(&mut table, column, CellAlignment::Right);
        }
        for year in &years {
            let row = match &year.status {
                SequenceStatus::Valid {
                    min_serial,
                    max_serial,
                    missing_count,
                    missing_percentage,
                    ..
                } => vec![
                    Cell::new(&year.year),
                    Cell::new(year.count),
                    Cell::new(min_serial),
                    Cell::new(max_serial),
                    if *missing_count > 0 {
                        Cell::new(format!(
                            "{missing_count} ({})",
                            percent_short(*missing_percentage)
                        ))
                        .fg(Color::Yellow)
                    } else {
                        dim_cell("0")
                    },
                ],
                SequenceStatus::Invalid { invalid_count, .. } => vec![
                    Cell::new(&year.year),
                    Cell::new(year.count),
                    dim_cell("-"),
                    dim_cell("-"),
                    Cell::new(format!("{invalid_count} non-numeric serials")).fg(Color::Red),
                ],
                SequenceStatus::SpanTooWide {
                    min_serial,
                    max_serial,
                } => vec![
                    Cell::new(&year.year),
                    Cell::new(year.count),
                    Cell::new(min_serial),
                    Cell::new(max_serial),
                    Cell::new("range too wide to enumerate").fg(Color::Red),
                ],
            };
            table.add_row(row);
        }
        self.table(&table)?;

        for year in &years {
            match &year.status {
                SequenceStatus::Valid {
                    missing_serials, ..
                } if !missing_serials.is_empty() => {
                    writeln!(
                        self.out,
                        "{INDENT}{INDENT}Missing in {}: {}",
                        year.year,
                        truncated_list(missing_serials, SERIAL_LIST_LIMIT)
                    )?;
                }
                SequenceStatus::Invalid { examples, .. } => {
                    writeln!(
                        self.out,
                        "{INDENT}{INDENT}Invalid serials in {}: {}",
                        year.year,
                        examples.join(", ")
                    )?;
                }
                _ => {}
            }
        }
        writeln!(
            self.out,
            "\n{INDENT}Total missing serials: {}",
            check.total_missing()
        )
    }

    fn pattern(&mut self, check: &PatternCheck) -> io::Result<()> {
        self.header("🔍", "ID PATTERN CONSISTENCY CHECK")?;
        if check.invalid_count == 0 {
            writeln!(
                self.out,
                "\n✅ All {} ID values follow the expected format (YYXXX)",
                check.checked
            )?;
        } else {
            writeln!(
                self.out,
                "\n⚠️ Found {} ID values with unexpected format ({} of {} checked, {} valid)",
                check.invalid_count,
                percent(check.percentage),
                check.checked,
                check.valid_count
            )?;
            writeln!(self.out, "\n{INDENT}Examples of invalid ID formats:")?;
            self.numbered(&check.examples, check.invalid_count, |example| {
                format!("'{}' at row {}", example.value, example.display_row())
            })?;
        }
        if !check.years.is_empty() {
            writeln!(
                self.out,
                "\n📅 Years found in ID prefixes: {}",
                year_list(&check.years)
            )?;
        }
        if !check.future_years.is_empty() {
            writeln!(
                self.out,
                "\n⚠️ Warning: Found IDs with future years: {}",
                year_list(&check.future_years)
            )?;
        }
        if !check.very_old_years.is_empty() {
            writeln!(
                self.out,
                "\n⚠️ Warning: Found IDs with potentially old years: {}",
                year_list(&check.very_old_years)
            )?;
        }
        Ok(())
    }

    fn admission(&mut self, admission: &AdmissionReport) -> io::Result<()> {
        self.missing(&admission.missing, "admission dates")?;
        self.date_format(&admission.format, "admission dates")?;
        writeln!(self.out, "\n🔄 Year Consistency Check:")?;
        match &admission.year_consistency {
            Derived::Unavailable(reason) => writeln!(
                self.out,
                "{INDENT}⚠️ Cannot check year consistency: {}",
                reason.message()
            ),
            Derived::Computed(check) => self.year_consistency(check),
        }
    }

    fn year_consistency(&mut self, check: &YearConsistencyCheck) -> io::Result<()> {
        if check.inconsistent_count == 0 {
            return writeln!(
                self.out,
                "{INDENT}✅ All {} IDs match their admission year (first 2 digits of ID = last 2 digits of year)",
                check.checked
            );
        }
        writeln!(
            self.out,
            "{INDENT}⚠️ Found {} IDs that don't match their admission year ({} of {} checked, {} consistent)",
            check.inconsistent_count,
            percent(check.percentage),
            check.checked,
            check.consistent_count
        )?;
        writeln!(self.out, "\n{INDENT}ID vs. Year inconsistencies:")?;
        self.numbered(&check.examples, check.inconsistent_count, |mismatch| {
            format!(
                "ID '{}' (prefix '{}') has date '{}' (year '{}') at row {}",
                mismatch.id,
                mismatch.id_prefix,
                mismatch.date,
                mismatch.year,
                mismatch.display_row()
            )
        })
    }

    fn discharge(&mut self, discharge: &DischargeReport) -> io::Result<()> {
        self.missing(&discharge.missing, "discharge dates")?;
        self.date_format(&discharge.format, "discharge dates")?;
        writeln!(
            self.out,
            "\n🔄 Chronology Check (discharge date >= admission date):"
        )?;
        match &discharge.chronology {
            Derived::Unavailable(reason) => writeln!(
                self.out,
                "{INDENT}⚠️ Cannot verify date chronology: {}",
                reason.message()
            )?,
            Derived::Computed(check) => self.chronology(check)?,
        }
        writeln!(self.out, "\n📊 Hospitalization Duration Statistics:")?;
        match &discharge.duration {
            Derived::Unavailable(reason) => writeln!(
                self.out,
                "{INDENT}ℹ️ Cannot calculate stay duration: {}",
                reason.message()
            ),
            Derived::Computed(stats) => self.duration(stats),
        }
    }

    fn chronology(&mut self, check: &ChronologyCheck) -> io::Result<()> {
        if check.invalid_calendar_dates > 0 {
            writeln!(
                self.out,
                "{INDENT}⚠️ {} date pairs skipped: not a real calendar date",
                check.invalid_calendar_dates
            )?;
        }
        if check.valid_pairs == 0 {
            return writeln!(
                self.out,
                "{INDENT}ℹ️ No records with both admission and discharge dates found"
            );
        }
        writeln!(self.out, "{INDENT}Date pairs checked: {}", check.valid_pairs)?;
        if check.error_count == 0 {
            return writeln!(
                self.out,
                "{INDENT}✅ All discharge dates are on or after their corresponding admission dates"
            );
        }
        writeln!(
            self.out,
            "{INDENT}⚠️ Found {} records where discharge date is before admission date ({} of pairs)",
            check.error_count,
            percent(check.percentage)
        )?;
        writeln!(self.out, "\n{INDENT}Chronology errors:")?;
        self.numbered(&check.errors, check.error_count, |error| {
            format!(
                "ID {}: admission date '{}' occurs AFTER discharge date '{}' (row {})",
                id_label(error.id.as_deref()),
                error.admission_date,
                error.discharge_date,
                error.display_row()
            )
        })
    }

    fn duration(&mut self, stats: &DurationStats) -> io::Result<()> {
        writeln!(self.out, "{INDENT}Records analyzed: {}", stats.count)?;
        writeln!(self.out, "{INDENT}Average stay: {:.1} days", stats.mean_days)?;
        writeln!(self.out, "{INDENT}Median stay: {:.1} days", stats.median_days)?;
        writeln!(self.out, "{INDENT}Shortest stay: {} days", stats.min_days)?;
        writeln!(self.out, "{INDENT}Longest stay: {} days", stats.max_days)?;
        if stats.long_stays.is_empty() {
            return Ok(());
        }
        writeln!(
            self.out,
            "\n⚠️ Potentially unusual long stays (> 60 days): {}",
            stats.long_stays.len()
        )?;
        let shown = &stats.long_stays[..stats.long_stays.len().min(ROW_LIST_LIMIT)];
        self.numbered(shown, stats.long_stays.len(), |stay| {
            format!(
                "ID {}: {} days (admitted: {}, discharged: {}) - row {}",
                id_label(stay.id.as_deref()),
                stay.days,
                stay.admission_date,
                stay.discharge_date,
                stay.display_row()
            )
        })
    }

    fn birth(&mut self, birth: &BirthReport) -> io::Result<()> {
        self.missing(&birth.missing, "birth dates")?;
        self.date_format(&birth.format, "birth dates")?;
        self.validity(&birth.validity)?;
        writeln!(self.out, "\n👶 Age at Admission:")?;
        match &birth.age {
            Derived::Unavailable(reason) => writeln!(
                self.out,
                "{INDENT}ℹ️ Cannot calculate ages: {}",
                reason.message()
            ),
            Derived::Computed(stats) => self.age(stats),
        }
    }

    fn validity(&mut self, check: &ValidityCheck) -> io::Result<()> {
        writeln!(self.out, "\n🗓️ Birth Year Validity (1900 to current year):")?;
        if check.invalid_count() == 0 {
            return writeln!(
                self.out,
                "{INDENT}✅ All {} birth years are within the accepted range",
                check.checked
            );
        }
        writeln!(
            self.out,
            "{INDENT}⚠️ Found {} birth years out of range ({} of {} checked)",
            check.invalid_count(),
            percent(check.percentage),
            check.checked
        )?;
        if check.too_old_count > 0 {
            writeln!(self.out, "\n{INDENT}Before 1900: {}", check.too_old_count)?;
            self.numbered(&check.too_old_examples, check.too_old_count, value_line)?;
        }
        if check.future_count > 0 {
            writeln!(self.out, "\n{INDENT}In the future: {}", check.future_count)?;
            self.numbered(&check.future_examples, check.future_count, value_line)?;
        }
        Ok(())
    }

    fn age(&mut self, stats: &AgeStats) -> io::Result<()> {
        writeln!(self.out, "{INDENT}Records analyzed: {}", stats.count)?;
        writeln!(self.out, "{INDENT}Mean age: {:.1} years", stats.mean_age)?;
        writeln!(self.out, "{INDENT}Median age: {:.1} years", stats.median_age)?;
        writeln!(self.out, "{INDENT}Youngest: {} years", stats.min_age)?;
        writeln!(self.out, "{INDENT}Oldest: {} years", stats.max_age)?;

        if !stats.distribution.is_empty() {
            writeln!(self.out, "\n📊 Age Distribution:")?;
            let mut table = self.new_table(&["Age Range", "Count", "Percentage", "Distribution"]);
            align_column(&mut table, 1, CellAlignment::Right);
            align_column(&mut table, 2, CellAlignment::Right);
            for bucket in &stats.distribution {
                table.add_row(vec![
                    Cell::new(bucket.label()),
                    Cell::new(bucket.count),
                    Cell::new(percent_short(bucket.percentage)),
                    Cell::new(bar(bucket.percentage)).fg(Color::Blue),
                ]);
            }
            self.table(&table)?;
        }

        self.flagged("Very young patients (< 5 years)", &stats.very_young)?;
        self.flagged("Very old patients (> 100 years)", &stats.very_old)?;
        self.flagged("Negative ages (admitted before birth)", &stats.negative)
    }

    fn flagged(&mut self, caption: &str, flagged: &FlaggedAges) -> io::Result<()> {
        if flagged.count == 0 {
            return Ok(());
        }
        writeln!(self.out, "\n⚠️ {caption}: {}", flagged.count)?;
        self.numbered(&flagged.examples, flagged.count, age_line)
    }

    fn record_number(&mut self, record: &RecordNumberReport) -> io::Result<()> {
        self.missing(&record.missing, "record numbers")?;
        writeln!(self.out, "\n🔢 Record Number Format:")?;
        if record.invalid.is_clean() {
            writeln!(
                self.out,
                "{INDENT}✅ All {} record numbers contain only digits, spaces or dashes",
                record.invalid.checked
            )
        } else {
            self.value_examples(&record.invalid, "record numbers with unexpected characters")
        }
    }

    fn name(&mut self, name: &NameReport) -> io::Result<()> {
        self.missing(&name.missing, "names")
    }

    fn categorical(&mut self, categorical: &CategoricalReport) -> io::Result<()> {
        self.missing(&categorical.missing, &format!("{} values", categorical.column))?;
        self.frequency(&categorical.frequency)?;
        if let (Some(expected), Some(unexpected)) =
            (&categorical.expected_values, &categorical.unexpected)
        {
            writeln!(
                self.out,
                "\n🚫 Unexpected Values (expected: {}):",
                expected.join(", ")
            )?;
            if unexpected.is_clean() {
                writeln!(
                    self.out,
                    "{INDENT}✅ All {} values are in the expected set",
                    unexpected.checked
                )?;
            } else {
                self.value_examples(unexpected, "unexpected values")?;
            }
        }
        Ok(())
    }

    fn frequency(&mut self, table_data: &FrequencyTable) -> io::Result<()> {
        writeln!(
            self.out,
            "\n📊 Value Distribution ({} distinct values over {} records):",
            table_data.unique_count, table_data.total
        )?;
        if table_data.entries.is_empty() {
            return writeln!(self.out, "{INDENT}ℹ️ No values present");
        }
        let mut table = self.new_table(&["Value", "Count", "Percentage", "Distribution"]);
        align_column(&mut table, 1, CellAlignment::Right);
        align_column(&mut table, 2, CellAlignment::Right);
        for entry in &table_data.entries {
            table.add_row(vec![
                Cell::new(&entry.value),
                Cell::new(entry.count),
                Cell::new(percent_short(entry.percentage)),
                Cell::new(bar(entry.percentage)).fg(Color::Blue),
            ]);
        }
        self.table(&table)
    }
}

fn section_emoji(key: AnalyzerKey) -> &'static str {
    match key {
        AnalyzerKey::File => "📊",
        AnalyzerKey::Id => "🔍",
        AnalyzerKey::DataEnt => "📅",
        AnalyzerKey::DataAlta => "📤",
        AnalyzerKey::DataNasc => "🎂",
        AnalyzerKey::Processo => "🗂️",
        AnalyzerKey::Nome => "👤",
        AnalyzerKey::Sexo => "👥",
        AnalyzerKey::Destino => "🏁",
        AnalyzerKey::Origem => "🚪",
    }
}

fn value_line(example: &ValueExample) -> String {
    format!(
        "ID {} has value '{}' at row {}",
        id_label(example.id.as_deref()),
        example.value,
        example.display_row()
    )
}

fn age_line(example: &AgeExample) -> String {
    format!(
        "ID {}: age {} (born {}, admitted {}) - row {}",
        id_label(example.id.as_deref()),
        example.age,
        example.birth_date,
        example.admission_date,
        example.display_row()
    )
}

fn year_list(years: &[u8]) -> String {
    years
        .iter()
        .map(|year| format!("{year:02}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
