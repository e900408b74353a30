//! Command implementations: quality check, record export and column listing.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;
use qc_analyze::{AnalysisInput, AnalyzerRegistry};
use qc_ingest::{apply_year_filter, read_admissions, records_from_frame};
use qc_model::{AnalyzerKey, QualityReport, ReportScope, columns};
use qc_report::{ConsoleReporter, render_markdown, write_report};
use tracing::{info, info_span, warn};

use crate::config::QcConfig;

/// Records between export progress log lines.
const PROGRESS_INTERVAL: usize = 100;

/// Terminal state of a `check` run.
#[derive(Debug)]
pub enum CheckOutcome {
    /// Analysis completed; `markdown` is the written report, if any.
    Completed {
        report: QualityReport,
        markdown: Option<std::path::PathBuf>,
    },
    /// The year filter left no rows.
    NoMatchingRecords,
}

impl CheckOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Completed { .. } => 0,
            Self::NoMatchingRecords => 1,
        }
    }
}

/// Counts from an `export` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    /// Rows left after the year filter.
    pub matched: usize,
    pub written: usize,
    pub errors: usize,
    /// Records skipped because an earlier record already claimed their file
    /// name.
    pub collisions: usize,
}

/// Terminal state of an `export` run.
#[derive(Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    Exported(ExportSummary),
    Previewed { json: String },
    NoMatchingRecords,
}

impl ExportOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Exported(_) | Self::Previewed { .. } => 0,
            Self::NoMatchingRecords => 1,
        }
    }
}

/// Loaded frame, narrowed to the configured year filter.
struct Scoped {
    df: DataFrame,
    scope: ReportScope,
}

fn load_scoped(config: &QcConfig) -> Result<Option<Scoped>> {
    let df = read_admissions(&config.input)
        .with_context(|| format!("load {}", config.input.display()))?;
    let total = df.height();
    let Some(filter) = config.year_filter else {
        return Ok(Some(Scoped {
            df,
            scope: ReportScope::unfiltered(total),
        }));
    };

    let filtered = apply_year_filter(&df, Some(&filter)).context("apply year filter")?;
    if filtered.height() == 0 {
        warn!(filter = %filter, total, "no records match the year filter");
        return Ok(None);
    }
    let scope = ReportScope::filtered(filter, total, filtered.height());
    Ok(Some(Scoped {
        df: filtered,
        scope,
    }))
}

/// Runs the quality check: load, filter, analyze once, then render the
/// console sections incrementally and the Markdown report from the same
/// results.
///
/// A Markdown failure is logged and reported on `out` but does not fail the
/// run.
pub fn run_check<W: Write>(
    config: &QcConfig,
    generated_at: NaiveDateTime,
    out: W,
) -> Result<CheckOutcome> {
    let span = info_span!("check", input = %config.input.display());
    let _guard = span.enter();
    let mut reporter = ConsoleReporter::new(out).with_styling(config.styled_tables);

    let Some(scoped) = load_scoped(config)? else {
        let mut out = reporter.into_inner();
        if let Some(filter) = config.year_filter {
            writeln!(
                out,
                "❌ No records found matching the filter ({})",
                filter.describe()
            )?;
        }
        return Ok(CheckOutcome::NoMatchingRecords);
    };
    info!(
        total = scoped.scope.total_records,
        filtered = scoped.scope.filtered_records,
        "dataset loaded"
    );

    reporter.banner(&scoped.scope, &config.input)?;
    let input = AnalysisInput::new(&scoped.df, &config.input, generated_at.date());
    let mut render_error = None;
    let report = AnalyzerRegistry::default().run(&input, |key, outcome| {
        if render_error.is_none()
            && let Err(error) = reporter.render(key, outcome)
        {
            render_error = Some(error);
        }
    });
    if let Some(error) = render_error {
        return Err(error).context("write console report");
    }
    reporter.summary(&report)?;

    let mut out = reporter.into_inner();
    let markdown = if config.write_markdown {
        let content = render_markdown(&report, &scoped.scope, &config.input, generated_at);
        match write_report(&config.reports_dir, &scoped.scope, &content, generated_at) {
            Ok(path) => {
                writeln!(out, "\n📝 Markdown report saved to: {}", path.display())?;
                Some(path)
            }
            Err(error) => {
                warn!(%error, "markdown report failed");
                writeln!(out, "\n⚠️ Markdown report could not be written: {error}")?;
                None
            }
        }
    } else {
        None
    };

    Ok(CheckOutcome::Completed { report, markdown })
}

/// Converts rows into patient documents and writes one `<ID>.json` per
/// record, or prints the first record when `preview` is set.
pub fn run_export<W: Write>(config: &QcConfig, preview: bool, mut out: W) -> Result<ExportOutcome> {
    let span = info_span!("export", input = %config.input.display());
    let _guard = span.enter();
    let started = Instant::now();

    let Some(scoped) = load_scoped(config)? else {
        if let Some(filter) = config.year_filter {
            writeln!(
                out,
                "❌ No records found matching the filter ({})",
                filter.describe()
            )?;
        }
        return Ok(ExportOutcome::NoMatchingRecords);
    };
    let matched = scoped.df.height();
    let records = records_from_frame(&scoped.df);

    if preview {
        let Some(record) = records.iter().find_map(|record| record.as_ref().ok()) else {
            writeln!(out, "⚠️ No valid records to preview")?;
            return Ok(ExportOutcome::Previewed {
                json: String::new(),
            });
        };
        let json = record.to_json_pretty().context("serialize record")?;
        writeln!(out, "{json}")?;
        return Ok(ExportOutcome::Previewed { json });
    }

    fs::create_dir_all(&config.documents_dir)
        .with_context(|| format!("create {}", config.documents_dir.display()))?;

    let mut summary = ExportSummary {
        matched,
        written: 0,
        errors: 0,
        collisions: 0,
    };
    let mut stems: HashSet<String> = HashSet::new();
    for (row, record) in records.into_iter().enumerate() {
        if row > 0 && row % PROGRESS_INTERVAL == 0 {
            info!(processed = row, total = matched, "export progress");
        }
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                warn!(row = qc_model::display_row(row), error = %error, "record skipped");
                summary.errors += 1;
                continue;
            }
        };
        let stem = document_stem(&record.id);
        if stems.contains(&stem) {
            warn!(
                row = qc_model::display_row(row),
                id = %record.id,
                file = %format!("{stem}.json"),
                "document name already written, record skipped"
            );
            summary.collisions += 1;
            continue;
        }
        match write_document(&config.documents_dir, &stem, &record) {
            Ok(()) => {
                stems.insert(stem);
                summary.written += 1;
            }
            Err(error) => {
                warn!(row = qc_model::display_row(row), error = %error, "record skipped");
                summary.errors += 1;
            }
        }
    }

    info!(
        matched = summary.matched,
        written = summary.written,
        errors = summary.errors,
        collisions = summary.collisions,
        duration_ms = started.elapsed().as_millis(),
        "export complete"
    );
    writeln!(
        out,
        "✅ Exported {} of {} records to {} ({} errors)",
        summary.written,
        summary.matched,
        config.documents_dir.display(),
        summary.errors
    )?;
    if summary.collisions > 0 {
        writeln!(
            out,
            "⚠️ Skipped {} records whose ID maps to an already written file name",
            summary.collisions
        )?;
    }
    Ok(ExportOutcome::Exported(summary))
}

fn write_document(dir: &Path, stem: &str, record: &qc_model::PatientRecord) -> Result<()> {
    let json = record.to_json_pretty().context("serialize record")?;
    let path = dir.join(format!("{stem}.json"));
    fs::write(&path, json).with_context(|| format!("write {}", path.display()))
}

/// File stem for a record id; anything but ASCII alphanumerics, `-` and `_`
/// becomes `_`.
fn document_stem(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Analyzer that consumes a known column.
fn analyzer_for(column: &str) -> Option<AnalyzerKey> {
    match column {
        columns::ID => Some(AnalyzerKey::Id),
        columns::RECORD_NUMBER => Some(AnalyzerKey::Processo),
        columns::NAME => Some(AnalyzerKey::Nome),
        columns::ADMISSION_DATE => Some(AnalyzerKey::DataEnt),
        columns::DISCHARGE_DATE => Some(AnalyzerKey::DataAlta),
        columns::BIRTH_DATE => Some(AnalyzerKey::DataNasc),
        columns::DESTINATION => Some(AnalyzerKey::Destino),
        columns::SEX => Some(AnalyzerKey::Sexo),
        columns::ORIGIN => Some(AnalyzerKey::Origem),
        _ => None,
    }
}

/// Prints the known columns, their analyzers and whether the input has them.
///
/// An unreadable input is logged and shown as unknown presence.
pub fn run_columns<W: Write>(config: &QcConfig, mut out: W) -> Result<()> {
    let present: Option<Vec<String>> = match read_admissions(&config.input) {
        Ok(df) => Some(
            df.get_column_names()
                .iter()
                .map(|name| name.to_string())
                .collect(),
        ),
        Err(error) => {
            warn!(%error, "input not readable, column presence unknown");
            None
        }
    };

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Description"),
        header_cell("Analyzer"),
        header_cell("Present"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
    if config.styled_tables {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    for column in columns::ALL {
        let presence = match &present {
            Some(names) if names.iter().any(|name| name == column) => {
                Cell::new("✓").fg(Color::Green)
            }
            Some(_) => Cell::new("✗").fg(Color::Red),
            None => Cell::new("-").fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(column),
            Cell::new(columns::describe(column).unwrap_or_default()),
            Cell::new(analyzer_for(column).map_or("-", |key| key.as_str())),
            presence,
        ]);
    }
    writeln!(out, "{table}")?;
    if present.is_some() {
        writeln!(out, "Input: {}", config.input.display())?;
    }
    Ok(())
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
