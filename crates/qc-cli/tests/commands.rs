//! End-to-end runs of the check, export and columns commands.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use qc_cli::commands::{CheckOutcome, ExportOutcome, run_check, run_columns, run_export};
use qc_cli::config::QcConfig;
use qc_model::{AnalyzerKey, Findings, YearFilter};
use tempfile::TempDir;

const SAMPLE: &str = "\
ID,processo,nome,data_ent,data_alta,destino,sexo,data_nasc,origem
25001,123,Ana,01-01-2025,10-01-2025,Casa,F,01-01-2000,Urgencia
25002,456,Rui,05-03-2025,01-03-2025,Casa,M,02-01-2000,Consulta
25004,789,Eva,07-04-2025,,Lar,F,03-03-1980,
2401,,Ivo,05-03-2025,09-03-2025,Casa,X,,Urgencia
";

fn workspace() -> (TempDir, QcConfig) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Doentes.csv");
    fs::write(&input, SAMPLE).unwrap();
    let config = QcConfig::default()
        .with_input(input)
        .with_reports_dir(dir.path().join("reports"))
        .with_documents_dir(dir.path().join("json"));
    (dir, config)
}

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 15)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn markdown_files(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn check_renders_console_and_markdown_from_one_run() {
    let (dir, config) = workspace();
    let mut out = Vec::new();
    let outcome = run_check(&config, generated_at(), &mut out).unwrap();
    assert_eq!(outcome.exit_code(), 0);

    let CheckOutcome::Completed { report, markdown } = outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(report.len(), AnalyzerKey::ALL.len());
    assert_eq!(report.failed_count(), 0);
    let Some(Findings::File(file)) = report.findings(AnalyzerKey::File) else {
        panic!("expected file findings");
    };
    assert_eq!(file.row_count, 4);

    let console = String::from_utf8(out).unwrap();
    assert!(console.contains("no filters applied"));
    assert!(console.contains("ID SEQUENCE ANALYSIS BY YEAR"));
    assert!(console.contains("Missing in 25: 3"));
    assert!(console.contains("occurs AFTER discharge date"));
    assert!(console.contains("Markdown report saved to"));

    let markdown = markdown.unwrap();
    assert_eq!(
        markdown.file_name().unwrap().to_string_lossy(),
        "report_quality_all_20250615_1000.md"
    );
    let content = fs::read_to_string(&markdown).unwrap();
    assert!(content.starts_with("# Quality Control Report - 2025-06-15 10:00"));
    assert!(content.contains("## ID Analysis"));
    assert!(content.contains("## Origin (origem)"));
    assert!(content.contains("- **Chronology Errors:** 1 of 3 date pairs"));
    assert_eq!(markdown_files(&dir.path().join("reports")).len(), 1);
}

#[test]
fn check_with_filter_reports_scope() {
    let (dir, config) = workspace();
    let config = config.with_year_filter(Some(YearFilter::single(24)));
    let mut out = Vec::new();
    let outcome = run_check(&config, generated_at(), &mut out).unwrap();
    assert_eq!(outcome.exit_code(), 0);

    let console = String::from_utf8(out).unwrap();
    assert!(console.contains("Records: 1 of 4 total (25.0%)"));
    let files = markdown_files(&dir.path().join("reports"));
    assert_eq!(files, vec!["report_quality_24_20250615_1000.md".to_string()]);
}

#[test]
fn check_without_matching_records_exits_with_failure() {
    let (dir, config) = workspace();
    let config = config.with_year_filter(Some(YearFilter::parse("19-10").unwrap()));
    let mut out = Vec::new();
    let outcome = run_check(&config, generated_at(), &mut out).unwrap();
    assert!(matches!(outcome, CheckOutcome::NoMatchingRecords));
    assert_eq!(outcome.exit_code(), 1);
    assert!(String::from_utf8(out).unwrap().contains("No records found"));
    assert!(markdown_files(&dir.path().join("reports")).is_empty());
}

#[test]
fn markdown_failure_does_not_fail_the_check() {
    let (dir, config) = workspace();
    let blocker = dir.path().join("blocked");
    fs::write(&blocker, "not a directory").unwrap();
    let config = config.with_reports_dir(&blocker);

    let mut out = Vec::new();
    let outcome = run_check(&config, generated_at(), &mut out).unwrap();
    assert_eq!(outcome.exit_code(), 0);
    assert!(matches!(
        outcome,
        CheckOutcome::Completed { markdown: None, .. }
    ));
    assert!(String::from_utf8(out)
        .unwrap()
        .contains("Markdown report could not be written"));
}

#[test]
fn check_fails_on_missing_input() {
    let (dir, config) = workspace();
    let config = config.with_input(dir.path().join("absent.csv"));
    assert!(run_check(&config, generated_at(), Vec::new()).is_err());
}

#[test]
fn export_writes_one_document_per_record() {
    let (dir, config) = workspace();
    let mut out = Vec::new();
    let outcome = run_export(&config, false, &mut out).unwrap();
    let ExportOutcome::Exported(summary) = outcome else {
        panic!("expected an export");
    };
    assert_eq!(summary.matched, 4);
    assert_eq!(summary.written, 4);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.collisions, 0);

    let document = fs::read_to_string(dir.path().join("json").join("25001.json")).unwrap();
    assert!(document.contains("\"_id\": \"25001\""));
    assert!(document.contains("\"data_ent\": \"01-01-2025\""));
}

#[test]
fn export_keeps_first_record_for_colliding_file_names() {
    let (dir, config) = workspace();
    fs::write(
        &config.input,
        "\
ID,processo,nome,data_ent,data_alta,destino,sexo,data_nasc,origem
25001,123,Ana,01-01-2025,10-01-2025,Casa,F,01-01-2000,Urgencia
25001,456,Rui,05-03-2025,09-03-2025,Casa,M,02-01-2000,Consulta
25/02,789,Eva,07-04-2025,,Lar,F,03-03-1980,
25_02,321,Ivo,05-03-2025,09-03-2025,Casa,M,01-01-1990,Urgencia
",
    )
    .unwrap();
    let mut out = Vec::new();
    let ExportOutcome::Exported(summary) = run_export(&config, false, &mut out).unwrap() else {
        panic!("expected an export");
    };
    assert_eq!(summary.matched, 4);
    assert_eq!(summary.written, 2);
    assert_eq!(summary.collisions, 2);
    assert_eq!(summary.errors, 0);

    let documents = dir.path().join("json");
    assert_eq!(fs::read_dir(&documents).unwrap().count(), 2);
    let first = fs::read_to_string(documents.join("25001.json")).unwrap();
    assert!(first.contains("\"nome\": \"Ana\""));
    let sanitized = fs::read_to_string(documents.join("25_02.json")).unwrap();
    assert!(sanitized.contains("\"_id\": \"25/02\""));
    assert!(String::from_utf8(out).unwrap().contains("Skipped 2 records"));
}

#[test]
fn export_preview_prints_first_record() {
    let (dir, config) = workspace();
    let config = config.with_year_filter(Some(YearFilter::single(24)));
    let mut out = Vec::new();
    let outcome = run_export(&config, true, &mut out).unwrap();
    let ExportOutcome::Previewed { json } = outcome else {
        panic!("expected a preview");
    };
    assert!(json.contains("\"_id\": \"2401\""));
    assert!(String::from_utf8(out).unwrap().contains("2401"));
    assert!(!dir.path().join("json").exists());
}

#[test]
fn export_without_matching_records_exits_with_failure() {
    let (_dir, config) = workspace();
    let config = config.with_year_filter(Some(YearFilter::single(10)));
    let outcome = run_export(&config, false, Vec::new()).unwrap();
    assert_eq!(outcome, ExportOutcome::NoMatchingRecords);
    assert_eq!(outcome.exit_code(), 1);
}

#[test]
fn columns_lists_vocabulary_and_presence() {
    let (_dir, config) = workspace();
    let mut out = Vec::new();
    run_columns(&config, &mut out).unwrap();
    let listing = String::from_utf8(out).unwrap();
    assert!(listing.contains("data_nasc"));
    assert!(listing.contains("Birth date"));
    assert!(listing.contains("✓"));
}
