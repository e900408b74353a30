//! Running the full analyzer set over a frame.

mod common;

use common::{input, test_df, text};
use polars::prelude::DataFrame;
use qc_analyze::{AnalysisInput, AnalyzeError, AnalyzerRegistry, ColumnAnalyzer};
use qc_model::{AnalyzerKey, AnalyzerOutcome, Findings, SequenceStatus};

fn admissions() -> DataFrame {
    test_df(vec![
        ("ID", text(&["25001", "25002", "25004", "2401", ""])),
        ("processo", text(&["100", "101", "x", "", "103"])),
        ("nome", text(&["Ana", "Rui", "", "Eva", "Ivo"])),
        (
            "data_ent",
            text(&["01-01-2025", "05-03-2025", "10-02-2025", "05-03-2025", ""]),
        ),
        (
            "data_alta",
            text(&["03-01-2025", "01-03-2025", "", "05-06-2025", ""]),
        ),
        ("destino", text(&["Casa", "Casa", "Lar", "", "Casa"])),
        ("sexo", text(&["F", "M", "X", "F", ""])),
        (
            "data_nasc",
            text(&["01-01-2000", "02-01-2000", "1-1-1950", "", "01-01-1800"]),
        ),
        (
            "origem",
            text(&["Urgencia", "", "Consulta", "Urgencia", "Urgencia"]),
        ),
    ])
}

#[test]
fn every_applicable_analyzer_reports() {
    let df = admissions();
    let report = AnalyzerRegistry::default().run_all(&input(&df));

    assert_eq!(report.len(), AnalyzerKey::ALL.len());
    // The source path does not exist, so only the file analyzer fails.
    assert_eq!(report.failed_count(), 1);
    assert!(report.get(AnalyzerKey::File).unwrap().is_failed());

    let Some(Findings::Identifier(ids)) = report.findings(AnalyzerKey::Id) else {
        panic!("expected identifier findings");
    };
    let year_25 = ids
        .sequences
        .years
        .iter()
        .find(|year| year.year == "25")
        .unwrap();
    let SequenceStatus::Valid {
        min_serial,
        max_serial,
        missing_serials,
        ..
    } = &year_25.status
    else {
        panic!("expected valid sequence");
    };
    assert_eq!((*min_serial, *max_serial), (1, 4));
    assert_eq!(missing_serials, &vec![3]);

    let Some(Findings::Admission(admission)) = report.findings(AnalyzerKey::DataEnt) else {
        panic!("expected admission findings");
    };
    let consistency = admission.year_consistency.computed().unwrap();
    assert_eq!(consistency.inconsistent_count, 1);
    assert_eq!(consistency.examples[0].id_prefix, "24");
    assert_eq!(consistency.examples[0].year, "2025");

    let Some(Findings::Discharge(discharge)) = report.findings(AnalyzerKey::DataAlta) else {
        panic!("expected discharge findings");
    };
    let chronology = discharge.chronology.computed().unwrap();
    assert_eq!(chronology.error_count, 1);
    assert_eq!(chronology.errors[0].id.as_deref(), Some("25002"));
}

#[test]
fn aggregation_is_repeatable() {
    let df = admissions();
    let registry = AnalyzerRegistry::default();
    let first = registry.run_all(&input(&df));
    let second = registry.run_all(&input(&df));
    assert_eq!(first, second);
}

#[test]
fn callback_sees_outcomes_in_report_order() {
    let df = admissions();
    let mut seen = Vec::new();
    let report = AnalyzerRegistry::default().run(&input(&df), |key, outcome| {
        seen.push((key, outcome.clone()));
    });

    let keys: Vec<AnalyzerKey> = seen.iter().map(|(key, _)| *key).collect();
    assert_eq!(keys, AnalyzerKey::ALL.to_vec());
    for (key, outcome) in &seen {
        assert_eq!(report.get(*key), Some(outcome));
    }
}

#[test]
fn absent_columns_skip_their_analyzers() {
    let df = test_df(vec![("ID", text(&["2501", "2502"]))]);
    let registry = AnalyzerRegistry::default();
    let applicable: Vec<AnalyzerKey> = registry.applicable_keys(&df).collect();
    assert_eq!(applicable, vec![AnalyzerKey::File, AnalyzerKey::Id]);

    let report = registry.run_all(&input(&df));
    assert!(report.get(AnalyzerKey::Sexo).is_none());
    assert!(report.get(AnalyzerKey::Id).is_some());
}

struct BrokenAnalyzer;

impl ColumnAnalyzer for BrokenAnalyzer {
    fn key(&self) -> AnalyzerKey {
        AnalyzerKey::Nome
    }

    fn required_columns(&self) -> &[&'static str] {
        &[]
    }

    fn analyze(&self, _input: &AnalysisInput<'_>) -> qc_analyze::Result<Findings> {
        Err(AnalyzeError::ColumnNotFound {
            column: "nome".to_string(),
        })
    }
}

#[test]
fn failing_analyzer_does_not_stop_the_run() {
    let df = test_df(vec![("ID", text(&["2501"]))]);
    let mut registry = AnalyzerRegistry::new();
    registry.register(Box::new(BrokenAnalyzer));
    registry.register(Box::new(qc_analyze::analyzers::IdentifierAnalyzer));

    let report = registry.run_all(&input(&df));
    assert_eq!(report.len(), 2);
    assert!(matches!(
        report.get(AnalyzerKey::Nome),
        Some(AnalyzerOutcome::Failed { error }) if error.contains("nome")
    ));
    assert!(report.findings(AnalyzerKey::Id).is_some());
}
