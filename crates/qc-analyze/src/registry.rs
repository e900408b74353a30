//! Ordered analyzer registry and result aggregation.

use std::time::Instant;

use qc_model::{AnalyzerKey, AnalyzerOutcome, QualityReport, columns};
use tracing::{debug, info, info_span, warn};

use crate::analyzer::{AnalysisInput, ColumnAnalyzer};
use crate::analyzers::{
    AdmissionDateAnalyzer, BirthDateAnalyzer, CategoricalAnalyzer, DischargeDateAnalyzer,
    FileAnalyzer, IdentifierAnalyzer, NameAnalyzer, RecordNumberAnalyzer, SEX_VALUES,
};

/// Analyzers in report order.
pub struct AnalyzerRegistry {
    analyzers: Vec<Box<dyn ColumnAnalyzer>>,
}

impl AnalyzerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            analyzers: Vec::new(),
        }
    }

    /// Appends an analyzer; later registrations run later.
    pub fn register(&mut self, analyzer: Box<dyn ColumnAnalyzer>) {
        self.analyzers.push(analyzer);
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = AnalyzerKey> + '_ {
        self.analyzers.iter().map(|analyzer| analyzer.key())
    }

    /// Keys of the analyzers that would run on this frame.
    pub fn applicable_keys(
        &self,
        df: &polars::prelude::DataFrame,
    ) -> impl Iterator<Item = AnalyzerKey> {
        self.analyzers
            .iter()
            .filter(|analyzer| analyzer.is_applicable(df))
            .map(|analyzer| analyzer.key())
    }

    /// Runs every applicable analyzer once and collects the outcomes.
    ///
    /// `on_each` sees each outcome as soon as its analyzer finishes, which
    /// lets the console reporter print incrementally from the same results
    /// that go into the returned report. An analyzer error becomes a
    /// [`AnalyzerOutcome::Failed`] entry; the remaining analyzers still run.
    pub fn run<F>(&self, input: &AnalysisInput<'_>, mut on_each: F) -> QualityReport
    where
        F: FnMut(AnalyzerKey, &AnalyzerOutcome),
    {
        let span = info_span!("analyze", rows = input.df.height(), columns = input.df.width());
        let _guard = span.enter();
        let started = Instant::now();

        let mut report = QualityReport::default();
        for analyzer in &self.analyzers {
            let key = analyzer.key();
            if !analyzer.is_applicable(input.df) {
                debug!(analyzer = %key, "skipping analyzer, required columns absent");
                continue;
            }

            let analyzer_started = Instant::now();
            let outcome = match analyzer.analyze(input) {
                Ok(findings) => AnalyzerOutcome::Completed { findings },
                Err(error) => {
                    warn!(analyzer = %key, %error, "analyzer failed");
                    AnalyzerOutcome::Failed {
                        error: error.to_string(),
                    }
                }
            };
            debug!(
                analyzer = %key,
                duration_ms = analyzer_started.elapsed().as_millis(),
                "analyzer finished"
            );

            on_each(key, &outcome);
            report.insert(key, outcome);
        }

        info!(
            analyzers = report.len(),
            failed = report.failed_count(),
            duration_ms = started.elapsed().as_millis(),
            "analysis complete"
        );
        report
    }

    /// Runs every applicable analyzer without a progress callback.
    pub fn run_all(&self, input: &AnalysisInput<'_>) -> QualityReport {
        self.run(input, |_, _| {})
    }
}

impl Default for AnalyzerRegistry {
    /// The ten admissions analyzers, in report order.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(FileAnalyzer));
        registry.register(Box::new(IdentifierAnalyzer));
        registry.register(Box::new(AdmissionDateAnalyzer));
        registry.register(Box::new(DischargeDateAnalyzer));
        registry.register(Box::new(BirthDateAnalyzer));
        registry.register(Box::new(RecordNumberAnalyzer));
        registry.register(Box::new(NameAnalyzer));
        registry.register(Box::new(CategoricalAnalyzer::new(
            AnalyzerKey::Sexo,
            columns::SEX,
            Some(SEX_VALUES),
        )));
        registry.register(Box::new(CategoricalAnalyzer::new(
            AnalyzerKey::Destino,
            columns::DESTINATION,
            None,
        )));
        registry.register(Box::new(CategoricalAnalyzer::new(
            AnalyzerKey::Origem,
            columns::ORIGIN,
            None,
        )));
        registry
    }
}
