//! File-level description: name, location, size and shape.

use qc_model::{AnalyzerKey, FileReport, Findings};

use crate::analyzer::{AnalysisInput, ColumnAnalyzer};
use crate::error::{AnalyzeError, Result};

/// Describes the source file; applicable to every frame.
pub struct FileAnalyzer;

impl ColumnAnalyzer for FileAnalyzer {
    fn key(&self) -> AnalyzerKey {
        AnalyzerKey::File
    }

    fn required_columns(&self) -> &[&'static str] {
        &[]
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Result<Findings> {
        let metadata_error = |source| AnalyzeError::SourceMetadata {
            path: input.source.to_path_buf(),
            source,
        };
        let metadata = std::fs::metadata(input.source).map_err(metadata_error)?;
        let absolute = std::path::absolute(input.source).map_err(metadata_error)?;

        Ok(Findings::File(FileReport {
            file_name: input
                .source
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_path: absolute.display().to_string(),
            size_kb: metadata.len() as f64 / 1024.0,
            row_count: input.df.height(),
            column_count: input.df.width(),
            columns: input
                .df
                .get_column_names()
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::tests::{test_df, today};
    use std::io::Write;
    use std::path::Path;

    #[test]
    fn test_describes_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[b'x'; 2048]).unwrap();
        let df = test_df(vec![("ID", vec!["2501", "2502"]), ("nome", vec!["Ana", "Rui"])]);

        let input = AnalysisInput::new(&df, file.path(), today());
        let Findings::File(report) = FileAnalyzer.analyze(&input).unwrap() else {
            panic!("expected file findings");
        };

        assert!((report.size_kb - 2.0).abs() < f64::EPSILON);
        assert_eq!(report.row_count, 2);
        assert_eq!(report.column_count, 2);
        assert_eq!(report.columns, vec!["ID", "nome"]);
        assert!(Path::new(&report.file_path).is_absolute());
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let df = test_df(vec![("ID", vec!["2501"])]);
        let input = AnalysisInput::new(&df, Path::new("/nonexistent/Doentes.csv"), today());
        assert!(matches!(
            FileAnalyzer.analyze(&input),
            Err(AnalyzeError::SourceMetadata { .. })
        ));
    }
}
