//! CSV file sink.

use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use polars::prelude::DataFrame;
use tracing::info;
use tsr_model::ReportKind;

use crate::error::{OutputError, Result};
use crate::sink::{ReportSink, render_values};

/// Writes each report to `<dir>/<name> <Report>.csv`.
#[derive(Debug, Clone)]
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a report is written to, e.g. `out/Houston Enrollment.csv`.
    pub fn path_for(&self, name: &str, kind: ReportKind) -> PathBuf {
        self.dir.join(format!("{name} {}.csv", kind.title()))
    }
}

/// Write `table` to `path` as comma-separated text with a header row.
pub fn write_csv(path: &Path, table: &DataFrame) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let csv_error = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new().from_path(path).map_err(csv_error)?;
    for row in render_values(table) {
        writer.write_record(&row).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

impl ReportSink for CsvSink {
    fn label(&self) -> &'static str {
        "csv"
    }

    fn write(&mut self, name: &str, kind: ReportKind, table: &DataFrame) -> Result<String> {
        let path = self.path_for(name, kind);
        write_csv(&path, table)?;
        info!(
            report = %kind,
            path = %path.display(),
            rows = table.height(),
            "wrote report"
        );
        Ok(path.display().to_string())
    }
}
