//! Datasets and the loader that materializes them.
//!
//! A [`Dataset`] is immutable once built. Derived datasets (filtered,
//! projected) are new values produced by [`Dataset::derive`], sharing the same
//! reference data.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use polars::prelude::*;
use tracing::{info, info_span};
use tsr_common::{column_names, has_column};
use tsr_model::{DISTRICT, ReportConfig, YEAR, YearlySource};

use crate::codes::CodeCatalog;
use crate::error::{IngestError, Result};
use crate::geography::{GeoReference, ReferenceCache};
use crate::table::{read_csv_frame, require_column};

/// What a dataset measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    /// Student enrollment by demographic and grade.
    Enrollment,
    /// Exam performance.
    Performance,
    /// Disciplinary actions.
    Discipline,
}

impl DatasetKind {
    pub fn description(self) -> &'static str {
        match self {
            Self::Enrollment => "Student Enrollment Data",
            Self::Performance => "Student Performance Data",
            Self::Discipline => "Student Disciplinary Data",
        }
    }

    /// Enrollment-class datasets resolve their codes through the code catalog.
    pub fn uses_code_catalog(self) -> bool {
        matches!(self, Self::Enrollment)
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    kind: DatasetKind,
    data: DataFrame,
    geography: Arc<GeoReference>,
    codes: Option<Arc<CodeCatalog>>,
    sources: Vec<PathBuf>,
}

impl Dataset {
    /// Wrap a loaded frame.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::MissingDatasetColumn`] when the frame has no `DISTRICT`.
    pub fn new(kind: DatasetKind, data: DataFrame, geography: Arc<GeoReference>) -> Result<Self> {
        if !has_column(&data, DISTRICT) {
            return Err(IngestError::MissingDatasetColumn {
                column: DISTRICT.to_string(),
                dataset: kind.description(),
            });
        }
        Ok(Self {
            kind,
            data,
            geography,
            codes: None,
            sources: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_codes(mut self, codes: Arc<CodeCatalog>) -> Self {
        self.codes = Some(codes);
        self
    }

    #[must_use]
    pub fn with_sources(mut self, sources: Vec<PathBuf>) -> Self {
        self.sources = sources;
        self
    }

    /// A new dataset over `data` sharing this one's kind and reference data.
    pub fn derive(&self, data: DataFrame) -> Self {
        Self {
            kind: self.kind,
            data,
            geography: Arc::clone(&self.geography),
            codes: self.codes.clone(),
            sources: self.sources.clone(),
        }
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn description(&self) -> &'static str {
        self.kind.description()
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn into_data(self) -> DataFrame {
        self.data
    }

    pub fn geography(&self) -> &GeoReference {
        &self.geography
    }

    pub fn codes(&self) -> Option<&CodeCatalog> {
        self.codes.as_deref()
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn columns(&self) -> Vec<String> {
        column_names(&self.data)
    }

    pub fn has_column(&self, name: &str) -> bool {
        has_column(&self.data, name)
    }

    /// Catalog description of a column code, when the dataset has a catalog.
    pub fn describe_column(&self, code: &str) -> Option<&str> {
        self.codes.as_deref().and_then(|codes| codes.describe(code))
    }
}

/// Read one table per year and concatenate them, tagging rows with `YEAR`.
///
/// `path_for_year` names the file of each year. Columns are unioned in
/// first-seen order; rows from a year lacking a column hold nulls there.
pub fn load_yearly<F>(years: &[String], path_for_year: F) -> Result<(DataFrame, Vec<PathBuf>)>
where
    F: Fn(&str) -> PathBuf,
{
    let mut frames = Vec::with_capacity(years.len());
    let mut paths = Vec::with_capacity(years.len());
    for year in years {
        let path = path_for_year(year);
        let mut frame = read_csv_frame(&path)?;
        require_column(&frame, DISTRICT, &path)?;
        let height = frame.height();
        frame.with_column(Series::new(YEAR.into(), vec![year.as_str(); height]))?;
        info!(
            path = %path.display(),
            year = %year,
            rows = height,
            "loaded yearly source"
        );
        frames.push(frame);
        paths.push(path);
    }
    Ok((concat_union(frames)?, paths))
}

/// Read a single snapshot table, without year tagging.
pub fn load_single(path: &Path) -> Result<DataFrame> {
    let frame = read_csv_frame(path)?;
    require_column(&frame, DISTRICT, path)?;
    info!(path = %path.display(), rows = frame.height(), "loaded snapshot source");
    Ok(frame)
}

/// Stack frames whose column sets may differ.
pub fn concat_union(frames: Vec<DataFrame>) -> Result<DataFrame> {
    let mut union: Vec<String> = Vec::new();
    for frame in &frames {
        for name in column_names(frame) {
            if !union.contains(&name) {
                union.push(name);
            }
        }
    }

    let mut combined: Option<DataFrame> = None;
    for mut frame in frames {
        let height = frame.height();
        for name in &union {
            if !has_column(&frame, name) {
                frame.with_column(Series::full_null(
                    name.as_str().into(),
                    height,
                    &DataType::String,
                ))?;
            }
        }
        let aligned = frame.select(union.iter().map(String::as_str))?;
        match combined.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&aligned)?;
            }
            None => combined = Some(aligned),
        }
    }
    Ok(combined.unwrap_or_else(DataFrame::empty))
}

/// Builds the three standard datasets from a [`ReportConfig`].
///
/// Reference data is loaded once per path and shared between datasets.
pub struct DatasetLoader<'a> {
    config: &'a ReportConfig,
    cache: ReferenceCache,
}

impl<'a> DatasetLoader<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            cache: ReferenceCache::new(),
        }
    }

    pub fn geography(&mut self) -> Result<Arc<GeoReference>> {
        let path = self.config.resolve(&self.config.geographic_reference);
        self.cache.geography(&path)
    }

    pub fn code_catalog(&mut self) -> Result<Arc<CodeCatalog>> {
        let path = self.config.resolve(&self.config.code_catalog);
        self.cache.code_catalog(&path)
    }

    pub fn enrollment(&mut self) -> Result<Dataset> {
        let config = self.config;
        self.yearly(DatasetKind::Enrollment, &config.sources.enrollment)
    }

    pub fn performance(&mut self) -> Result<Dataset> {
        let config = self.config;
        self.yearly(DatasetKind::Performance, &config.sources.performance)
    }

    pub fn discipline(&mut self) -> Result<Dataset> {
        let kind = DatasetKind::Discipline;
        let span = info_span!("load", dataset = kind.description());
        let _guard = span.enter();
        let path = self.config.resolve(&self.config.sources.discipline);
        let data = load_single(&path)?;
        self.finish(kind, data, vec![path])
    }

    fn yearly(&mut self, kind: DatasetKind, source: &YearlySource) -> Result<Dataset> {
        let span = info_span!("load", dataset = kind.description());
        let _guard = span.enter();
        let start = Instant::now();
        let config = self.config;
        let (data, paths) = load_yearly(&source.years, |year| {
            config.resolve(Path::new(&source.file_name(year)))
        })?;
        info!(
            years = source.years.len(),
            rows = data.height(),
            columns = data.width(),
            duration_ms = start.elapsed().as_millis(),
            "dataset loaded"
        );
        self.finish(kind, data, paths)
    }

    fn finish(&mut self, kind: DatasetKind, data: DataFrame, paths: Vec<PathBuf>) -> Result<Dataset> {
        let geography = self.geography()?;
        let mut dataset = Dataset::new(kind, data, geography)?.with_sources(paths);
        if kind.uses_code_catalog() {
            dataset = dataset.with_codes(self.code_catalog()?);
        }
        Ok(dataset)
    }
}
