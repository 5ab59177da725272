//! Report assembly.
//!
//! Each report is a column set plus the caller's restriction, run through
//! the filter engine over one dataset:
//!
//! | Report      | Dataset     | Extra restriction     | Post-processing |
//! |-------------|-------------|-----------------------|-----------------|
//! | Enrollment  | enrollment  | none                  | none            |
//! | Grades      | enrollment  | none                  | none            |
//! | Performance | performance | the reference year    | none            |
//! | Discipline  | discipline  | none                  | pivot           |

use std::time::Instant;

use tracing::{info, info_span};
use tsr_ingest::{Dataset, DatasetLoader, IngestError, substitute_year};
use tsr_model::{DISTRICT, FilterSpec, ReportConfig, ReportKind, YEAR};
use tsr_transform::{DatasetFilterExt, pivot_discipline};

use crate::error::Result;
use crate::table::{LegendEntry, ReportTable, StandardReport};

/// Builds reports from the sources named by a [`ReportConfig`].
///
/// Sources are loaded lazily. The enrollment dataset backs both the
/// enrollment and grades reports and is loaded once.
pub struct ReportAssembler<'a> {
    config: &'a ReportConfig,
    loader: DatasetLoader<'a>,
    enrollment: Option<Dataset>,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            loader: DatasetLoader::new(config),
            enrollment: None,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        self.config
    }

    fn enrollment_dataset(&mut self) -> Result<&Dataset> {
        let dataset = match self.enrollment.take() {
            Some(dataset) => dataset,
            None => self.loader.enrollment()?,
        };
        Ok(self.enrollment.insert(dataset))
    }

    /// Build one report restricted by the caller's `restriction`.
    ///
    /// Only the county and district axes of `restriction` are honored; the
    /// column set and any year restriction come from the report itself.
    pub fn build(&mut self, kind: ReportKind, restriction: &FilterSpec) -> Result<ReportTable> {
        let span = info_span!("report", report = %kind);
        let _guard = span.enter();
        let start = Instant::now();

        let spec = FilterSpec {
            columns: None,
            years: None,
            ..restriction.clone()
        };
        let data = match kind {
            ReportKind::Enrollment => {
                let spec = spec.with_columns(self.config.columns.enrollment.clone());
                self.enrollment_dataset()?.with_filter(&spec)?.into_data()
            }
            ReportKind::Grades => {
                let spec = spec.with_columns(self.config.columns.grades.clone());
                self.enrollment_dataset()?.with_filter(&spec)?.into_data()
            }
            ReportKind::Performance => {
                let spec = spec
                    .with_columns(performance_columns(self.config)?)
                    .with_years([self.config.reference_year.as_str()]);
                self.loader.performance()?.with_filter(&spec)?.into_data()
            }
            ReportKind::Discipline => {
                let spec = spec.with_columns(self.config.columns.discipline.clone());
                let filtered = self.loader.discipline()?.with_filter(&spec)?;
                pivot_discipline(
                    filtered.data(),
                    &self.config.columns.discipline_metrics,
                    &self.config.columns.student_groups,
                )?
            }
        };

        info!(
            rows = data.height(),
            columns = data.width(),
            duration_ms = start.elapsed().as_millis(),
            "report assembled"
        );
        Ok(ReportTable::new(kind, data))
    }

    /// All four reports, stopping at the first failure.
    pub fn standard_report(&mut self, restriction: &FilterSpec) -> Result<StandardReport> {
        let mut tables = Vec::with_capacity(ReportKind::ALL.len());
        for kind in ReportKind::ALL {
            tables.push(self.build(kind, restriction)?);
        }
        Ok(StandardReport::new(tables))
    }

    /// Catalog descriptions for the codes of an enrollment-class report.
    ///
    /// Key columns are left out. Reports over other datasets have no
    /// catalog and yield an empty legend.
    pub fn legend(&mut self, kind: ReportKind) -> Result<Vec<LegendEntry>> {
        let codes = match kind {
            ReportKind::Enrollment => self.config.columns.enrollment.clone(),
            ReportKind::Grades => self.config.columns.grades.clone(),
            ReportKind::Performance | ReportKind::Discipline => return Ok(Vec::new()),
        };
        let dataset = self.enrollment_dataset()?;
        Ok(codes
            .into_iter()
            .filter(|code| code != DISTRICT && code != YEAR)
            .map(|code| LegendEntry {
                description: dataset.describe_column(&code).map(str::to_string),
                code,
            })
            .collect())
    }
}

/// The performance column set with every year-bearing code rewritten to the
/// reference year.
pub fn performance_columns(config: &ReportConfig) -> std::result::Result<Vec<String>, IngestError> {
    let token = config.reference_year_token();
    config
        .columns
        .performance
        .iter()
        .map(|code| substitute_year(code, token))
        .collect()
}
