//! Sending reports to a sink, one report at a time.

use std::time::{Duration, Instant};

use tracing::{error, info};
use tsr_model::{FilterSpec, ReportKind};
use tsr_output::ReportSink;

use crate::assembler::ReportAssembler;
use crate::error::{ReportError, Result};

/// What happens to the remaining reports after one fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Record the failure and carry on with the next report.
    #[default]
    Isolate,
    /// Stop the run at the first failure.
    FailFast,
}

/// Result of producing and writing one report.
#[derive(Debug)]
pub struct ReportOutcome {
    pub kind: ReportKind,
    pub rows: usize,
    pub columns: usize,
    /// Where the sink put the report.
    pub destination: Option<String>,
    pub error: Option<ReportError>,
    pub elapsed: Duration,
}

impl ReportOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcomes of one run, in [`ReportKind::ALL`] order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub name: String,
    pub outcomes: Vec<ReportOutcome>,
}

impl RunSummary {
    pub fn failures(&self) -> impl Iterator<Item = &ReportOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.succeeded())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Produce every standard report for `restriction` and write each to `sink`
/// under `name`.
///
/// With [`FailureMode::Isolate`] the returned summary records failed reports
/// next to the written ones. With [`FailureMode::FailFast`] the first failure
/// is returned as [`ReportError::Aborted`]; reports written before it stay
/// written.
pub fn dispatch(
    assembler: &mut ReportAssembler<'_>,
    name: &str,
    restriction: &FilterSpec,
    sink: &mut dyn ReportSink,
    mode: FailureMode,
) -> Result<RunSummary> {
    let mut summary = RunSummary {
        name: name.to_string(),
        outcomes: Vec::with_capacity(ReportKind::ALL.len()),
    };

    for kind in ReportKind::ALL {
        let start = Instant::now();
        let written = assembler.build(kind, restriction).and_then(|table| {
            let destination = sink.write(name, kind, &table.data)?;
            Ok((table, destination))
        });

        match written {
            Ok((table, destination)) => summary.outcomes.push(ReportOutcome {
                kind,
                rows: table.height(),
                columns: table.width(),
                destination: Some(destination),
                error: None,
                elapsed: start.elapsed(),
            }),
            Err(err) if mode == FailureMode::FailFast => {
                return Err(ReportError::Aborted {
                    kind,
                    source: Box::new(err),
                });
            }
            Err(err) => {
                error!(report = %kind, sink = sink.label(), error = %err, "report failed");
                summary.outcomes.push(ReportOutcome {
                    kind,
                    rows: 0,
                    columns: 0,
                    destination: None,
                    error: Some(err),
                    elapsed: start.elapsed(),
                });
            }
        }
    }

    info!(
        name,
        sink = sink.label(),
        failed = summary.failure_count(),
        "run finished"
    );
    Ok(summary)
}
