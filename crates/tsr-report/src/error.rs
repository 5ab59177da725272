//! Error types for report assembly.

use thiserror::Error;
use tsr_ingest::IngestError;
use tsr_model::{ModelError, ReportKind};
use tsr_output::OutputError;
use tsr_transform::TransformError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Output(#[from] OutputError),

    /// A report failed while the run was set to stop at the first failure.
    #[error("{kind} report failed: {source}")]
    Aborted {
        kind: ReportKind,
        #[source]
        source: Box<ReportError>,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;
