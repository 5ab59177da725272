//! Standard school reports.
//!
//! [`ReportAssembler`] turns the configured sources into the four standard
//! reports (enrollment, grades, performance, discipline) for one
//! subdivision set. [`dispatch`] writes them to a
//! [`ReportSink`](tsr_output::ReportSink), one report at a time.
//!
//! # Example
//!
//! ```ignore
//! use tsr_model::{FilterSpec, GroupCatalog, ReportConfig};
//! use tsr_output::CsvSink;
//! use tsr_report::{FailureMode, ReportAssembler, dispatch};
//!
//! let config = ReportConfig::default();
//! let group = GroupCatalog::builtin().get("houston_districts")?.clone();
//! let mut assembler = ReportAssembler::new(&config);
//! let mut sink = CsvSink::new("out");
//! let summary = dispatch(
//!     &mut assembler,
//!     "Houston",
//!     &group.restrict(FilterSpec::new()),
//!     &mut sink,
//!     FailureMode::Isolate,
//! )?;
//! ```

mod assembler;
mod dispatch;
mod error;
mod table;

pub use assembler::{ReportAssembler, performance_columns};
pub use dispatch::{FailureMode, ReportOutcome, RunSummary, dispatch};
pub use error::{ReportError, Result};
pub use table::{LegendEntry, ReportTable, StandardReport};
