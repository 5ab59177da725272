//! Report sinks.
//!
//! - **CSV**: one file per report, `<dir>/<name> <Report>.csv`
//! - **Spreadsheet**: one tab per report in a Google Sheets document
//!
//! Both render tables the same way (see [`render_values`]).

mod csv_sink;
mod error;
mod sheets;
mod sink;

pub use csv_sink::{CsvSink, write_csv};
pub use error::{OutputError, Result};
pub use sheets::{SHEETS_TOKEN_ENV_VAR, SheetsSink, update_body};
pub use sink::{ReportSink, render_values};
