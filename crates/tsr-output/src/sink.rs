//! The sink interface and the rendering shared by every sink.

use polars::prelude::{AnyValue, DataFrame};
use tsr_common::any_to_string;
use tsr_model::ReportKind;

use crate::error::Result;

/// Destination for finished report tables.
///
/// The assembler calls [`ReportSink::write`] once per report. `name` is the
/// caller's label for the subdivision set, e.g. `"Houston"`.
pub trait ReportSink {
    /// Short label for logs and the run summary.
    fn label(&self) -> &'static str;

    /// Write one report and return where it went.
    fn write(&mut self, name: &str, kind: ReportKind, table: &DataFrame) -> Result<String>;
}

/// Render `table` as a header row followed by one row of strings per record.
///
/// Nulls render as empty strings; floats drop trailing zeros.
pub fn render_values(table: &DataFrame) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(table.height() + 1);
    rows.push(
        table
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect(),
    );
    let columns = table.get_columns();
    for idx in 0..table.height() {
        rows.push(
            columns
                .iter()
                .map(|column| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect(),
        );
    }
    rows
}
