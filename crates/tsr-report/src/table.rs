//! Finished report tables.

use polars::prelude::DataFrame;
use tsr_model::ReportKind;

/// One finished report.
#[derive(Debug, Clone)]
pub struct ReportTable {
    pub kind: ReportKind,
    pub data: DataFrame,
}

impl ReportTable {
    pub fn new(kind: ReportKind, data: DataFrame) -> Self {
        Self { kind, data }
    }

    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn width(&self) -> usize {
        self.data.width()
    }
}

/// The four standard reports for one subdivision set, in [`ReportKind::ALL`] order.
#[derive(Debug, Clone)]
pub struct StandardReport {
    tables: Vec<ReportTable>,
}

impl StandardReport {
    pub(crate) fn new(tables: Vec<ReportTable>) -> Self {
        Self { tables }
    }

    pub fn get(&self, kind: ReportKind) -> Option<&ReportTable> {
        self.tables.iter().find(|table| table.kind == kind)
    }

    pub fn tables(&self) -> &[ReportTable] {
        &self.tables
    }

    pub fn into_tables(self) -> Vec<ReportTable> {
        self.tables
    }
}

/// Catalog description of one report column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub code: String,
    /// `None` when the catalog has no definition for the code.
    pub description: Option<String>,
}
