//! Core types for the school report generator.
//!
//! Everything here is plain data: the configuration record, the row and
//! column restrictions handed to the filter engine, the subdivision-group catalog
//! and the report kinds.

pub mod columns;
pub mod config;
pub mod error;
pub mod filter;
pub mod groups;
pub mod report;

pub use columns::{
    DISCIPLINE_COLUMNS, DISCIPLINE_METRICS, ENROLLMENT_COLUMNS, PERFORMANCE_COLUMNS,
    STUDENT_GROUPS, default_grade_columns,
};
pub use config::{
    ColumnSets, DATA_DIR_ENV_VAR, ReportConfig, SourceConfig, YearlySource, load_config,
};
pub use error::{ModelError, Result};
pub use filter::FilterSpec;
pub use groups::{GroupCatalog, GroupConfig, SubdivisionGroup, SubdivisionLevel};
pub use report::ReportKind;

/// Name of the subdivision identifier column shared by every dataset.
pub const DISTRICT: &str = "DISTRICT";
/// Name of the year tag column added to multi-year datasets.
pub const YEAR: &str = "YEAR";
/// District name column of the geographic reference.
pub const DISTNAME: &str = "DISTNAME";
/// County identifier column of the geographic reference.
pub const COUNTY: &str = "COUNTY";
/// County name column of the geographic reference.
pub const CNTYNAME: &str = "CNTYNAME";
/// Region column of the geographic reference.
pub const REGION: &str = "REGION";
/// Student group column of the discipline snapshot.
pub const STUDENT_GROUP: &str = "STUDENT GROUP";

/// Geographic reference columns, in output order.
pub const GEOGRAPHY_COLUMNS: [&str; 5] = [DISTRICT, DISTNAME, COUNTY, CNTYNAME, REGION];
