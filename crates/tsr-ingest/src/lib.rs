//! Source loading for school reports.
//!
//! This crate turns the flat files the reports are built from into
//! Polars-backed [`Dataset`]s.
//!
//! # Features
//!
//! - **Yearly sources**: read `<template>_<year>.<ext>` per year, tag rows with
//!   `YEAR`, concatenate with union column semantics
//! - **Snapshot sources**: read one table as is
//! - **Geographic reference**: district → county/name/region lookup, cached per run
//! - **Code catalog**: code definitions, stubs and positional year substitution
//!
//! # Example
//!
//! ```ignore
//! use tsr_ingest::DatasetLoader;
//! use tsr_model::ReportConfig;
//!
//! let config = ReportConfig::default();
//! let mut loader = DatasetLoader::new(&config);
//! let enrollment = loader.enrollment()?;
//! println!("{} rows", enrollment.height());
//! ```

mod codes;
mod dataset;
mod error;
mod geography;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Table Reading ===
pub use table::{check_file_exists, read_csv_frame, require_column};

// === Code Catalog ===
pub use codes::{
    CodeCatalog, CodeDefinition, GRADE_COUNT_PREFIX, code_stub, extend_with_years,
    parse_definition, substitute_year,
};

// === Datasets ===
pub use dataset::{Dataset, DatasetKind, DatasetLoader, concat_union, load_single, load_yearly};

// === Reference Data ===
pub use geography::{GeoReference, ReferenceCache};
