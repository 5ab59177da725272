//! Shared utilities for the school report crates.
//!
//! This crate provides the helpers every other crate in the workspace leans on:
//! Polars value conversion and subdivision identifier normalization.

pub mod identifier;
pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use identifier::{normalize_identifier, normalize_identifiers};
pub use polars::{
    any_to_string, column_names, column_strings, format_numeric, has_column, parse_f64,
};
