//! CLI library components for the school report generator.

pub mod logging;
pub mod setup;
