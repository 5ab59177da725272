//! Resolving configuration and subdivision groups from CLI flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use tsr_model::{FilterSpec, GroupCatalog, ReportConfig, load_config};

/// Load the configuration named by `--config`, or the defaults without one,
/// and apply `--data-dir`.
pub fn load_report_config(path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<ReportConfig> {
    let config = match path {
        Some(path) => {
            let config = load_config(path)
                .with_context(|| format!("load config {}", path.display()))?;
            debug!(path = %path.display(), "loaded configuration");
            config
        }
        None => ReportConfig::default(),
    };
    Ok(config.with_data_dir(data_dir))
}

/// Built-in groups plus those defined in the configuration.
pub fn group_catalog(config: &ReportConfig) -> GroupCatalog {
    GroupCatalog::with_configured(&config.groups)
}

/// The row restriction selected by a group name.
pub fn group_restriction(config: &ReportConfig, name: &str) -> Result<FilterSpec> {
    let catalog = group_catalog(config);
    let group = catalog.get(name)?;
    debug!(
        group = %group.name,
        level = %group.level,
        members = group.members.len(),
        "selected subdivision group"
    );
    Ok(group.restrict(FilterSpec::new()))
}
