//! Report configuration.
//!
//! Every path, source template, column set and document identifier the
//! report pipeline needs lives in [`ReportConfig`]. Any field omitted from a
//! config file falls back to the defaults below.
//!
//! ```toml
//! reference_year = "2016"
//! geographic_reference = "DREF.dat"
//!
//! [sources.enrollment]
//! template = "DISTPROF"
//! extension = "dat"
//! years = ["2014", "2015", "2016"]
//!
//! [groups.harris_charters]
//! level = "districts"
//! members = { "101802" = "Ser-Ninos Charter School" }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::columns::{
    DISCIPLINE_COLUMNS, DISCIPLINE_METRICS, ENROLLMENT_COLUMNS, PERFORMANCE_COLUMNS,
    STUDENT_GROUPS, default_grade_columns,
};
use crate::error::{ModelError, Result};
use crate::groups::GroupConfig;

/// Environment variable for overriding the data directory.
pub const DATA_DIR_ENV_VAR: &str = "TSR_DATA_DIR";

const DEFAULT_SPREADSHEET_ID: &str = "1i7R-ER7zZx-W1sxkCe-y6ueZTbAz1QFh7LWUGOuWR74";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory relative source paths resolve against.
    pub data_dir: Option<PathBuf>,
    pub geographic_reference: PathBuf,
    pub code_catalog: PathBuf,
    pub sources: SourceConfig,
    pub columns: ColumnSets,
    /// Four-digit year the performance report is restricted to.
    pub reference_year: String,
    pub spreadsheet_id: String,
    pub groups: BTreeMap<String, GroupConfig>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            geographic_reference: PathBuf::from("DREF.dat"),
            code_catalog: PathBuf::from("dstud_codes.csv"),
            sources: SourceConfig::default(),
            columns: ColumnSets::default(),
            reference_year: "2016".to_string(),
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            groups: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub enrollment: YearlySource,
    pub performance: YearlySource,
    /// Single snapshot of disciplinary actions, not split by year.
    pub discipline: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enrollment: YearlySource::new("DISTPROF"),
            performance: YearlySource::new("DISTSTAAR2"),
            discipline: PathBuf::from("discipline_region4_2016.csv"),
        }
    }
}

/// A family of per-year files named `<template>_<year>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlySource {
    pub template: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_years")]
    pub years: Vec<String>,
}

fn default_extension() -> String {
    "dat".to_string()
}

fn default_years() -> Vec<String> {
    vec!["2014".to_string(), "2015".to_string(), "2016".to_string()]
}

impl YearlySource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            extension: default_extension(),
            years: default_years(),
        }
    }

    /// File name for one year, e.g. `DISTPROF_2015.dat`.
    pub fn file_name(&self, year: &str) -> String {
        format!("{}_{}.{}", self.template, year, self.extension)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSets {
    pub enrollment: Vec<String>,
    pub grades: Vec<String>,
    pub performance: Vec<String>,
    pub discipline: Vec<String>,
    pub discipline_metrics: Vec<String>,
    pub student_groups: Vec<String>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

impl Default for ColumnSets {
    fn default() -> Self {
        Self {
            enrollment: owned(ENROLLMENT_COLUMNS),
            grades: default_grade_columns(),
            performance: owned(PERFORMANCE_COLUMNS),
            discipline: owned(DISCIPLINE_COLUMNS),
            discipline_metrics: owned(DISCIPLINE_METRICS),
            student_groups: owned(STUDENT_GROUPS),
        }
    }
}

impl ReportConfig {
    /// Set the data directory, taking precedence over the config file.
    #[must_use]
    pub fn with_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        if dir.is_some() {
            self.data_dir = dir;
        }
        self
    }

    /// Effective data directory.
    ///
    /// Resolution order:
    /// 1. `data_dir` from the config (or `--data-dir`)
    /// 2. `TSR_DATA_DIR` environment variable
    /// 3. the current directory
    pub fn data_root(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        if let Ok(dir) = std::env::var(DATA_DIR_ENV_VAR) {
            return PathBuf::from(dir);
        }
        PathBuf::from(".")
    }

    /// Resolve a configured path against the data directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_root().join(path)
        }
    }

    /// Two-digit token embedded in year-bearing codes, e.g. `"16"` for 2016.
    ///
    /// The whole value is returned when its last two bytes do not start on a
    /// character boundary; token validation rejects it downstream.
    pub fn reference_year_token(&self) -> &str {
        let start = self.reference_year.len().saturating_sub(2);
        self.reference_year
            .get(start..)
            .unwrap_or(&self.reference_year)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_four_digit_year(&self.reference_year) {
            return Err(ModelError::InvalidConfig {
                message: format!(
                    "reference_year must be a four-digit year, got '{}'",
                    self.reference_year
                ),
            });
        }
        for (name, source) in [
            ("enrollment", &self.sources.enrollment),
            ("performance", &self.sources.performance),
        ] {
            if source.years.is_empty() {
                return Err(ModelError::InvalidConfig {
                    message: format!("sources.{name}.years is empty"),
                });
            }
            if let Some(year) = source.years.iter().find(|y| !is_four_digit_year(y)) {
                return Err(ModelError::InvalidConfig {
                    message: format!("sources.{name}.years contains invalid year '{year}'"),
                });
            }
        }
        Ok(())
    }
}

fn is_four_digit_year(value: &str) -> bool {
    value.len() == 4 && value.chars().all(|ch| ch.is_ascii_digit())
}

/// Load a config file. Fields missing from the file take their defaults.
pub fn load_config(path: &Path) -> Result<ReportConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ReportConfig = toml::from_str(&text).map_err(|source| ModelError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_sources() {
        let config = ReportConfig::default();
        assert_eq!(config.sources.enrollment.file_name("2014"), "DISTPROF_2014.dat");
        assert_eq!(
            config.sources.performance.file_name("2016"),
            "DISTSTAAR2_2016.dat"
        );
        assert_eq!(config.reference_year_token(), "16");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ReportConfig = toml::from_str(
            r#"
            reference_year = "2015"

            [sources.performance]
            template = "STAAR"
            years = ["2015"]
            "#,
        )
        .unwrap();
        assert_eq!(config.reference_year_token(), "15");
        assert_eq!(config.sources.performance.file_name("2015"), "STAAR_2015.dat");
        assert_eq!(config.sources.enrollment.template, "DISTPROF");
        assert_eq!(config.columns, ColumnSets::default());
    }

    #[test]
    fn rejects_bad_reference_year() {
        let config = ReportConfig {
            reference_year: "16".to_string(),
            ..ReportConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ModelError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn token_of_non_ascii_year_does_not_panic() {
        let config = ReportConfig {
            reference_year: "201\u{e9}".to_string(),
            ..ReportConfig::default()
        };
        assert_eq!(config.reference_year_token(), "201\u{e9}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_year_list() {
        let mut config = ReportConfig::default();
        config.sources.enrollment.years.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn resolve_joins_relative_paths() {
        let config = ReportConfig::default().with_data_dir(Some(PathBuf::from("/data/tx")));
        assert_eq!(
            config.resolve(Path::new("DREF.dat")),
            PathBuf::from("/data/tx/DREF.dat")
        );
        assert_eq!(
            config.resolve(Path::new("/abs/DREF.dat")),
            PathBuf::from("/abs/DREF.dat")
        );
    }
}
