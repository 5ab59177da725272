//! Geographic reference table and the per-run reference cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use polars::prelude::DataFrame;
use tracing::{debug, info};
use tsr_common::{column_strings, normalize_identifier};
use tsr_model::{COUNTY, DISTRICT, GEOGRAPHY_COLUMNS};

use crate::codes::CodeCatalog;
use crate::error::Result;
use crate::table::{read_csv_frame, require_column};

/// District → county/name/region lookup.
///
/// Rows keep their file order; the filter engine emits joined rows in this
/// order.
#[derive(Debug, Clone)]
pub struct GeoReference {
    source: PathBuf,
    frame: DataFrame,
    district_keys: Vec<Option<String>>,
    county_keys: Vec<Option<String>>,
    by_district: HashMap<String, Vec<usize>>,
}

impl GeoReference {
    pub fn load(path: &Path) -> Result<Self> {
        let frame = read_csv_frame(path)?;
        let reference = Self::from_frame(frame, path)?;
        info!(
            path = %path.display(),
            districts = reference.len(),
            "loaded geographic reference"
        );
        Ok(reference)
    }

    /// Build from an already loaded frame, keeping only the geographic columns.
    pub fn from_frame(frame: DataFrame, source: &Path) -> Result<Self> {
        for column in GEOGRAPHY_COLUMNS {
            require_column(&frame, column, source)?;
        }
        let frame = frame.select(GEOGRAPHY_COLUMNS)?;
        let district_keys = normalized_column(&frame, DISTRICT);
        let county_keys = normalized_column(&frame, COUNTY);

        let mut by_district: HashMap<String, Vec<usize>> = HashMap::new();
        for (row, key) in district_keys.iter().enumerate() {
            if let Some(key) = key {
                by_district.entry(key.clone()).or_default().push(row);
            }
        }

        Ok(Self {
            source: source.to_path_buf(),
            frame,
            district_keys,
            county_keys,
            by_district,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The reference table, restricted to the geographic columns.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Normalized district identifier of a reference row.
    pub fn district_key(&self, row: usize) -> Option<&str> {
        self.district_keys.get(row).and_then(Option::as_deref)
    }

    /// Normalized county identifier of a reference row.
    pub fn county_key(&self, row: usize) -> Option<&str> {
        self.county_keys.get(row).and_then(Option::as_deref)
    }

    /// Reference rows for a normalized district identifier.
    pub fn rows_for(&self, district: &str) -> &[usize] {
        self.by_district
            .get(district)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, district: &str) -> bool {
        self.by_district.contains_key(district)
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }
}

fn normalized_column(frame: &DataFrame, name: &str) -> Vec<Option<String>> {
    column_strings(frame, name)
        .unwrap_or_default()
        .iter()
        .map(|value| normalize_identifier(value))
        .collect()
}

/// Read-only reference data shared by every dataset of one run, keyed by
/// source path.
#[derive(Debug, Default)]
pub struct ReferenceCache {
    geography: HashMap<PathBuf, Arc<GeoReference>>,
    catalogs: HashMap<PathBuf, Arc<CodeCatalog>>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geography(&mut self, path: &Path) -> Result<Arc<GeoReference>> {
        if let Some(reference) = self.geography.get(path) {
            debug!(path = %path.display(), "reusing geographic reference");
            return Ok(Arc::clone(reference));
        }
        let reference = Arc::new(GeoReference::load(path)?);
        self.geography
            .insert(path.to_path_buf(), Arc::clone(&reference));
        Ok(reference)
    }

    pub fn code_catalog(&mut self, path: &Path) -> Result<Arc<CodeCatalog>> {
        if let Some(catalog) = self.catalogs.get(path) {
            debug!(path = %path.display(), "reusing code catalog");
            return Ok(Arc::clone(catalog));
        }
        let catalog = Arc::new(CodeCatalog::load(path)?);
        if catalog.skipped() > 0 {
            info!(
                path = %path.display(),
                skipped = catalog.skipped(),
                "code catalog contained malformed entries"
            );
        }
        self.catalogs.insert(path.to_path_buf(), Arc::clone(&catalog));
        Ok(catalog)
    }
}
