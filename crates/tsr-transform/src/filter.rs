//! Filter engine.
//!
//! Joins a dataset with its geographic reference and applies a
//! [`FilterSpec`]. The join is inner on the normalized `DISTRICT`; geographic
//! columns always come from the reference, never from the data side, so
//! filtering a filtered dataset again yields the same geography.

use std::collections::HashMap;

use polars::prelude::*;
use tracing::debug;
use tsr_common::{column_names, column_strings, normalize_identifier};
use tsr_ingest::Dataset;
use tsr_model::{DISTRICT, FilterSpec, GEOGRAPHY_COLUMNS, YEAR};

use crate::error::{Result, TransformError};

/// `Dataset::with_filter`, provided here so the ingest crate stays free of
/// transformation logic.
pub trait DatasetFilterExt {
    /// A new dataset restricted by `spec`. The receiver is left untouched.
    fn with_filter(&self, spec: &FilterSpec) -> Result<Dataset>;
}

impl DatasetFilterExt for Dataset {
    fn with_filter(&self, spec: &FilterSpec) -> Result<Dataset> {
        filter_dataset(self, spec)
    }
}

/// Data columns carried into the output, after the geographic columns.
///
/// With an allow-list: its members present in `df`, in allow-list order,
/// without duplicates. Without one: every column of `df`. Geographic columns
/// are excluded either way.
fn projected_columns(df: &DataFrame, allow: Option<&[String]>) -> Vec<String> {
    let available = column_names(df);
    let candidates: Vec<String> = match allow {
        Some(allow) => allow
            .iter()
            .filter(|name| available.contains(name))
            .cloned()
            .collect(),
        None => available,
    };

    let mut projected: Vec<String> = Vec::with_capacity(candidates.len());
    for name in candidates {
        if !GEOGRAPHY_COLUMNS.contains(&name.as_str()) && !projected.contains(&name) {
            projected.push(name);
        }
    }
    projected
}

fn to_index(rows: Vec<usize>) -> UInt32Chunked {
    let indices: Vec<u32> = rows.into_iter().map(|row| row as u32).collect();
    UInt32Chunked::from_vec("idx".into(), indices)
}

/// Join, project and restrict `dataset`.
///
/// Output columns are `DISTRICT, DISTNAME, COUNTY, CNTYNAME, REGION` followed
/// by the projected data columns. Rows follow the reference table order and,
/// within one district, the source order. Rows whose district is blank or
/// absent from the reference are dropped. An empty result is not an error.
pub fn filter_dataset(dataset: &Dataset, spec: &FilterSpec) -> Result<Dataset> {
    let data = dataset.data();
    let geography = dataset.geography();

    let districts = column_strings(data, DISTRICT)
        .ok_or_else(|| TransformError::ColumnNotFound(DISTRICT.to_string()))?;
    let years = column_strings(data, YEAR);

    let mut source_rows: HashMap<String, Vec<usize>> = HashMap::new();
    for (row, value) in districts.iter().enumerate() {
        let Some(key) = normalize_identifier(value) else {
            continue;
        };
        if spec
            .district_restriction()
            .is_some_and(|allowed| !allowed.contains(&key))
        {
            continue;
        }
        if let Some(allowed) = spec.year_restriction() {
            let year = years.as_ref().and_then(|years| years.get(row));
            match year {
                Some(year) if !year.is_empty() && allowed.contains(year) => {}
                _ => continue,
            }
        }
        source_rows.entry(key).or_default().push(row);
    }

    let mut reference_rows = Vec::new();
    let mut data_rows = Vec::new();
    for reference_row in 0..geography.len() {
        let Some(key) = geography.district_key(reference_row) else {
            continue;
        };
        if let Some(allowed) = spec.county_restriction() {
            match geography.county_key(reference_row) {
                Some(county) if allowed.contains(county) => {}
                _ => continue,
            }
        }
        if let Some(rows) = source_rows.get(key) {
            for &row in rows {
                reference_rows.push(reference_row);
                data_rows.push(row);
            }
        }
    }

    let projected = projected_columns(data, spec.column_restriction());
    let geo = geography.frame().take(&to_index(reference_rows))?;
    let body = data
        .take(&to_index(data_rows))?
        .select(projected.iter().map(String::as_str))?;

    let mut columns: Vec<Column> = geo.get_columns().to_vec();
    columns.extend(body.get_columns().iter().cloned());
    let joined = DataFrame::new(columns)?;

    debug!(
        dataset = dataset.description(),
        source_rows = data.height(),
        rows = joined.height(),
        columns = joined.width(),
        "filtered dataset"
    );
    Ok(dataset.derive(joined))
}
