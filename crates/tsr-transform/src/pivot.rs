//! Discipline pivot.
//!
//! The discipline snapshot is long: one row per district and student group.
//! Reports want it wide, one row per district with a column per
//! metric/group pair.

use std::collections::HashMap;

use polars::prelude::*;
use tracing::debug;
use tsr_common::{column_strings, parse_f64};
use tsr_model::{COUNTY, DISTNAME, DISTRICT, STUDENT_GROUP};

use crate::error::{Result, TransformError};

const KEY_COLUMNS: [&str; 3] = [DISTRICT, DISTNAME, COUNTY];

/// Output column name for one metric/group cell, e.g. `OSS STUDENTS (BLACK OR AFRICAN AMERICAN)`.
pub fn pivot_header(metric: &str, group: &str) -> String {
    format!("{metric} ({group})")
}

#[derive(Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Pivot `df` to one row per (`DISTRICT`, `DISTNAME`, `COUNTY`).
///
/// Rows keep the order in which each key first appears. Value columns are
/// metric-major: every group of the first metric, then every group of the
/// next. A cell holds the mean of the numeric source values for that key,
/// metric and group; values that do not parse as numbers are ignored and a
/// cell with none is null. Rows whose group is not listed are dropped, and a
/// metric absent from `df` yields null columns.
///
/// # Errors
///
/// Returns [`TransformError::ColumnNotFound`] when a key column or the
/// student group column is missing.
pub fn pivot_discipline(df: &DataFrame, metrics: &[String], groups: &[String]) -> Result<DataFrame> {
    let mut keys: Vec<Vec<String>> = Vec::with_capacity(KEY_COLUMNS.len());
    for name in KEY_COLUMNS {
        keys.push(
            column_strings(df, name).ok_or_else(|| TransformError::ColumnNotFound(name.to_string()))?,
        );
    }
    let row_groups = column_strings(df, STUDENT_GROUP)
        .ok_or_else(|| TransformError::ColumnNotFound(STUDENT_GROUP.to_string()))?;
    let metric_values: Vec<Option<Vec<String>>> =
        metrics.iter().map(|metric| column_strings(df, metric)).collect();
    let group_slot: HashMap<&str, usize> = groups
        .iter()
        .enumerate()
        .map(|(slot, group)| (group.as_str(), slot))
        .collect();

    let cells_per_row = metrics.len() * groups.len();
    let mut row_of_key: HashMap<(String, String, String), usize> = HashMap::new();
    let mut key_rows: Vec<(String, String, String)> = Vec::new();
    let mut cells: Vec<Vec<Mean>> = Vec::new();

    for row in 0..df.height() {
        let Some(&slot) = group_slot.get(row_groups[row].as_str()) else {
            continue;
        };
        let key = (
            keys[0][row].clone(),
            keys[1][row].clone(),
            keys[2][row].clone(),
        );
        let out_row = *row_of_key.entry(key.clone()).or_insert_with(|| {
            key_rows.push(key);
            cells.push(vec![Mean::default(); cells_per_row]);
            cells.len() - 1
        });
        for (metric_idx, values) in metric_values.iter().enumerate() {
            let value = values
                .as_ref()
                .and_then(|values| parse_f64(&values[row]))
                .filter(|value| value.is_finite());
            if let Some(value) = value {
                cells[out_row][metric_idx * groups.len() + slot].push(value);
            }
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(KEY_COLUMNS.len() + cells_per_row);
    for (idx, name) in KEY_COLUMNS.iter().enumerate() {
        let values: Vec<&str> = key_rows
            .iter()
            .map(|key| match idx {
                0 => key.0.as_str(),
                1 => key.1.as_str(),
                _ => key.2.as_str(),
            })
            .collect();
        columns.push(Series::new((*name).into(), values).into_column());
    }
    for (metric_idx, metric) in metrics.iter().enumerate() {
        for (slot, group) in groups.iter().enumerate() {
            let cell = metric_idx * groups.len() + slot;
            let values: Vec<Option<f64>> = cells.iter().map(|row| row[cell].value()).collect();
            columns.push(Series::new(pivot_header(metric, group).into(), values).into_column());
        }
    }

    let pivoted = DataFrame::new(columns)?;
    debug!(
        source_rows = df.height(),
        rows = pivoted.height(),
        columns = pivoted.width(),
        "pivoted discipline records"
    );
    Ok(pivoted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    fn discipline() -> DataFrame {
        let column = |name: &str, values: Vec<&str>| Series::new(name.into(), values).into_column();
        DataFrame::new(vec![
            column("DISTRICT", vec!["101912", "101912", "101912", "057905", "101912"]),
            column("DISTNAME", vec!["HOUSTON ISD", "HOUSTON ISD", "HOUSTON ISD", "DALLAS ISD", "HOUSTON ISD"]),
            column("COUNTY", vec!["101", "101", "101", "057", "101"]),
            column("STUDENT GROUP", vec!["ALL STUDENTS", "BLACK", "ALL STUDENTS", "ALL STUDENTS", "WHITE"]),
            column("OSS STUDENTS", vec!["10", "4", "20", "-999", "1"]),
            column("ISS STUDENTS", vec!["<5", "3", "", "7", "1"]),
        ])
        .unwrap()
    }

    #[test]
    fn one_row_per_district_in_first_appearance_order() {
        let pivoted = pivot_discipline(
            &discipline(),
            &owned(&["OSS STUDENTS", "ISS STUDENTS"]),
            &owned(&["ALL STUDENTS", "BLACK"]),
        )
        .unwrap();
        assert_eq!(pivoted.height(), 2);
        assert_eq!(
            column_strings(&pivoted, "DISTRICT").unwrap(),
            vec!["101912", "057905"]
        );
        let names: Vec<String> = pivoted
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "DISTRICT",
                "DISTNAME",
                "COUNTY",
                "OSS STUDENTS (ALL STUDENTS)",
                "OSS STUDENTS (BLACK)",
                "ISS STUDENTS (ALL STUDENTS)",
                "ISS STUDENTS (BLACK)",
            ]
        );
    }

    #[test]
    fn cells_hold_the_mean_of_numeric_values() {
        let pivoted = pivot_discipline(
            &discipline(),
            &owned(&["OSS STUDENTS", "ISS STUDENTS"]),
            &owned(&["ALL STUDENTS", "BLACK"]),
        )
        .unwrap();
        let oss_all = pivoted.column("OSS STUDENTS (ALL STUDENTS)").unwrap().f64().unwrap();
        assert_eq!(oss_all.get(0), Some(15.0));
        assert_eq!(oss_all.get(1), Some(-999.0));

        let iss_all = pivoted.column("ISS STUDENTS (ALL STUDENTS)").unwrap().f64().unwrap();
        assert_eq!(iss_all.get(0), None);
        assert_eq!(iss_all.get(1), Some(7.0));

        let iss_black = pivoted.column("ISS STUDENTS (BLACK)").unwrap().f64().unwrap();
        assert_eq!(iss_black.get(0), Some(3.0));
        assert_eq!(iss_black.get(1), None);
    }

    #[test]
    fn missing_metric_yields_null_columns() {
        let pivoted = pivot_discipline(
            &discipline(),
            &owned(&["NUMBER OF STUDENTS"]),
            &owned(&["ALL STUDENTS"]),
        )
        .unwrap();
        assert_eq!(pivoted.width(), 4);
        assert_eq!(
            pivoted.column("NUMBER OF STUDENTS (ALL STUDENTS)").unwrap().null_count(),
            2
        );
    }

    #[test]
    fn unlisted_groups_only_means_no_rows() {
        let pivoted = pivot_discipline(
            &discipline(),
            &owned(&["OSS STUDENTS"]),
            &owned(&["ASIAN"]),
        )
        .unwrap();
        assert_eq!(pivoted.height(), 0);
        assert_eq!(pivoted.width(), 4);
    }

    #[test]
    fn group_column_is_required() {
        let df = discipline().drop("STUDENT GROUP").unwrap();
        let err = pivot_discipline(&df, &owned(&["OSS STUDENTS"]), &owned(&["ALL STUDENTS"]))
            .unwrap_err();
        assert!(matches!(err, TransformError::ColumnNotFound(name) if name == "STUDENT GROUP"));
    }
}
