//! Delimited source reading.
//!
//! Every column is read as a string. Identifiers such as `057` keep their
//! text, and yearly tables whose columns would infer to different types still
//! concatenate.

use std::path::Path;

use polars::prelude::*;
use tsr_common::has_column;

use crate::error::{IngestError, Result};

/// Fail with [`IngestError::FileNotFound`] unless `path` is a readable file.
pub fn check_file_exists(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Ok(()),
        Ok(_) => Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Reads a comma-delimited file with a header row into a string-typed frame.
///
/// Column names are trimmed and a UTF-8 BOM on the first name is dropped.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    check_file_exists(path)?;

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let renames: Vec<(String, String)> = df
        .get_column_names()
        .into_iter()
        .filter_map(|name| {
            let clean = name.trim().trim_matches('\u{feff}').trim();
            (clean != name.as_str()).then(|| (name.to_string(), clean.to_string()))
        })
        .collect();
    for (old, new) in renames {
        df.rename(&old, new.into())?;
    }

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read source"
    );
    Ok(df)
}

/// Fail with [`IngestError::MissingColumn`] unless `df` has `column`.
pub fn require_column(df: &DataFrame, column: &str, path: &Path) -> Result<()> {
    if has_column(df, column) {
        Ok(())
    } else {
        Err(IngestError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_reads_everything_as_strings() {
        let file = create_temp_csv("DISTRICT,COUNTY,N\n001902,057,12\n101912,101,3.5\n");
        let df = read_csv_frame(file.path()).unwrap();
        assert_eq!(df.height(), 2);
        for column in df.get_columns() {
            assert_eq!(column.dtype(), &DataType::String);
        }
        assert_eq!(
            tsr_common::column_strings(&df, "COUNTY").unwrap(),
            vec!["057", "101"]
        );
    }

    #[test]
    fn test_header_names_are_cleaned() {
        let file = create_temp_csv("\u{feff}DISTRICT, STUDENT GROUP \n1,ALL STUDENTS\n");
        let df = read_csv_frame(file.path()).unwrap();
        assert!(has_column(&df, "DISTRICT"));
        assert!(has_column(&df, "STUDENT GROUP"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_csv_frame(Path::new("/nonexistent/DREF.dat")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn test_require_column() {
        let file = create_temp_csv("A,B\n1,2\n");
        let df = read_csv_frame(file.path()).unwrap();
        assert!(require_column(&df, "A", file.path()).is_ok());
        let err = require_column(&df, "DISTRICT", file.path()).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { .. }));
    }
}
