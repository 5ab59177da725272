//! Error types for report sinks.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// No access token for the spreadsheet API.
    #[error("environment variable {var} is not set")]
    MissingToken { var: &'static str },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The spreadsheet API answered with a non-success status.
    #[error("spreadsheet API error ({status}): {message}")]
    SheetsApi { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, OutputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_shows_status() {
        let err = OutputError::SheetsApi {
            status: 403,
            message: "The caller does not have permission".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "spreadsheet API error (403): The caller does not have permission"
        );
    }
}
