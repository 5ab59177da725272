//! Delimited table reading.

mod reader;

pub use reader::{check_file_exists, read_csv_frame, require_column};
