//! Dataset transformation for school reports.
//!
//! - **filter**: join with the geographic reference, project columns and
//!   restrict rows by county, district and year
//! - **pivot**: reshape long-format discipline records into one row per
//!   district

mod error;
pub mod filter;
pub mod pivot;

pub use error::{Result, TransformError};
pub use filter::{DatasetFilterExt, filter_dataset};
pub use pivot::{pivot_discipline, pivot_header};
