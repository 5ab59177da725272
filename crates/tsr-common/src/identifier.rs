//! Subdivision identifier normalization.
//!
//! District and county identifiers arrive in several spellings: zero padded
//! (`"057"`), prefixed with an apostrophe by spreadsheet exports (`"'057"`), or
//! as bare integers from configuration (`57`). All comparisons between
//! identifiers go through [`normalize_identifier`].

use std::collections::BTreeSet;

/// Normalize a district or county identifier for comparison.
///
/// Surrounding whitespace and a leading apostrophe are removed. Values that
/// parse as integers are rendered in canonical integer form; anything else is
/// returned trimmed.
///
/// Returns `None` for blank values.
///
/// # Examples
///
/// ```
/// use tsr_common::normalize_identifier;
///
/// assert_eq!(normalize_identifier("057").as_deref(), Some("57"));
/// assert_eq!(normalize_identifier("'101912").as_deref(), Some("101912"));
/// assert_eq!(normalize_identifier(" Harris ").as_deref(), Some("Harris"));
/// assert_eq!(normalize_identifier("   "), None);
/// ```
pub fn normalize_identifier(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('\'').trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<i64>() {
        Ok(value) => Some(value.to_string()),
        Err(_) => Some(trimmed.to_string()),
    }
}

/// Normalize a collection of identifiers into a set, dropping blanks.
pub fn normalize_identifiers<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .filter_map(|value| normalize_identifier(value.as_ref()))
        .collect()
}
