//! Field-code catalog and positional year handling.
//!
//! Source columns are named by fixed-width codes that embed a two-digit year.
//! Two layouts carry a year token:
//!
//! | Length | Year token | Example        | Stub      |
//! |--------|------------|----------------|-----------|
//! | 8      | `[5..7]`   | `DA0CT15R`     | `DA0CTR`  |
//! | 12     | `[9..11]`  | `DA00AR01S16R` | (none)    |
//!
//! Grade-count codes (`DPETG..`) use offsets 5–6 for the grade, not a year,
//! and are never treated as year-bearing.
//!
//! The catalog file holds one definition per line, `CODE--LABEL: DESCRIPTION`,
//! optionally quoted. Lines that do not split that way are skipped with a
//! warning.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::table::check_file_exists;

/// Prefix of grade-count codes, whose digits are a grade rather than a year.
pub const GRADE_COUNT_PREFIX: &str = "DPETG";

const SHORT_CODE_LEN: usize = 8;
const SHORT_YEAR_OFFSET: usize = 5;
const LONG_CODE_LEN: usize = 12;
const LONG_YEAR_OFFSET: usize = 9;

fn is_grade_count(code: &str) -> bool {
    code.starts_with(GRADE_COUNT_PREFIX)
}

fn digit_at(code: &str, offset: usize) -> bool {
    code.as_bytes()
        .get(offset)
        .is_some_and(|byte| byte.is_ascii_digit())
}

/// Offset of the embedded year token, if `code` carries one.
fn year_offset(code: &str) -> Option<usize> {
    if !code.is_ascii() {
        return None;
    }
    match code.len() {
        SHORT_CODE_LEN if digit_at(code, SHORT_YEAR_OFFSET) && !is_grade_count(code) => {
            Some(SHORT_YEAR_OFFSET)
        }
        LONG_CODE_LEN if digit_at(code, LONG_YEAR_OFFSET) => Some(LONG_YEAR_OFFSET),
        _ => None,
    }
}

/// Normalize an 8-character code by removing its year token.
///
/// `DA0CT15R` becomes `DA0CTR`. Codes of any other shape, and grade-count
/// codes, are returned unchanged.
///
/// # Examples
///
/// ```
/// use tsr_ingest::code_stub;
///
/// assert_eq!(code_stub("DA0CT15R"), "DA0CTR");
/// assert_eq!(code_stub("DPETBLAC"), "DPETBLAC");
/// assert_eq!(code_stub("DPETG01C"), "DPETG01C");
/// assert_eq!(code_stub("DPETALLC"), "DPETALLC");
/// ```
pub fn code_stub(code: &str) -> String {
    if code.is_ascii()
        && code.len() == SHORT_CODE_LEN
        && digit_at(code, SHORT_YEAR_OFFSET)
        && !is_grade_count(code)
    {
        let mut stub = String::with_capacity(SHORT_CODE_LEN - 2);
        stub.push_str(&code[..SHORT_YEAR_OFFSET]);
        stub.push_str(&code[SHORT_YEAR_OFFSET + 2..]);
        stub
    } else {
        code.to_string()
    }
}

fn check_year_token(token: &str) -> Result<()> {
    if token.len() == 2 && token.bytes().all(|byte| byte.is_ascii_digit()) {
        Ok(())
    } else {
        Err(IngestError::InvalidYearToken {
            token: token.to_string(),
        })
    }
}

/// Rewrite the year token embedded in `code`.
///
/// Codes without a year token pass through unchanged.
///
/// # Errors
///
/// Returns [`IngestError::InvalidYearToken`] unless `token` is two digits.
pub fn substitute_year(code: &str, token: &str) -> Result<String> {
    check_year_token(token)?;
    Ok(match year_offset(code) {
        Some(offset) => {
            let mut rewritten = String::with_capacity(code.len());
            rewritten.push_str(&code[..offset]);
            rewritten.push_str(token);
            rewritten.push_str(&code[offset + 2..]);
            rewritten
        }
        None => code.to_string(),
    })
}

/// The base codes followed by one rewritten copy of the whole list per year.
///
/// With no years the base list is returned as is.
pub fn extend_with_years<S: AsRef<str>>(base: &[String], years: &[S]) -> Result<Vec<String>> {
    let mut codes = Vec::with_capacity(base.len() * (years.len() + 1));
    codes.extend(base.iter().cloned());
    for year in years {
        for code in base {
            codes.push(substitute_year(code, year.as_ref())?);
        }
    }
    Ok(codes)
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeDefinition {
    pub code: String,
    pub label: String,
    pub description: String,
}

impl CodeDefinition {
    pub fn stub(&self) -> String {
        code_stub(&self.code)
    }
}

/// Parse `CODE--LABEL: DESCRIPTION`.
///
/// Returns `None` when either delimiter is missing or the code is blank.
pub fn parse_definition(entry: &str) -> Option<CodeDefinition> {
    let (code, rest) = entry.split_once("--")?;
    let (label, description) = rest.split_once(": ")?;
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    Some(CodeDefinition {
        code: code.to_string(),
        label: label.trim().to_string(),
        description: description.trim().to_string(),
    })
}

/// First field of one catalog line, unquoted.
fn first_field(line: &str) -> std::result::Result<String, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    match reader.records().next() {
        Some(record) => Ok(record?.get(0).unwrap_or("").to_string()),
        None => Ok(String::new()),
    }
}

/// Parsed code catalog with its stub dictionary.
#[derive(Debug, Clone, Default)]
pub struct CodeCatalog {
    definitions: Vec<CodeDefinition>,
    stubs: BTreeMap<String, String>,
    skipped: usize,
}

impl CodeCatalog {
    /// Build a catalog from raw entries. Blank entries are ignored, malformed
    /// ones are skipped and counted.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::default();
        for (idx, entry) in entries.into_iter().enumerate() {
            catalog.push_entry(entry.as_ref(), idx as u64 + 1);
        }
        catalog
    }

    fn push_entry(&mut self, entry: &str, line: u64) {
        if entry.trim().is_empty() {
            return;
        }
        match parse_definition(entry) {
            Some(definition) => {
                self.stubs
                    .insert(definition.stub(), definition.description.clone());
                self.definitions.push(definition);
            }
            None => {
                warn!(line, entry, "skipping malformed code definition");
                self.skipped += 1;
            }
        }
    }

    /// Load a catalog file.
    ///
    /// Each line is read as its own delimited record and the first field is
    /// the definition, so a stray quote never spans into the next line.
    pub fn load(path: &Path) -> Result<Self> {
        check_file_exists(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut catalog = Self::default();
        for (idx, line) in text.lines().enumerate() {
            let line_no = idx as u64 + 1;
            match first_field(line) {
                Ok(entry) => catalog.push_entry(&entry, line_no),
                Err(error) => {
                    warn!(line = line_no, %error, "skipping unreadable catalog line");
                    catalog.skipped += 1;
                }
            }
        }
        debug!(
            path = %path.display(),
            definitions = catalog.len(),
            skipped = catalog.skipped,
            "loaded code catalog"
        );
        Ok(catalog)
    }

    /// Description for any year variant of `code`.
    pub fn describe(&self, code: &str) -> Option<&str> {
        self.stubs.get(&code_stub(code)).map(String::as_str)
    }

    /// Stub to description.
    pub fn stub_dictionary(&self) -> &BTreeMap<String, String> {
        &self.stubs
    }

    pub fn definitions(&self) -> &[CodeDefinition] {
        &self.definitions
    }

    /// Number of malformed entries skipped while parsing.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_drops_year_keeps_suffix() {
        assert_eq!(code_stub("DA0CT16R"), "DA0CTR");
        assert_eq!(code_stub("DA0GR14N"), "DA0GRN");
    }

    #[test]
    fn stub_leaves_other_shapes_alone() {
        assert_eq!(code_stub("DPETG12C"), "DPETG12C");
        assert_eq!(code_stub("DPETECOP"), "DPETECOP");
        // year digits one place early are not at the token offset
        assert_eq!(code_stub("DPET16BC"), "DPET1C");
        assert_eq!(code_stub("DPE1"), "DPE1");
        assert_eq!(code_stub("DA00AR01S16R"), "DA00AR01S16R");
        assert_eq!(code_stub(""), "");
    }

    #[test]
    fn substitute_short_code() {
        assert_eq!(substitute_year("DA0CT16R", "99").unwrap(), "DA0CT99R");
        assert_eq!(substitute_year("DPETBLAC", "99").unwrap(), "DPETBLAC");
        assert_eq!(substitute_year("DPETG01C", "99").unwrap(), "DPETG01C");
        assert_eq!(substitute_year("DISTRICT", "99").unwrap(), "DISTRICT");
    }

    #[test]
    fn substitute_long_code() {
        assert_eq!(
            substitute_year("DA00AR01S16R", "14").unwrap(),
            "DA00AR01S14R"
        );
        assert_eq!(
            substitute_year("DA00AR01SXXR", "14").unwrap(),
            "DA00AR01SXXR"
        );
    }

    #[test]
    fn substitute_rejects_bad_tokens() {
        assert!(matches!(
            substitute_year("DA0CT16R", "2016"),
            Err(IngestError::InvalidYearToken { .. })
        ));
        assert!(substitute_year("DA0CT16R", "1a").is_err());
    }

    #[test]
    fn extend_appends_one_copy_per_year() {
        let base = vec!["DISTRICT".to_string(), "DA0CT16R".to_string()];
        let codes = extend_with_years(&base, &["14", "15"]).unwrap();
        assert_eq!(
            codes,
            vec!["DISTRICT", "DA0CT16R", "DISTRICT", "DA0CT14R", "DISTRICT", "DA0CT15R"]
        );
    }

    #[test]
    fn extend_without_years_is_identity() {
        let base = vec!["DA0CT16R".to_string(), "DPETG01C".to_string()];
        let none: [&str; 0] = [];
        assert_eq!(extend_with_years(&base, &none).unwrap(), base);
    }

    #[test]
    fn parse_definition_splits_fields() {
        let definition =
            parse_definition(" DA0CT16R -- DISTRICT: Completion Rate ").unwrap();
        assert_eq!(definition.code, "DA0CT16R");
        assert_eq!(definition.label, "DISTRICT");
        assert_eq!(definition.description, "Completion Rate");
        assert_eq!(definition.stub(), "DA0CTR");
    }

    #[test]
    fn parse_definition_rejects_malformed() {
        assert!(parse_definition("DPETBLAC Black Students").is_none());
        assert!(parse_definition("DPETBLAC--no description").is_none());
        assert!(parse_definition("--DISTRICT: blank code").is_none());
    }

    #[test]
    fn catalog_skips_malformed_entries() {
        let catalog = CodeCatalog::from_entries([
            "DA0CT16R--DISTRICT: Completion Rate",
            "",
            "garbage line",
            "DPETG01C--DISTRICT: Grade 1 Students Count",
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.skipped(), 1);
        assert_eq!(catalog.describe("DA0CT14R"), Some("Completion Rate"));
        assert_eq!(catalog.describe("DPETG01C"), Some("Grade 1 Students Count"));
        assert_eq!(catalog.describe("DPETG02C"), None);
    }

    #[test]
    fn later_definitions_win() {
        let catalog = CodeCatalog::from_entries([
            "DA0CT15R--DISTRICT: Old wording",
            "DA0CT16R--DISTRICT: New wording",
        ]);
        assert_eq!(catalog.stub_dictionary().len(), 1);
        assert_eq!(catalog.describe("DA0CT14R"), Some("New wording"));
    }
}
