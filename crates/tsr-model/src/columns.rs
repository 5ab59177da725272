//! Default column sets for the standard reports.
//!
//! These are the defaults of [`ColumnSets`](crate::ColumnSets); a config file
//! may replace any of them.

/// Demographic enrollment counts (`C`) and percentages (`P`).
pub const ENROLLMENT_COLUMNS: &[&str] = &[
    "DISTRICT", "YEAR", "DPETECOP", "DPETBLAP", "DPETHISP", "DPETBILP", "DPETLEPP", "DPETSPEP",
    "DPETALLC", "DPETBILC", "DPETBLAC", "DPETHISC", "DPETLEPC", "DPETSPEC", "DPETECOC",
];

/// Exam pass rates, reading/writing/math across six breakdowns.
///
/// The year token at offset 9 is rewritten to the configured reference year
/// before the columns are used.
pub const PERFORMANCE_COLUMNS: &[&str] = &[
    "DISTRICT",
    "YEAR",
    "DA00AR01S16R",
    "DB00AR01S16R",
    "DH00AR01S16R",
    "DL00AR01S16R",
    "DE00AR01S16R",
    "DS00AR01S16R",
    "DA00AW01S16R",
    "DB00AW01S16R",
    "DH00AW01S16R",
    "DL00AW01S16R",
    "DE00AW01S16R",
    "DS00AW01S16R",
    "DA00AM01S16R",
    "DB00AM01S16R",
    "DH00AM01S16R",
    "DL00AM01S16R",
    "DE00AM01S16R",
    "DS00AM01S16R",
];

pub const DISCIPLINE_COLUMNS: &[&str] = &[
    "DISTRICT",
    "STUDENT GROUP",
    "OSS STUDENTS",
    "ISS STUDENTS",
    "NUMBER OF STUDENTS",
];

/// Metrics spread across student groups by the discipline pivot, in output order.
pub const DISCIPLINE_METRICS: &[&str] = &["OSS STUDENTS", "ISS STUDENTS", "NUMBER OF STUDENTS"];

/// Student groups kept by the discipline pivot, in output order.
pub const STUDENT_GROUPS: &[&str] = &[
    "ALL STUDENTS",
    "BLACK OR AFRICAN AMERICAN",
    "HISPANIC/LATINO",
    "SPECIAL ED.",
    "ECON. DIS.",
];

/// Grade-level enrollment counts: pre-K, kindergarten, then grades 1 through 12.
pub fn default_grade_columns() -> Vec<String> {
    let mut columns = vec![
        "DISTRICT".to_string(),
        "YEAR".to_string(),
        "DPETGPKC".to_string(),
        "DPETGKNC".to_string(),
    ];
    columns.extend((1..=12).map(|grade| format!("DPETG{grade:02}C")));
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_columns_cover_pre_k_through_twelve() {
        let columns = default_grade_columns();
        assert_eq!(columns.len(), 16);
        assert_eq!(columns[2], "DPETGPKC");
        assert_eq!(columns[3], "DPETGKNC");
        assert_eq!(columns[4], "DPETG01C");
        assert_eq!(columns[15], "DPETG12C");
    }

    #[test]
    fn performance_codes_share_a_layout() {
        for code in &PERFORMANCE_COLUMNS[2..] {
            assert_eq!(code.len(), 12, "{code}");
            assert_eq!(&code[9..11], "16", "{code}");
        }
    }
}
