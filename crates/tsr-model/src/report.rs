use std::fmt;

/// The four standard reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportKind {
    Enrollment,
    Grades,
    Performance,
    Discipline,
}

impl ReportKind {
    /// All reports, in the order they are produced.
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Enrollment,
        ReportKind::Grades,
        ReportKind::Performance,
        ReportKind::Discipline,
    ];

    /// Title used in output file names, e.g. `"Houston Enrollment.csv"`.
    pub fn title(self) -> &'static str {
        match self {
            Self::Enrollment => "Enrollment",
            Self::Grades => "Grades",
            Self::Performance => "Performance",
            Self::Discipline => "Discipline",
        }
    }

    /// Spreadsheet tab name.
    pub fn tab_name(self) -> &'static str {
        match self {
            Self::Enrollment => "enrollment",
            Self::Grades => "grades",
            Self::Performance => "performance",
            Self::Discipline => "discipline",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
