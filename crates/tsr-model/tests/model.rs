use std::io::Write;

use tempfile::NamedTempFile;
use tsr_model::{
    GroupCatalog, ModelError, ReportConfig, ReportKind, SubdivisionLevel, load_config,
};

#[test]
fn builtin_groups_are_available_by_name() {
    let catalog = GroupCatalog::builtin();
    let houston = catalog.get("houston_districts").expect("houston group");
    assert_eq!(houston.level, SubdivisionLevel::Districts);
    assert_eq!(houston.members.get("101912").map(String::as_str), Some("Houston ISD"));

    let dallas = catalog.get("dallas_counties").expect("dallas group");
    assert_eq!(dallas.level, SubdivisionLevel::Counties);
    assert_eq!(dallas.identifiers().collect::<Vec<_>>(), vec!["220", "57"]);
}

#[test]
fn unknown_group_is_a_clear_error() {
    let catalog = GroupCatalog::builtin();
    let err = catalog.get("austin").unwrap_err();
    assert!(matches!(err, ModelError::UnknownGroup { .. }));
    let message = err.to_string();
    assert!(message.contains("unknown subdivision group 'austin'"));
    assert!(message.contains("houston_districts"));
}

#[test]
fn county_group_restricts_county_axis() {
    let catalog = GroupCatalog::builtin();
    let spec = catalog
        .get("dallas_counties")
        .unwrap()
        .restrict(Default::default());
    assert!(spec.county_restriction().unwrap().contains("57"));
    assert!(spec.district_restriction().is_none());
}

#[test]
fn district_group_restricts_district_axis() {
    let catalog = GroupCatalog::builtin();
    let spec = catalog
        .get("basis_districts")
        .unwrap()
        .restrict(Default::default());
    assert_eq!(spec.district_restriction().unwrap().len(), 4);
    assert!(spec.county_restriction().is_none());
}

#[test]
fn config_file_adds_and_overrides_groups() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
data_dir = "/srv/tea"
reference_year = "2015"

[groups.harris]
level = "counties"
members = {{ "101" = "HARRIS" }}

[groups.houston_districts]
level = "districts"
members = {{ "101912" = "Houston ISD" }}
"#
    )
    .unwrap();

    let config = load_config(file.path()).expect("load config");
    assert_eq!(config.reference_year, "2015");
    let catalog = GroupCatalog::with_configured(&config.groups);
    assert_eq!(catalog.get("harris").unwrap().level, SubdivisionLevel::Counties);
    assert_eq!(catalog.get("houston_districts").unwrap().members.len(), 1);
    assert!(catalog.get("basis_districts").is_ok());
}

#[test]
fn missing_config_file_is_io_error() {
    let err = load_config(std::path::Path::new("/nonexistent/tsr.toml")).unwrap_err();
    assert!(matches!(err, ModelError::Io { .. }));
}

#[test]
fn invalid_config_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "reference_year = \"sixteen\"\n").unwrap();
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ModelError::InvalidConfig { .. }));

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "reference_year = [\n").unwrap();
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ModelError::Toml { .. }));
}

#[test]
fn report_kinds_have_fixed_names() {
    let titles: Vec<_> = ReportKind::ALL.iter().map(|kind| kind.title()).collect();
    assert_eq!(titles, vec!["Enrollment", "Grades", "Performance", "Discipline"]);
    assert_eq!(ReportKind::Discipline.tab_name(), "discipline");
    assert_eq!(ReportConfig::default().spreadsheet_id.len(), 44);
}
