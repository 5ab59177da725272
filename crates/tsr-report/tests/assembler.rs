//! End-to-end report assembly over fixture files.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tsr_common::column_strings;
use tsr_model::{
    FilterSpec, GroupCatalog, ReportConfig, ReportKind, SubdivisionGroup, SubdivisionLevel,
};
use tsr_output::CsvSink;
use tsr_report::{FailureMode, ReportAssembler, ReportError, dispatch};

const REFERENCE: &str = "\
DISTRICT,DISTNAME,COUNTY,CNTYNAME,REGION
057905,DALLAS ISD,057,DALLAS,10
101828,HOUSTON GATEWAY ACADEMY,101,HARRIS,04
101912,HOUSTON ISD,101,HARRIS,04
";

const CATALOG: &str = "\
DPETALLC--DISTRICT: All Students Count
DPETBLAC--DISTRICT: Black Students Count
not a definition
DPETG01C--DISTRICT: Grade 1 Students Count
";

const DISCIPLINE: &str = "\
DISTRICT,DISTNAME,COUNTY,STUDENT GROUP,OSS STUDENTS,ISS STUDENTS,NUMBER OF STUDENTS
'101912,HOUSTON ISD,'101,ALL STUDENTS,120,200,300
'101912,HOUSTON ISD,'101,BLACK OR AFRICAN AMERICAN,80,<10,150
'101912,HOUSTON ISD,'101,WHITE,5,5,10
'101828,HOUSTON GATEWAY ACADEMY,'101,ALL STUDENTS,3,1,4
'057905,DALLAS ISD,'057,ALL STUDENTS,50,60,70
";

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write fixture");
}

fn fixture_dir() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();
    write(root, "DREF.dat", REFERENCE);
    write(root, "dstud_codes.csv", CATALOG);
    write(root, "discipline_region4_2016.csv", DISCIPLINE);
    for (year, offset) in [("2014", 0), ("2015", 10), ("2016", 20)] {
        write(
            root,
            &format!("DISTPROF_{year}.dat"),
            &format!(
                "DISTRICT,DPETALLC,DPETBLAC,DPETG01C,DPETG02C,DPETXTRA\n\
                 101912,{},{},1,2,x\n\
                 057905,{},{},3,4,x\n\
                 101828,{},{},5,6,x\n",
                1000 + offset,
                200 + offset,
                2000 + offset,
                300 + offset,
                30 + offset,
                4 + offset,
            ),
        );
        write(
            root,
            &format!("DISTSTAAR2_{year}.dat"),
            &format!(
                "DISTRICT,DB00AR01S{yy}R,DH00AR01S{yy}R\n\
                 101912,7{offset},6{offset}\n\
                 101828,8{offset},9{offset}\n",
                yy = &year[2..],
            ),
        );
    }
    dir
}

fn config_for(dir: &TempDir) -> ReportConfig {
    ReportConfig::default().with_data_dir(Some(dir.path().to_path_buf()))
}

fn houston() -> FilterSpec {
    GroupCatalog::builtin()
        .get("houston_districts")
        .unwrap()
        .restrict(FilterSpec::new())
}

#[test]
fn standard_report_for_a_district_group() {
    let dir = fixture_dir();
    let config = config_for(&dir);
    let mut assembler = ReportAssembler::new(&config);
    let report = assembler.standard_report(&houston()).unwrap();
    assert_eq!(report.tables().len(), 4);

    let enrollment = report.get(ReportKind::Enrollment).unwrap();
    assert_eq!(enrollment.height(), 6);
    assert_eq!(
        column_strings(&enrollment.data, "DISTRICT").unwrap(),
        vec!["101828", "101828", "101828", "101912", "101912", "101912"]
    );
    assert_eq!(
        column_strings(&enrollment.data, "YEAR").unwrap(),
        vec!["2014", "2015", "2016", "2014", "2015", "2016"]
    );
    let names: Vec<String> = enrollment
        .data
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "DISTRICT", "DISTNAME", "COUNTY", "CNTYNAME", "REGION", "YEAR", "DPETALLC", "DPETBLAC"
        ]
    );

    let grades = report.get(ReportKind::Grades).unwrap();
    assert_eq!(grades.width(), 5 + 3);
    assert!(grades.data.column("DPETG02C").is_ok());

    let performance = report.get(ReportKind::Performance).unwrap();
    assert_eq!(performance.height(), 2);
    assert_eq!(
        column_strings(&performance.data, "DB00AR01S16R").unwrap(),
        vec!["820", "720"]
    );
    assert!(performance.data.column("DB00AR01S14R").is_err());

    let discipline = report.get(ReportKind::Discipline).unwrap();
    assert_eq!(discipline.height(), 2);
    assert_eq!(discipline.width(), 3 + 15);
}

#[test]
fn single_district_group_fills_every_report_with_that_district() {
    let dir = fixture_dir();
    let config = config_for(&dir);
    let group = SubdivisionGroup::new(
        "houston_isd",
        SubdivisionLevel::Districts,
        [("101912", "Houston ISD")],
    );
    let mut assembler = ReportAssembler::new(&config);
    let report = assembler
        .standard_report(&group.restrict(FilterSpec::new()))
        .unwrap();

    for (kind, rows) in [
        (ReportKind::Enrollment, 3),
        (ReportKind::Grades, 3),
        (ReportKind::Performance, 1),
        (ReportKind::Discipline, 1),
    ] {
        let table = report.get(kind).unwrap();
        assert_eq!(table.height(), rows, "{kind}");
        let districts = column_strings(&table.data, "DISTRICT").unwrap();
        assert!(
            districts.iter().all(|district| district == "101912"),
            "{kind}: {districts:?}"
        );
    }
}

#[test]
fn county_group_selects_through_the_reference() {
    let dir = fixture_dir();
    let config = config_for(&dir);
    let mut assembler = ReportAssembler::new(&config);
    let dallas = GroupCatalog::builtin()
        .get("dallas_counties")
        .unwrap()
        .restrict(FilterSpec::new());

    let table = assembler.build(ReportKind::Enrollment, &dallas).unwrap();
    assert_eq!(
        column_strings(&table.data, "DISTNAME").unwrap(),
        vec!["DALLAS ISD"; 3]
    );
}

#[test]
fn performance_csv_output() {
    let dir = fixture_dir();
    let config = config_for(&dir);
    let out = dir.path().join("out");
    let mut assembler = ReportAssembler::new(&config);
    let mut sink = CsvSink::new(&out);

    let summary = dispatch(
        &mut assembler,
        "Houston",
        &houston(),
        &mut sink,
        FailureMode::Isolate,
    )
    .unwrap();
    assert!(summary.is_success());
    assert_eq!(summary.outcomes.len(), 4);
    for kind in ReportKind::ALL {
        assert!(out.join(format!("Houston {}.csv", kind.title())).is_file());
    }

    let contents = fs::read_to_string(out.join("Houston Performance.csv")).unwrap();
    insta::assert_snapshot!(contents, @r"
    DISTRICT,DISTNAME,COUNTY,CNTYNAME,REGION,YEAR,DB00AR01S16R,DH00AR01S16R
    101828,HOUSTON GATEWAY ACADEMY,101,HARRIS,04,2016,820,920
    101912,HOUSTON ISD,101,HARRIS,04,2016,720,620
    ");
}

#[test]
fn failed_report_does_not_stop_the_others() {
    let dir = fixture_dir();
    fs::remove_file(dir.path().join("discipline_region4_2016.csv")).unwrap();
    let config = config_for(&dir);
    let out = dir.path().join("out");
    let mut assembler = ReportAssembler::new(&config);
    let mut sink = CsvSink::new(&out);

    let summary = dispatch(
        &mut assembler,
        "Houston",
        &houston(),
        &mut sink,
        FailureMode::Isolate,
    )
    .unwrap();
    assert_eq!(summary.failure_count(), 1);
    let failed = summary.failures().next().unwrap();
    assert_eq!(failed.kind, ReportKind::Discipline);
    assert!(matches!(failed.error, Some(ReportError::Ingest(_))));
    assert!(out.join("Houston Grades.csv").is_file());
    assert!(!out.join("Houston Discipline.csv").exists());
}

#[test]
fn fail_fast_stops_at_the_first_failure() {
    let dir = fixture_dir();
    fs::remove_file(dir.path().join("DISTPROF_2015.dat")).unwrap();
    let config = config_for(&dir);
    let out = dir.path().join("out");
    let mut assembler = ReportAssembler::new(&config);
    let mut sink = CsvSink::new(&out);

    let err = dispatch(
        &mut assembler,
        "Houston",
        &houston(),
        &mut sink,
        FailureMode::FailFast,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ReportError::Aborted {
            kind: ReportKind::Enrollment,
            ..
        }
    ));
    assert!(err.to_string().contains("DISTPROF_2015.dat"));
    assert!(!out.exists());
}

#[test]
fn legend_describes_enrollment_codes() {
    let dir = fixture_dir();
    let config = config_for(&dir);
    let mut assembler = ReportAssembler::new(&config);

    let legend = assembler.legend(ReportKind::Grades).unwrap();
    assert_eq!(legend.len(), 14);
    assert_eq!(legend[2].code, "DPETG01C");
    assert_eq!(
        legend[2].description.as_deref(),
        Some("Grade 1 Students Count")
    );
    assert_eq!(legend[0].description, None);

    assert!(assembler.legend(ReportKind::Discipline).unwrap().is_empty());
}
