use tsr_model::ReportKind;
use tsr_report::{LegendEntry, RunSummary};

#[derive(Debug)]
pub struct ReportRun {
    pub group: String,
    pub sink: &'static str,
    pub summary: RunSummary,
    pub legends: Vec<(ReportKind, Vec<LegendEntry>)>,
}
