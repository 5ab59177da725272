use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info_span, warn};

use tsr_cli::setup::{group_catalog, group_restriction};
use tsr_ingest::CodeCatalog;
use tsr_model::{ReportConfig, ReportKind};
use tsr_output::{CsvSink, ReportSink, SheetsSink};
use tsr_report::{FailureMode, ReportAssembler, dispatch};

use crate::cli::{CodesArgs, ReportArgs, SinkArg};
use crate::summary::apply_table_style;
use crate::types::ReportRun;

pub fn run_report(args: &ReportArgs, config: &ReportConfig) -> Result<ReportRun> {
    let span = info_span!("run", name = %args.name, group = %args.group);
    let _guard = span.enter();

    let restriction = group_restriction(config, &args.group)?;
    let mut sink: Box<dyn ReportSink> = match args.sink {
        SinkArg::Csv => Box::new(CsvSink::new(&args.output_dir)),
        SinkArg::Sheet => Box::new(
            SheetsSink::from_env(config.spreadsheet_id.clone()).context("create spreadsheet sink")?,
        ),
    };
    let mode = if args.fail_fast {
        FailureMode::FailFast
    } else {
        FailureMode::Isolate
    };

    let mut assembler = ReportAssembler::new(config);
    let summary = dispatch(&mut assembler, &args.name, &restriction, sink.as_mut(), mode)?;

    let mut legends = Vec::new();
    if args.legend {
        for kind in [ReportKind::Enrollment, ReportKind::Grades] {
            match assembler.legend(kind) {
                Ok(entries) => legends.push((kind, entries)),
                Err(error) => warn!(report = %kind, %error, "legend unavailable"),
            }
        }
    }

    Ok(ReportRun {
        group: args.group.clone(),
        sink: sink.label(),
        summary,
        legends,
    })
}

pub fn run_groups(config: &ReportConfig) -> Result<()> {
    let catalog = group_catalog(config);
    let mut table = Table::new();
    table.set_header(vec!["Group", "Level", "Members"]);
    apply_table_style(&mut table);
    for group in catalog.iter() {
        let members: Vec<String> = group
            .members
            .iter()
            .map(|(id, label)| format!("{id} {label}"))
            .collect();
        table.add_row(vec![
            group.name.clone(),
            group.level.to_string(),
            members.join("\n"),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_codes(args: &CodesArgs, config: &ReportConfig) -> Result<()> {
    let path = config.resolve(&config.code_catalog);
    let catalog = CodeCatalog::load(&path)
        .with_context(|| format!("load code catalog {}", path.display()))?;
    let pattern = args.pattern.as_deref().map(str::to_lowercase);

    let mut table = Table::new();
    table.set_header(vec!["Code", "Stub", "Label", "Description"]);
    apply_table_style(&mut table);
    let mut shown = 0usize;
    for definition in catalog.definitions() {
        if let Some(pattern) = &pattern {
            let matches = definition.code.to_lowercase().contains(pattern)
                || definition.description.to_lowercase().contains(pattern);
            if !matches {
                continue;
            }
        }
        table.add_row(vec![
            definition.code.clone(),
            definition.stub(),
            definition.label.clone(),
            definition.description.clone(),
        ]);
        shown += 1;
    }
    println!("{table}");
    println!("{shown} of {} definitions", catalog.len());
    if catalog.skipped() > 0 {
        eprintln!("{} malformed entries skipped", catalog.skipped());
    }
    Ok(())
}
