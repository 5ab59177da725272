//! CLI argument definitions for the report generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tsr",
    version,
    about = "School district reports - enrollment, grades, performance and discipline",
    long_about = "Build the four standard school district reports for a named\n\
                  group of counties or districts.\n\n\
                  Reports are written as CSV files or to the tabs of a spreadsheet."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (TOML). Built-in defaults apply without one.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory source files are read from (overrides the config file and TSR_DATA_DIR).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the standard reports for a subdivision group.
    Report(ReportArgs),

    /// List the known subdivision groups.
    Groups,

    /// Show the field-code catalog.
    Codes(CodesArgs),
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Report name, used as the output file prefix (e.g. "Houston").
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Subdivision group to report on (see `tsr groups`).
    #[arg(value_name = "GROUP")]
    pub group: String,

    /// Where reports are written.
    #[arg(long = "sink", value_enum, default_value = "csv")]
    pub sink: SinkArg,

    /// Output directory for CSV reports.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Stop at the first failed report instead of producing the rest.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Print the catalog descriptions of the enrollment and grades columns.
    #[arg(long = "legend")]
    pub legend: bool,
}

#[derive(Parser)]
pub struct CodesArgs {
    /// Only show codes or descriptions containing this text (case-insensitive).
    #[arg(value_name = "PATTERN")]
    pub pattern: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SinkArg {
    /// One CSV file per report.
    Csv,
    /// One spreadsheet tab per report.
    Sheet,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
