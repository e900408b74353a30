//! CLI argument definitions for admissions quality control.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use qc_cli::config::{DEFAULT_DOCUMENTS_DIR, DEFAULT_INPUT, DEFAULT_REPORTS_DIR};
use qc_model::YearFilter;

#[derive(Parser)]
#[command(
    name = "admissions-qc",
    version,
    about = "Quality control for hospital admissions exports",
    long_about = "Analyze a hospital admissions export for missing values, malformed\n\
                  fields, duplicate identifiers, sequence gaps and cross-field\n\
                  inconsistencies, and export per-patient JSON documents."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Admissions CSV export.
    #[arg(
        long = "input",
        value_name = "PATH",
        env = "QC_INPUT",
        default_value = DEFAULT_INPUT,
        global = true
    )]
    pub input: PathBuf,

    /// Directory for Markdown reports.
    #[arg(
        long = "reports-dir",
        value_name = "DIR",
        env = "QC_REPORTS_DIR",
        default_value = DEFAULT_REPORTS_DIR,
        global = true
    )]
    pub reports_dir: PathBuf,

    /// Directory for exported JSON documents.
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        env = "QC_OUTPUT_DIR",
        default_value = DEFAULT_DOCUMENTS_DIR,
        global = true
    )]
    pub output_dir: PathBuf,

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
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the quality-control analysis and write the Markdown report.
    Check(CheckArgs),

    /// Convert records into JSON documents.
    Export(ExportArgs),

    /// List the known columns and whether the input has them.
    Columns,
}

#[derive(Args)]
pub struct YearArgs {
    /// Restrict to one year (`25`) or an inclusive range (`25-20`).
    #[arg(long = "year", value_name = "YY[-YY]", value_parser = parse_year_filter)]
    pub year: Option<YearFilter>,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub year: YearArgs,

    /// Skip writing the Markdown report.
    #[arg(long = "no-markdown")]
    pub no_markdown: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub year: YearArgs,

    /// Print the first record instead of writing files.
    #[arg(long = "preview")]
    pub preview: bool,
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

fn parse_year_filter(value: &str) -> Result<YearFilter, String> {
    YearFilter::parse(value).map_err(|error| error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_with_year_range() {
        let cli = Cli::try_parse_from(["admissions-qc", "check", "--year", "23-25"]).unwrap();
        let Command::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.year.year, Some(YearFilter::new(25, 23)));
        assert!(!args.no_markdown);
    }

    #[test]
    fn test_malformed_year_is_rejected() {
        assert!(Cli::try_parse_from(["admissions-qc", "check", "--year", "2025"]).is_err());
    }

    #[test]
    fn test_global_paths() {
        let cli = Cli::try_parse_from([
            "admissions-qc",
            "export",
            "--preview",
            "--input",
            "other.csv",
        ])
        .unwrap();
        assert_eq!(cli.input, PathBuf::from("other.csv"));
        assert!(matches!(cli.command, Command::Export(ExportArgs { preview: true, .. })));
    }
}
