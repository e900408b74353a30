//! Admissions quality-control CLI.

use std::io::{self, IsTerminal};

use chrono::Local;
use clap::{ColorChoice, Parser};
use qc_cli::commands::{run_check, run_columns, run_export};
use qc_cli::config::QcConfig;
use qc_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let config = QcConfig::default()
        .with_input(cli.input.clone())
        .with_reports_dir(cli.reports_dir.clone())
        .with_documents_dir(cli.output_dir.clone())
        .with_styled_tables(match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        });
    let stdout = io::stdout();

    let exit_code = match cli.command {
        Command::Check(args) => {
            let config = config
                .with_year_filter(args.year.year)
                .with_markdown(!args.no_markdown);
            match run_check(&config, Local::now().naive_local(), stdout.lock()) {
                Ok(outcome) => outcome.exit_code(),
                Err(error) => {
                    tracing::error!("quality control failed: {error:#}");
                    eprintln!("❌ Quality control failed: {error:#}");
                    1
                }
            }
        }
        Command::Export(args) => {
            let config = config.with_year_filter(args.year.year);
            match run_export(&config, args.preview, stdout.lock()) {
                Ok(outcome) => outcome.exit_code(),
                Err(error) => {
                    eprintln!("❌ Export failed: {error:#}");
                    1
                }
            }
        }
        Command::Columns => match run_columns(&config, stdout.lock()) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
