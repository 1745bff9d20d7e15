//! Relational schema normalization CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::error;
use tracing::level_filters::LevelFilter;

use nf_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use nf_cli::commands::{run_check, run_closure, run_decompose, run_keys};
use nf_cli::exit::{self, exit_code};
use nf_cli::logging::{LogConfig, LogFormat, init_logging};
use nf_cli::summary::{
    print_check_report, print_closure_report, print_decompose_summary, print_keys_report,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(exit::FAILURE);
    }
    let result = match &cli.command {
        Command::Decompose(args) => run_decompose(args).map(|result| {
            if result.output.is_none() {
                print!("{}", result.rendered);
            }
            print_decompose_summary(&result);
        }),
        Command::Check(args) => run_check(args).map(|report| print_check_report(&report)),
        Command::Keys(args) => run_keys(args).map(|report| print_keys_report(&report)),
        Command::Closure(args) => run_closure(args).map(|report| print_closure_report(&report)),
    };
    let code = match result {
        Ok(()) => exit::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("error: {err:#}");
            exit_code(&err)
        }
    };
    std::process::exit(code);
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
