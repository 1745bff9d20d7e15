//! CLI argument definitions for the normalization tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "normalform",
    version,
    about = "Relational schema normalization - check and decompose a relation",
    long_about = "Check a relation against 1NF through 5NF and decompose it into 2NF, 3NF, \
                  BCNF or 4NF.\n\n\
                  The relation is read from a CSV file; functional and multi-valued \
                  dependencies are read from text files with one declaration per line."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Decompose a relation into a target normal form and emit the schema.
    Decompose(DecomposeArgs),

    /// Report which normal forms the relation satisfies.
    Check(InputArgs),

    /// List candidate keys and prime attributes.
    Keys(InputArgs),

    /// Compute the closure of an attribute set.
    Closure(ClosureArgs),
}

/// Inputs shared by every command.
#[derive(Args, Clone)]
pub struct InputArgs {
    /// CSV file with a header row; the file stem names the relation.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Functional dependencies, one `A, B -> C` per line.
    #[arg(long = "fds", value_name = "FILE")]
    pub fds: PathBuf,

    /// Multi-valued dependencies, one `A ->> B` per line.
    #[arg(long = "mvds", value_name = "FILE")]
    pub mvds: Option<PathBuf>,

    /// Candidate key to use instead of automatic discovery (repeatable).
    #[arg(long = "key", value_name = "A,B")]
    pub keys: Vec<String>,

    /// TOML file with a `[normalize]` table of options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Character marking a composite value (overrides the config file).
    #[arg(long = "separator", value_name = "CHAR")]
    pub separator: Option<char>,

    /// Attribute bound for automatic key discovery (overrides the config file).
    #[arg(long = "max-key-attributes", value_name = "N")]
    pub max_key_attributes: Option<usize>,
}

#[derive(Args)]
pub struct DecomposeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Target normal form (1NF, 2NF, 3NF, BCNF, 4NF, 5NF).
    #[arg(long = "target", value_name = "FORM")]
    pub target: String,

    /// Write the result to a file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "sql")]
    pub format: OutputFormatArg,

    /// Drop duplicate rows from every projected relation.
    #[arg(long = "dedupe")]
    pub dedupe: bool,
}

#[derive(Args)]
pub struct ClosureArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Attributes to close, comma-separated.
    #[arg(long = "of", value_name = "A,B")]
    pub of: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Sql,
    Json,
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
