//! CLI argument definitions for xsv-sniff.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use xsv_cli::format::parse_delimiter;
use xsv_ingest::{DEFAULT_CHUNK_SIZE, DEFAULT_LINE_LIMIT};

#[derive(Parser)]
#[command(
    name = "xsv-sniff",
    version,
    about = "Detect delimiter, header and column types of a delimited text file",
    long_about = "Detect the format of a CSV/TSV-like file from its first lines.\n\n\
                  Only a bounded prefix of the file is read, so large files are\n\
                  inspected instantly."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Detect the format of a file.
    Inspect(InspectArgs),

    /// List candidate delimiters in tie-break order.
    Delimiters,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Delimited text file to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Use this delimiter instead of detecting one.
    ///
    /// Accepts a single character or one of: comma, tab, pipe, semicolon,
    /// rs (0x1E), us (0x1F).
    #[arg(long = "delimiter", short = 'd', value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Number of lines to sample, header included.
    #[arg(long = "lines", short = 'n', default_value_t = DEFAULT_LINE_LIMIT)]
    pub lines: usize,

    /// Bytes requested per read.
    #[arg(long = "chunk-size", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
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
