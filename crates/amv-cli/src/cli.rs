//! CLI argument definitions for the Author Match Verifier.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use amv_model::ComparisonPair;
use amv_oracle::{DEFAULT_BASE_URL, DEFAULT_MODEL};

#[derive(Parser)]
#[command(
    name = "amv",
    version,
    about = "Author Match Verifier - surname canonicalization and match adjudication",
    long_about = "Build a canonical set of romanized Chinese surnames from a saved\n\
                  reference-page snapshot, and adjudicate disagreeing name pairs in a\n\
                  match-result table through a schema-constrained semantic oracle."
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
    /// Build the canonical romanized surname set from a page snapshot.
    Surnames(SurnamesArgs),

    /// Adjudicate disagreeing name pairs in a match-result table.
    Verify(VerifyArgs),
}

#[derive(Parser)]
pub struct SurnamesArgs {
    /// Path to the saved reference-page snapshot.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Output file for the canonical set (default: surnames.json next to
    /// the snapshot).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct VerifyArgs {
    /// Match-result CSV file to adjudicate.
    #[arg(value_name = "INPUT_CSV")]
    pub input: PathBuf,

    /// Column pair to compare for disagreement, as LEFT=RIGHT. Repeatable.
    #[arg(
        long = "pair",
        value_name = "LEFT=RIGHT",
        default_value = "author_name=csv_author_name"
    )]
    pub pairs: Vec<ComparisonPair>,

    /// Oracle model name.
    #[arg(long = "model", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Oracle endpoint base URL.
    #[arg(long = "base-url", value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Select and report mismatches without consulting the oracle or
    /// writing output.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
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
