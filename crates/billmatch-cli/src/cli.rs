//! CLI argument definitions for the bill matcher.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "billmatch",
    version,
    about = "Match incoming bills against a name/address database",
    long_about = "Match incoming bill records against a reference database of names and addresses.\n\n\
                  Candidates are narrowed by shared tokens and ranked by an ensemble of\n\
                  fuzzy string similarity scores. Large databases are partitioned by zip prefix."
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

    /// Include names and addresses in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match an incoming CSV against a database CSV and write the results.
    Match(MatchArgs),

    /// Print the similarity scores of two strings.
    Score(ScoreArgs),
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Reference database CSV with Name, Address, City, Zip and State columns.
    #[arg(value_name = "DATABASE_CSV")]
    pub database: PathBuf,

    /// Incoming bills CSV with the same columns.
    #[arg(value_name = "INCOMING_CSV")]
    pub incoming: PathBuf,

    /// Results CSV path (default: matches.csv next to the incoming file).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Score every database row instead of only those sharing the most tokens.
    ///
    /// Slower, but never drops the best match because of abbreviations or
    /// misspellings that break shared tokens.
    #[arg(long = "no-token-reduction")]
    pub no_token_reduction: bool,

    /// Number of leading zip digits that must agree before rows are compared.
    #[arg(
        long = "partition-digits",
        value_name = "N",
        default_value_t = 3,
        value_parser = clap::value_parser!(u8).range(1..=9),
        conflicts_with = "no_partition"
    )]
    pub partition_digits: u8,

    /// Compare every incoming row with the whole database.
    #[arg(long = "no-partition")]
    pub no_partition: bool,

    /// What to do with an incoming row that has no candidate records.
    #[arg(long = "on-empty-candidates", value_enum, default_value = "unmatched")]
    pub on_empty_candidates: EmptyCandidatesArg,

    /// Build the Name_Address column from Name and Address when it is missing.
    #[arg(long = "derive-name-address")]
    pub derive_name_address: bool,
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// First string.
    pub left: String,

    /// Second string.
    pub right: String,

    /// Print the scores as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI empty candidate set policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EmptyCandidatesArg {
    /// Emit the row with blank match fields.
    Unmatched,
    /// Abort the run.
    Fail,
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
