//! CLI argument definitions for the survey bridge builder.

use std::path::PathBuf;

use bridge_model::options::{FIRST_SURVEY_YEAR, LAST_SURVEY_YEAR};
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "survey-bridge",
    version,
    about = "Build stable cross-year identifiers for survey variables",
    long_about = "Harmonize per-year survey variable metadata into cross-year bridges.\n\n\
                  Combines the base variable exports with question wording and the\n\
                  agency comparability crosswalk, then assigns every variable-year a\n\
                  `cross_year_narrow` id shared by all records measuring the same concept."
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
    /// Build the bridge table from the source exports.
    Build(BuildArgs),

    /// List the classifier pattern tables in priority order.
    Patterns,
}

#[derive(Parser)]
pub struct BuildArgs {
    /// Base variable metadata: a CSV file or a directory of yearly CSV exports.
    #[arg(value_name = "METADATA")]
    pub metadata: PathBuf,

    /// Question wording JSON keyed by year, then variable name.
    #[arg(long = "questions", value_name = "FILE")]
    pub questions: Option<PathBuf>,

    /// Directory (or single file) of crosswalk CSV exports.
    #[arg(long = "concordance", value_name = "PATH")]
    pub concordance: Option<PathBuf>,

    /// Bridge table output path.
    #[arg(long = "output", value_name = "FILE", default_value = "variable_bridge.csv")]
    pub output: PathBuf,

    /// Also write the run report as JSON.
    #[arg(long = "report", value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// How confirmed groups merge heuristic keys.
    #[arg(long = "expansion", value_enum, default_value = "first-claim")]
    pub expansion: ExpansionArg,

    /// What a confirmed id is scoped to.
    ///
    /// `variable` keeps the variable name in the id, so renamed variables
    /// stay apart; `group` links every variable of a crosswalk group.
    #[arg(long = "confirmed-scope", value_enum, default_value = "variable")]
    pub confirmed_scope: ConfirmedScopeArg,

    /// First accepted survey year.
    #[arg(long = "first-year", value_name = "YEAR", default_value_t = FIRST_SURVEY_YEAR)]
    pub first_year: i32,

    /// Last accepted survey year.
    #[arg(long = "last-year", value_name = "YEAR", default_value_t = LAST_SURVEY_YEAR)]
    pub last_year: i32,

    /// Harmonize and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExpansionArg {
    FirstClaim,
    Transitive,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ConfirmedScopeArg {
    Variable,
    Group,
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
