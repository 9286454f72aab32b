//! CLI argument definitions for `scrub`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "scrub",
    version,
    about = "Clean messy CSV record files",
    long_about = "Clean messy CSV record files.\n\n\
                  Finds name, address, postcode, phone, email and date columns by their\n\
                  labels, normalizes and validates their values, removes duplicate rows\n\
                  and fills missing values. Writes cleaned_<file> copies and a\n\
                  cleaning_log.txt, optionally loading the results into SQLite."
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

    /// Allow cell values in trace logs (they are personal data).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean CSV files and write cleaned copies.
    Clean(CleanArgs),

    /// Show the roles and the column labels recognized for each.
    Roles(RolesArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// CSV files or folders containing CSV files.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory (default: <first input folder>/Cleaned).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Compute days between checkout and return dates.
    ///
    /// `ask` prompts once for the whole batch when stdin is a terminal and
    /// means `no` otherwise.
    #[arg(long = "days-between", value_enum, default_value = "ask")]
    pub days_between: DaysBetweenArg,

    /// TOML configuration file (alias lists, age bounds, reference year).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also load every cleaned table into this SQLite database.
    #[arg(long = "sqlite", value_name = "PATH")]
    pub sqlite: Option<PathBuf>,

    /// Year ages are computed against (default: current year).
    #[arg(long = "reference-year", value_name = "YEAR")]
    pub reference_year: Option<i32>,

    /// Youngest accepted age for birth dates (default: 1).
    #[arg(long = "min-age", value_name = "YEARS")]
    pub min_age: Option<i32>,

    /// Oldest accepted age for birth dates (default: 120).
    #[arg(long = "max-age", value_name = "YEARS")]
    pub max_age: Option<i32>,

    /// Clean and report without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct RolesArgs {
    /// Show the rule table after applying this configuration file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// `--days-between` choices.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DaysBetweenArg {
    Yes,
    No,
    Ask,
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
