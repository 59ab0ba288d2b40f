//! CLI argument definitions for osm-clean.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "osm-clean",
    version,
    about = "Clean an OpenStreetMap extract into CSV tables",
    long_about = "Clean an OpenStreetMap XML extract into CSV tables.\n\n\
                  Streets, cities, states, postcodes, phones, emails and websites are\n\
                  normalized; unfixable values are dropped and every correction is audited.\n\
                  Writes nodes, nodes_tags, ways, ways_nodes and ways_tags."
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
    /// Clean an extract and write the CSV tables.
    Process(ProcessArgs),

    /// Compare an extract with the CSV tables written from it.
    Reconcile(ReconcileArgs),

    /// List the tag keys that are cleaned and their field kinds.
    Fields,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// OSM XML extract to clean.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory for the CSV tables (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip schema validation of each record.
    #[arg(long = "no-validate")]
    pub no_validate: bool,

    /// Clean and report without writing CSV tables.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write the audit ledger as JSON.
    #[arg(long = "ledger-json", value_name = "PATH")]
    pub ledger_json: Option<PathBuf>,

    /// TOML configuration file (output file names, validation default).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the per-field fixes and issues report after the summary.
    #[arg(long = "details")]
    pub details: bool,
}

#[derive(Parser)]
pub struct ReconcileArgs {
    /// OSM XML extract the tables were written from.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory holding the CSV tables (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML configuration file (output file names).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
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
