//! CLI argument definitions for `fieldmap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "fieldmap",
    version,
    about = "Map document form fields onto canonical data fields",
    long_about = "Suggest canonical targets for fields extracted from insurance \
                  verification, order and shipping documents.\n\n\
                  Suggestions combine name patterns, token similarity, document-type \
                  context and previously accepted mappings."
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

    /// Allow context text from filled documents to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Directory with catalog.toml, patterns.toml and context.toml
    /// (default: FIELDMAP_STANDARDS_DIR, else the built-in tables).
    #[arg(long = "standards-dir", value_name = "DIR", global = true)]
    pub standards_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Suggest canonical targets for the fields of one document.
    Suggest(SuggestArgs),

    /// Accept a target for one field and record it in the history store.
    Accept(AcceptArgs),

    /// List or search the canonical field catalog.
    Catalog(CatalogArgs),

    /// Print a JSON report of the loaded standards tables.
    Doctor,
}

/// Arguments shared by commands that run a mapping session.
#[derive(Args)]
pub struct SessionArgs {
    /// Extracted fields as a JSON array or CSV (name,label,context,page,top).
    #[arg(value_name = "FIELDS")]
    pub fields: PathBuf,

    /// Document type, e.g. ivr, order_form, shipping_label.
    #[arg(long = "document-type", value_name = "TYPE")]
    pub document_type: String,

    /// Manufacturer whose history is consulted.
    #[arg(long = "manufacturer", value_name = "ID")]
    pub manufacturer: String,

    /// Template identifier (default: the FIELDS file stem).
    #[arg(long = "template", value_name = "ID")]
    pub template: Option<String>,

    /// Minimum confidence a suggestion must reach.
    #[arg(long = "min-confidence", value_name = "X", default_value_t = 0.5)]
    pub min_confidence: f32,

    /// Maximum suggestions per field.
    #[arg(long = "max-results", value_name = "N", default_value_t = 5)]
    pub max_results: usize,
}

#[derive(Args)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// History store directory.
    #[arg(long = "history-dir", value_name = "DIR")]
    pub history_dir: Option<PathBuf>,

    /// Field names that already have a mapping and are skipped.
    #[arg(long = "already-mapped", value_name = "NAMES", value_delimiter = ',')]
    pub already_mapped: Vec<String>,

    /// Record every top suggestion at high confidence in the history store.
    #[arg(long = "auto-accept", requires = "history_dir")]
    pub auto_accept: bool,

    /// Output format for the suggestions.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputFormatArg,
}

#[derive(Args)]
pub struct AcceptArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// History store directory the accepted mapping is appended to.
    #[arg(long = "history-dir", value_name = "DIR")]
    pub history_dir: PathBuf,

    /// Field to accept a target for.
    #[arg(long = "field", value_name = "NAME")]
    pub field: String,

    /// Canonical field key to accept.
    #[arg(long = "target", value_name = "KEY")]
    pub target: String,

    /// Record the target even when it was not suggested.
    #[arg(long = "manual")]
    pub manual: bool,
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Fuzzy search over keys and labels.
    #[arg(long = "search", value_name = "QUERY")]
    pub search: Option<String>,

    /// Maximum search results.
    #[arg(long = "limit", value_name = "N", default_value_t = 10)]
    pub limit: usize,
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
