//! Logging setup for the `fieldmap` CLI using `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: failures that end the command
//! - `warn`: skipped inputs, ignored history files
//! - `info`: loaded inputs, session summaries, recorded mappings
//! - `debug`: per-field ranking details
//! - `trace`: individual candidates
//!
//! Context text next to a field is read from filled documents and may carry
//! patient data, so it goes through [`redact_value`] before reaching a log
//! line unless `--log-data` is given.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, format::FmtSpan, writer::BoxMakeWriter};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder logged instead of document values.
pub const REDACTED_VALUE: &str = "[REDACTED]";

const WORKSPACE_CRATES: &[&str] = &[
    "fieldmap",
    "fieldmap_cli",
    "fieldmap_map",
    "fieldmap_model",
    "fieldmap_standards",
];

/// Returns true if document values may be logged.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the value when `--log-data` is on, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

/// Logging options resolved from the command line.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Maximum level for workspace crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` replace `level_filter` when it is set.
    pub use_env_filter: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Log file, appended to; stderr when `None`.
    pub log_file: Option<PathBuf>,
    /// Whether document values may be logged.
    pub log_data: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    /// JSON lines with span close events.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let writer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);

    let layer = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .without_time()
            .with_target(false)
            .with_ansi(config.with_ansi)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .without_time()
            .with_target(false)
            .with_ansi(config.with_ansi)
            .with_writer(writer)
            .boxed(),
    };
    tracing_subscriber::registry()
        .with(build_env_filter(config))
        .with(layer)
        .init();
    Ok(())
}

/// Workspace crates at the configured level, everything else at `warn`.
fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    let external = LevelFilter::WARN.min(level_filter).to_string().to_lowercase();
    let mut directives = vec![external];
    directives.extend(WORKSPACE_CRATES.iter().map(|name| format!("{name}={level}")));
    directives.join(",")
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let directives = default_directives(config.level_filter);
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives))
    } else {
        EnvFilter::new(directives)
    }
}
