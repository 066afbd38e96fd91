//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The interactive calculator owns the terminal, so it logs to a file.
//! One-shot subcommands log to stderr.
//!
//! # Log Levels
//!
//! - `warn`: storage fallbacks and failed writes
//! - `info`: state loaded at startup
//! - `debug`: every dispatched action

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::Verbosity;
use crate::error::{CliError, CliResult};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

/// Configuration for logging behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level applied to the memocalc crates
    pub level: Level,
    /// ANSI colors (ignored for JSON)
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Log file; stderr when `None`
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    /// Create a `LogConfig` from the CLI verbosity
    #[must_use]
    pub fn from_verbosity(verbosity: Verbosity) -> Self {
        Self {
            level: verbosity.level(),
            ..Self::default()
        }
    }

    /// Route output to `path` as JSON lines, or back to stderr when `None`
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.format = if path.is_some() {
            LogFormat::Json
        } else {
            LogFormat::Compact
        };
        self.with_ansi = path.is_none();
        self.log_file = path;
        self
    }

    /// Filter directives used when `RUST_LOG` is unset
    #[must_use]
    pub fn default_directives(&self) -> String {
        let level = self.level.as_str().to_lowercase();
        format!("warn,memocalc={level},memocalc_cli={level}")
    }
}

/// Installs the global subscriber.
///
/// Opens (and creates the parent of) the log file when one is configured.
pub fn init_logging(config: &LogConfig) -> CliResult<()> {
    if let Some(path) = &config.log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, SharedFileWriter::new(file))
    } else {
        init_logging_with_writer(config, io::stderr)
    }
}

/// Installs the global subscriber with a custom writer
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W) -> CliResult<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directives()));

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(writer))
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_target(false)
                    .with_ansi(config.with_ansi)
                    .with_writer(writer),
            )
            .try_init(),
    };
    installed.map_err(|e| CliError::config(format!("failed to initialize logging: {e}")))
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<File>>,
}

impl SharedFileWriter {
    fn new(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}
