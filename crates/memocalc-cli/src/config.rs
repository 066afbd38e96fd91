//! CLI configuration

use std::path::{Path, PathBuf};

use memocalc::{FileStorage, MemoryStorage, Storage};

use crate::commands::Cli;
use crate::error::{CliError, CliResult};

/// Directory name used under the platform data directory
pub const APP_DIR_NAME: &str = "memocalc";

/// Log file name used by the TUI when no `--log-file` is given
pub const DEFAULT_LOG_FILE: &str = "memocalc.log";

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Normal - warnings and errors
    #[default]
    Normal,
    /// Verbose - informational messages
    Verbose,
    /// Debug - every dispatched action
    Debug,
}

impl Verbosity {
    #[must_use]
    pub const fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Level directive for the tracing filter
    #[must_use]
    pub const fn level(self) -> tracing::Level {
        match self {
            Self::Normal => tracing::Level::WARN,
            Self::Verbose => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
        }
    }
}

/// Where history and memory live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    /// JSON files in a directory
    Directory(PathBuf),
    /// Process memory only
    Ephemeral,
}

/// Resolved CLI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Storage backend
    pub storage: StorageLocation,
    /// Explicit log file, if any
    pub log_file: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            storage: StorageLocation::Ephemeral,
            log_file: None,
        }
    }
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves parsed arguments, falling back to the platform data directory
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        Self::resolve(cli, dirs::data_dir())
    }

    /// Resolution with an injectable platform directory
    pub fn resolve(cli: &Cli, platform_data_dir: Option<PathBuf>) -> CliResult<Self> {
        let storage = if cli.ephemeral {
            StorageLocation::Ephemeral
        } else if let Some(dir) = &cli.data_dir {
            StorageLocation::Directory(dir.clone())
        } else {
            let base = platform_data_dir.ok_or_else(|| {
                CliError::config("no platform data directory; pass --data-dir or --ephemeral")
            })?;
            StorageLocation::Directory(base.join(APP_DIR_NAME))
        };

        Ok(Self {
            verbosity: Verbosity::from_count(cli.verbose),
            storage,
            log_file: cli.log_file.clone(),
        })
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set storage location
    #[must_use]
    pub fn with_storage(mut self, storage: StorageLocation) -> Self {
        self.storage = storage;
        self
    }

    /// Data directory, when storage is file-backed
    #[must_use]
    pub fn data_dir(&self) -> Option<&Path> {
        match &self.storage {
            StorageLocation::Directory(dir) => Some(dir),
            StorageLocation::Ephemeral => None,
        }
    }

    /// Log file for the TUI: explicit path, else one inside the data directory
    #[must_use]
    pub fn tui_log_file(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| self.data_dir().map(|dir| dir.join(DEFAULT_LOG_FILE)))
    }

    /// Opens the configured storage backend
    #[must_use]
    pub fn open_storage(&self) -> Box<dyn Storage> {
        match &self.storage {
            StorageLocation::Directory(dir) => Box::new(FileStorage::new(dir)),
            StorageLocation::Ephemeral => Box::new(MemoryStorage::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["memocalc"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_verbosity_from_count() {
        assert_eq!(Verbosity::from_count(0), Verbosity::Normal);
        assert_eq!(Verbosity::from_count(1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_count(5), Verbosity::Debug);
        assert_eq!(Verbosity::Debug.level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_resolve_explicit_data_dir() {
        let config = CliConfig::resolve(&parse(&["--data-dir", "/srv/calc"]), None).unwrap();
        assert_eq!(
            config.storage,
            StorageLocation::Directory(PathBuf::from("/srv/calc"))
        );
        assert_eq!(
            config.tui_log_file(),
            Some(PathBuf::from("/srv/calc/memocalc.log"))
        );
    }

    #[test]
    fn test_resolve_platform_default() {
        let cli = Cli {
            data_dir: None,
            ..parse(&[])
        };
        let config = CliConfig::resolve(&cli, Some(PathBuf::from("/home/u/.local/share"))).unwrap();
        assert_eq!(
            config.data_dir(),
            Some(Path::new("/home/u/.local/share/memocalc"))
        );
    }

    #[test]
    fn test_resolve_without_any_directory_fails() {
        let cli = Cli {
            data_dir: None,
            ..parse(&[])
        };
        let err = CliConfig::resolve(&cli, None).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_resolve_ephemeral_wins() {
        let config =
            CliConfig::resolve(&parse(&["--ephemeral", "--data-dir", "/x"]), None).unwrap();
        assert_eq!(config.storage, StorageLocation::Ephemeral);
        assert_eq!(config.data_dir(), None);
        assert_eq!(config.tui_log_file(), None);
    }

    #[test]
    fn test_explicit_log_file_wins() {
        let config = CliConfig::resolve(
            &parse(&["--data-dir", "/d", "--log-file", "/tmp/calc.log"]),
            None,
        )
        .unwrap();
        assert_eq!(config.tui_log_file(), Some(PathBuf::from("/tmp/calc.log")));
    }

    #[test]
    fn test_builders() {
        let config = CliConfig::new()
            .with_verbosity(Verbosity::Verbose)
            .with_storage(StorageLocation::Directory("/d".into()));
        assert_eq!(config.verbosity, Verbosity::Verbose);
        assert_eq!(config.data_dir(), Some(Path::new("/d")));
    }

    #[test]
    fn test_open_ephemeral_storage_starts_empty() {
        let storage = CliConfig::new().open_storage();
        assert_eq!(storage.get("history").unwrap(), None);
    }
}
