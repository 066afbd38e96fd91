//! memocalc CLI library
//!
//! Argument parsing, configuration, logging and the terminal front-end for the
//! `memocalc` binary. The calculator itself lives in the `memocalc` crate.
//!
//! ## Usage
//!
//! ```bash
//! memocalc                    # Interactive calculator
//! memocalc eval "2+3x4"       # One-shot evaluation, recorded in history
//! memocalc history --clear    # Forget past calculations
//! memocalc memory             # Print the memory register
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
pub mod tui;

pub use commands::{ClearArgs, Cli, Commands, EvalArgs};
pub use config::{CliConfig, StorageLocation, Verbosity, APP_DIR_NAME, DEFAULT_LOG_FILE};
pub use error::{CliError, CliResult};
pub use logging::{init_logging, LogConfig, LogFormat};
