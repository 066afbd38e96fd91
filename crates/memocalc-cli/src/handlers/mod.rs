//! Command handlers - extracted from main.rs for testability
//!
//! Handlers borrow a [`memocalc::Storage`] and write to any `io::Write`, so
//! tests drive them with `MemoryStorage` and a `Vec<u8>`.

pub mod eval;
pub mod history;
pub mod memory;

pub use eval::execute_eval;
pub use history::execute_history;
pub use memory::execute_memory;

use memocalc::DispatchOutcome;

use crate::error::{CliError, CliResult};

/// Turns a failed write into a CLI error; one-shot commands have no session to keep alive
pub(crate) fn ensure_persisted(outcome: DispatchOutcome) -> CliResult<()> {
    match outcome {
        DispatchOutcome::PersistFailed(e) => Err(CliError::Storage(e)),
        DispatchOutcome::Unchanged | DispatchOutcome::Persisted => Ok(()),
    }
}
