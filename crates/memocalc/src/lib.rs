//! memocalc: calculator core with history, a memory register and persistence
//!
//! The crate is split into a pure state machine and a thin owner around it:
//!
//! - [`CalculatorState::apply`] maps `(state, action)` to the next state.
//! - [`Calculator`] owns the current state plus a [`Storage`], dispatches
//!   actions and writes history/memory back whenever either changes.
//! - [`Action::from_key`] is the single key-to-action table.
//!
//! # Example
//!
//! ```rust
//! use memocalc::prelude::*;
//!
//! let mut calc = Calculator::open(MemoryStorage::new());
//! for key in ['2', '+', '3', '='] {
//!     calc.press(Key::Char(key));
//! }
//! assert_eq!(calc.state().input(), "5");
//! assert_eq!(calc.state().history().len(), 1);
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
#![deny(missing_debug_implementations)]

pub mod action;
pub mod core;
pub mod state;
pub mod storage;

use tracing::{debug, info, warn};

pub use action::{Action, Key};
pub use crate::core::{format_number, CalcError, CalcResult};
pub use state::{CalculatorState, Panel, ViewState, ERROR_MARKER};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageResult};

/// What a dispatch did beyond replacing the state
#[derive(Debug)]
pub enum DispatchOutcome {
    /// History and memory were unchanged; nothing written
    Unchanged,
    /// History or memory changed and both were written
    Persisted,
    /// History or memory changed but the write failed; the session continues
    PersistFailed(StorageError),
}

impl DispatchOutcome {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::PersistFailed(_))
    }
}

/// Calculator state bound to a storage backend
#[derive(Debug)]
pub struct Calculator<S: Storage> {
    state: CalculatorState,
    storage: S,
}

impl<S: Storage> Calculator<S> {
    /// Loads persisted history and memory from `storage` and starts a session
    pub fn open(storage: S) -> Self {
        let snapshot = storage::load_snapshot(&storage);
        info!(
            history = snapshot.history.len(),
            memory = snapshot.memory,
            "loaded calculator state"
        );
        Self {
            state: CalculatorState::new(snapshot.history, snapshot.memory),
            storage,
        }
    }

    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Hands the storage back, ending the session
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Applies `action`, persisting history and memory if either changed
    pub fn dispatch(&mut self, action: &Action) -> DispatchOutcome {
        let next = self.state.apply(action);
        debug!(?action, input = next.input(), "dispatched");
        if next.is_error() && !self.state.is_error() {
            debug!(query = self.state.input(), "evaluation failed");
        }

        let changed = action.touches_persisted()
            && (next.history() != self.state.history() || next.memory() != self.state.memory());
        self.state = next;

        if !changed {
            return DispatchOutcome::Unchanged;
        }
        self.flush()
    }

    /// Maps `key` through [`Action::from_key`] and dispatches it
    pub fn press(&mut self, key: Key) -> Option<DispatchOutcome> {
        Action::from_key(key).map(|action| self.dispatch(&action))
    }

    /// Writes history and memory unconditionally
    pub fn flush(&mut self) -> DispatchOutcome {
        match storage::save_snapshot(
            &mut self.storage,
            self.state.history(),
            self.state.memory(),
        ) {
            Ok(()) => DispatchOutcome::Persisted,
            Err(e) => {
                warn!(error = %e, "failed to persist calculator state");
                DispatchOutcome::PersistFailed(e)
            }
        }
    }
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::action::{Action, Key};
    pub use crate::core::evaluator::evaluate_str;
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{format_number, CalcError, CalcResult, Operation};
    pub use crate::state::{CalculatorState, Panel, ViewState, ERROR_MARKER};
    pub use crate::storage::{FileStorage, MemoryStorage, Storage, StorageError};
    pub use crate::{Calculator, DispatchOutcome};
}
