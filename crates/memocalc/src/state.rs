//! The calculator state record and its transitions.
//!
//! [`CalculatorState::apply`] is pure: it takes the current record and an
//! action and returns the next record. Persistence and logging live one
//! level up in [`crate::Calculator`].

use crate::action::Action;
use crate::core::evaluator::evaluate_str;
use crate::core::format_number;
use crate::core::history::{History, HistoryEntry};

/// Sentinel input shown after a failed evaluation
pub const ERROR_MARKER: &str = "Error";

/// Input shown on a fresh or cleared display
pub const INITIAL_INPUT: &str = "0";

/// Which sidebar panel is selected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    History,
    Memory,
}

/// Visibility of the sidebar and its panels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Sidebar replaces the keypad while open
    pub sidebar_open: bool,
    /// Panel shown inside the sidebar
    pub panel: Panel,
}

/// Complete calculator state
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    input: String,
    result: f64,
    history: History,
    memory: f64,
    view: ViewState,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new(History::new(), 0.0)
    }
}

impl CalculatorState {
    /// Fresh state seeded with persisted history and memory
    #[must_use]
    pub fn new(history: History, memory: f64) -> Self {
        Self {
            input: INITIAL_INPUT.to_string(),
            result: 0.0,
            history,
            memory,
            view: ViewState::default(),
        }
    }

    /// Current expression text; never empty
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Value of the last successful evaluation
    #[must_use]
    pub fn result(&self) -> f64 {
        self.result
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn memory(&self) -> f64 {
        self.memory
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view
    }

    /// True while the display shows the error marker
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.input == ERROR_MARKER
    }

    /// Returns the state that follows `action`
    #[must_use]
    pub fn apply(&self, action: &Action) -> Self {
        match action {
            Action::Append(token) => self.with_input(self.appended(token)),
            Action::Evaluate => self.evaluated(),
            Action::ClearAll => Self {
                input: INITIAL_INPUT.to_string(),
                result: 0.0,
                ..self.clone()
            },
            Action::DeleteLast => self.with_input(self.deleted_last()),
            Action::SaveMemory => Self {
                memory: self.result,
                ..self.clone()
            },
            Action::RecallMemory => self.with_input(self.appended(&format_number(self.memory))),
            Action::SubtractMemory => {
                let token = format!("-{}", format_number(self.memory));
                self.with_input(self.appended(&token))
            }
            Action::ClearMemory => Self {
                memory: 0.0,
                ..self.clone()
            },
            Action::ClearHistory => Self {
                history: History::new(),
                ..self.clone()
            },
            Action::ToggleSidebar => self.with_view(ViewState {
                sidebar_open: !self.view.sidebar_open,
                panel: Panel::History,
            }),
            Action::ShowHistory => self.with_view(ViewState {
                sidebar_open: true,
                panel: Panel::History,
            }),
            Action::ShowMemory => self.with_view(ViewState {
                sidebar_open: true,
                panel: Panel::Memory,
            }),
            Action::CloseSidebar => self.with_view(ViewState {
                sidebar_open: false,
                panel: Panel::History,
            }),
        }
    }

    fn with_input(&self, input: String) -> Self {
        Self {
            input,
            ..self.clone()
        }
    }

    fn with_view(&self, view: ViewState) -> Self {
        Self {
            view,
            ..self.clone()
        }
    }

    fn appended(&self, token: &str) -> String {
        if token.is_empty() {
            return self.input.clone();
        }
        if self.input == INITIAL_INPUT || self.is_error() {
            token.to_string()
        } else {
            format!("{}{token}", self.input)
        }
    }

    fn deleted_last(&self) -> String {
        if self.is_error() {
            return INITIAL_INPUT.to_string();
        }
        let mut input = self.input.clone();
        input.pop();
        if input.is_empty() {
            INITIAL_INPUT.to_string()
        } else {
            input
        }
    }

    fn evaluated(&self) -> Self {
        match evaluate_str(&self.input) {
            Ok(value) => Self {
                input: format_number(value),
                result: value,
                history: self
                    .history
                    .with_entry(HistoryEntry::new(self.input.clone(), value)),
                ..self.clone()
            },
            Err(_) => self.with_input(ERROR_MARKER.to_string()),
        }
    }
}
