//! TUI application state
//!
//! Wraps a [`Calculator`] with the pieces only the terminal front-end needs:
//! keypad highlighting, a status line and the last rendered area for mouse
//! hit testing.

use memocalc::{Action, Calculator, CalculatorState, DispatchOutcome, Storage};
use ratatui::layout::Rect;

use super::input::InputEvent;
use super::keypad::Keypad;
use super::ui;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp<S: Storage> {
    calc: Calculator<S>,
    keypad: Keypad,
    /// Shown in place of the help line until the next successful write
    status: Option<String>,
    /// Frame area of the last draw
    viewport: Rect,
    should_quit: bool,
}

impl<S: Storage> CalculatorApp<S> {
    #[must_use]
    pub fn new(calc: Calculator<S>) -> Self {
        Self {
            calc,
            keypad: Keypad::new(),
            status: None,
            viewport: Rect::default(),
            should_quit: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        self.calc.state()
    }

    #[must_use]
    pub fn calculator(&self) -> &Calculator<S> {
        &self.calc
    }

    #[must_use]
    pub const fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Records the area the UI was last drawn into
    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
    }

    /// Handles one translated terminal event
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key) => {
                if let Some(action) = Action::from_key(key) {
                    self.dispatch(&action);
                }
            }
            InputEvent::Action(action) => self.dispatch(&action),
            InputEvent::Click { column, row } => {
                let hit = ui::hit_test(
                    self.calc.state().view(),
                    &self.keypad,
                    self.viewport,
                    column,
                    row,
                );
                if let Some(action) = hit {
                    self.dispatch(&action);
                }
            }
            InputEvent::Quit => self.quit(),
            InputEvent::None => {}
        }
    }

    /// Dispatches `action`, highlighting its keypad button
    pub fn dispatch(&mut self, action: &Action) {
        self.keypad.highlight(action);
        match self.calc.dispatch(action) {
            DispatchOutcome::PersistFailed(e) => {
                self.status = Some(format!("Not saved: {e}"));
            }
            DispatchOutcome::Persisted => self.status = None,
            DispatchOutcome::Unchanged => {}
        }
    }
}
