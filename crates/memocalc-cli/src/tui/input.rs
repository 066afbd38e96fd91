//! Terminal event translation
//!
//! crossterm events become [`InputEvent`]s. Calculator keys are forwarded as
//! [`memocalc::Key`] so the key-to-action table stays in the core crate.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use memocalc::{Action, Key};

/// What the application should do with one terminal event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A calculator key, mapped through [`Action::from_key`]
    Key(Key),
    /// A view action with no calculator key
    Action(Action),
    /// Left click at a terminal cell
    Click {
        /// Column
        column: u16,
        /// Row
        row: u16,
    },
    /// Leave the application
    Quit,
    /// Ignored event
    None,
}

/// Maps crossterm events to input events
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Maps any terminal event
    #[must_use]
    pub fn handle_event(&self, event: &Event) -> InputEvent {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            _ => InputEvent::None,
        }
    }

    /// Maps a key event; releases and repeats of non-press kinds are ignored
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> InputEvent {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return InputEvent::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => InputEvent::Quit,
                _ => InputEvent::None,
            };
        }

        match code {
            KeyCode::Char(c) => InputEvent::Key(Key::Char(c)),
            KeyCode::Enter => InputEvent::Key(Key::Enter),
            KeyCode::Backspace => InputEvent::Key(Key::Backspace),
            KeyCode::Delete => InputEvent::Key(Key::Delete),
            KeyCode::Esc => InputEvent::Key(Key::Escape),
            KeyCode::Tab => InputEvent::Key(Key::Tab),
            KeyCode::F(n) => InputEvent::Key(Key::F(n)),
            KeyCode::Left => InputEvent::Action(Action::ShowHistory),
            KeyCode::Right => InputEvent::Action(Action::ShowMemory),
            _ => InputEvent::Key(Key::Other),
        }
    }

    /// Maps a mouse event; only left-button presses count
    #[must_use]
    pub fn handle_mouse(&self, event: MouseEvent) -> InputEvent {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => InputEvent::Click {
                column: event.column,
                row: event.row,
            },
            _ => InputEvent::None,
        }
    }
}
