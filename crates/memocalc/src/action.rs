//! Actions and the key-to-action mapping
//!
//! Every input event, whether a keypad button or a key press, becomes exactly
//! one [`Action`]. Keys are described by the front-end neutral [`Key`] so the
//! mapping can be tested without a terminal.

use crate::core::MULTIPLY_TOKEN;

/// A single state transition request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a token to the input (digit, `.`, operator, parenthesis)
    Append(String),
    /// Evaluate the input and record it in history
    Evaluate,
    /// Reset input and result
    ClearAll,
    /// Drop the last input character
    DeleteLast,
    /// Copy the last result into memory (M+)
    SaveMemory,
    /// Append the memory value to the input (MR)
    RecallMemory,
    /// Append minus the memory value to the input (M-)
    SubtractMemory,
    /// Reset memory to zero (MC)
    ClearMemory,
    /// Empty the history list
    ClearHistory,
    /// Open or close the history/memory sidebar
    ToggleSidebar,
    /// Show the history panel
    ShowHistory,
    /// Show the memory panel
    ShowMemory,
    /// Close the sidebar
    CloseSidebar,
}

impl Action {
    /// Shorthand for [`Action::Append`]
    #[must_use]
    pub fn append(token: impl Into<String>) -> Self {
        Self::Append(token.into())
    }

    /// Maps a key to its action, if any.
    ///
    /// One `match` arm per key class, so no two classes can claim the same key.
    #[must_use]
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Char(c @ ('0'..='9' | '.' | '+' | '-' | '/' | '(' | ')')) => {
                Some(Self::Append(c.to_string()))
            }
            Key::Char('*' | 'x' | 'X') => Some(Self::append(MULTIPLY_TOKEN)),
            Key::Char('=') | Key::Enter => Some(Self::Evaluate),
            Key::Backspace | Key::Delete => Some(Self::DeleteLast),
            Key::Escape => Some(Self::ClearAll),
            Key::Tab => Some(Self::ToggleSidebar),
            Key::F(1) => Some(Self::RecallMemory),
            Key::F(2) => Some(Self::SaveMemory),
            Key::F(3) => Some(Self::ClearMemory),
            Key::F(4) => Some(Self::SubtractMemory),
            Key::F(5) => Some(Self::ClearHistory),
            Key::Char(_) | Key::F(_) | Key::Other => None,
        }
    }

    /// Whether this action can change history or memory
    #[must_use]
    pub const fn touches_persisted(&self) -> bool {
        matches!(
            self,
            Self::Evaluate | Self::SaveMemory | Self::ClearMemory | Self::ClearHistory
        )
    }
}

/// A key press, independent of the terminal or GUI layer producing it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character
    Char(char),
    Enter,
    Backspace,
    Delete,
    Escape,
    Tab,
    /// Function key F1..F12
    F(u8),
    /// Anything the calculator does not care about
    Other,
}
