//! Clickable keypad
//!
//! Buttons carry the [`Action`] they dispatch, so a click and the matching
//! key press go through the same path. A button stays highlighted until the
//! next input.
//!
//! ```text
//! [MR] [M+] [M-] [MC]
//! [ C] [ ⌫] [ (] [ )]
//! [ 7] [ 8] [ 9] [ /]
//! [ 4] [ 5] [ 6] [ x]
//! [ 1] [ 2] [ 3] [ -]
//! [ 0] [ .] [ =] [ +]
//! ```

use memocalc::Action;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

const COLS: usize = 4;
const ROWS: usize = 6;

/// Visual group of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Memory,
    Command,
    Digit,
    Operator,
    Equals,
}

impl ButtonKind {
    fn style(self) -> Style {
        match self {
            Self::Memory => Style::default().fg(Color::Magenta),
            Self::Command => Style::default().fg(Color::Red),
            Self::Digit => Style::default().fg(Color::White),
            Self::Operator => Style::default().fg(Color::Yellow),
            Self::Equals => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    pub label: &'static str,
    pub action: Action,
    pub kind: ButtonKind,
    /// Highlighted after the last input
    pub pressed: bool,
}

impl KeypadButton {
    fn new(label: &'static str, action: Action, kind: ButtonKind) -> Self {
        Self {
            label,
            action,
            kind,
            pressed: false,
        }
    }

    fn token(label: &'static str, kind: ButtonKind) -> Self {
        Self::new(label, Action::append(label), kind)
    }
}

/// The 6x4 keypad grid
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Row-major
    buttons: Vec<KeypadButton>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    #[must_use]
    pub fn new() -> Self {
        use ButtonKind::{Command, Digit, Equals, Memory, Operator};

        let buttons = vec![
            KeypadButton::new("MR", Action::RecallMemory, Memory),
            KeypadButton::new("M+", Action::SaveMemory, Memory),
            KeypadButton::new("M-", Action::SubtractMemory, Memory),
            KeypadButton::new("MC", Action::ClearMemory, Memory),
            KeypadButton::new("C", Action::ClearAll, Command),
            KeypadButton::new("⌫", Action::DeleteLast, Command),
            KeypadButton::token("(", Operator),
            KeypadButton::token(")", Operator),
            KeypadButton::token("7", Digit),
            KeypadButton::token("8", Digit),
            KeypadButton::token("9", Digit),
            KeypadButton::token("/", Operator),
            KeypadButton::token("4", Digit),
            KeypadButton::token("5", Digit),
            KeypadButton::token("6", Digit),
            KeypadButton::token("x", Operator),
            KeypadButton::token("1", Digit),
            KeypadButton::token("2", Digit),
            KeypadButton::token("3", Digit),
            KeypadButton::token("-", Operator),
            KeypadButton::token("0", Digit),
            KeypadButton::token(".", Digit),
            KeypadButton::new("=", Action::Evaluate, Equals),
            KeypadButton::token("+", Operator),
        ];

        Self { buttons }
    }

    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (ROWS, COLS)
    }

    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < ROWS && col < COLS {
            self.buttons.get(row * COLS + col)
        } else {
            None
        }
    }

    /// Index of the button dispatching `action`
    #[must_use]
    pub fn find_button(&self, action: &Action) -> Option<usize> {
        self.buttons.iter().position(|b| &b.action == action)
    }

    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.pressed = false;
        }
    }

    /// Highlights the button for `action`, if the keypad has one
    pub fn highlight(&mut self, action: &Action) {
        self.release_all();
        if let Some(idx) = self.find_button(action) {
            self.buttons[idx].pressed = true;
        }
    }

    /// Currently highlighted button
    #[must_use]
    pub fn pressed(&self) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.pressed)
    }

    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.buttons
            .iter()
            .enumerate()
            .map(|(i, btn)| ((i / COLS, i % COLS), btn))
    }

    /// Button under a click, for a keypad rendered into `area` (border included)
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<&KeypadButton> {
        let inner = inner_area(area);
        if x < inner.x || y < inner.y || x >= inner.right() || y >= inner.bottom() {
            return None;
        }

        let (btn_width, btn_height) = button_size(inner);
        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = ((x - inner.x) / btn_width) as usize;
        let row = ((y - inner.y) / btn_height) as usize;
        self.get_button_at(row, col)
    }
}

fn inner_area(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn button_size(inner: Rect) -> (u16, u16) {
    (inner.width / COLS as u16, inner.height / ROWS as u16)
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    #[must_use]
    pub const fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = inner_area(area);
        let (btn_width, btn_height) = button_size(inner);
        if btn_width < 4 || btn_height == 0 {
            return;
        }

        for ((row, col), btn) in self.keypad.buttons_with_positions() {
            let x = inner.x + col as u16 * btn_width;
            let y = inner.y + row as u16 * btn_height + btn_height / 2;

            let style = if btn.pressed {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                btn.kind.style()
            };

            let label = format!("[{:>2}]", btn.label);
            let label_width = label.chars().count() as u16;
            let label_x = x + btn_width.saturating_sub(label_width) / 2;
            buf.set_span(label_x, y, &Span::styled(label, style), btn_width);
        }
    }
}
