//! Terminal front-end

mod app;
mod input;
mod keypad;
pub mod ui;

pub use app::CalculatorApp;
pub use input::{InputEvent, InputHandler};
pub use keypad::{ButtonKind, Keypad, KeypadButton, KeypadWidget};
pub use ui::{render, CalculatorUi};
