//! `memocalc history` - list or clear past calculations

use std::io::Write;

use memocalc::{Action, Calculator, Storage};

use super::ensure_persisted;
use crate::error::CliResult;

/// Prints one `query = result` line per entry, oldest first, or clears the list
pub fn execute_history<S: Storage, W: Write>(storage: S, clear: bool, out: &mut W) -> CliResult<()> {
    let mut calc = Calculator::open(storage);

    if clear {
        let removed = calc.state().history().len();
        ensure_persisted(calc.dispatch(&Action::ClearHistory))?;
        writeln!(out, "Cleared {removed} history entries")?;
        return Ok(());
    }

    if calc.state().history().is_empty() {
        writeln!(out, "No history")?;
        return Ok(());
    }
    for entry in calc.state().history() {
        writeln!(out, "{}", entry.display())?;
    }
    Ok(())
}
