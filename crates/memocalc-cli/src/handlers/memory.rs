//! `memocalc memory` - show or reset the memory register

use std::io::Write;

use memocalc::{format_number, Action, Calculator, Storage};

use super::ensure_persisted;
use crate::error::CliResult;

pub fn execute_memory<S: Storage, W: Write>(storage: S, clear: bool, out: &mut W) -> CliResult<()> {
    let mut calc = Calculator::open(storage);

    if clear {
        ensure_persisted(calc.dispatch(&Action::ClearMemory))?;
        writeln!(out, "Memory cleared")?;
    } else {
        writeln!(out, "{}", format_number(calc.state().memory()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use memocalc::storage::MEMORY_KEY;
    use memocalc::MemoryStorage;

    fn run(storage: &mut MemoryStorage, clear: bool) -> String {
        let mut out = Vec::new();
        execute_memory(storage, clear, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_memory_defaults_to_zero() {
        assert_eq!(run(&mut MemoryStorage::new(), false), "0\n");
    }

    #[test]
    fn test_memory_shows_stored_value() {
        let mut storage = MemoryStorage::new().with_entry(MEMORY_KEY, "42.5");
        assert_eq!(run(&mut storage, false), "42.5\n");
    }

    #[test]
    fn test_memory_clear() {
        let mut storage = MemoryStorage::new().with_entry(MEMORY_KEY, "9");
        assert_eq!(run(&mut storage, true), "Memory cleared\n");
        assert_eq!(storage.raw(MEMORY_KEY), Some("0.0"));
        assert_eq!(run(&mut storage, false), "0\n");
    }
}
