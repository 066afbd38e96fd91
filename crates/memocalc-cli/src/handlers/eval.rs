//! `memocalc eval` - evaluate one expression through the dispatcher

use std::io::Write;

use memocalc::core::evaluator::evaluate_str;
use memocalc::{Action, CalcError, Calculator, Storage};
use tracing::info;

use super::ensure_persisted;
use crate::error::CliResult;

/// Evaluates `expression`, records it in history and prints the result.
///
/// The expression goes through the same append/evaluate path as the keypad,
/// so a success here looks exactly like one typed into the TUI.
pub fn execute_eval<S: Storage, W: Write>(
    storage: S,
    expression: &str,
    out: &mut W,
) -> CliResult<()> {
    if expression.trim().is_empty() {
        return Err(CalcError::EmptyExpression.into());
    }

    let mut calc = Calculator::open(storage);
    calc.dispatch(&Action::append(expression));
    let outcome = calc.dispatch(&Action::Evaluate);

    if calc.state().is_error() {
        // The state only keeps the marker; re-run the evaluator for the reason.
        let reason = evaluate_str(expression).err().unwrap_or(CalcError::NonFinite);
        return Err(reason.into());
    }

    writeln!(out, "{}", calc.state().input())?;
    info!(expression, result = calc.state().result(), "evaluated");
    ensure_persisted(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use memocalc::storage::HISTORY_KEY;
    use memocalc::MemoryStorage;

    fn eval(storage: &mut MemoryStorage, expression: &str) -> (CliResult<()>, String) {
        let mut out = Vec::new();
        let result = execute_eval(storage, expression, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_eval_prints_and_records() {
        let mut storage = MemoryStorage::new();
        let (result, out) = eval(&mut storage, "2+3x4");
        assert!(result.is_ok());
        assert_eq!(out, "14\n");
        assert_eq!(
            storage.raw(HISTORY_KEY),
            Some(r#"[{"query":"2+3x4","result":14.0}]"#)
        );
    }

    #[test]
    fn test_eval_appends_to_existing_history() {
        let mut storage = MemoryStorage::new();
        eval(&mut storage, "1+1").0.unwrap();
        eval(&mut storage, "(2+3)*2").0.unwrap();
        let history = memocalc::storage::load_snapshot(&storage).history;
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().result(), 10.0);
    }

    #[test]
    fn test_eval_negative_and_decimal() {
        let (_, out) = eval(&mut MemoryStorage::new(), "-1.5*2");
        assert_eq!(out, "-3\n");
    }

    #[test]
    fn test_eval_division_by_zero_fails_without_recording() {
        let mut storage = MemoryStorage::new();
        let (result, out) = eval(&mut storage, "1/0");
        assert!(matches!(
            result,
            Err(CliError::Evaluation(CalcError::DivisionByZero))
        ));
        assert!(out.is_empty());
        assert_eq!(storage.raw(HISTORY_KEY), None);
    }

    #[test]
    fn test_eval_syntax_error() {
        let (result, _) = eval(&mut MemoryStorage::new(), "2+");
        assert!(matches!(result, Err(CliError::Evaluation(_))));
    }

    #[test]
    fn test_eval_blank_expression() {
        let (result, _) = eval(&mut MemoryStorage::new(), "   ");
        assert!(matches!(
            result,
            Err(CliError::Evaluation(CalcError::EmptyExpression))
        ));
    }
}
