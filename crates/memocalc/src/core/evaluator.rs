//! Turns display text into a number.

use crate::core::parser::{AstNode, Parser};
use crate::core::CalcResult;

/// Replaces the display multiplication symbols with `*`.
#[must_use]
pub fn normalize(input: &str) -> String {
    input.replace(['x', '×'], "*")
}

/// Evaluates display text: substitutes the multiplication token, parses, computes.
pub fn evaluate_str(input: &str) -> CalcResult<f64> {
    let ast = Parser::parse_str(&normalize(input))?;
    evaluate(&ast)
}

/// Evaluates an AST node
pub fn evaluate(node: &AstNode) -> CalcResult<f64> {
    match node {
        AstNode::Number(n) => Ok(*n),
        AstNode::Negate(inner) => evaluate(inner).map(|v| -v),
        AstNode::BinaryOp { left, op, right } => {
            let left = evaluate(left)?;
            let right = evaluate(right)?;
            op.apply(left, right)
        }
    }
}

impl AstNode {
    /// Convenience wrapper around [`evaluate`]
    pub fn eval(&self) -> CalcResult<f64> {
        evaluate(self)
    }
}
