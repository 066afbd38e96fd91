//! Tokenizer and recursive-descent parser for arithmetic input.

use crate::core::{CalcError, CalcResult, Operation};

/// Parenthesis nesting accepted before the parser gives up.
pub const MAX_NESTING: usize = 128;

/// Token count accepted by [`Parser::parse`]; bounds the depth of the tree.
pub const MAX_TOKENS: usize = 1024;

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary operator (`-` doubles as unary minus)
    Operator(Operation),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Operator(op) => write!(f, "'{}'", op.symbol()),
            Self::LeftParen => f.write_str("'('"),
            Self::RightParen => f.write_str("')'"),
        }
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }
}

/// Splits input text into tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            _ => {
                let op = Operation::from_symbol(ch).ok_or(CalcError::UnexpectedChar(ch))?;
                self.advance();
                Token::Operator(op)
            }
        };

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let literal = &self.input[start..self.pos];
        match literal.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Token::Number(n)),
            _ => Err(CalcError::InvalidNumber(literal.to_string())),
        }
    }
}

/// Recursive descent parser
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/') unary)*
/// unary      ::= '-'* primary
/// primary    ::= NUMBER | '(' expression ')'
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let tokens = Tokenizer::new(input).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into a single AST, rejecting leftovers
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }
        if self.tokens.len() > MAX_TOKENS {
            return Err(CalcError::TooLong(MAX_TOKENS));
        }

        let ast = self.parse_expression()?;
        match self.current() {
            None => Ok(ast),
            Some(token) => Err(CalcError::UnexpectedToken(token.to_string())),
        }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(Token::Operator(op @ (Operation::Add | Operation::Subtract))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(Token::Operator(op @ (Operation::Multiply | Operation::Divide))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    // A run of minus signs folds to at most one Negate.
    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        let mut negated = false;
        while matches!(self.current(), Some(Token::Operator(Operation::Subtract))) {
            self.advance();
            negated = !negated;
        }

        let node = self.parse_primary()?;
        Ok(if negated { AstNode::negate(node) } else { node })
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(AstNode::Number(n)),
            Some(Token::LeftParen) => {
                if self.depth >= MAX_NESTING {
                    return Err(CalcError::UnexpectedToken("'(' nested too deeply".into()));
                }
                self.depth += 1;
                let expr = self.parse_expression()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Token::RightParen) => Ok(expr),
                    Some(token) => Err(CalcError::UnexpectedToken(token.to_string())),
                    None => Err(CalcError::UnclosedParen),
                }
            }
            Some(token) => Err(CalcError::UnexpectedToken(token.to_string())),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}
