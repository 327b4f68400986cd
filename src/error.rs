use crate::rpn::Token;
use thiserror::Error;

/// Failures raised while scanning raw expression text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Unknown character '{character}' at position {position}")]
    UnknownCharacter { position: usize, character: char },
    #[error("Malformed number '{text}' at position {position}")]
    MalformedNumber { position: usize, text: String },
}

/// Structural failures found while reordering tokens into postfix form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Misplaced comma")]
    MisplacedComma,
    #[error("Mismatched parentheses")]
    MismatchedParens,
}

/// Failures of the postfix stack machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Stack underflow: missing operand")]
    StackUnderflow,
    #[error("Identifier '{name}' is neither a variable nor a function")]
    UnboundIdentifier { name: String },
    #[error("Invalid RPN expression: {remaining} values left on the stack")]
    MalformedExpression { remaining: usize },
    #[error("Unexpected token in RPN: {token}")]
    UnexpectedToken { token: Token },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),
    #[error("Invalid value {input:?} for variable '{name}'")]
    InvalidValue { name: String, input: String },
}
