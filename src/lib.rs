pub mod calculator;
pub mod error;
pub mod functions;
pub mod rpn;
pub mod session;

pub use calculator::Calculator;
pub use error::{Error, EvalError, LexError, ParseError};
pub use rpn::{evaluate, free_variables, parse, to_postfix, tokenize, Operator, Token};
pub use session::Session;

use std::collections::HashMap;

/// Parses and evaluates `expression` in one go, without caching.
pub fn evaluate_expression(expression: &str, vars: &HashMap<String, f64>) -> Result<f64, Error> {
    let postfix = parse(expression)?;
    Ok(evaluate(&postfix, vars)?)
}
