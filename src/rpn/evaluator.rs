use crate::error::EvalError;
use crate::functions::Function;
use crate::rpn::Token;
use log::{debug, trace};
use std::collections::HashMap;

/// Value stack for a single evaluation; never shared between calls.
struct ValueStack {
    values: Vec<f64>,
}

impl ValueStack {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    fn pop(&mut self) -> Result<f64, EvalError> {
        self.values.pop().ok_or(EvalError::StackUnderflow)
    }

    /// Pops the right operand, then the left one.
    fn pop_pair(&mut self) -> Result<(f64, f64), EvalError> {
        let right = self.pop()?;
        let left = self.pop()?;
        Ok((left, right))
    }

    fn into_result(mut self) -> Result<f64, EvalError> {
        match self.values.len() {
            1 => self.pop(),
            remaining => Err(EvalError::MalformedExpression { remaining }),
        }
    }
}

/// Runs a postfix sequence against the given variable values.
///
/// # Arguments
///
/// * `postfix` - Tokens in postfix order, as produced by [`to_postfix`](crate::rpn::to_postfix).
/// * `vars` - Values for the free variables. A bound name wins over a function of the same name.
///
/// # Returns
///
/// * `Ok(f64)` with the single value left on the stack. Division by zero and out-of-domain
///   function arguments produce infinity or NaN rather than an error.
/// * `Err(EvalError)` if an operand is missing, an identifier is unbound, or the stack does not
///   end with exactly one value.
pub fn evaluate(postfix: &[Token], vars: &HashMap<String, f64>) -> Result<f64, EvalError> {
    let mut stack = ValueStack::with_capacity(postfix.len());

    for token in postfix {
        match token {
            Token::Number(value) => stack.push(*value),
            Token::Identifier(name) => {
                if let Some(value) = vars.get(name) {
                    stack.push(*value);
                    continue;
                }
                match Function::lookup(name) {
                    Some(Function::Unary(function)) => {
                        let a = stack.pop()?;
                        stack.push(function(a));
                    }
                    Some(Function::Binary(function)) => {
                        let (a, b) = stack.pop_pair()?;
                        stack.push(function(a, b));
                    }
                    None => {
                        return Err(EvalError::UnboundIdentifier { name: name.clone() });
                    }
                }
            }
            Token::Operator(op) => {
                let (a, b) = stack.pop_pair()?;
                stack.push(op.apply(a, b));
            }
            Token::LeftParen | Token::RightParen | Token::Comma => {
                return Err(EvalError::UnexpectedToken {
                    token: token.clone(),
                });
            }
        }
        trace!("{} -> {:?}", token, stack.values);
    }

    let result = stack.into_result()?;
    debug!("Evaluated to {}", result);
    Ok(result)
}
