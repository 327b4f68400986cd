use crate::error::{Error, ParseError};
use crate::functions;
use crate::rpn::{format_postfix, tokenize, Token};
use log::debug;

/// Reorders infix tokens into postfix (RPN) using the shunting-yard algorithm.
///
/// Only parenthesis and comma structure is validated here; operand counts are checked when
/// the postfix sequence is evaluated.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, ParseError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) => output.push(token.clone()),
            Token::Identifier(name) if functions::is_function(name) => stack.push(token.clone()),
            Token::Identifier(_) => output.push(token.clone()),
            Token::Comma => loop {
                match stack.last() {
                    Some(Token::LeftParen) => break,
                    Some(_) => output.extend(stack.pop()),
                    None => return Err(ParseError::MisplacedComma),
                }
            },
            Token::Operator(op) => {
                while let Some(&Token::Operator(top)) = stack.last() {
                    if !op.yields_to(top) {
                        break;
                    }
                    stack.pop();
                    output.push(Token::Operator(top));
                }
                stack.push(token.clone());
            }
            Token::LeftParen => stack.push(Token::LeftParen),
            Token::RightParen => {
                loop {
                    match stack.pop() {
                        Some(Token::LeftParen) => break,
                        Some(top) => output.push(top),
                        None => return Err(ParseError::MismatchedParens),
                    }
                }
                // a function name under the parenthesis owns the argument list just closed
                if matches!(stack.last(), Some(Token::Identifier(name)) if functions::is_function(name))
                {
                    output.extend(stack.pop());
                }
            }
        }
    }

    while let Some(top) = stack.pop() {
        if matches!(top, Token::LeftParen | Token::RightParen) {
            return Err(ParseError::MismatchedParens);
        }
        output.push(top);
    }

    debug!("Postfix: {}", format_postfix(&output));
    Ok(output)
}

/// Tokenizes and converts in one step.
pub fn parse(expression: &str) -> Result<Vec<Token>, Error> {
    let tokens = tokenize(expression)?;
    Ok(to_postfix(&tokens)?)
}
