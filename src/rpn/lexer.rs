use crate::error::LexError;
use crate::functions;
use crate::rpn::{Operator, Token};
use log::debug;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::collections::BTreeSet;

#[derive(Parser)]
#[grammar = "./expression.pest"]
pub struct ExpressionLexer;

/// Splits an expression into numbers, identifiers, operators, parentheses and commas.
///
/// Whitespace is dropped. An empty or blank expression yields an empty sequence; rejecting
/// it is left to the later stages.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, LexError> {
    debug!("Tokenizing expression: {}", expression);
    let pairs = ExpressionLexer::parse(Rule::tokens, expression)
        .map_err(|e| unknown_character(expression, &e.location))?;

    let mut tokens = Vec::new();
    for pair in pairs.flat_map(Pair::into_inner) {
        if let Some(token) = build_token(expression, pair)? {
            tokens.push(token);
        }
    }

    debug!("Tokens: {:?}", tokens);
    Ok(tokens)
}

/// Names in the expression that are not built-in functions, i.e. the values a caller
/// has to supply before evaluation.
pub fn free_variables(expression: &str) -> Result<BTreeSet<String>, LexError> {
    let variables = tokenize(expression)?
        .into_iter()
        .filter_map(|token| match token {
            Token::Identifier(name) if !functions::is_function(&name) => Some(name),
            _ => None,
        })
        .collect();
    Ok(variables)
}

fn build_token(expression: &str, pair: Pair<Rule>) -> Result<Option<Token>, LexError> {
    let token = match pair.as_rule() {
        Rule::number => {
            let text = pair.as_str();
            let value = text
                .parse::<f64>()
                .map_err(|_| LexError::MalformedNumber {
                    position: char_position(expression, pair.as_span().start()),
                    text: text.to_string(),
                })?;
            Token::Number(value)
        }
        Rule::identifier => Token::Identifier(pair.as_str().to_string()),
        Rule::PLUS => Token::Operator(Operator::Add),
        Rule::MINUS => Token::Operator(Operator::Subtract),
        Rule::STAR => Token::Operator(Operator::Multiply),
        Rule::SLASH => Token::Operator(Operator::Divide),
        Rule::CARET => Token::Operator(Operator::Power),
        Rule::left_paren => Token::LeftParen,
        Rule::right_paren => Token::RightParen,
        Rule::comma => Token::Comma,
        Rule::unknown => {
            return Err(LexError::UnknownCharacter {
                position: char_position(expression, pair.as_span().start()),
                character: pair.as_str().chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
            })
        }
        // EOI
        _ => return Ok(None),
    };
    Ok(Some(token))
}

fn unknown_character(expression: &str, location: &InputLocation) -> LexError {
    let offset = match location {
        InputLocation::Pos(pos) => *pos,
        InputLocation::Span((start, _)) => *start,
    };
    let character = expression
        .get(offset..)
        .and_then(|rest| rest.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    LexError::UnknownCharacter {
        position: char_position(expression, offset),
        character,
    }
}

/// Converts a byte offset into a zero-based character index.
fn char_position(expression: &str, offset: usize) -> usize {
    expression
        .get(..offset)
        .map_or(offset, |prefix| prefix.chars().count())
}
