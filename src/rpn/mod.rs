use std::fmt;

mod converter;
mod evaluator;
mod lexer;

pub use converter::{parse, to_postfix};
pub use evaluator::evaluate;
pub use lexer::{free_variables, tokenize};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    /// Variable or function name, resolved against the registry where it is consumed.
    Identifier(String),
    Operator(Operator),
    LeftParen,
    RightParen,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Identifier(name) => f.write_str(name),
            Token::Operator(op) => write!(f, "{}", op.symbol()),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
        }
    }
}

/// Renders a token sequence separated by single spaces, e.g. `2 3 4 * +`.
pub fn format_postfix(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '^' => Some(Operator::Power),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 2,
            Operator::Multiply | Operator::Divide => 3,
            Operator::Power => 4,
        }
    }

    pub fn associativity(&self) -> Associativity {
        match self {
            Operator::Power => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    pub fn is_left_associative(&self) -> bool {
        self.associativity() == Associativity::Left
    }

    /// Whether `top`, sitting on the operator stack, must be emitted before `self` is pushed.
    pub(crate) fn yields_to(&self, top: Operator) -> bool {
        match self.associativity() {
            Associativity::Left => self.precedence() <= top.precedence(),
            Associativity::Right => self.precedence() < top.precedence(),
        }
    }

    /// IEEE-754 semantics throughout: `1 / 0` is infinity, `0 / 0` is NaN.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Power => left.powf(right),
        }
    }
}

pub fn is_operator(symbol: char) -> bool {
    Operator::from_symbol(symbol).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_symbols() {
        for symbol in ['+', '-', '*', '/', '^'] {
            assert!(is_operator(symbol));
            assert_eq!(Operator::from_symbol(symbol).unwrap().symbol(), symbol);
        }
        assert!(!is_operator('%'));
        assert_eq!(Operator::from_symbol('('), None);
    }

    #[test]
    fn test_precedence_table() {
        assert_eq!(Operator::Add.precedence(), 2);
        assert_eq!(Operator::Subtract.precedence(), 2);
        assert_eq!(Operator::Multiply.precedence(), 3);
        assert_eq!(Operator::Divide.precedence(), 3);
        assert_eq!(Operator::Power.precedence(), 4);
    }

    #[test]
    fn test_only_power_is_right_associative() {
        assert!(Operator::Add.is_left_associative());
        assert!(Operator::Divide.is_left_associative());
        assert!(!Operator::Power.is_left_associative());
    }

    #[test]
    fn test_yields_to() {
        assert!(Operator::Add.yields_to(Operator::Multiply));
        assert!(Operator::Subtract.yields_to(Operator::Add));
        assert!(!Operator::Multiply.yields_to(Operator::Add));
        // `^` never yields to another `^`, which makes `2^3^2` group to the right
        assert!(!Operator::Power.yields_to(Operator::Power));
    }

    #[test]
    fn test_apply_follows_ieee() {
        assert_eq!(Operator::Power.apply(2.0, 10.0), 1024.0);
        assert_eq!(Operator::Subtract.apply(2.0, 5.0), -3.0);
        assert_eq!(Operator::Divide.apply(1.0, 0.0), f64::INFINITY);
        assert!(Operator::Divide.apply(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_format_postfix() {
        let tokens = vec![
            Token::Number(2.0),
            Token::Number(0.5),
            Token::Identifier("x".to_string()),
            Token::Operator(Operator::Multiply),
            Token::Operator(Operator::Add),
        ];
        assert_eq!(format_postfix(&tokens), "2 0.5 x * +");
        assert_eq!(format_postfix(&[]), "");
    }
}
