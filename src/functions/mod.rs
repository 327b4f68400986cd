pub mod comparison;
pub mod exponential;
pub mod trigonometric;

/// A built-in function, callable as `name(a)` or `name(a, b)`.
#[derive(Debug, Copy, Clone)]
pub enum Function {
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
}

impl Function {
    pub fn lookup(name: &str) -> Option<Function> {
        [
            trigonometric::FUNCTIONS,
            exponential::FUNCTIONS,
            comparison::FUNCTIONS,
        ]
        .into_iter()
        .flatten()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, function)| *function)
    }

    pub fn arity(&self) -> usize {
        match self {
            Function::Unary(_) => 1,
            Function::Binary(_) => 2,
        }
    }
}

pub fn is_function(name: &str) -> bool {
    Function::lookup(name).is_some()
}

pub fn is_unary_function(name: &str) -> bool {
    matches!(Function::lookup(name), Some(Function::Unary(_)))
}

/// Every registered name, in registry order.
pub fn function_names() -> impl Iterator<Item = &'static str> {
    [
        trigonometric::FUNCTIONS,
        exponential::FUNCTIONS,
        comparison::FUNCTIONS,
    ]
    .into_iter()
    .flatten()
    .map(|(name, _)| *name)
}
