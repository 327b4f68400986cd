use crate::functions::Function;

/// Angles are in radians.
pub(super) const FUNCTIONS: &[(&str, Function)] = &[
    ("sin", Function::Unary(f64::sin)),
    ("cos", Function::Unary(f64::cos)),
    ("tan", Function::Unary(f64::tan)),
    ("asin", Function::Unary(f64::asin)),
    ("acos", Function::Unary(f64::acos)),
    ("atan", Function::Unary(f64::atan)),
];
