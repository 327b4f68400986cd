use crate::functions::Function;

pub(super) const FUNCTIONS: &[(&str, Function)] = &[
    ("sqrt", Function::Unary(f64::sqrt)),
    // natural logarithm
    ("log", Function::Unary(f64::ln)),
    ("exp", Function::Unary(f64::exp)),
    ("pow", Function::Binary(f64::powf)),
];
