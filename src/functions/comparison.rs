use crate::functions::Function;

pub(super) const FUNCTIONS: &[(&str, Function)] = &[
    ("abs", Function::Unary(f64::abs)),
    ("max", Function::Binary(max)),
    ("min", Function::Binary(min)),
];

// `f64::max`/`f64::min` discard a NaN operand; these keep it so it reaches the result.
fn max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

fn min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}
