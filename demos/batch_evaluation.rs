use rpncalc_rs::Calculator;
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let contexts = vec![
        HashMap::from([("price".to_string(), 120.0), ("volume".to_string(), 3000.0)]),
        HashMap::from([("price".to_string(), 80.0), ("volume".to_string(), 6000.0)]),
        HashMap::from([("price".to_string(), 95.5)]),
    ];

    let expression = "price * volume / max(volume, 1)";

    let mut calculator = Calculator::new(16);
    let results = calculator.evaluate_batch(expression, &contexts).unwrap();
    for (i, result) in results.iter().enumerate() {
        println!("Result {}: {:?}", i, result);
    }
}
