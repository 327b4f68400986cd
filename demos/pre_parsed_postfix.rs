use rpncalc_rs::{evaluate, parse};
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let postfix = parse("price * 1.2 + fee").expect("Failed to parse");

    for price in [10.0, 20.0, 30.0] {
        let context: HashMap<String, f64> =
            [("price".to_string(), price), ("fee".to_string(), 2.5)]
                .iter()
                .cloned()
                .collect();

        match evaluate(&postfix, &context) {
            Ok(result) => println!("Result: {}", result),
            Err(err) => println!("Error: {}", err),
        }
    }
}
