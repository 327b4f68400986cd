use log::debug;
use rpncalc_rs::rpn::format_postfix;
use rpncalc_rs::{evaluate_expression, free_variables, parse};
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let expression = "(1 + 2) * 3 - sqrt(x)";

    let postfix = parse(expression).unwrap();
    debug!("postfix: {}", format_postfix(&postfix));
    println!("{} => {}", expression, format_postfix(&postfix));

    let names = free_variables(expression).unwrap();
    println!("free variables: {:?}", names);

    let context = HashMap::from([("x".to_string(), 16.0)]);
    match evaluate_expression(expression, &context) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {}", err),
    }

    // `-` is always binary, so a leading minus has no left operand
    match evaluate_expression("-5 + 3", &HashMap::new()) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {}", err),
    }
}
