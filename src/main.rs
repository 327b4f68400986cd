use clap::Parser;
use rpncalc_rs::functions::{function_names, Function};
use rpncalc_rs::rpn::format_postfix;
use rpncalc_rs::{parse, Calculator, Session};
use std::collections::HashMap;
use std::io;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about = "Evaluate arithmetic expressions via postfix notation", long_about = None)]
struct Cli {
    /// Expression to evaluate; starts an interactive session when omitted
    expression: Option<String>,

    /// Bind a variable instead of being prompted for it
    #[arg(short, long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    vars: Vec<(String, f64)>,

    /// Print the postfix form instead of evaluating
    #[arg(long)]
    postfix: bool,

    /// List the built-in functions and exit
    #[arg(long)]
    functions: bool,

    /// Number of compiled expressions to keep
    #[arg(long, default_value_t = 100)]
    cache_size: usize,
}

fn parse_binding(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for '{}': {}", name, e))?;
    Ok((name.trim().to_string(), value))
}

/// Call shape of a built-in, e.g. `pow(a, b)`.
fn signature(name: &str, function: Function) -> String {
    let params = ["a", "b"];
    format!("{}({})", name, params[..function.arity()].join(", "))
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if cli.functions {
        for name in function_names() {
            if let Some(function) = Function::lookup(name) {
                println!("{}", signature(name, function));
            }
        }
        return ExitCode::SUCCESS;
    }

    if cli.postfix {
        let Some(expression) = cli.expression.as_deref() else {
            eprintln!("Error: --postfix needs an expression");
            return ExitCode::FAILURE;
        };
        return match parse(expression) {
            Ok(postfix) => {
                println!("{}", format_postfix(&postfix));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let bindings: HashMap<String, f64> = cli.vars.into_iter().collect();
    let stdin = io::stdin();
    let mut session = Session::new(
        stdin.lock(),
        io::stdout(),
        Calculator::new(cli.cache_size),
    )
    .with_bindings(bindings);

    let outcome = match cli.expression {
        Some(expression) => session.evaluate(&expression).map(|value| value.is_some()),
        None => session.run().map(|_| true),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
