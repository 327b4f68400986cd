use crate::calculator::Calculator;
use crate::error::Error;
use crate::rpn::free_variables;
use log::{debug, warn};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};

/// Line-oriented prompt loop: reads an expression, asks for each free variable, prints the result.
pub struct Session<R, W> {
    input: R,
    output: W,
    calculator: Calculator,
    bindings: HashMap<String, f64>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, calculator: Calculator) -> Self {
        Self {
            input,
            output,
            calculator,
            bindings: HashMap::new(),
        }
    }

    /// Pre-binds variables; these are never prompted for.
    pub fn with_bindings(mut self, bindings: HashMap<String, f64>) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Handles expressions until the input is exhausted.
    pub fn run(&mut self) -> io::Result<()> {
        while self.run_once()? {}
        Ok(())
    }

    /// Handles a single expression. Returns `false` once there is no more input.
    pub fn run_once(&mut self) -> io::Result<bool> {
        self.prompt("Enter expression: ")?;
        let Some(line) = self.read_line()? else {
            return Ok(false);
        };
        let expression = line.trim();
        if !expression.is_empty() {
            self.evaluate(expression)?;
        }
        Ok(true)
    }

    /// Evaluates `expression`, prompting for unbound variables, and prints the outcome.
    ///
    /// Every failure is reported with the same message; the precise cause is logged.
    pub fn evaluate(&mut self, expression: &str) -> io::Result<Option<f64>> {
        match self.resolve(expression)? {
            Ok(value) => {
                writeln!(self.output, "Result: {:?}", value)?;
                Ok(Some(value))
            }
            Err(e) => {
                warn!("'{}' failed: {}", expression, e);
                writeln!(self.output, "Error: Invalid expression")?;
                Ok(None)
            }
        }
    }

    fn resolve(&mut self, expression: &str) -> io::Result<Result<f64, Error>> {
        let names = match free_variables(expression) {
            Ok(names) => names,
            Err(e) => return Ok(Err(e.into())),
        };

        let mut vars = self.bindings.clone();
        for name in names {
            if vars.contains_key(&name) {
                continue;
            }
            self.prompt(&format!("Enter value for {}: ", name))?;
            let input = self.read_line()?.unwrap_or_default();
            match input.trim().parse::<f64>() {
                Ok(value) => {
                    debug!("{} = {}", name, value);
                    vars.insert(name, value);
                }
                Err(_) => {
                    return Ok(Err(Error::InvalidValue {
                        name,
                        input: input.trim().to_string(),
                    }))
                }
            }
        }

        Ok(self.calculator.evaluate_expression(expression, &vars))
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
