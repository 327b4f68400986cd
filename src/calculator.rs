use crate::error::{Error, EvalError};
use crate::rpn::{evaluate, parse, Token};
use log::debug;
use lru::LruCache;
use rayon::prelude::*;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Compiles expressions to postfix once and evaluates them against many variable sets.
pub struct Calculator {
    cache: Option<LruCache<String, Arc<[Token]>>>,
}

impl Calculator {
    /// Creates a new `Calculator` keeping up to `max_cache_size` compiled expressions.
    /// A size of zero disables caching.
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            cache: NonZeroUsize::new(max_cache_size).map(LruCache::new),
        }
    }

    /// Returns the postfix form of `expression`, reusing a cached one when available.
    pub fn compile(&mut self, expression: &str) -> Result<Arc<[Token]>, Error> {
        if let Some(postfix) = self.cache.as_mut().and_then(|cache| cache.get(expression)) {
            debug!("Cache hit: {}", expression);
            return Ok(Arc::clone(postfix));
        }

        let postfix: Arc<[Token]> = parse(expression)?.into();
        if let Some(cache) = self.cache.as_mut() {
            cache.put(expression.to_string(), Arc::clone(&postfix));
        }
        Ok(postfix)
    }

    /// Evaluates a given expression string against a provided set of variable values.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if tokenizing, conversion and evaluation all succeed.
    /// * `Err(Error)` naming the stage that failed.
    pub fn evaluate_expression(
        &mut self,
        expression: &str,
        vars: &HashMap<String, f64>,
    ) -> Result<f64, Error> {
        let postfix = self.compile(expression)?;
        Ok(evaluate(&postfix, vars)?)
    }

    /// Evaluates one expression against every context in parallel.
    ///
    /// A lex or parse failure rejects the whole batch; evaluation failures are reported per
    /// context, in input order.
    pub fn evaluate_batch(
        &mut self,
        expression: &str,
        contexts: &[HashMap<String, f64>],
    ) -> Result<Vec<Result<f64, EvalError>>, Error> {
        let postfix = self.compile(expression)?;
        debug!(
            "Evaluating '{}' against {} contexts",
            expression,
            contexts.len()
        );
        Ok(contexts
            .par_iter()
            .map(|vars| evaluate(&postfix, vars))
            .collect())
    }

    pub fn cached_expressions(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.len())
    }

    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    #[test]
    fn test_evaluate_expression() {
        let mut calculator = Calculator::new(10);
        let vars = HashMap::from([("x".to_string(), 4.0)]);

        assert_eq!(calculator.evaluate_expression("x*2", &vars), Ok(8.0));
        assert_eq!(
            calculator.evaluate_expression("pow(2,3)+max(1,5)", &HashMap::new()),
            Ok(13.0)
        );
    }

    #[test]
    fn test_compiled_expressions_are_cached() {
        let mut calculator = Calculator::new(10);
        let first = calculator.compile("1 + 2").unwrap();
        let second = calculator.compile("1 + 2").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calculator.cached_expressions(), 1);

        calculator.clear_cache();
        assert_eq!(calculator.cached_expressions(), 0);
    }

    #[test]
    fn test_cache_evicts_least_recently_used() {
        let mut calculator = Calculator::new(2);
        let a = calculator.compile("a").unwrap();
        calculator.compile("b").unwrap();
        calculator.compile("a").unwrap();
        calculator.compile("c").unwrap();

        assert_eq!(calculator.cached_expressions(), 2);
        // "a" was touched after "b", so "b" is the one evicted
        assert!(Arc::ptr_eq(&a, &calculator.compile("a").unwrap()));
    }

    #[test]
    fn test_zero_size_disables_cache() {
        let mut calculator = Calculator::new(0);
        let first = calculator.compile("1 + 2").unwrap();
        let second = calculator.compile("1 + 2").unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(calculator.cached_expressions(), 0);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let mut calculator = Calculator::new(10);
        assert_eq!(
            calculator.compile("(1 + 2"),
            Err(Error::Parse(ParseError::MismatchedParens))
        );
        assert_eq!(calculator.cached_expressions(), 0);
    }

    #[test]
    fn test_evaluate_batch_keeps_order() {
        let mut calculator = Calculator::default();
        let contexts: Vec<HashMap<String, f64>> = (0..100)
            .map(|i| HashMap::from([("price".to_string(), i as f64)]))
            .collect();

        let results = calculator.evaluate_batch("price * 2", &contexts).unwrap();

        assert_eq!(results.len(), 100);
        for (i, result) in results.into_iter().enumerate() {
            assert_eq!(result, Ok(i as f64 * 2.0));
        }
    }

    #[test]
    fn test_evaluate_batch_reports_per_context_failures() {
        let mut calculator = Calculator::default();
        let contexts = vec![
            HashMap::from([("x".to_string(), 1.0)]),
            HashMap::new(),
        ];

        let results = calculator.evaluate_batch("x + 1", &contexts).unwrap();
        assert_eq!(results[0], Ok(2.0));
        assert_eq!(
            results[1],
            Err(EvalError::UnboundIdentifier {
                name: "x".to_string()
            })
        );
    }

    #[test]
    fn test_evaluate_batch_rejects_invalid_expression() {
        let mut calculator = Calculator::default();
        // operand counts are only checked per context
        let result = calculator.evaluate_batch("1 +", &[HashMap::new()]);
        assert_eq!(result, Ok(vec![Err(EvalError::StackUnderflow)]));

        let result = calculator.evaluate_batch("1 ,", &[HashMap::new()]);
        assert_eq!(result, Err(Error::Parse(ParseError::MisplacedComma)));
    }
}
