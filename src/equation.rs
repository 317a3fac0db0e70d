//! Single-variable equation evaluation by in-place reduction.
//!
//! This module provides the `Equation` type, which tokenizes an expression once and keeps
//! the resulting token template. Every evaluation clones the template, replaces the free
//! variable `x` with the requested value and reduces the clone to a single number. The
//! template itself is never modified, so an `Equation` can be shared freely between
//! threads and evaluated any number of times.
//!
//! # Features
//!
//! - Flat token templates, no expression tree
//! - Operator precedence through ordered reduction passes
//! - Nested parentheses resolved recursively
//! - Parallel evaluation of many points
//! - Central finite-difference derivatives
//!
//! # Example
//!
//! ```
//! use flatexpr::Equation;
//!
//! let eq = Equation::new("x^2 - 4".to_string());
//! assert_eq!(eq.eval(2.0).unwrap(), 0.0);
//! assert_eq!(eq.eval(0.0).unwrap(), -4.0);
//! ```

use colored::Colorize;
use itertools::Itertools;
use rayon::prelude::*;

use crate::errors::EquationError;
use crate::resolver::evaluate;
use crate::token::{Operator, Token};
use crate::tokenizer::scan;

/// Represents a single-variable equation that can be evaluated at any point.
///
/// The struct holds the original equation string, the immutable token template built from
/// it, and the characters the tokenizer skipped. Malformed input is accepted on creation
/// and reported by `eval` or `check`.
#[derive(Clone, PartialEq)]
pub struct Equation {
    equation_str: String,
    template: Vec<Token>,
    skipped: Vec<(usize, char)>,
}

impl std::fmt::Debug for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{{\n")?;
        writeln!(f, "    {}: {}\n", "Equation".cyan(), self.equation_str)?;
        writeln!(f, "    {}: {}\n", "Tokens".cyan(), self.tokens_str())?;
        writeln!(f, "    {}: {:?}\n", "Skipped".cyan(), self.skipped)?;
        writeln!(f, "}}")?;
        Ok(())
    }
}

impl std::fmt::Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{{\n")?;
        writeln!(f, "    {}: {}\n", "Equation".cyan(), self.equation_str)?;
        writeln!(f, "    {}: {}\n", "Tokens".cyan(), self.tokens_str())?;
        writeln!(f, "}}")?;
        Ok(())
    }
}

impl Equation {
    /// Creates a new `Equation` from a string representation.
    ///
    /// Tokenizing never fails: characters that are not part of the expression grammar are
    /// skipped and can be inspected with `skipped()`.
    ///
    /// # Example
    /// ```
    /// # use flatexpr::Equation;
    /// let eq = Equation::new("2*x + 1".to_string());
    /// assert_eq!(eq.len(), 5);
    /// assert_eq!(eq.eval(3.0).unwrap(), 7.0);
    /// ```
    pub fn new(equation_str: String) -> Self {
        let scan = scan(&equation_str);
        Self {
            equation_str,
            template: scan.tokens,
            skipped: scan.skipped,
        }
    }

    /// Evaluates the equation with `x` bound to the given value.
    ///
    /// # Example
    /// ```
    /// # use flatexpr::Equation;
    /// let eq = Equation::new("(2+3)*x".to_string());
    /// assert_eq!(eq.eval(4.0).unwrap(), 20.0);
    /// ```
    ///
    /// # Errors
    /// Returns `EquationError::MalformedExpression` if the expression cannot be reduced,
    /// for example because of an unmatched parenthesis or a missing operand.
    pub fn eval(&self, x: f64) -> Result<f64, EquationError> {
        evaluate_at(&self.template, x)
    }

    /// Evaluates the equation at every point, in parallel.
    ///
    /// Each point gets its own copy of the template. The results are returned in the order
    /// of `xs`.
    ///
    /// # Example
    /// ```
    /// # use flatexpr::Equation;
    /// let eq = Equation::new("x*x".to_string());
    /// let results = eq.eval_many(&[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(results, vec![1.0, 4.0, 9.0]);
    /// ```
    ///
    /// # Errors
    /// Returns the first `EquationError` encountered.
    pub fn eval_many(&self, xs: &[f64]) -> Result<Vec<f64>, EquationError> {
        xs.par_iter().map(|&x| self.eval(x)).collect()
    }

    /// Approximates the first derivative at `x` with a central difference.
    ///
    /// # Arguments
    /// * `x` - Point at which to differentiate
    /// * `step` - Half-width `h` of the difference quotient `(f(x+h) - f(x-h)) / 2h`
    ///
    /// # Example
    /// ```
    /// # use flatexpr::Equation;
    /// let eq = Equation::new("x^2".to_string());
    /// let slope = eq.derivative(3.0, 1e-6).unwrap();
    /// assert!((slope - 6.0).abs() < 1e-6);
    /// ```
    pub fn derivative(&self, x: f64, step: f64) -> Result<f64, EquationError> {
        let forward = self.eval(x + step)?;
        let backward = self.eval(x - step)?;
        Ok((forward - backward) / (2.0 * step))
    }

    /// Checks that the expression reduces to a value.
    ///
    /// Structural problems do not depend on the value of `x`, so a single throw-away
    /// evaluation is enough to find them.
    pub fn check(&self) -> Result<(), EquationError> {
        self.eval(0.0).map(|_| ())
    }

    /// Returns the original equation string.
    pub fn equation_str(&self) -> &str {
        &self.equation_str
    }

    /// Returns the token template.
    pub fn tokens(&self) -> &[Token] {
        &self.template
    }

    /// Returns the number of tokens in the template.
    pub fn len(&self) -> usize {
        self.template.len()
    }

    pub fn is_empty(&self) -> bool {
        self.template.is_empty()
    }

    /// Returns true if the equation contains the free variable `x`.
    pub fn has_variable(&self) -> bool {
        self.template
            .iter()
            .any(|token| token.is_operator(Operator::Variable))
    }

    /// Byte offsets and characters that were ignored when tokenizing, whitespace excluded.
    pub fn skipped(&self) -> &[(usize, char)] {
        &self.skipped
    }

    /// Formats the template as `[ token, token, ... ]`.
    pub fn tokens_str(&self) -> String {
        format!("[ {} ]", self.template.iter().join(", "))
    }
}

/// Evaluates a token template with the free variable bound to `x`.
///
/// The template is cloned into a private buffer first; only the clone is rewritten. The
/// buffer is dropped on every return path.
///
/// # Example
/// ```
/// use flatexpr::equation::evaluate_at;
/// use flatexpr::tokenizer::tokenize;
///
/// let template = tokenize("x^2-4");
/// assert_eq!(evaluate_at(&template, 2.0).unwrap(), 0.0);
/// assert_eq!(evaluate_at(&template, 0.0).unwrap(), -4.0);
/// ```
pub fn evaluate_at(template: &[Token], x: f64) -> Result<f64, EquationError> {
    let mut buffer = template.to_vec();
    for token in buffer.iter_mut() {
        if token.is_operator(Operator::Variable) {
            *token = Token::Constant(x);
        }
    }

    if buffer.is_empty() {
        return Err(EquationError::malformed(0, "empty expression"));
    }
    let end = buffer.len() - 1;
    evaluate(&mut buffer, 0, end)
}
