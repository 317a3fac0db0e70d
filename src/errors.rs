//! Error types for the flatexpr crate.
//!
//! This module defines the error types that can occur while evaluating expressions,
//! running the root finders and inverting matrices:
//!
//! - `EquationError`: Errors raised while reducing an expression template
//! - `SolverError`: Errors raised by the root-finding methods
//! - `MatrixError`: Errors raised by the Gauss-Jordan inversion
//!
//! Tokenizing never fails. Division by zero and domain errors of the trigonometric
//! functions are not errors either; they produce NaN or infinity like plain `f64` math.

use thiserror::Error;

/// Errors that can occur while reducing an expression to a single value.
///
/// Malformed input is not rejected when the expression is tokenized. It surfaces during
/// reduction, when an operator is found without the operands it needs or a parenthesis
/// has no partner. The reported index is the position in the evaluation buffer at the
/// moment the problem was detected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EquationError {
    /// The expression does not have the shape the reducer expects
    #[error("Malformed expression at token {index}: {reason}")]
    MalformedExpression { index: usize, reason: String },
    /// An operator reached a precedence tier that cannot apply it
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl EquationError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        EquationError::MalformedExpression {
            index,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while searching for a root.
///
/// Running out of iterations is not an error; the returned report carries
/// `converged == false` together with the last estimate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Error when the equation itself cannot be evaluated
    #[error("Failed to evaluate equation")]
    Evaluation(#[from] EquationError),
    /// Error when a bracketing method is given an interval without a sign change
    #[error("Function has the same sign at the endpoints of the interval [{a}, {b}]")]
    SameSign { a: f64, b: f64 },
    /// Error when the Newton-Raphson derivative is zero or not finite
    #[error("Derivative is zero or not finite at x = {x}")]
    ZeroDerivative { x: f64 },
    /// Error when a solver setting is out of range
    #[error("Invalid solver parameter: {0}")]
    InvalidParameter(String),
}

/// Errors that can occur while inverting a matrix.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Error when the matrix has no rows
    #[error("Cannot invert an empty matrix")]
    Empty,
    /// Error when a row does not have as many entries as there are rows
    #[error("Matrix is not square: row {row} has {got} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        got: usize,
    },
    /// Error when no usable pivot exists for a column
    #[error("Matrix is singular: no pivot found in column {column}")]
    Singular { column: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message() {
        let err = EquationError::malformed(3, "unmatched '('");
        assert_eq!(
            err.to_string(),
            "Malformed expression at token 3: unmatched '('"
        );
    }

    #[test]
    fn test_solver_error_from_equation_error() {
        let err: SolverError = EquationError::InternalError("bad tier".to_string()).into();
        assert!(matches!(err, SolverError::Evaluation(_)));
    }
}
