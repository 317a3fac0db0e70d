//! Single-variable expression evaluation by in-place precedence reduction.
//!
//! This crate evaluates expressions in one free variable `x`, such as `x^2 - 4` or
//! `sin(x) * e`, cheaply and repeatedly. An expression is tokenized once into a flat
//! template; each evaluation clones the template, binds `x`, and reduces the clone with
//! precedence-ordered rewrite passes until a single number is left. No expression tree is
//! ever built.
//!
//! On top of the evaluator sit the usual consumers of such a primitive: root finders
//! (bisection, regula falsi, Newton-Raphson) and, independently, Gauss-Jordan matrix
//! inversion.
//!
//! # Features
//!
//! - Operators `+ - * / ^`, parentheses, the constant `e`
//! - Functions `sin cos tan cot arcsin arccos arctan arccot`
//! - Left-to-right `^`: `2^3^2` evaluates to `64`
//! - NaN and infinity propagate as ordinary results
//! - Malformed input reported as `EquationError::MalformedExpression`
//!
//! # Example
//!
//! ```rust
//! use flatexpr::Equation;
//!
//! let eq = Equation::new("(2+3)*x".to_string());
//! assert_eq!(eq.eval(4.0).unwrap(), 20.0);
//!
//! let slope = eq.derivative(1.0, 1e-6).unwrap();
//! assert!((slope - 5.0).abs() < 1e-6);
//! ```

pub use equation::Equation;

pub mod prelude {
    pub use crate::equation::{evaluate_at, Equation};
    pub use crate::errors::{EquationError, MatrixError, SolverError};
    pub use crate::solver::{bisect, newton_raphson, regula_falsi, RootReport, SolverConfig};
    pub use crate::token::Token;
    pub use crate::tokenizer::tokenize;
}

/// High-level equation handling
pub mod equation;
/// Error types for the various failure modes
pub mod errors;
/// Gauss-Jordan matrix inversion
pub mod matrix;
/// Precedence-tier reduction of token ranges
pub mod reducer;
/// Recursive resolution of parenthesis spans
pub mod resolver;
/// Root finding on equations
pub mod solver;
/// Token representation
pub mod token;
/// Conversion from text to token templates
pub mod tokenizer;
/// Numeric kernels applied by the reducer
pub(crate) mod operators {
    pub(crate) mod arithmetic;
    pub(crate) mod trigonometric;
}
