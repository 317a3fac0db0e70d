//! Trigonometric kernels used by the reducer.
//!
//! Arguments and results are in radians. Values outside a function's domain, such as
//! `arcsin(2)`, produce NaN and are not reported as errors.

use std::f64::consts::FRAC_PI_2;

use crate::token::Function;

/// Applies a named function to its argument.
pub fn apply_function(function: Function, value: f64) -> f64 {
    match function {
        Function::Sin => value.sin(),
        Function::Cos => value.cos(),
        Function::Tan => value.tan(),
        Function::Cot => 1.0 / value.tan(),
        Function::Arcsin => value.asin(),
        Function::Arccos => value.acos(),
        Function::Arctan => value.atan(),
        // Principal value in (0, pi), continuous through zero.
        Function::Arccot => FRAC_PI_2 - value.atan(),
    }
}
