//! Binary arithmetic kernels used by the reducer.
//!
//! All operations follow plain IEEE-754 semantics: dividing by zero yields an infinity
//! or NaN and the result is passed on unchanged.

use crate::errors::EquationError;
use crate::token::Operator;

/// Combines two operands with a binary operator.
///
/// # Errors
/// Returns `EquationError::InternalError` if `op` is not one of `+ - * / ^`.
pub fn apply_binary(op: Operator, lhs: f64, rhs: f64) -> Result<f64, EquationError> {
    match op {
        Operator::Add => Ok(lhs + rhs),
        Operator::Sub => Ok(lhs - rhs),
        Operator::Mul => Ok(lhs * rhs),
        Operator::Div => Ok(lhs / rhs),
        Operator::Pow => Ok(lhs.powf(rhs)),
        other => Err(EquationError::InternalError(format!(
            "'{}' is not a binary operator",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Function;

    #[test]
    fn test_basic_operations() {
        assert_eq!(apply_binary(Operator::Add, 2.0, 3.0).unwrap(), 5.0);
        assert_eq!(apply_binary(Operator::Sub, 2.0, 3.0).unwrap(), -1.0);
        assert_eq!(apply_binary(Operator::Mul, 2.0, 3.0).unwrap(), 6.0);
        assert_eq!(apply_binary(Operator::Div, 3.0, 2.0).unwrap(), 1.5);
        assert_eq!(apply_binary(Operator::Pow, 2.0, 3.0).unwrap(), 8.0);
    }

    #[test]
    fn test_division_by_zero_propagates() {
        assert_eq!(
            apply_binary(Operator::Div, 1.0, 0.0).unwrap(),
            f64::INFINITY
        );
        assert!(apply_binary(Operator::Div, 0.0, 0.0).unwrap().is_nan());
    }

    #[test]
    fn test_non_binary_operator_is_internal_error() {
        for op in [
            Operator::LeftParen,
            Operator::Variable,
            Operator::Function(Function::Sin),
        ] {
            assert!(matches!(
                apply_binary(op, 1.0, 1.0),
                Err(EquationError::InternalError(_))
            ));
        }
    }
}
