//! Precedence-tier reduction over a token buffer.
//!
//! A parenthesis-free range is collapsed by running one pass per precedence tier, in the
//! order functions, `^`, `*`/`/`, `+`/`-`. Each pass scans the range left to right and
//! rewrites every operator of its tier together with its operands into a single constant,
//! removing the consumed tokens from the buffer as it goes.
//!
//! Passes are repeated until the range holds a single token. Because the scan runs left to
//! right, repeated `^` associates to the left: `2^3^2` is `(2^3)^2 = 64`.

use crate::errors::EquationError;
use crate::operators::{arithmetic::apply_binary, trigonometric::apply_function};
use crate::token::{Function, Operator, Token};

/// Named functions, applied to the value on their right.
pub const FUNCTIONS: &[Operator] = &[
    Operator::Function(Function::Sin),
    Operator::Function(Function::Cos),
    Operator::Function(Function::Tan),
    Operator::Function(Function::Cot),
    Operator::Function(Function::Arcsin),
    Operator::Function(Function::Arccos),
    Operator::Function(Function::Arctan),
    Operator::Function(Function::Arccot),
];
/// Exponentiation.
pub const POWER: &[Operator] = &[Operator::Pow];
/// Multiplication and division.
pub const PRODUCT: &[Operator] = &[Operator::Mul, Operator::Div];
/// Addition and subtraction.
pub const SUM: &[Operator] = &[Operator::Add, Operator::Sub];

/// Tiers in the order they are applied within one pass.
pub const TIERS: [&[Operator]; 4] = [FUNCTIONS, POWER, PRODUCT, SUM];

/// Applies every operator of one tier found in `buffer[start..=end]`.
///
/// Binary operators replace their left operand with the result and remove themselves and
/// their right operand. The scan then looks at the same position again, so chains such as
/// `2+3+4` collapse in one call. Functions replace themselves with the result and remove
/// their argument; the scan moves on without re-examining the new constant. A function
/// followed by another function is left for a later call.
///
/// Returns the new inclusive end of the range.
///
/// # Errors
/// - `EquationError::MalformedExpression` if the range lies outside the buffer, an operator
///   lacks an operand inside the range or an operand is not a number
/// - `EquationError::InternalError` if `operators` contains a parenthesis or the variable
pub fn reduce(
    operators: &[Operator],
    buffer: &mut Vec<Token>,
    start: usize,
    mut end: usize,
) -> Result<usize, EquationError> {
    check_range(buffer, start, end)?;
    let mut i = start;
    while i <= end {
        let op = match buffer[i] {
            Token::Operator(op) if operators.contains(&op) => op,
            _ => {
                i += 1;
                continue;
            }
        };

        match op {
            Operator::Function(function) => {
                // `sin cos 0`: the inner function has to collapse first.
                if i < end && matches!(buffer[i + 1], Token::Operator(Operator::Function(_))) {
                    i += 1;
                    continue;
                }
                let argument = right_operand(buffer, i, end, op)?;
                buffer[i] = Token::Constant(apply_function(function, argument));
                buffer.remove(i + 1);
                end -= 1;
                i += 1;
            }
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Pow => {
                if i == start {
                    return Err(EquationError::malformed(
                        i,
                        format!("'{}' has no left operand", op),
                    ));
                }
                let lhs = operand(buffer, i - 1, i, op)?;
                let rhs = right_operand(buffer, i, end, op)?;
                buffer[i - 1] = Token::Constant(apply_binary(op, lhs, rhs)?);
                buffer.drain(i..=i + 1);
                end -= 2;
            }
            other => {
                return Err(EquationError::InternalError(format!(
                    "'{}' cannot be reduced as part of a precedence tier",
                    other
                )))
            }
        }
    }
    Ok(end)
}

/// Runs all tiers over a parenthesis-free range until it holds a single constant.
///
/// Returns the new end of the range, which is always `start` on success.
///
/// # Errors
/// Returns `EquationError::MalformedExpression` for a range outside the buffer, a stray `)`,
/// a function with nothing on its right, a pass that makes no
/// progress (for example two numbers without an operator between them) and for a range
/// that does not end up as a number.
pub fn reduce_all(
    buffer: &mut Vec<Token>,
    start: usize,
    mut end: usize,
) -> Result<usize, EquationError> {
    check_range(buffer, start, end)?;
    if let Some(offset) = buffer[start..=end]
        .iter()
        .position(|token| token.is_operator(Operator::RightParen))
    {
        return Err(EquationError::malformed(start + offset, "unmatched ')'"));
    }

    while end > start {
        let before = end;
        for tier in TIERS {
            end = if tier == FUNCTIONS {
                reduce_nested(buffer, start, end)?
            } else {
                reduce(tier, buffer, start, end)?
            };
        }
        if end == before {
            let index = (start..end)
                .find(|&i| buffer[i].constant().is_some() && buffer[i + 1].constant().is_some())
                .map_or(start, |i| i + 1);
            return Err(EquationError::malformed(
                index,
                "expected an operator between two values",
            ));
        }
    }

    match buffer[start] {
        Token::Constant(_) => Ok(end),
        Token::Operator(op @ Operator::Function(_)) => Err(EquationError::malformed(
            start,
            format!("'{}' has no right operand", op),
        )),
        ref token => Err(EquationError::malformed(
            start,
            format!("expected a number, found {}", token),
        )),
    }
}

/// Repeats the function tier until it stops shrinking the range.
///
/// Each call only collapses the innermost function of a prefix chain, so `sin cos tan 0`
/// needs three calls. Binary tiers never see a pending function this way.
fn reduce_nested(
    buffer: &mut Vec<Token>,
    start: usize,
    mut end: usize,
) -> Result<usize, EquationError> {
    loop {
        let before = end;
        end = reduce(FUNCTIONS, buffer, start, end)?;
        if end == before {
            return Ok(end);
        }
    }
}

/// Rejects ranges that are empty or reach past the end of the buffer.
pub(crate) fn check_range(
    buffer: &[Token],
    start: usize,
    end: usize,
) -> Result<(), EquationError> {
    if start > end || end >= buffer.len() {
        return Err(EquationError::malformed(start, "empty expression"));
    }
    Ok(())
}

fn right_operand(
    buffer: &[Token],
    op_index: usize,
    end: usize,
    op: Operator,
) -> Result<f64, EquationError> {
    if op_index + 1 > end {
        return Err(EquationError::malformed(
            op_index,
            format!("'{}' has no right operand", op),
        ));
    }
    operand(buffer, op_index + 1, op_index, op)
}

fn operand(
    buffer: &[Token],
    index: usize,
    op_index: usize,
    op: Operator,
) -> Result<f64, EquationError> {
    match buffer.get(index) {
        Some(Token::Constant(value)) => Ok(*value),
        Some(token) => Err(EquationError::malformed(
            op_index,
            format!("'{}' expects a number, found {}", op, token),
        )),
        None => Err(EquationError::malformed(
            op_index,
            format!("'{}' is missing an operand", op),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_reduce_chain_in_one_call() {
        let mut buffer = tokenize("2+3+4");
        let end = reduce(SUM, &mut buffer, 0, 4).unwrap();
        assert_eq!(end, 0);
        assert_eq!(buffer, vec![Token::Constant(9.0)]);
    }

    #[test]
    fn test_reduce_only_touches_its_tier() {
        let mut buffer = tokenize("2+3*4");
        let end = reduce(SUM, &mut buffer, 0, 4).unwrap();
        assert_eq!(end, 2);
        assert_eq!(
            buffer,
            vec![
                Token::Constant(5.0),
                Token::Operator(Operator::Mul),
                Token::Constant(4.0)
            ]
        );
    }

    #[test]
    fn test_reduce_leaves_tokens_outside_range() {
        // Only "3*4" at 2..=4 is reduced; the tokens after it shift left.
        let mut buffer = tokenize("2+3*4+1");
        let end = reduce(PRODUCT, &mut buffer, 2, 4).unwrap();
        assert_eq!(end, 2);
        assert_eq!(buffer, tokenize("2+12+1"));
    }

    #[test]
    fn test_functions_consume_right_operand() {
        let mut buffer = tokenize("2*sin 0");
        let end = reduce(FUNCTIONS, &mut buffer, 0, 3).unwrap();
        assert_eq!(end, 2);
        assert_eq!(buffer, tokenize("2*0"));
    }

    #[test]
    fn test_nested_functions_collapse_innermost_first() {
        let mut buffer = tokenize("sin cos 0");
        let end = reduce(FUNCTIONS, &mut buffer, 0, 2).unwrap();
        assert_eq!(end, 1);
        assert_eq!(
            buffer,
            vec![
                Token::Operator(Operator::Function(Function::Sin)),
                Token::Constant(1.0)
            ]
        );

        let mut buffer = tokenize("sin cos 0");
        reduce_all(&mut buffer, 0, 2).unwrap();
        assert_eq!(buffer, vec![Token::Constant(1f64.sin())]);
    }

    #[test]
    fn test_nested_functions_as_operand() {
        let mut buffer = tokenize("2^sin cos 0");
        reduce_all(&mut buffer, 0, 4).unwrap();
        assert_eq!(buffer, vec![Token::Constant(2f64.powf(1f64.sin()))]);
    }

    #[test]
    fn test_nested_function_without_argument() {
        let mut buffer = tokenize("sin cos");
        let err = reduce_all(&mut buffer, 0, 1).unwrap_err();
        assert_eq!(
            err,
            EquationError::MalformedExpression {
                index: 1,
                reason: "'cos' has no right operand".to_string()
            }
        );
    }

    #[test]
    fn test_function_of_operator_is_malformed() {
        let mut buffer = tokenize("sin +");
        let err = reduce(FUNCTIONS, &mut buffer, 0, 1).unwrap_err();
        assert!(matches!(
            err,
            EquationError::MalformedExpression { index: 0, .. }
        ));
    }

    #[test]
    fn test_lone_function_has_no_right_operand() {
        let mut buffer = tokenize("cotan");
        let err = reduce_all(&mut buffer, 0, 0).unwrap_err();
        assert_eq!(
            err,
            EquationError::MalformedExpression {
                index: 0,
                reason: "'cot' has no right operand".to_string()
            }
        );
    }

    #[test]
    fn test_range_outside_buffer() {
        let mut buffer = tokenize("2+3");
        assert!(matches!(
            reduce(SUM, &mut buffer, 0, 5),
            Err(EquationError::MalformedExpression { index: 0, .. })
        ));
        assert!(matches!(
            reduce_all(&mut buffer, 1, 0),
            Err(EquationError::MalformedExpression { index: 1, .. })
        ));
        assert_eq!(buffer, tokenize("2+3"));
    }

    #[test]
    fn test_power_is_left_associative() {
        let mut buffer = tokenize("2^3^2");
        reduce(POWER, &mut buffer, 0, 4).unwrap();
        assert_eq!(buffer, vec![Token::Constant(64.0)]);
    }

    #[test]
    fn test_missing_left_operand() {
        let mut buffer = tokenize("-3");
        let err = reduce(SUM, &mut buffer, 0, 1).unwrap_err();
        assert!(matches!(
            err,
            EquationError::MalformedExpression { index: 0, .. }
        ));
    }

    #[test]
    fn test_operand_outside_range_is_not_consumed() {
        // The range starts at the '*', so its left neighbour is out of reach.
        let mut buffer = tokenize("2*3");
        let err = reduce(PRODUCT, &mut buffer, 1, 2).unwrap_err();
        assert!(matches!(
            err,
            EquationError::MalformedExpression { index: 1, .. }
        ));
        assert_eq!(buffer, tokenize("2*3"));
    }

    #[test]
    fn test_missing_right_operand() {
        let mut buffer = tokenize("2*");
        let err = reduce(PRODUCT, &mut buffer, 0, 1).unwrap_err();
        assert!(matches!(
            err,
            EquationError::MalformedExpression { index: 1, .. }
        ));
    }

    #[test]
    fn test_non_numeric_operand() {
        let mut buffer = tokenize("2+*3");
        let err = reduce(PRODUCT, &mut buffer, 0, 3).unwrap_err();
        assert!(matches!(
            err,
            EquationError::MalformedExpression { index: 2, .. }
        ));
    }

    #[test]
    fn test_parenthesis_in_tier_is_internal_error() {
        let mut buffer = tokenize("(2)");
        let err = reduce(&[Operator::LeftParen], &mut buffer, 0, 2).unwrap_err();
        assert!(matches!(err, EquationError::InternalError(_)));
    }

    #[test]
    fn test_reduce_all_precedence() {
        let mut buffer = tokenize("1+2*3^2-4/2");
        let end = reduce_all(&mut buffer, 0, 10).unwrap();
        assert_eq!(end, 0);
        assert_eq!(buffer, vec![Token::Constant(17.0)]);
    }

    #[test]
    fn test_reduce_all_without_operator() {
        let mut buffer = tokenize("2 3");
        let err = reduce_all(&mut buffer, 0, 1).unwrap_err();
        assert!(matches!(
            err,
            EquationError::MalformedExpression { index: 1, .. }
        ));
    }

    #[test]
    fn test_reduce_all_stray_right_paren() {
        let mut buffer = tokenize("2+3)");
        let err = reduce_all(&mut buffer, 0, 3).unwrap_err();
        assert!(matches!(
            err,
            EquationError::MalformedExpression { index: 3, .. }
        ));
    }
}
