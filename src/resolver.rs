//! Parenthesis resolution.
//!
//! The resolver looks for the first `(` in a range, finds its partner by counting nesting
//! depth, and evaluates the interior recursively. The `(` slot is overwritten with the
//! interior's value and the rest of the span is removed from the buffer. Once no
//! parentheses are left, the range is flat and the reducer finishes it.

use crate::errors::EquationError;
use crate::reducer::{check_range, reduce_all};
use crate::token::{Operator, Token};

/// Evaluates `buffer[start..=end]` down to a single value.
///
/// On success the range has been collapsed into one constant at `start` and the buffer is
/// `end - start` tokens shorter. Tokens after `end` are kept and shifted left.
///
/// # Errors
/// Returns `EquationError::MalformedExpression` for an empty range, unbalanced or empty
/// parentheses, and anything the reducer rejects.
pub fn evaluate(
    buffer: &mut Vec<Token>,
    start: usize,
    mut end: usize,
) -> Result<f64, EquationError> {
    check_range(buffer, start, end)?;

    loop {
        let Some(open) = (start..=end).find(|&i| buffer[i].is_operator(Operator::LeftParen))
        else {
            reduce_all(buffer, start, end)?;
            return buffer[start].constant().ok_or_else(|| {
                EquationError::InternalError("reduction did not produce a number".to_string())
            });
        };

        let close = matching_paren(buffer, open, end)?;
        if close == open + 1 {
            return Err(EquationError::malformed(open, "empty parentheses"));
        }

        let value = evaluate(buffer, open + 1, close - 1)?;
        buffer[open] = Token::Constant(value);
        // The interior is now a single constant at open + 1, followed by the matching ')'.
        buffer.drain(open + 1..=open + 2);
        end -= close - open;
    }
}

/// Finds the `)` closing the `(` at `open`, searching no further than `end`.
fn matching_paren(buffer: &[Token], open: usize, end: usize) -> Result<usize, EquationError> {
    let mut depth = 0usize;
    for (i, token) in buffer.iter().enumerate().take(end + 1).skip(open) {
        match token.operator() {
            Some(Operator::LeftParen) => depth += 1,
            Some(Operator::RightParen) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(EquationError::malformed(open, "unmatched '('"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn eval_str(text: &str) -> Result<f64, EquationError> {
        let mut buffer = tokenize(text);
        let end = buffer.len().saturating_sub(1);
        evaluate(&mut buffer, 0, end)
    }

    #[test]
    fn test_flat_expression() {
        assert_eq!(eval_str("2+3*4").unwrap(), 14.0);
    }

    #[test]
    fn test_single_parentheses() {
        assert_eq!(eval_str("(2+3)*4").unwrap(), 20.0);
    }

    #[test]
    fn test_nested_parentheses() {
        assert_eq!(eval_str("((1+2)*(3+4))").unwrap(), 21.0);
        assert_eq!(eval_str("2*(3+(4-1)*2)/3").unwrap(), 6.0);
    }

    #[test]
    fn test_function_of_parenthesized_argument() {
        assert_eq!(eval_str("sin(0)").unwrap(), 0.0);
        assert!((eval_str("cos(1-1)*2").unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_range_collapses_in_place() {
        let mut buffer = tokenize("1+(2*3)+4");
        let value = evaluate(&mut buffer, 2, 6).unwrap();
        assert_eq!(value, 6.0);
        assert_eq!(buffer, tokenize("1+6+4"));
    }

    #[test]
    fn test_unmatched_left_paren() {
        let err = eval_str("2*(3+4").unwrap_err();
        assert_eq!(
            err,
            EquationError::MalformedExpression {
                index: 2,
                reason: "unmatched '('".to_string()
            }
        );
    }

    #[test]
    fn test_unmatched_right_paren() {
        assert!(matches!(
            eval_str("(2+3))"),
            Err(EquationError::MalformedExpression { .. })
        ));
    }

    #[test]
    fn test_empty_parentheses() {
        assert!(matches!(
            eval_str("2+()"),
            Err(EquationError::MalformedExpression { index: 2, .. })
        ));
    }

    #[test]
    fn test_empty_expression() {
        assert!(matches!(
            eval_str(""),
            Err(EquationError::MalformedExpression { index: 0, .. })
        ));
    }
}
