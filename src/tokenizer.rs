//! Conversion of expression text into a flat token template.
//!
//! The tokenizer scans the input once, left to right, and matches greedily in this order:
//!
//! 1. a run of decimal digits with at most one decimal point, as a constant
//! 2. the letter `e`, as Euler's number
//! 3. the single characters `+ - * / ^ ( ) x`
//! 4. the function keywords, longest first so that `arcsin` wins over `sin`
//!
//! Anything else is skipped. No syntax checking happens here; an operator without an
//! operand or an unbalanced parenthesis is only detected when the template is reduced.

use crate::token::{Function, Operator, Token, EULER};

/// Result of scanning a line of text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scan {
    /// Tokens in source order
    pub tokens: Vec<Token>,
    /// Byte offset and character of every skipped character that is not whitespace
    pub skipped: Vec<(usize, char)>,
}

/// Converts expression text into its token template.
///
/// # Example
/// ```
/// use flatexpr::tokenizer::tokenize;
/// use flatexpr::token::{Operator, Token};
///
/// let tokens = tokenize("2 * x");
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Constant(2.0),
///         Token::Operator(Operator::Mul),
///         Token::Operator(Operator::Variable),
///     ]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    scan(text).tokens
}

/// Tokenizes `text` and also reports which characters were ignored.
///
/// Whitespace is not reported. The token sequence is identical to [`tokenize`].
pub fn scan(text: &str) -> Scan {
    let mut result = Scan::default();
    let mut i = 0;

    while let Some(c) = text[i..].chars().next() {
        if c.is_ascii_digit() {
            let len = number_length(&text[i..]);
            let literal = text[i..i + len].trim_end_matches('.');
            match literal.parse::<f64>() {
                Ok(value) => result.tokens.push(Token::Constant(value)),
                Err(_) => result.skipped.push((i, c)),
            }
            i += len;
        } else if c == 'e' {
            result.tokens.push(Token::Constant(EULER));
            i += 1;
        } else if let Some(op) = Operator::from_char(c) {
            result.tokens.push(Token::Operator(op));
            i += 1;
        } else if let Some(function) = match_function(&text[i..]) {
            result
                .tokens
                .push(Token::Operator(Operator::Function(function)));
            i += function.name().len();
        } else {
            if !c.is_whitespace() {
                result.skipped.push((i, c));
            }
            i += c.len_utf8();
        }
    }

    result
}

/// Length in bytes of the number literal at the start of `rest`.
fn number_length(rest: &str) -> usize {
    let mut seen_point = false;
    rest.bytes()
        .take_while(|&b| {
            if b == b'.' && !seen_point {
                seen_point = true;
                true
            } else {
                b.is_ascii_digit()
            }
        })
        .count()
}

fn match_function(rest: &str) -> Option<Function> {
    Function::ALL
        .into_iter()
        .find(|function| rest.starts_with(function.name()))
}
