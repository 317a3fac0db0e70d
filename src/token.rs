//! Token representation for flattened expressions.
//!
//! An expression is never turned into a tree. The tokenizer produces a flat `Vec<Token>`
//! and every sub-expression is addressed by an inclusive index range into that vector.
//! Reduction rewrites the vector in place, so the only structure that exists is the
//! order of the tokens.

use std::fmt;

/// Value of Euler's number used for the `e` constant.
pub const EULER: f64 = std::f64::consts::E;

/// A single lexical unit of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A literal number, Euler's constant, or the value of a collapsed sub-expression
    Constant(f64),
    /// An operator, a parenthesis, a named function or the free variable
    Operator(Operator),
}

/// Every non-constant token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Pow,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `x`, replaced by a constant before reduction starts
    Variable,
    /// A named unary function applied to the value on its right
    Function(Function),
}

/// Named unary functions. Arguments are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Cot,
    Arcsin,
    Arccos,
    Arctan,
    Arccot,
}

impl Function {
    /// All functions, longest keyword first so that `arcsin` is tried before `sin`.
    pub const ALL: [Function; 8] = [
        Function::Arcsin,
        Function::Arccos,
        Function::Arctan,
        Function::Arccot,
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Cot,
    ];

    /// Keyword used for the function in expression text.
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Cot => "cot",
            Function::Arcsin => "arcsin",
            Function::Arccos => "arccos",
            Function::Arctan => "arctan",
            Function::Arccot => "arccot",
        }
    }
}

impl Operator {
    /// Maps a single character to its operator, if it is one.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            '(' => Some(Operator::LeftParen),
            ')' => Some(Operator::RightParen),
            'x' => Some(Operator::Variable),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "^",
            Operator::LeftParen => "(",
            Operator::RightParen => ")",
            Operator::Variable => "x",
            Operator::Function(function) => function.name(),
        }
    }
}

impl Token {
    /// Returns the value of a constant token.
    pub fn constant(&self) -> Option<f64> {
        match self {
            Token::Constant(value) => Some(*value),
            Token::Operator(_) => None,
        }
    }

    /// Returns the operator of an operator token.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Token::Constant(_) => None,
            Token::Operator(op) => Some(*op),
        }
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        self.operator() == Some(op)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Constant(value) => write!(f, "{value:.6}"),
            Token::Operator(op) => write!(f, "'{op}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_functions_longest_first() {
        let lengths: Vec<usize> = Function::ALL.iter().map(|f| f.name().len()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_operator_symbols() {
        for c in "+-*/^()x".chars() {
            let op = Operator::from_char(c).unwrap();
            assert_eq!(op.symbol(), c.to_string());
        }
        assert_eq!(Operator::from_char('y'), None);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::Constant(1.5).to_string(), "1.500000");
        assert_eq!(
            Token::Operator(Operator::Function(Function::Arccot)).to_string(),
            "'arccot'"
        );
    }
}
