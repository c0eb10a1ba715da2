//! Scale-factor expressions.
//!
//! Scale factors may be written as arithmetic, e.g. `1/1024` or `1e6`. Only
//! numeric literals, `+ - * /`, unary sign and parentheses are accepted;
//! the expression is parsed by precedence climbing and evaluated as `f64`.

use crate::error::{Result, SpecError};
use crate::parse::RawScale;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul | BinOp::Div => 2,
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinOp::Add => lhs + rhs,
            BinOp::Sub => lhs - rhs,
            BinOp::Mul => lhs * rhs,
            BinOp::Div => lhs / rhs,
        }
    }
}

fn tokenize(input: &str) -> std::result::Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut end = start;
                let mut prev = ch;
                while let Some(&(i, c)) = chars.peek() {
                    let exponent_sign = (c == '+' || c == '-') && (prev == 'e' || prev == 'E');
                    if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || exponent_sign {
                        end = i + c.len_utf8();
                        prev = c;
                        chars.next();
                    } else {
                        break;
                    }
                }
                let literal = &input[start..end];
                let n: f64 = literal
                    .parse()
                    .map_err(|_| format!("invalid number '{}'", literal))?;
                tokens.push(Token::Num(n));
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            other => return Err(format!("unexpected character '{}'", other)),
        }
    }

    tokens.push(Token::End);
    Ok(tokens)
}

/// Deepest nesting of parentheses and unary signs accepted in one expression.
const MAX_DEPTH: usize = 256;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Token {
        self.tokens.get(self.pos).copied().unwrap_or(Token::End)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn parse_expr(&mut self, min_prec: u8) -> std::result::Result<f64, String> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.peek() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                _ => break,
            };
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            // all operators are left associative
            let right = self.parse_expr(prec + 1)?;
            left = op.apply(left, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> std::result::Result<f64, String> {
        self.depth += 1;
        let value = self.parse_unary_inner();
        self.depth -= 1;
        value
    }

    fn parse_unary_inner(&mut self) -> std::result::Result<f64, String> {
        if self.depth > MAX_DEPTH {
            return Err("expression nested too deeply".into());
        }
        match self.peek() {
            Token::Minus => {
                self.advance();
                Ok(-self.parse_unary()?)
            }
            Token::Plus => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_atom(),
        }
    }

    fn parse_atom(&mut self) -> std::result::Result<f64, String> {
        match self.advance() {
            Token::Num(n) => Ok(n),
            Token::LParen => {
                let inner = self.parse_expr(0)?;
                if self.advance() != Token::RParen {
                    return Err("expected ')'".into());
                }
                Ok(inner)
            }
            Token::End => Err("unexpected end of expression".into()),
            other => Err(format!("unexpected token {:?}", other)),
        }
    }
}

/// Evaluate an arithmetic expression string.
pub fn eval_expr(expr: &str) -> Result<f64> {
    let invalid = |message: String| SpecError::InvalidScale {
        expr: expr.to_string(),
        message,
    };

    let tokens = tokenize(expr).map_err(invalid)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.parse_expr(0).map_err(invalid)?;
    if parser.peek() != Token::End {
        return Err(invalid(format!("unexpected trailing {:?}", parser.peek())));
    }
    if !value.is_finite() {
        return Err(invalid(format!("evaluates to {}", value)));
    }
    Ok(value)
}

impl RawScale {
    /// The numeric value of this scale factor.
    pub fn evaluate(&self) -> Result<f64> {
        match self {
            RawScale::Number(n) if n.is_finite() => Ok(*n),
            RawScale::Number(n) => Err(SpecError::InvalidScale {
                expr: n.to_string(),
                message: "not a finite number".into(),
            }),
            RawScale::Expr(expr) => eval_expr(expr),
        }
    }

    /// True for an empty expression string, which counts as "not set".
    pub fn is_blank(&self) -> bool {
        matches!(self, RawScale::Expr(s) if s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_by_power_of_two() {
        assert_eq!(eval_expr("1/1024").unwrap(), 0.0009765625);
    }

    #[test]
    fn exponent_literals() {
        assert_eq!(eval_expr("1e6").unwrap(), 1_000_000.0);
        assert_eq!(eval_expr("2.5E-3").unwrap(), 0.0025);
        assert_eq!(eval_expr("1e+3 / 10").unwrap(), 100.0);
    }

    #[test]
    fn precedence_and_parentheses() {
        assert_eq!(eval_expr("1 + 2 * 3").unwrap(), 7.0);
        assert_eq!(eval_expr("(1 + 2) * 3").unwrap(), 9.0);
        assert_eq!(eval_expr("8 / 4 / 2").unwrap(), 1.0);
        assert_eq!(eval_expr("10 - 4 - 3").unwrap(), 3.0);
    }

    #[test]
    fn unary_sign() {
        assert_eq!(eval_expr("-2 * -3").unwrap(), 6.0);
        assert_eq!(eval_expr("+.5").unwrap(), 0.5);
    }

    #[test]
    fn rejects_identifiers_and_calls() {
        for bad in ["__import__('os')", "x * 2", "2 ** 3", "abs(1)"] {
            let err = eval_expr(bad).unwrap_err();
            assert_eq!(err.code(), "R001", "{} should be rejected", bad);
        }
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "1 +", "(1 + 2", "1 2", "1..2", "1e"] {
            assert!(eval_expr(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn rejects_deep_nesting() {
        let parens = "(".repeat(100_000);
        assert_eq!(eval_expr(&parens).unwrap_err().code(), "R001");

        let closed = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert_eq!(eval_expr(&closed).unwrap_err().code(), "R001");

        let signs = format!("{}1", "-".repeat(100_000));
        assert_eq!(eval_expr(&signs).unwrap_err().code(), "R001");
    }

    #[test]
    fn moderate_nesting_is_accepted() {
        let expr = format!("{}2{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(eval_expr(&expr).unwrap(), 2.0);
        assert_eq!(eval_expr("--+-4").unwrap(), -4.0);
    }

    #[test]
    fn rejects_non_finite() {
        assert!(eval_expr("1/0").is_err());
    }

    #[test]
    fn number_scales_pass_through() {
        assert_eq!(RawScale::Number(0.5).evaluate().unwrap(), 0.5);
        assert!(RawScale::Expr("  ".into()).is_blank());
    }
}
