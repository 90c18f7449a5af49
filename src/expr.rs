//! Lexing and recursive-descent evaluation of the small arithmetic
//! grammar accepted for MIN/MAX on the command line: decimal literals
//! (with optional scientific `e`/`E` notation), infix `+ - *`, and
//! right-associative exponentiation (`**` or `^`). Whitespace is
//! ignored. This mirrors `expr.c`'s grammar but evaluates with checked
//! arithmetic instead of silently wrapping on overflow.
//!
//!   sum  -> term ((+|-) term)*
//!   term -> exp ((*) exp)*
//!   exp  -> literal (('**'|'^') exp)?

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Literal(u64),
    Add,
    Sub,
    Mul,
    Pow,
}

fn tokenize(expr: &str) -> Result<Vec<Token>, EngineError> {
    let chars: Vec<char> = expr.chars().collect();
    let mut i = 0;
    let mut toks = Vec::new();

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let mut value: u64 = chars[start..i]
                .iter()
                .collect::<String>()
                .parse()
                .map_err(|_| EngineError::Overflow)?;

            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                i += 1;
                let exp_start = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                if exp_start == i {
                    return Err(EngineError::Overflow);
                }
                let exp: u32 = chars[exp_start..i]
                    .iter()
                    .collect::<String>()
                    .parse()
                    .map_err(|_| EngineError::Overflow)?;
                for _ in 0..exp {
                    value = value.checked_mul(10).ok_or(EngineError::Overflow)?;
                }
            }
            toks.push(Token::Literal(value));
        } else {
            match c {
                '+' => {
                    toks.push(Token::Add);
                    i += 1;
                }
                '-' => {
                    toks.push(Token::Sub);
                    i += 1;
                }
                '*' => {
                    if i + 1 < chars.len() && chars[i + 1] == '*' {
                        toks.push(Token::Pow);
                        i += 2;
                    } else {
                        toks.push(Token::Mul);
                        i += 1;
                    }
                }
                '^' => {
                    toks.push(Token::Pow);
                    i += 1;
                }
                _ => return Err(EngineError::Overflow),
            }
        }
    }
    Ok(toks)
}

struct Parser<'a> {
    toks: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token> {
        self.toks.get(self.pos).copied()
    }

    fn parse_exp(&mut self) -> Result<u64, EngineError> {
        let base = match self.peek() {
            Some(Token::Literal(v)) => {
                self.pos += 1;
                v
            }
            _ => return Err(EngineError::Overflow),
        };
        if self.peek() == Some(Token::Pow) {
            self.pos += 1;
            let power = self.parse_exp()?;
            let mut result: u64 = 1;
            for _ in 0..power {
                result = result.checked_mul(base).ok_or(EngineError::Overflow)?;
            }
            Ok(result)
        } else {
            Ok(base)
        }
    }

    fn parse_term(&mut self) -> Result<u64, EngineError> {
        let mut result = self.parse_exp()?;
        while self.peek() == Some(Token::Mul) {
            self.pos += 1;
            let rhs = self.parse_exp()?;
            result = result.checked_mul(rhs).ok_or(EngineError::Overflow)?;
        }
        Ok(result)
    }

    fn parse_sum(&mut self) -> Result<u64, EngineError> {
        let mut result = self.parse_term()?;
        loop {
            match self.peek() {
                Some(Token::Add) => {
                    self.pos += 1;
                    let rhs = self.parse_term()?;
                    result = result.checked_add(rhs).ok_or(EngineError::Overflow)?;
                }
                Some(Token::Sub) => {
                    self.pos += 1;
                    let rhs = self.parse_term()?;
                    result = result.checked_sub(rhs).ok_or(EngineError::Overflow)?;
                }
                _ => break,
            }
        }
        Ok(result)
    }
}

/// Evaluates an arithmetic expression (decimal literals, `+ - *`, and
/// right-associative `**`/`^`) to a `u64`, rejecting overflow and
/// trailing garbage rather than wrapping or ignoring it.
pub fn evaluate(expr: &str) -> Result<u64, EngineError> {
    let toks = tokenize(expr)?;
    let mut parser = Parser { toks: &toks, pos: 0 };
    let result = parser.parse_sum()?;
    if parser.pos != toks.len() {
        return Err(EngineError::Overflow);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_plain_literal() {
        assert_eq!(evaluate("1000").unwrap(), 1000);
    }

    #[test]
    fn evaluates_addition_and_subtraction() {
        assert_eq!(evaluate("10 + 5 - 3").unwrap(), 12);
    }

    #[test]
    fn evaluates_multiplication() {
        assert_eq!(evaluate("6 * 7").unwrap(), 42);
    }

    #[test]
    fn evaluates_right_associative_power() {
        assert_eq!(evaluate("2^3^2").unwrap(), 2u64.pow(3u32.pow(2)));
        assert_eq!(evaluate("2**10").unwrap(), 1024);
    }

    #[test]
    fn evaluates_scientific_notation() {
        assert_eq!(evaluate("2e3").unwrap(), 2000);
    }

    #[test]
    fn honors_operator_precedence() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14);
        assert_eq!(evaluate("2 * 3 ^ 2").unwrap(), 18);
    }

    #[test]
    fn ignores_whitespace() {
        assert_eq!(evaluate("  2 +   2  ").unwrap(), 4);
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(evaluate("5 5").is_err());
    }

    #[test]
    fn rejects_unknown_character() {
        assert!(evaluate("5 / 2").is_err());
    }

    #[test]
    fn rejects_overflowing_power() {
        assert!(evaluate("2^128").is_err());
    }

    #[test]
    fn billion_plus_thousand_matches_literal() {
        assert_eq!(evaluate("10^9 + 1000").unwrap(), 1_000_001_000);
    }
}
