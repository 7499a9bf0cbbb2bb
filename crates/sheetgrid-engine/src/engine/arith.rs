//! Restricted arithmetic evaluator.
//!
//! Evaluates plain arithmetic text: decimal literals, `+ - * /`, `**`,
//! unary signs and parentheses. Input is first checked against a character
//! allow-list; anything outside it, and anything that fails to parse,
//! evaluates to `0`, as does nesting deeper than 256 levels. This function
//! never fails.
//!
//! # Grammar
//!
//! ```bnf
//! Expr   ::= Term ( ( "+" | "-" ) Term )*
//! Term   ::= Unary ( ( "*" | "/" ) Unary )*
//! Unary  ::= ( "-" | "+" ) Unary | Power
//! Power  ::= Factor ( "**" Unary )?
//! Factor ::= Number | "(" Expr ")"
//! Number ::= [0-9]+ ( "." [0-9]* )? | "." [0-9]+
//! ```

use log::trace;

/// Deepest nesting of parentheses, signs and exponents the parser accepts.
const MAX_NESTING: usize = 256;

/// Characters accepted by [`eval_restricted`].
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '-' | '+' | '*' | '/' | '.' | '(' | ')')
}

/// Evaluate `expr`, returning `0.0` for rejected or unparseable input.
pub fn eval_restricted(expr: &str) -> f64 {
    if let Some(bad) = expr.chars().find(|c| !is_allowed_char(*c)) {
        trace!("rejecting {expr:?}: disallowed character {bad:?}");
        return 0.0;
    }
    match parse_arithmetic(expr) {
        Ok(n) => n,
        Err(e) => {
            trace!("arithmetic parse of {expr:?} failed: {e}");
            0.0
        }
    }
}

/// Parse and evaluate allow-listed arithmetic text.
pub(crate) fn parse_arithmetic(expr: &str) -> Result<f64, String> {
    let tokens = tokenize(expr)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    match parser.peek() {
        Token::Eof => Ok(value),
        tok => Err(format!("Unexpected trailing token {:?}", tok)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Power,
    LeftParen,
    RightParen,
    Eof,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        let tok = match b {
            b'0'..=b'9' | b'.' => {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                if i < bytes.len() && bytes[i] == b'.' {
                    i += 1;
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        i += 1;
                    }
                }
                let text = &input[start..i];
                if text == "." {
                    return Err("Lone decimal point".to_string());
                }
                let n = text
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid number: {}", text))?;
                tokens.push(Token::Number(n));
                continue;
            }
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' if bytes.get(i + 1) == Some(&b'*') => {
                i += 1;
                Token::Power
            }
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'(' => Token::LeftParen,
            b')' => Token::RightParen,
            _ => return Err(format!("Unexpected character: '{}'", b as char)),
        };
        tokens.push(tok);
        i += 1;
    }

    tokens.push(Token::Eof);
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Token {
        self.tokens.get(self.pos).copied().unwrap_or(Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek();
        self.pos += 1;
        tok
    }

    fn expr(&mut self) -> Result<f64, String> {
        let mut left = self.term()?;
        loop {
            match self.peek() {
                Token::Plus => {
                    self.advance();
                    left += self.term()?;
                }
                Token::Minus => {
                    self.advance();
                    left -= self.term()?;
                }
                _ => return Ok(left),
            }
        }
    }

    fn term(&mut self) -> Result<f64, String> {
        let mut left = self.unary()?;
        loop {
            match self.peek() {
                Token::Star => {
                    self.advance();
                    left *= self.unary()?;
                }
                Token::Slash => {
                    self.advance();
                    left /= self.unary()?;
                }
                _ => return Ok(left),
            }
        }
    }

    /// Every nested sub-expression passes through here, so this bounds the
    /// recursion.
    fn unary(&mut self) -> Result<f64, String> {
        if self.depth >= MAX_NESTING {
            return Err(format!("Nesting deeper than {}", MAX_NESTING));
        }
        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<f64, String> {
        match self.peek() {
            Token::Minus => {
                self.advance();
                Ok(-self.unary()?)
            }
            Token::Plus => {
                self.advance();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, String> {
        let base = self.factor()?;
        if self.peek() == Token::Power {
            self.advance();
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn factor(&mut self) -> Result<f64, String> {
        match self.advance() {
            Token::Number(n) => Ok(n),
            Token::LeftParen => {
                let value = self.expr()?;
                match self.advance() {
                    Token::RightParen => Ok(value),
                    tok => Err(format!("Expected ')', found {:?}", tok)),
                }
            }
            tok => Err(format!("Expected a number or '(', found {:?}", tok)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(eval_restricted("1+2*3"), 7.0);
        assert_eq!(eval_restricted("(1+2)*3"), 9.0);
        assert_eq!(eval_restricted("10-4-3"), 3.0);
        assert_eq!(eval_restricted("64/4/2"), 8.0);
        assert_eq!(eval_restricted("2**3**2"), 512.0);
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(eval_restricted("-3"), -3.0);
        assert_eq!(eval_restricted("--3"), 3.0);
        assert_eq!(eval_restricted("2--3"), 5.0);
        assert_eq!(eval_restricted("+4*-2"), -8.0);
        assert_eq!(eval_restricted("-(2+3)"), -5.0);
        assert_eq!(eval_restricted("-2**2"), -4.0);
        assert_eq!(eval_restricted("2**-1"), 0.5);
    }

    #[test]
    fn test_decimal_literals() {
        assert_eq!(eval_restricted("1.5*2"), 3.0);
        assert_eq!(eval_restricted(".5+1."), 1.5);
        assert_eq!(eval_restricted("007"), 7.0);
    }

    #[test]
    fn test_division_by_zero_follows_ieee() {
        assert_eq!(eval_restricted("1/0"), f64::INFINITY);
        assert_eq!(eval_restricted("-1/0"), f64::NEG_INFINITY);
        assert!(eval_restricted("0/0").is_nan());
    }

    #[test]
    fn test_parse_failures_are_zero() {
        for input in ["", "(", "(1+2", "1+2)", "1+", "*2", "1.2.3", ".", "()", "1//2", "2***3"] {
            assert_eq!(eval_restricted(input), 0.0, "input {input:?}");
        }
    }

    #[test]
    fn test_deep_nesting_is_zero() {
        let parens = format!("{}1{}", "(".repeat(200_000), ")".repeat(200_000));
        assert_eq!(eval_restricted(&parens), 0.0);
        assert_eq!(eval_restricted(&format!("{}1", "-".repeat(200_000))), 0.0);
        assert_eq!(eval_restricted(&format!("2{}", "**2".repeat(200_000))), 0.0);
    }

    #[test]
    fn test_moderate_nesting_still_evaluates() {
        let parens = format!("{}7{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(eval_restricted(&parens), 7.0);
        assert_eq!(eval_restricted(&format!("{}3", "-".repeat(100))), 3.0);
        assert!(parse_arithmetic(&format!("{}1", "-".repeat(MAX_NESTING))).is_err());
    }

    #[test]
    fn test_disallowed_characters_are_zero() {
        for input in ["1 + 2", "A1", "alert(1)", "1e3", "Infinity", "1,2", "2^3", "1%2"] {
            assert_eq!(eval_restricted(input), 0.0, "input {input:?}");
        }
    }

    #[test]
    fn test_parse_arithmetic_reports_errors() {
        assert!(parse_arithmetic("(1").is_err());
        assert_eq!(parse_arithmetic("6/3"), Ok(2.0));
    }
}
