use crate::functions::traits::FitnessFunction;
use anyhow::{anyhow, bail, Result};

/// Deepest nesting of parentheses and unary signs accepted
const MAX_DEPTH: usize = 256;

/// Evaluates arithmetic over floats: `+ - * /`, unary minus, parentheses.
///
/// Division by zero, malformed numbers, unbalanced parentheses, trailing
/// input and nesting deeper than `MAX_DEPTH` are all errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticFitness;

impl FitnessFunction for ArithmeticFitness {
    fn evaluate(&self, expression: &str) -> Result<f64> {
        evaluate_arithmetic(expression)
    }
}

pub fn evaluate_arithmetic(expression: &str) -> Result<f64> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser { tokens, pos: 0, depth: 0 };
    let value = parser.parse_expr()?;
    if let Some(token) = parser.peek() {
        bail!("Unexpected token {:?} in '{}'", token, expression);
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(expression: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        let token = match c {
            ' ' | '\t' => {
                chars.next();
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '0'..='9' | '.' => {
                let mut end = start;
                while let Some(&(i, d)) = chars.peek() {
                    if !(d.is_ascii_digit() || d == '.') {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
                let literal = &expression[start..end];
                let value = literal
                    .parse::<f64>()
                    .map_err(|e| anyhow!("Bad number '{}': {}", literal, e))?;
                tokens.push(Token::Number(value));
                continue;
            }
            other => bail!("Unexpected character '{}' at {}", other, start),
        };
        tokens.push(token);
        chars.next();
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn expect(&mut self, token: Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    // expr := term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<f64> {
        let mut value = self.parse_term()?;
        loop {
            if self.expect(Token::Plus) {
                value += self.parse_term()?;
            } else if self.expect(Token::Minus) {
                value -= self.parse_term()?;
            } else {
                return Ok(value);
            }
        }
    }

    // term := factor (('*' | '/') factor)*
    fn parse_term(&mut self) -> Result<f64> {
        let mut value = self.parse_factor()?;
        loop {
            if self.expect(Token::Star) {
                value *= self.parse_factor()?;
            } else if self.expect(Token::Slash) {
                let divisor = self.parse_factor()?;
                if divisor == 0.0 {
                    bail!("division by zero");
                }
                value /= divisor;
            } else {
                return Ok(value);
            }
        }
    }

    // factor := '-' factor | '+' factor | primary
    fn parse_factor(&mut self) -> Result<f64> {
        if self.depth >= MAX_DEPTH {
            bail!("expression nested too deeply");
        }
        self.depth += 1;
        let value = self.parse_signed();
        self.depth -= 1;
        value
    }

    fn parse_signed(&mut self) -> Result<f64> {
        if self.expect(Token::Minus) {
            return Ok(-self.parse_factor()?);
        }
        if self.expect(Token::Plus) {
            return self.parse_factor();
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<f64> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::LParen) => {
                let value = self.parse_expr()?;
                if !self.expect(Token::RParen) {
                    bail!("Missing closing parenthesis");
                }
                Ok(value)
            }
            Some(token) => bail!("Unexpected token {:?}", token),
            None => bail!("Unexpected end of expression"),
        }
    }
}
