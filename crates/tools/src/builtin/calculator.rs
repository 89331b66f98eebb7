//! Calculator tool with a restricted arithmetic grammar.
//!
//! Accepts decimal literals, `+ - * /`, unary signs and parentheses.
//! Identifiers, function calls and any other character are rejected.

use crate::error::ToolError;
use crate::types::Tool;
use async_trait::async_trait;

/// Reply sent when an expression cannot be evaluated.
pub const INVALID_EXPRESSION: &str = "Biểu thức không hợp lệ!";

/// Nesting limit for parentheses and unary signs.
const MAX_DEPTH: usize = 64;

/// Calculator tool for evaluating arithmetic expressions.
pub struct CalculatorTool;

impl CalculatorTool {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate `input` and render the user-facing reply.
    ///
    /// Evaluation failures never propagate; they become [`INVALID_EXPRESSION`].
    pub fn reply(&self, input: &str) -> String {
        match evaluate(input) {
            Ok(value) => format!("Kết quả: {}", format_number(value)),
            Err(_) => INVALID_EXPRESSION.into(),
        }
    }
}

impl Default for CalculatorTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calc"
    }

    async fn execute(&self, input: &str) -> Result<String, ToolError> {
        Ok(self.reply(input))
    }
}

/// Evaluate an arithmetic expression.
pub fn evaluate(input: &str) -> Result<f64, ToolError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ToolError::EmptyInput);
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expression()?;

    if parser.pos != tokens.len() {
        return Err(ToolError::InvalidExpression(format!(
            "Unexpected token at position {}",
            parser.pos
        )));
    }
    if !value.is_finite() {
        return Err(ToolError::InvalidExpression("Result is not finite".into()));
    }

    Ok(value)
}

/// Shortest round-trip decimal, without a trailing `.0` and without `-0`.
fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".into();
    }
    value.to_string()
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

fn tokenize(input: &str) -> Result<Vec<Token>, ToolError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        let token = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let mut end = start;
                let mut seen_dot = false;
                while let Some(&(idx, c)) = chars.peek() {
                    match c {
                        '0'..='9' => {}
                        '.' if !seen_dot => seen_dot = true,
                        _ => break,
                    }
                    end = idx + c.len_utf8();
                    chars.next();
                }
                let literal = &input[start..end];
                // digits ['.' digits] | '.' digits
                if literal.ends_with('.') {
                    return Err(ToolError::InvalidExpression(format!(
                        "Missing digits after decimal point in '{}'",
                        literal
                    )));
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|e| ToolError::InvalidExpression(format!("{}: {}", literal, e)))?;
                tokens.push(Token::Number(value));
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => {
                return Err(ToolError::InvalidExpression(format!(
                    "Unexpected character '{}'",
                    other
                )))
            }
        };
        tokens.push(token);
        chars.next();
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), ToolError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ToolError::InvalidExpression("Expression nested too deeply".into()));
        }
        Ok(())
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64, ToolError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<f64, ToolError> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = if op == Token::Star {
                value * rhs
            } else {
                if rhs == 0.0 {
                    return Err(ToolError::DivisionByZero);
                }
                value / rhs
            };
        }
        Ok(value)
    }

    // unary := ('+' | '-') unary | primary
    fn unary(&mut self) -> Result<f64, ToolError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary();
                self.depth -= 1;
                value
            }
            Some(Token::Minus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary().map(|v| -v);
                self.depth -= 1;
                value
            }
            _ => self.primary(),
        }
    }

    // primary := number | '(' expression ')'
    fn primary(&mut self) -> Result<f64, ToolError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::LParen) => {
                self.descend()?;
                let value = self.expression()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(ToolError::InvalidExpression("Missing closing parenthesis".into())),
                }
            }
            Some(token) => Err(ToolError::InvalidExpression(format!(
                "Unexpected token {:?}",
                token
            ))),
            None => Err(ToolError::InvalidExpression("Unexpected end of expression".into())),
        }
    }
}
