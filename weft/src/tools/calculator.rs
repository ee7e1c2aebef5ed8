//! Arithmetic tool.
//!
//! Grammar (usual precedence, `^`/`**` right-associative and binding tighter than unary minus):
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/' | '%') unary)*
//! unary  := ('-' | '+') unary | power
//! power  := atom (('^' | '**') unary)?
//! atom   := number | '(' expr ')'
//! ```

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{required_str, Tool, ToolError, ToolSpec};

pub const TOOL_CALCULATOR: &str = "calculator";

/// Nesting limit for parentheses, signs and exponent chains; the parser recurses per level.
const MAX_DEPTH: usize = 256;

/// Evaluates arithmetic expressions. Arguments: `{"expression": "142 * 57"}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

#[async_trait]
impl Tool for Calculator {
    fn name(&self) -> &str {
        TOOL_CALCULATOR
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            TOOL_CALCULATOR,
            "Evaluate an arithmetic expression. Supports + - * / % ^ and parentheses.",
            json!({
                "type": "object",
                "properties": {
                    "expression": {
                        "type": "string",
                        "description": "Expression to evaluate, e.g. \"(2 + 3) * 4\""
                    }
                },
                "required": ["expression"]
            }),
        )
    }

    async fn call(&self, args: Value) -> Result<String, ToolError> {
        let expression = required_str(&args, "expression")?;
        let value = evaluate(expression)?;
        Ok(format!("The result of {} is {}", expression, format_number(value)))
    }
}

/// Evaluates `input`. Parse errors are `InvalidInput`; division by zero and
/// non-finite results are `Failed`.
pub fn evaluate(input: &str) -> Result<f64, ToolError> {
    let mut parser = Parser {
        chars: input.chars().filter(|c| !c.is_whitespace()).collect(),
        pos: 0,
        depth: 0,
    };
    if parser.chars.is_empty() {
        return Err(ToolError::InvalidInput("empty expression".into()));
    }
    let value = parser.expr()?;
    if let Some(c) = parser.peek() {
        return Err(ToolError::InvalidInput(format!(
            "unexpected '{}' at position {}",
            c, parser.pos
        )));
    }
    if !value.is_finite() {
        return Err(ToolError::Failed("result is not a finite number".into()));
    }
    Ok(value)
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn enter(&mut self) -> Result<(), ToolError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ToolError::InvalidInput("expression nested too deeply".into()));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<f64, ToolError> {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value += self.term()?;
            } else if self.eat('-') {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> Result<f64, ToolError> {
        let mut value = self.unary()?;
        loop {
            // `**` is power, handled below `unary`
            if self.peek() == Some('*') && self.chars.get(self.pos + 1) != Some(&'*') {
                self.pos += 1;
                value *= self.unary()?;
            } else if self.eat('/') {
                let rhs = self.unary()?;
                if rhs == 0.0 {
                    return Err(ToolError::Failed("division by zero".into()));
                }
                value /= rhs;
            } else if self.eat('%') {
                let rhs = self.unary()?;
                if rhs == 0.0 {
                    return Err(ToolError::Failed("modulo by zero".into()));
                }
                value %= rhs;
            } else {
                return Ok(value);
            }
        }
    }

    fn unary(&mut self) -> Result<f64, ToolError> {
        self.enter()?;
        let value = if self.eat('-') {
            self.unary().map(|v| -v)
        } else if self.eat('+') {
            self.unary()
        } else {
            self.power()
        };
        self.depth -= 1;
        value
    }

    fn power(&mut self) -> Result<f64, ToolError> {
        let base = self.atom()?;
        let is_pow = if self.eat('^') {
            true
        } else if self.peek() == Some('*') && self.chars.get(self.pos + 1) == Some(&'*') {
            self.pos += 2;
            true
        } else {
            false
        };
        if is_pow {
            Ok(base.powf(self.unary()?))
        } else {
            Ok(base)
        }
    }

    fn atom(&mut self) -> Result<f64, ToolError> {
        if self.eat('(') {
            self.enter()?;
            let value = self.expr()?;
            self.depth -= 1;
            if !self.eat(')') {
                return Err(ToolError::InvalidInput(format!(
                    "expected ')' at position {}",
                    self.pos
                )));
            }
            return Ok(value);
        }
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(match self.peek() {
                Some(c) => ToolError::InvalidInput(format!(
                    "unexpected '{}' at position {}",
                    c, self.pos
                )),
                None => ToolError::InvalidInput("unexpected end of expression".into()),
            });
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        literal
            .parse::<f64>()
            .map_err(|_| ToolError::InvalidInput(format!("invalid number '{}'", literal)))
    }
}
