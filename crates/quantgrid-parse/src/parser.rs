//! Unified precedence-climbing parser: the full grammar with `+ - * /`,
//! parentheses, cell references, variables, and unit-bearing quantity
//! literals.
//!
//! Grammar:
//! ```text
//! Stmt   := IDENT '=' AddSub | AddSub
//! AddSub := MulDiv (('+'|'-') MulDiv)*
//! MulDiv := Primary (('*'|'/') Primary)*
//! Primary:= NUMBER [UNIT] | CELLREF | IDENT | '(' AddSub ')'
//! ```
//! Assignment is recognised only when the entire token stream begins with
//! `IDENT '='`; it is not valid inside parentheses. No error recovery: one
//! malformed line yields one positioned error.

use smallvec::SmallVec;
use std::error::Error;
use std::fmt::{self, Display};

use quantgrid_common::{Quantity, parse_address};

use crate::ast::{BinaryOp, Expr, Stmt};
use crate::tokenizer::{Token, TokenKind, tokenize};

/// A positioned parse failure for one line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    pub message: String,
    pub position: Option<usize>,
}

impl ParserError {
    pub(crate) fn new(message: impl Into<String>, position: Option<usize>) -> Self {
        ParserError {
            message: message.into(),
            position,
        }
    }

    fn at_token(message: impl Into<String>, token: &Token) -> Self {
        ParserError::new(message, Some(token.start))
    }
}

impl Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(f, "parse error at offset {pos}: {}", self.message),
            None => write!(f, "parse error: {}", self.message),
        }
    }
}

impl Error for ParserError {}

/// Parse a full line of text under the unified grammar.
pub fn parse_unified(text: &str) -> Result<Stmt, ParserError> {
    let tokens = tokenize(text);
    parse_tokens(&tokens)
}

/// Parse an already-lexed token stream under the unified grammar.
pub fn parse_tokens(tokens: &[Token]) -> Result<Stmt, ParserError> {
    let significant: SmallVec<[&Token; 16]> = tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Whitespace)
        .collect();

    if significant.is_empty() {
        return Err(ParserError::new("empty expression", None));
    }

    // Top-level assignment: the whole stream must begin IDENT '='.
    if significant.len() >= 2
        && significant[0].kind == TokenKind::Ident
        && significant[1].kind == TokenKind::Equal
    {
        let name = significant[0].lexeme.clone();
        let mut cursor = Cursor {
            toks: &significant[2..],
            pos: 0,
        };
        let expr = cursor.parse_add_sub()?;
        cursor.expect_end()?;
        return Ok(Stmt::Assignment { name, expr });
    }

    let mut cursor = Cursor {
        toks: &significant,
        pos: 0,
    };
    let expr = cursor.parse_add_sub()?;
    cursor.expect_end()?;
    Ok(Stmt::Expression(expr))
}

struct Cursor<'a> {
    toks: &'a [&'a Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.toks.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let tok = self.peek()?;
        self.pos += 1;
        Some(tok)
    }

    fn expect_end(&self) -> Result<(), ParserError> {
        match self.peek() {
            None => Ok(()),
            // A leftover Unknown token keeps its lexing diagnostic wherever
            // it surfaces, not only in primary position.
            Some(tok) if tok.kind == TokenKind::Unknown => Err(ParserError::at_token(
                format!("unrecognized token '{}'", tok.lexeme),
                tok,
            )),
            Some(tok) => Err(ParserError::at_token(
                format!("unexpected token '{}'", tok.lexeme),
                tok,
            )),
        }
    }

    fn parse_add_sub(&mut self) -> Result<Expr, ParserError> {
        let mut left = self.parse_mul_div()?;
        while let Some(op) = self.peek_binary(&[TokenKind::Plus, TokenKind::Minus]) {
            self.pos += 1;
            let right = self.parse_mul_div()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_mul_div(&mut self) -> Result<Expr, ParserError> {
        let mut left = self.parse_primary()?;
        while let Some(op) = self.peek_binary(&[TokenKind::Star, TokenKind::Slash]) {
            self.pos += 1;
            let right = self.parse_primary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn peek_binary(&self, kinds: &[TokenKind]) -> Option<BinaryOp> {
        let tok = self.peek()?;
        if !kinds.contains(&tok.kind) {
            return None;
        }
        Some(match tok.kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            _ => unreachable!(),
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, ParserError> {
        let Some(tok) = self.bump() else {
            return Err(ParserError::new("unexpected end of expression", None));
        };

        match tok.kind {
            TokenKind::Number => {
                let value = tok.value.ok_or_else(|| {
                    ParserError::at_token(format!("invalid number '{}'", tok.lexeme), tok)
                })?;
                self.fuse_unit(value)
            }
            TokenKind::CellRef => match parse_address(&tok.lexeme) {
                Some(addr) => Ok(Expr::CellRef(addr)),
                None => Err(ParserError::at_token(
                    format!("invalid cell reference '{}'", tok.lexeme),
                    tok,
                )),
            },
            TokenKind::Ident => Ok(Expr::Variable(tok.lexeme.clone())),
            TokenKind::LParen => {
                let expr = self.parse_add_sub()?;
                match self.bump() {
                    Some(close) if close.kind == TokenKind::RParen => Ok(expr),
                    Some(other) => Err(ParserError::at_token(
                        format!("expected ')', found '{}'", other.lexeme),
                        other,
                    )),
                    None => Err(ParserError::new("missing closing parenthesis", None)),
                }
            }
            TokenKind::Unknown => Err(ParserError::at_token(
                format!("unrecognized token '{}'", tok.lexeme),
                tok,
            )),
            _ => Err(ParserError::at_token(
                format!("unexpected token '{}'", tok.lexeme),
                tok,
            )),
        }
    }

    /// A number followed by a unit-shaped token fuses into one quantity
    /// literal. Identifiers double as unit symbols only when the unit table
    /// knows them; otherwise they are left for the grammar (and will surface
    /// as an unexpected-token error, since juxtaposition is not an operator).
    fn fuse_unit(&mut self, value: f64) -> Result<Expr, ParserError> {
        match self.peek() {
            Some(tok) if tok.kind == TokenKind::Unit => {
                self.pos += 1;
                match Quantity::from_unit(value, &tok.lexeme) {
                    Some(q) => Ok(Expr::Literal(q)),
                    None => Err(ParserError::at_token(
                        format!("unknown unit '{}'", tok.lexeme),
                        tok,
                    )),
                }
            }
            Some(tok) if tok.kind == TokenKind::Ident => match Quantity::from_unit(value, &tok.lexeme)
            {
                Some(q) => {
                    self.pos += 1;
                    Ok(Expr::Literal(q))
                }
                None => Ok(Expr::Literal(Quantity::dimensionless(value))),
            },
            _ => Ok(Expr::Literal(Quantity::dimensionless(value))),
        }
    }
}
