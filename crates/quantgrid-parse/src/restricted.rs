//! Restricted fast-path grammar: addition and subtraction of quantity
//! literals only, with an optional leading assignment.
//!
//! The point of this grammar is to answer the common `5 in + 4 in` shape
//! without running the full parser. It refuses anything it cannot be sure
//! about: a `*` or `/` anywhere in the stream yields
//! [`RestrictedParse::NeedsFullGrammar`] before any tree is built, and an
//! identifier in term position fails (this grammar never resolves names).
//! Both outcomes are values for the caller to branch on, never errors
//! thrown through the pipeline.

use smallvec::SmallVec;

use quantgrid_common::{Quantity, is_known_unit};

use crate::ast::{BinaryOp, Expr, Stmt};
use crate::parser::ParserError;
use crate::tokenizer::{Token, TokenKind};

/// Outcome of the fast grammar. `NeedsFullGrammar` is control flow for
/// parser selection, not a user-visible condition.
#[derive(Debug, Clone, PartialEq)]
pub enum RestrictedParse {
    Parsed(Stmt),
    NeedsFullGrammar,
    Failed(ParserError),
}

/// Attempt the restricted grammar over a lexed token stream.
pub fn parse_restricted(tokens: &[Token]) -> RestrictedParse {
    let significant: SmallVec<[&Token; 16]> = tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Whitespace)
        .collect();

    // Bail to the full grammar before building anything: this avoids a
    // wrong partial answer and keeps correct-but-simple input single-parse.
    if significant
        .iter()
        .any(|t| matches!(t.kind, TokenKind::Star | TokenKind::Slash))
    {
        return RestrictedParse::NeedsFullGrammar;
    }

    match parse_stmt(&significant) {
        Ok(stmt) => RestrictedParse::Parsed(stmt),
        Err(err) => RestrictedParse::Failed(err),
    }
}

fn parse_stmt(toks: &[&Token]) -> Result<Stmt, ParserError> {
    if toks.is_empty() {
        return Err(ParserError::new("empty expression", None));
    }

    if toks.len() >= 2 && toks[0].kind == TokenKind::Ident && toks[1].kind == TokenKind::Equal {
        let name = toks[0].lexeme.clone();
        let expr = parse_expr(&toks[2..])?;
        return Ok(Stmt::Assignment { name, expr });
    }

    Ok(Stmt::Expression(parse_expr(toks)?))
}

/// `Expr := Term (('+'|'-') Term)*`
fn parse_expr(toks: &[&Token]) -> Result<Expr, ParserError> {
    let mut pos = 0;
    let mut left = parse_term(toks, &mut pos)?;

    while pos < toks.len() {
        let op = match toks[pos].kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            _ => {
                return Err(ParserError::new(
                    format!("unexpected token '{}'", toks[pos].lexeme),
                    Some(toks[pos].start),
                ));
            }
        };
        pos += 1;
        let right = parse_term(toks, &mut pos)?;
        left = Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
    }

    Ok(left)
}

/// `Term := NUMBER [UNIT]` — nothing else. Identifiers land here when a
/// line like `A + B` is tried on the fast path first; resolving them is the
/// unified grammar's job, so the term fails.
fn parse_term(toks: &[&Token], pos: &mut usize) -> Result<Expr, ParserError> {
    let Some(tok) = toks.get(*pos) else {
        return Err(ParserError::new("unexpected end of expression", None));
    };

    match tok.kind {
        TokenKind::Number => {
            let value = tok.value.ok_or_else(|| {
                ParserError::new(format!("invalid number '{}'", tok.lexeme), Some(tok.start))
            })?;
            *pos += 1;

            let unit = toks.get(*pos).filter(|t| {
                t.kind == TokenKind::Unit
                    || (t.kind == TokenKind::Ident && is_known_unit(&t.lexeme))
            });
            match unit {
                Some(unit_tok) => {
                    *pos += 1;
                    match Quantity::from_unit(value, &unit_tok.lexeme) {
                        Some(q) => Ok(Expr::Literal(q)),
                        None => Err(ParserError::new(
                            format!("unknown unit '{}'", unit_tok.lexeme),
                            Some(unit_tok.start),
                        )),
                    }
                }
                None => Ok(Expr::Literal(Quantity::dimensionless(value))),
            }
        }
        TokenKind::Ident | TokenKind::CellRef => Err(ParserError::new(
            format!("unknown identifier '{}'", tok.lexeme),
            Some(tok.start),
        )),
        _ => Err(ParserError::new(
            format!("unexpected token '{}'", tok.lexeme),
            Some(tok.start),
        )),
    }
}
