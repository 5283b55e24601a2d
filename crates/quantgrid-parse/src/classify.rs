//! Heuristic line classification.
//!
//! Classification is a pure function of the raw text, deliberately
//! independent of whether the line later parses: the recompute engine needs
//! a stable answer to "should evaluation be attempted at all" before any
//! grammar runs.

use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineKind {
    /// `IDENT '=' REST` — defines a name for later lines.
    Definition,
    /// Contains an operator, a call-like paren, or a cell-reference-shaped
    /// word; worth attempting evaluation.
    Expression,
    /// Anything else: prose, headings, annotations. Never evaluated.
    #[default]
    Text,
}

impl Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Classify one line of raw text.
pub fn classify_line(text: &str) -> LineKind {
    if is_definition(text) {
        return LineKind::Definition;
    }
    if text
        .chars()
        .any(|c| matches!(c, '+' | '-' | '*' | '/' | '('))
    {
        return LineKind::Expression;
    }
    if text
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(is_cellref_shaped)
    {
        return LineKind::Expression;
    }
    LineKind::Text
}

/// `IDENT '=' …`: a leading letter run, optional spaces, then one `=`.
fn is_definition(text: &str) -> bool {
    let trimmed = text.trim_start();
    let ident_len = trimmed
        .bytes()
        .take_while(u8::is_ascii_alphabetic)
        .count();
    if ident_len == 0 {
        return false;
    }
    trimmed[ident_len..].trim_start().starts_with('=')
}

/// Letters immediately followed by digits, e.g. `A1`, `bc12`.
fn is_cellref_shaped(word: &str) -> bool {
    let letters = word.bytes().take_while(u8::is_ascii_alphabetic).count();
    letters > 0
        && letters < word.len()
        && word.bytes().skip(letters).all(|b| b.is_ascii_digit())
}
