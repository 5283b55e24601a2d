//! Byte-offset scanner for calculation-line text.
//!
//! Lexing is best-effort and never fatal: bytes that fit no token class are
//! carried through as [`TokenKind::Unknown`] tokens with their spans so the
//! parser can attach a positioned error to the line instead of the pipeline
//! throwing.

use quantgrid_common::is_known_unit;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Unit,
    Ident,
    CellRef,
    Plus,
    Minus,
    Star,
    Slash,
    Equal,
    LParen,
    RParen,
    Whitespace,
    Unknown,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One lexed token with its byte span in the source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// Parsed magnitude, present iff `kind == Number`.
    pub value: Option<f64>,
    pub start: usize,
    pub end: usize,
}

impl Token {
    fn from_slice(source: &str, kind: TokenKind, start: usize, end: usize) -> Self {
        Token {
            kind,
            lexeme: source[start..end].to_string(),
            value: None,
            start,
            end,
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Star | TokenKind::Slash
        )
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {:?}>", self.kind, self.lexeme)
    }
}

struct Scanner<'a> {
    src: &'a str,
    offset: usize,
    tokens: Vec<Token>,
}

/// Scan `text` left to right into typed tokens. Whitespace tokens are
/// retained; both parsers filter them before grammar analysis.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut scanner = Scanner {
        src: text,
        offset: 0,
        tokens: Vec::with_capacity(text.len() / 2),
    };
    scanner.run();
    scanner.tokens
}

impl<'a> Scanner<'a> {
    fn run(&mut self) {
        while self.offset < self.src.len() {
            let b = self.src.as_bytes()[self.offset];
            match b {
                b' ' | b'\t' => self.scan_whitespace(),
                b'0'..=b'9' => self.scan_number(self.offset),
                b'.' if self.peek_digit_at(self.offset + 1) => self.scan_number(self.offset),
                b'+' | b'-' => self.scan_sign_or_operator(b),
                b'*' => self.push_single(TokenKind::Star),
                b'/' => self.push_single(TokenKind::Slash),
                b'=' => self.push_single(TokenKind::Equal),
                b'(' => self.push_single(TokenKind::LParen),
                b')' => self.push_single(TokenKind::RParen),
                c if c.is_ascii_alphabetic() => self.scan_word(),
                _ => self.scan_unknown(),
            }
        }
    }

    fn bytes(&self) -> &[u8] {
        self.src.as_bytes()
    }

    fn peek_digit_at(&self, at: usize) -> bool {
        self.bytes().get(at).is_some_and(u8::is_ascii_digit)
    }

    fn push_single(&mut self, kind: TokenKind) {
        let start = self.offset;
        self.offset += 1;
        self.tokens
            .push(Token::from_slice(self.src, kind, start, self.offset));
    }

    fn scan_whitespace(&mut self) {
        let start = self.offset;
        while self
            .bytes()
            .get(self.offset)
            .is_some_and(|b| matches!(b, b' ' | b'\t'))
        {
            self.offset += 1;
        }
        self.tokens
            .push(Token::from_slice(self.src, TokenKind::Whitespace, start, self.offset));
    }

    /// `+`/`-` is a numeric sign only at expression position with a number
    /// immediately following; everywhere else it is an operator.
    fn scan_sign_or_operator(&mut self, b: u8) {
        let starts_number = self.peek_digit_at(self.offset + 1)
            || (self.bytes().get(self.offset + 1) == Some(&b'.')
                && self.peek_digit_at(self.offset + 2));
        if starts_number && self.at_expression_position() {
            self.scan_number(self.offset);
            return;
        }
        self.push_single(if b == b'+' {
            TokenKind::Plus
        } else {
            TokenKind::Minus
        });
    }

    /// True when the previous significant token cannot end an operand, so a
    /// following sign belongs to a number literal.
    fn at_expression_position(&self) -> bool {
        match self
            .tokens
            .iter()
            .rev()
            .find(|t| t.kind != TokenKind::Whitespace)
        {
            None => true,
            Some(prev) => {
                prev.is_operator() || matches!(prev.kind, TokenKind::Equal | TokenKind::LParen)
            }
        }
    }

    /// Optional sign, digits, optional decimal point and fractional digits.
    fn scan_number(&mut self, start: usize) {
        if matches!(self.bytes().get(self.offset), Some(b'+') | Some(b'-')) {
            self.offset += 1;
        }
        while self.peek_digit_at(self.offset) {
            self.offset += 1;
        }
        if self.bytes().get(self.offset) == Some(&b'.') && self.peek_digit_at(self.offset + 1) {
            self.offset += 1;
            while self.peek_digit_at(self.offset) {
                self.offset += 1;
            }
        }
        let lexeme = &self.src[start..self.offset];
        self.tokens.push(Token {
            kind: TokenKind::Number,
            lexeme: lexeme.to_string(),
            value: lexeme.parse::<f64>().ok(),
            start,
            end: self.offset,
        });
    }

    /// A letter run becomes a cell reference when digits follow, a composite
    /// unit when a `/` or `^` continuation resolves in the unit table after
    /// a number, and a plain identifier otherwise.
    fn scan_word(&mut self) {
        let start = self.offset;
        while self
            .bytes()
            .get(self.offset)
            .is_some_and(u8::is_ascii_alphabetic)
        {
            self.offset += 1;
        }

        // Letters immediately followed by digits lex as a cell reference.
        if self.peek_digit_at(self.offset) {
            while self.peek_digit_at(self.offset) {
                self.offset += 1;
            }
            self.tokens
                .push(Token::from_slice(self.src, TokenKind::CellRef, start, self.offset));
            return;
        }

        // Composite units (`kip/ft`, `ft^2`) lex as one token, but only in
        // unit position: directly after a number, and only when the whole
        // compound resolves. `a/b` between variables stays three tokens.
        if self.after_number() {
            if let Some(end) = self.compound_unit_end(start) {
                self.offset = end;
                self.tokens
                    .push(Token::from_slice(self.src, TokenKind::Unit, start, end));
                return;
            }
        }

        self.tokens
            .push(Token::from_slice(self.src, TokenKind::Ident, start, self.offset));
    }

    fn after_number(&self) -> bool {
        self.tokens
            .iter()
            .rev()
            .find(|t| t.kind != TokenKind::Whitespace)
            .is_some_and(|t| t.kind == TokenKind::Number)
    }

    /// Byte offset past a `letters(/letters | ^digits)` compound starting at
    /// `start`, when that compound is a known unit.
    fn compound_unit_end(&self, start: usize) -> Option<usize> {
        let bytes = self.bytes();
        let mut end = self.offset;
        match bytes.get(end)? {
            b'/' => {
                end += 1;
                let tail = end;
                while bytes.get(end).is_some_and(u8::is_ascii_alphabetic) {
                    end += 1;
                }
                if end == tail {
                    return None;
                }
            }
            b'^' => {
                end += 1;
                let tail = end;
                while bytes.get(end).is_some_and(u8::is_ascii_digit) {
                    end += 1;
                }
                if end == tail {
                    return None;
                }
            }
            _ => return None,
        }
        is_known_unit(&self.src[start..end]).then_some(end)
    }

    fn scan_unknown(&mut self) {
        let start = self.offset;
        let len = self.src[self.offset..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.offset += len;
        self.tokens
            .push(Token::from_slice(self.src, TokenKind::Unknown, start, self.offset));
    }
}
