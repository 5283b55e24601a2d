pub mod ast;
pub mod classify;
pub mod normalize;
pub mod parser;
pub mod restricted;
pub mod tokenizer;

pub use ast::{BinaryOp, Expr, Stmt};
pub use classify::{LineKind, classify_line};
pub use normalize::normalize_text;
pub use parser::{ParserError, parse_tokens, parse_unified};
pub use restricted::{RestrictedParse, parse_restricted};
pub use tokenizer::{Token, TokenKind, tokenize};
