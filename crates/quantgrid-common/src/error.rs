//! Evaluation error taxonomy.
//!
//! These are the only user-visible evaluation failures; grammar-fallback
//! signalling lives in the parse crate as a plain result enum and never
//! surfaces here.

use thiserror::Error;

/// Discriminant for matching on an error without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalErrorKind {
    UnitMismatch,
    UnknownIdentifier,
    UnresolvedCellReference,
    DivisionByZero,
}

/// A typed evaluation failure, attached to the offending line by the
/// recompute engine. Never aborts processing of sibling lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unit mismatch: {0}")]
    UnitMismatch(String),

    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    #[error("unresolved cell reference {0}")]
    UnresolvedCellReference(String),

    #[error("division by zero")]
    DivisionByZero,
}

impl EvalError {
    pub fn kind(&self) -> EvalErrorKind {
        match self {
            EvalError::UnitMismatch(_) => EvalErrorKind::UnitMismatch,
            EvalError::UnknownIdentifier(_) => EvalErrorKind::UnknownIdentifier,
            EvalError::UnresolvedCellReference(_) => EvalErrorKind::UnresolvedCellReference,
            EvalError::DivisionByZero => EvalErrorKind::DivisionByZero,
        }
    }
}
