//! Evaluation layer: the namespace store, the expression interpreter, the
//! full-document recompute pass, and the display formatter.

pub mod engine;
pub mod format;
pub mod interpreter;
pub mod namespace;
pub mod traits;

pub use engine::{Document, Line, LineOutcome, recompute};
pub use format::format_quantity;
pub use interpreter::Interpreter;
pub use namespace::{CellKey, Namespace, NamespaceEntry};
pub use traits::{CellResolver, EmptyGrid};

// Re-export the line classifier alongside the engine that consumes it.
pub use quantgrid_parse::LineKind;
