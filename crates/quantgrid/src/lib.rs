//! Meta crate that re-exports the primary quantgrid building blocks with
//! sensible defaults. Downstream users can depend on this crate and opt into
//! specific layers via feature flags while keeping access to the underlying
//! crates when deeper integration is required.

#[cfg(feature = "common")]
pub use quantgrid_common as common;

#[cfg(feature = "parse")]
pub use quantgrid_parse as parse;

#[cfg(feature = "eval")]
pub use quantgrid_eval as eval;

#[cfg(feature = "common")]
pub use quantgrid_common::{CellAddress, Dims, EvalError, Quantity};

#[cfg(feature = "parse")]
pub use quantgrid_parse::{
    classify_line, normalize_text, parse_restricted, parse_unified, Expr, LineKind,
    RestrictedParse, Stmt,
};

#[cfg(feature = "eval")]
pub use quantgrid_eval::{
    format_quantity, recompute, CellResolver, Document, EmptyGrid, Interpreter, Line, Namespace,
};
