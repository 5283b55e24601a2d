//! Tree-walking expression evaluator.

use quantgrid_common::{CellAddress, EvalError, Quantity};
use quantgrid_parse::{parse_unified, BinaryOp, Expr, Stmt};

use crate::namespace::Namespace;
use crate::traits::CellResolver;

/// Evaluates parsed expressions against a namespace and a cell grid.
///
/// Borrows both immutably; the caller (normally `recompute`) applies any
/// resulting definitions to the namespace after evaluation succeeds.
pub struct Interpreter<'a> {
    namespace: &'a Namespace,
    resolver: &'a dyn CellResolver,
}

/// Grid content is external and may reference itself (directly or through a
/// cycle of cells), so reference chains are cut off at a fixed depth rather
/// than trusted to terminate.
const MAX_REF_DEPTH: usize = 32;

impl<'a> Interpreter<'a> {
    pub fn new(namespace: &'a Namespace, resolver: &'a dyn CellResolver) -> Self {
        Interpreter {
            namespace,
            resolver,
        }
    }

    pub fn evaluate_stmt(&self, stmt: &Stmt) -> Result<Quantity, EvalError> {
        self.evaluate(stmt.expr())
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<Quantity, EvalError> {
        self.eval_expr(expr, 0)
    }

    fn eval_expr(&self, expr: &Expr, depth: usize) -> Result<Quantity, EvalError> {
        match expr {
            Expr::Literal(q) => Ok(q.clone()),
            Expr::Variable(name) => self
                .namespace
                .resolve(name)
                .cloned()
                .ok_or_else(|| EvalError::UnknownIdentifier(name.clone())),
            Expr::CellRef(addr) => self.evaluate_cell_ref(*addr, depth),
            Expr::Binary { op, left, right } => {
                let lhs = self.eval_expr(left, depth)?;
                let rhs = self.eval_expr(right, depth)?;
                match op {
                    BinaryOp::Add => lhs.checked_add(&rhs),
                    BinaryOp::Sub => lhs.checked_sub(&rhs),
                    BinaryOp::Mul => lhs.checked_mul(&rhs),
                    BinaryOp::Div => lhs.checked_div(&rhs),
                }
            }
        }
    }

    /// Resolve a cell reference by fetching its text and evaluating it as a
    /// fresh expression. Any failure inside the referenced cell — empty
    /// text, a parse error, an evaluation error, or a reference chain
    /// deeper than [`MAX_REF_DEPTH`] — surfaces as a single
    /// unresolved-reference error naming the address, never the inner
    /// diagnostic.
    fn evaluate_cell_ref(&self, addr: CellAddress, depth: usize) -> Result<Quantity, EvalError> {
        let unresolved = || EvalError::UnresolvedCellReference(addr.label());

        if depth >= MAX_REF_DEPTH {
            return Err(unresolved());
        }
        let text = self.resolver.cell_text(addr);
        let text = text.trim();
        if text.is_empty() {
            return Err(unresolved());
        }
        let stmt = parse_unified(text).map_err(|_| unresolved())?;
        self.eval_expr(stmt.expr(), depth + 1).map_err(|_| unresolved())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::EmptyGrid;
    use quantgrid_common::EvalErrorKind;

    fn eval(text: &str, ns: &Namespace) -> Result<Quantity, EvalError> {
        let stmt = parse_unified(text).unwrap();
        Interpreter::new(ns, &EmptyGrid).evaluate_stmt(&stmt)
    }

    #[test]
    fn arithmetic_with_variables() {
        let mut ns = Namespace::new();
        ns.define("span", Quantity::from_unit(12.0, "ft").unwrap(), "line-1");
        ns.define("w", Quantity::from_unit(2.0, "kip/ft").unwrap(), "line-2");

        let got = eval("w * span", &ns).unwrap();
        assert_eq!(got.dims, Quantity::from_unit(1.0, "kip").unwrap().dims);
        assert!((got.magnitude_si - 24.0 * 4448.2216152605).abs() < 1e-6);
    }

    #[test]
    fn unknown_identifier_names_the_symbol() {
        let err = eval("missing + 1", &Namespace::new()).unwrap_err();
        assert_eq!(err, EvalError::UnknownIdentifier("missing".into()));
    }

    #[test]
    fn cell_ref_evaluates_referenced_text() {
        let ns = Namespace::new();
        let grid = |addr: CellAddress| {
            if addr == CellAddress::new(0, 0) {
                "5 in + 1 in".to_string()
            } else {
                String::new()
            }
        };
        let stmt = parse_unified("A1 * 2").unwrap();
        let got = Interpreter::new(&ns, &grid).evaluate_stmt(&stmt).unwrap();
        assert!((got.magnitude_si - 12.0 * 0.0254).abs() < 1e-12);
    }

    #[test]
    fn empty_and_broken_cells_are_unresolved() {
        let ns = Namespace::new();
        let grid = |addr: CellAddress| {
            if addr == CellAddress::new(0, 1) {
                "5 +".to_string()
            } else {
                "   ".to_string()
            }
        };
        let interp = Interpreter::new(&ns, &grid);

        for text in ["A1", "B1"] {
            let stmt = parse_unified(text).unwrap();
            let err = interp.evaluate_stmt(&stmt).unwrap_err();
            assert_eq!(err.kind(), EvalErrorKind::UnresolvedCellReference);
        }
    }

    #[test]
    fn self_referential_cells_terminate_with_an_error() {
        let ns = Namespace::new();
        // A1's own text names A1; resolution must bottom out, not recurse
        // until the stack is gone.
        let grid = |addr: CellAddress| {
            if addr == CellAddress::new(0, 0) {
                "A1 + 1".to_string()
            } else {
                String::new()
            }
        };
        let stmt = parse_unified("A1 + 2").unwrap();
        let err = Interpreter::new(&ns, &grid).evaluate_stmt(&stmt).unwrap_err();
        assert_eq!(err, EvalError::UnresolvedCellReference("A1".into()));
    }

    #[test]
    fn mutually_referential_cells_terminate_with_an_error() {
        let ns = Namespace::new();
        let grid = |addr: CellAddress| match (addr.row, addr.col) {
            (0, 0) => "B1".to_string(),
            (0, 1) => "A1".to_string(),
            _ => String::new(),
        };
        let stmt = parse_unified("A1").unwrap();
        let err = Interpreter::new(&ns, &grid).evaluate_stmt(&stmt).unwrap_err();
        assert_eq!(err.kind(), EvalErrorKind::UnresolvedCellReference);
    }

    #[test]
    fn inner_cell_errors_do_not_leak() {
        let ns = Namespace::new();
        // C1 divides by zero; the reference must report C1, not the division.
        let grid = |_: CellAddress| "1 / 0".to_string();
        let stmt = parse_unified("C1").unwrap();
        let err = Interpreter::new(&ns, &grid).evaluate_stmt(&stmt).unwrap_err();
        assert_eq!(err, EvalError::UnresolvedCellReference("C1".into()));
    }
}
