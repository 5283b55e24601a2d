//! Parsed statement and expression trees shared by both grammars.

use quantgrid_common::{CellAddress, Quantity};
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(&self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An expression node. Quantity literals are canonicalized at parse time; a
/// unitless literal carries the all-zero dims vector.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Quantity),
    Variable(String),
    CellRef(CellAddress),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(q) => write!(f, "{q}"),
            Expr::Variable(name) => write!(f, "{name}"),
            Expr::CellRef(addr) => write!(f, "{addr}"),
            Expr::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
        }
    }
}

/// A whole parsed line: either a named definition or a bare expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assignment { name: String, expr: Expr },
    Expression(Expr),
}

impl Stmt {
    pub fn expr(&self) -> &Expr {
        match self {
            Stmt::Assignment { expr, .. } => expr,
            Stmt::Expression(expr) => expr,
        }
    }

    pub fn defined_name(&self) -> Option<&str> {
        match self {
            Stmt::Assignment { name, .. } => Some(name),
            Stmt::Expression(_) => None,
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Assignment { name, expr } => write!(f, "{name} = {expr}"),
            Stmt::Expression(expr) => write!(f, "{expr}"),
        }
    }
}
