//! Unit symbol table: maps a written unit to its conversion factor into the
//! canonical SI magnitude and its dimension vector.
//!
//! Composite symbols with a single interior separator are derived on the
//! fly: `a/b` divides two simple units (`kip/ft`) and `a^n` raises a simple
//! unit to an integer power (`ft^2`).

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::quantity::{BaseDim, Dims};

/// Conversion entry for one unit symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    /// Multiply a magnitude written in this unit by this factor to obtain
    /// the canonical SI magnitude.
    pub factor_si: f64,
    pub dims: Dims,
}

impl UnitDef {
    const fn new(factor_si: f64, dims: Dims) -> Self {
        UnitDef { factor_si, dims }
    }
}

const LENGTH: Dims = Dims::single(BaseDim::Length);
const MASS: Dims = Dims::single(BaseDim::Mass);
const TIME: Dims = Dims::single(BaseDim::Time);
const FORCE: Dims = Dims::single(BaseDim::Force);
const TEMPERATURE: Dims = Dims::single(BaseDim::Temperature);
const ANGLE: Dims = Dims::single(BaseDim::Angle);

/// Pressure = force / length², in this base system.
const PRESSURE: Dims = {
    let mut v = [0i8; crate::quantity::DIM_COUNT];
    v[BaseDim::Force as usize] = 1;
    v[BaseDim::Length as usize] = -2;
    Dims(v)
};

static UNIT_TABLE: Lazy<HashMap<&'static str, UnitDef>> = Lazy::new(|| {
    let mut t = HashMap::new();

    // Length (SI base: metre)
    t.insert("m", UnitDef::new(1.0, LENGTH));
    t.insert("mm", UnitDef::new(1e-3, LENGTH));
    t.insert("cm", UnitDef::new(1e-2, LENGTH));
    t.insert("km", UnitDef::new(1e3, LENGTH));
    t.insert("in", UnitDef::new(0.0254, LENGTH));
    t.insert("ft", UnitDef::new(0.3048, LENGTH));
    t.insert("yd", UnitDef::new(0.9144, LENGTH));
    t.insert("mi", UnitDef::new(1609.344, LENGTH));

    // Mass (SI base: kilogram)
    t.insert("kg", UnitDef::new(1.0, MASS));
    t.insert("g", UnitDef::new(1e-3, MASS));
    t.insert("t", UnitDef::new(1e3, MASS));
    t.insert("lb", UnitDef::new(0.453_592_37, MASS));

    // Time (SI base: second)
    t.insert("s", UnitDef::new(1.0, TIME));
    t.insert("min", UnitDef::new(60.0, TIME));
    t.insert("h", UnitDef::new(3600.0, TIME));
    t.insert("hr", UnitDef::new(3600.0, TIME));
    t.insert("day", UnitDef::new(86_400.0, TIME));

    // Force (base: newton)
    t.insert("N", UnitDef::new(1.0, FORCE));
    t.insert("kN", UnitDef::new(1e3, FORCE));
    t.insert("MN", UnitDef::new(1e6, FORCE));
    t.insert("lbf", UnitDef::new(4.448_221_615_260_5, FORCE));
    t.insert("kip", UnitDef::new(4_448.221_615_260_5, FORCE));

    // Pressure (force/length²)
    t.insert("Pa", UnitDef::new(1.0, PRESSURE));
    t.insert("kPa", UnitDef::new(1e3, PRESSURE));
    t.insert("MPa", UnitDef::new(1e6, PRESSURE));
    t.insert("psi", UnitDef::new(6_894.757_293_168_361, PRESSURE));
    t.insert("ksi", UnitDef::new(6_894_757.293_168_361, PRESSURE));

    // Temperature interval (base: kelvin)
    t.insert("K", UnitDef::new(1.0, TEMPERATURE));

    // Angle
    t.insert("rad", UnitDef::new(1.0, ANGLE));
    t.insert("deg", UnitDef::new(std::f64::consts::PI / 180.0, ANGLE));

    t
});

/// Look up a unit symbol, deriving composite `a/b` and `a^n` forms from the
/// simple-unit table. Unknown symbols yield `None`; nothing panics.
pub fn resolve_unit(symbol: &str) -> Option<UnitDef> {
    if let Some(def) = UNIT_TABLE.get(symbol) {
        return Some(*def);
    }

    // One interior separator at most: quotient or power of simple units.
    if let Some((num, den)) = split_once_interior(symbol, '/') {
        let n = *UNIT_TABLE.get(num)?;
        let d = *UNIT_TABLE.get(den)?;
        return Some(UnitDef::new(n.factor_si / d.factor_si, n.dims - d.dims));
    }
    if let Some((base, exp)) = split_once_interior(symbol, '^') {
        let b = *UNIT_TABLE.get(base)?;
        let e: i8 = exp.parse().ok().filter(|e| (-4..=4).contains(e) && *e != 0)?;
        return Some(UnitDef::new(b.factor_si.powi(e as i32), b.dims.scaled(e)));
    }

    None
}

/// Whether `symbol` has the lexical shape of a unit the table could resolve.
pub fn is_known_unit(symbol: &str) -> bool {
    resolve_unit(symbol).is_some()
}

/// Split on `sep` only when it occurs exactly once and strictly inside the
/// string, so bare operators and trailing separators are never unit-shaped.
fn split_once_interior(s: &str, sep: char) -> Option<(&str, &str)> {
    let idx = s.find(sep)?;
    if idx == 0 || idx + sep.len_utf8() >= s.len() {
        return None;
    }
    let (head, tail) = s.split_at(idx);
    let tail = &tail[sep.len_utf8()..];
    if tail.contains(sep) {
        return None;
    }
    Some((head, tail))
}
