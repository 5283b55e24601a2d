//! Physical-quantity value model: a canonical SI magnitude paired with an
//! integer exponent vector over the base dimensions.
//!
//! Two quantities are dimensionally compatible iff their `Dims` vectors are
//! equal; addition and subtraction require compatibility, while
//! multiplication and division combine exponent vectors component-wise.

use std::fmt::{self, Display};
use std::ops::{Add, Sub};

use crate::error::EvalError;
use crate::unit::resolve_unit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Base physical dimensions tracked by the engine.
///
/// Force is carried as its own base dimension rather than derived from
/// mass·length/time², matching the unit vocabulary of structural
/// calculations (kN, kip, psi) where force-typed inputs are primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseDim {
    Length,
    Mass,
    Time,
    Force,
    Temperature,
    Angle,
}

/// Number of base dimensions in a `Dims` vector.
pub const DIM_COUNT: usize = 6;

/// Integer exponents over the base dimensions, in `BaseDim` order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dims(pub [i8; DIM_COUNT]);

impl Dims {
    /// The all-zero vector: a dimensionless scalar.
    pub const ZERO: Dims = Dims([0; DIM_COUNT]);

    pub const fn single(dim: BaseDim) -> Dims {
        let mut v = [0i8; DIM_COUNT];
        v[dim as usize] = 1;
        Dims(v)
    }

    pub fn exponent(&self, dim: BaseDim) -> i8 {
        self.0[dim as usize]
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; DIM_COUNT]
    }

    /// Scale every exponent, used for unit powers such as `ft^2`.
    pub fn scaled(&self, n: i8) -> Dims {
        let mut v = self.0;
        for e in &mut v {
            *e = e.saturating_mul(n);
        }
        Dims(v)
    }
}

// Exponents saturate instead of wrapping: a pathological chain of
// multiplications pins the exponent at the i8 bound and keeps producing
// (degenerate) values rather than panicking in debug builds.
impl Add for Dims {
    type Output = Dims;

    fn add(self, rhs: Dims) -> Dims {
        let mut v = self.0;
        for (e, r) in v.iter_mut().zip(rhs.0) {
            *e = e.saturating_add(r);
        }
        Dims(v)
    }
}

impl Sub for Dims {
    type Output = Dims;

    fn sub(self, rhs: Dims) -> Dims {
        let mut v = self.0;
        for (e, r) in v.iter_mut().zip(rhs.0) {
            *e = e.saturating_sub(r);
        }
        Dims(v)
    }
}

impl Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "1");
        }
        let symbols = ["m", "kg", "s", "N", "K", "rad"];
        let mut first = true;
        for (sym, exp) in symbols.iter().zip(self.0) {
            if exp == 0 {
                continue;
            }
            if !first {
                write!(f, "·")?;
            }
            first = false;
            write!(f, "{sym}")?;
            if exp != 1 {
                write!(f, "^{exp}")?;
            }
        }
        Ok(())
    }
}

/// A numeric value carrying a physical dimension.
///
/// The magnitude is always stored normalized to the SI base unit of its
/// dimension vector; `display_unit` remembers the unit the value was written
/// in so the formatter can render it back. The dims vector is fixed at
/// construction; arithmetic always produces new values.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub magnitude_si: f64,
    pub dims: Dims,
    pub display_unit: Option<String>,
}

impl Quantity {
    pub fn new(magnitude_si: f64, dims: Dims) -> Self {
        Quantity {
            magnitude_si,
            dims,
            display_unit: None,
        }
    }

    /// A bare scalar: all-zero dims, no unit text.
    pub fn dimensionless(value: f64) -> Self {
        Quantity::new(value, Dims::ZERO)
    }

    /// Canonicalize `value` expressed in `unit` through the unit table.
    /// Returns `None` when the unit symbol is not recognised.
    pub fn from_unit(value: f64, unit: &str) -> Option<Self> {
        let def = resolve_unit(unit)?;
        Some(Quantity {
            magnitude_si: value * def.factor_si,
            dims: def.dims,
            display_unit: Some(unit.to_string()),
        })
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dims.is_zero()
    }

    /// Magnitude re-expressed in `unit`, if that unit exists and is
    /// dimensionally compatible.
    pub fn magnitude_in(&self, unit: &str) -> Option<f64> {
        let def = resolve_unit(unit)?;
        if def.dims != self.dims {
            return None;
        }
        Some(self.magnitude_si / def.factor_si)
    }

    /// Human-readable description of this quantity's physical type, used in
    /// mismatch messages: the written unit when known, else the dims vector.
    pub fn unit_text(&self) -> String {
        match &self.display_unit {
            Some(u) => u.clone(),
            None => self.dims.to_string(),
        }
    }

    fn carried_unit(&self, rhs: &Quantity) -> Option<String> {
        self.display_unit
            .clone()
            .or_else(|| rhs.display_unit.clone())
    }

    pub fn checked_add(&self, rhs: &Quantity) -> Result<Quantity, EvalError> {
        if self.dims != rhs.dims {
            return Err(EvalError::UnitMismatch(format!(
                "cannot add {} and {}",
                self.unit_text(),
                rhs.unit_text()
            )));
        }
        Ok(Quantity {
            magnitude_si: self.magnitude_si + rhs.magnitude_si,
            dims: self.dims,
            display_unit: self.carried_unit(rhs),
        })
    }

    pub fn checked_sub(&self, rhs: &Quantity) -> Result<Quantity, EvalError> {
        if self.dims != rhs.dims {
            return Err(EvalError::UnitMismatch(format!(
                "cannot subtract {} from {}",
                rhs.unit_text(),
                self.unit_text()
            )));
        }
        Ok(Quantity {
            magnitude_si: self.magnitude_si - rhs.magnitude_si,
            dims: self.dims,
            display_unit: self.carried_unit(rhs),
        })
    }

    pub fn checked_mul(&self, rhs: &Quantity) -> Result<Quantity, EvalError> {
        Ok(Quantity {
            magnitude_si: self.magnitude_si * rhs.magnitude_si,
            dims: self.dims + rhs.dims,
            display_unit: product_unit(self, rhs),
        })
    }

    pub fn checked_div(&self, rhs: &Quantity) -> Result<Quantity, EvalError> {
        if rhs.is_dimensionless() && rhs.magnitude_si == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        Ok(Quantity {
            magnitude_si: self.magnitude_si / rhs.magnitude_si,
            dims: self.dims - rhs.dims,
            display_unit: quotient_unit(self, rhs),
        })
    }
}

/// Unit text survives a product only when the other side is a bare scalar;
/// otherwise the dims vector changed and the written unit no longer applies.
fn product_unit(lhs: &Quantity, rhs: &Quantity) -> Option<String> {
    if rhs.is_dimensionless() {
        lhs.display_unit.clone()
    } else if lhs.is_dimensionless() {
        rhs.display_unit.clone()
    } else {
        None
    }
}

fn quotient_unit(lhs: &Quantity, rhs: &Quantity) -> Option<String> {
    if rhs.is_dimensionless() {
        lhs.display_unit.clone()
    } else {
        None
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_unit {
            Some(u) => match self.magnitude_in(u) {
                Some(v) => write!(f, "{v} {u}"),
                None => write!(f, "{} [{}]", self.magnitude_si, self.dims),
            },
            None if self.is_dimensionless() => write!(f, "{}", self.magnitude_si),
            None => write!(f, "{} [{}]", self.magnitude_si, self.dims),
        }
    }
}
