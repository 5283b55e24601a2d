//! Human-readable rendering of computed quantities.

use quantgrid_common::Quantity;

/// Narrow no-break space between magnitude and unit symbol.
const UNIT_SEP: char = '\u{2009}';

/// Render a quantity for display.
///
/// `preferred` overrides the unit the quantity was defined with; when the
/// preferred unit is unknown or dimensionally incompatible the value falls
/// back to its carried unit, and finally to bare SI magnitude.
pub fn format_quantity(q: &Quantity, preferred: Option<&str>) -> String {
    for unit in [preferred, q.display_unit.as_deref()].into_iter().flatten() {
        if let Some(converted) = q.magnitude_in(unit) {
            return format!("{}{UNIT_SEP}{}", format_number(converted), unit);
        }
    }
    format_number(q.magnitude_si)
}

/// Fixed-point with up to three fractional digits for magnitudes in a
/// readable range, scientific notation outside it. Trailing zeros and a
/// dangling decimal point are trimmed so `9.000` renders as `9`.
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let abs = v.abs();
    if (1e-3..1e6).contains(&abs) {
        let mut s = format!("{v:.3}");
        if s.contains('.') {
            while s.ends_with('0') {
                s.pop();
            }
            if s.ends_with('.') {
                s.pop();
            }
        }
        s
    } else {
        format!("{v:.3e}")
    }
}
