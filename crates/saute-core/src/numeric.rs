use crate::UnitError;

/// Floating point type used for every magnitude.
pub type Real = f64;

/// Tolerances used when comparing magnitudes in base units.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Replace a leftover within `tol.abs` of zero by exactly zero.
///
/// Only for values already known to be non-negative.
pub fn snap_to_zero(v: Real, tol: Tolerances) -> Real {
    if v.abs() <= tol.abs { 0.0 } else { v }
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, UnitError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(UnitError::NonFinite { what, value: v })
    }
}
