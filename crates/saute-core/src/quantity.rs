//! Typed quantities.

use core::cmp::Ordering;
use core::fmt;

use crate::error::{UnitError, UnitResult};
use crate::numeric::{Real, ensure_finite};
use crate::units::{Unit, UnitCategory};

/// A magnitude paired with a registered unit.
///
/// The category is carried by the unit, so a quantity can never hold a unit
/// from a different category. Values are immutable; conversions return new
/// quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quantity {
    magnitude: Real,
    unit: Unit,
}

impl Quantity {
    /// Build a quantity from a unit name, validated against `category`.
    pub fn new(magnitude: Real, unit: &str, category: UnitCategory) -> UnitResult<Self> {
        let unit = category.parse_unit(unit)?;
        Self::of(magnitude, unit)
    }

    /// Build a quantity from an already resolved unit.
    pub fn of(magnitude: Real, unit: impl Into<Unit>) -> UnitResult<Self> {
        let magnitude = ensure_finite(magnitude, "quantity magnitude")?;
        Ok(Self {
            magnitude,
            unit: unit.into(),
        })
    }

    /// Build a quantity in `unit` from a magnitude in the category's base representation.
    pub fn from_base(base: Real, unit: impl Into<Unit>) -> UnitResult<Self> {
        let unit = unit.into();
        Self::of(unit.from_base(base), unit)
    }

    pub fn magnitude(&self) -> Real {
        self.magnitude
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn category(&self) -> UnitCategory {
        self.unit.category()
    }

    /// Magnitude in the category's base representation.
    pub fn to_base(&self) -> Real {
        self.unit.to_base(self.magnitude)
    }

    /// Convert to another unit of the same category, named by string.
    pub fn convert_to(&self, target: &str) -> UnitResult<Self> {
        let target = self.category().parse_unit(target)?;
        self.convert_to_unit(target)
    }

    /// Convert to another unit of the same category.
    pub fn convert_to_unit(&self, target: impl Into<Unit>) -> UnitResult<Self> {
        let target = target.into();
        self.ensure_same_category(target.category())?;
        Self::from_base(self.to_base(), target)
    }

    /// Pass the magnitude through base and back into the same unit.
    pub fn normalized(&self) -> UnitResult<Self> {
        Self::from_base(self.to_base(), self.unit)
    }

    /// Compare by base representation. Fails across categories.
    pub fn try_cmp(&self, other: &Quantity) -> UnitResult<Option<Ordering>> {
        self.ensure_same_category(other.category())?;
        Ok(self.to_base().partial_cmp(&other.to_base()))
    }

    /// `self - other`, expressed in `self`'s unit.
    ///
    /// Fails across categories and for categories on an affine scale.
    pub fn checked_sub(&self, other: &Quantity) -> UnitResult<Self> {
        self.ensure_same_category(other.category())?;
        let category = self.category();
        if !category.is_additive() {
            return Err(UnitError::NotAdditive { category });
        }
        Self::from_base(self.to_base() - other.to_base(), self.unit)
    }

    /// Strictly positive amount in base representation.
    pub fn is_positive(&self) -> bool {
        self.to_base() > 0.0
    }

    fn ensure_same_category(&self, found: UnitCategory) -> UnitResult<()> {
        let expected = self.category();
        if expected == found {
            Ok(())
        } else {
            Err(UnitError::CategoryMismatch { expected, found })
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}
