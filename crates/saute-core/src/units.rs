// saute-core/src/units.rs

//! Unit registry.
//!
//! Every legal unit is a variant of a per-category enum, and [`Unit`] wraps
//! those enums so the category of a unit is carried by its type. Each unit
//! owns a matched `to_base` / `from_base` pair.
//!
//! Time and temperature convert through `uom`. Mass and volume use the
//! kitchen table below, so stock arithmetic on them is reproducible: one cup
//! is exactly 240 ml and one pound exactly 453.592 g.

use core::fmt;

use uom::si::f64::{ThermodynamicTemperature as UomTemperature, Time as UomTime};

use crate::error::{UnitError, UnitResult};
use crate::numeric::Real;

// Kitchen conversion table.
const GRAMS_PER_KILOGRAM: Real = 1_000.0;
const GRAMS_PER_POUND: Real = 453.592;
const MILLILITERS_PER_LITER: Real = 1_000.0;
const MILLILITERS_PER_CUP: Real = 240.0;
const MILLILITERS_PER_OUNCE: Real = 29.5735;
const MILLILITERS_PER_TABLESPOON: Real = 14.7868;
const MILLILITERS_PER_TEASPOON: Real = 4.9289;

/// Dimension of measurement. Units only convert within one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitCategory {
    /// Base: seconds
    Time,
    /// Base: grams
    Mass,
    /// Base: milliliters
    Volume,
    /// Base: degrees Celsius (affine)
    Temperature,
    /// Dimensionless count. Base: pieces
    Count,
}

impl UnitCategory {
    pub const ALL: [UnitCategory; 5] = [
        UnitCategory::Time,
        UnitCategory::Mass,
        UnitCategory::Volume,
        UnitCategory::Temperature,
        UnitCategory::Count,
    ];

    /// Lowercase name used in messages and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Mass => "mass",
            Self::Volume => "volume",
            Self::Temperature => "temperature",
            Self::Count => "count",
        }
    }

    /// Whether stock of this category is drawn down when consumed.
    pub fn is_consumable(self) -> bool {
        matches!(self, Self::Mass | Self::Volume)
    }

    /// Whether magnitudes of this category may be summed or subtracted.
    ///
    /// Temperature sits on an affine scale, so a difference of two readings
    /// is not itself a reading.
    pub fn is_additive(self) -> bool {
        !matches!(self, Self::Temperature)
    }

    /// The unit the category converts through.
    pub fn base_unit(self) -> Unit {
        match self {
            Self::Time => Unit::Time(TimeUnit::Seconds),
            Self::Mass => Unit::Mass(MassUnit::Grams),
            Self::Volume => Unit::Volume(VolumeUnit::Milliliters),
            Self::Temperature => Unit::Temperature(TemperatureUnit::Celsius),
            Self::Count => Unit::Count(CountUnit::Pieces),
        }
    }

    /// All units registered under this category.
    pub fn units(self) -> Vec<Unit> {
        match self {
            Self::Time => TimeUnit::ALL.iter().copied().map(Unit::Time).collect(),
            Self::Mass => MassUnit::ALL.iter().copied().map(Unit::Mass).collect(),
            Self::Volume => VolumeUnit::ALL.iter().copied().map(Unit::Volume).collect(),
            Self::Temperature => TemperatureUnit::ALL
                .iter()
                .copied()
                .map(Unit::Temperature)
                .collect(),
            Self::Count => CountUnit::ALL.iter().copied().map(Unit::Count).collect(),
        }
    }

    /// Look up a unit by name within this category.
    ///
    /// Only the exact registered (lowercase plural) names match.
    pub fn parse_unit(self, name: &str) -> UnitResult<Unit> {
        let found = match self {
            Self::Time => TimeUnit::from_name(name).map(Unit::Time),
            Self::Mass => MassUnit::from_name(name).map(Unit::Mass),
            Self::Volume => VolumeUnit::from_name(name).map(Unit::Volume),
            Self::Temperature => TemperatureUnit::from_name(name).map(Unit::Temperature),
            Self::Count => CountUnit::from_name(name).map(Unit::Count),
        };
        found.ok_or_else(|| UnitError::InvalidUnit {
            unit: name.to_string(),
            category: self,
        })
    }

    /// Look up a category by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 3] = [Self::Seconds, Self::Minutes, Self::Hours];

    pub fn name(self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
        }
    }

    fn from_name(key: &str) -> Option<Self> {
        match key {
            "seconds" => Some(Self::Seconds),
            "minutes" => Some(Self::Minutes),
            "hours" => Some(Self::Hours),
            _ => None,
        }
    }

    /// Convert a magnitude in this unit to seconds.
    pub fn to_base(self, v: Real) -> Real {
        use uom::si::time::{hour, minute, second};
        match self {
            Self::Seconds => v,
            Self::Minutes => UomTime::new::<minute>(v).get::<second>(),
            Self::Hours => UomTime::new::<hour>(v).get::<second>(),
        }
    }

    /// Convert a magnitude in seconds to this unit.
    pub fn from_base(self, seconds: Real) -> Real {
        use uom::si::time::{hour, minute, second};
        let t = UomTime::new::<second>(seconds);
        match self {
            Self::Seconds => seconds,
            Self::Minutes => t.get::<minute>(),
            Self::Hours => t.get::<hour>(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MassUnit {
    Grams,
    Kilograms,
    Pounds,
}

impl MassUnit {
    pub const ALL: [MassUnit; 3] = [Self::Grams, Self::Kilograms, Self::Pounds];

    pub fn name(self) -> &'static str {
        match self {
            Self::Grams => "grams",
            Self::Kilograms => "kilograms",
            Self::Pounds => "pounds",
        }
    }

    fn from_name(key: &str) -> Option<Self> {
        match key {
            "grams" => Some(Self::Grams),
            "kilograms" => Some(Self::Kilograms),
            "pounds" => Some(Self::Pounds),
            _ => None,
        }
    }

    /// Grams per one of this unit.
    pub fn grams_per_unit(self) -> Real {
        match self {
            Self::Grams => 1.0,
            Self::Kilograms => GRAMS_PER_KILOGRAM,
            Self::Pounds => GRAMS_PER_POUND,
        }
    }

    /// Convert a magnitude in this unit to grams.
    pub fn to_base(self, v: Real) -> Real {
        v * self.grams_per_unit()
    }

    /// Convert a magnitude in grams to this unit.
    pub fn from_base(self, grams: Real) -> Real {
        grams / self.grams_per_unit()
    }
}

/// Kitchen volumes. The cup is the 240 ml metric cup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VolumeUnit {
    Milliliters,
    Liters,
    Cups,
    Ounces,
    Tablespoons,
    Teaspoons,
}

impl VolumeUnit {
    pub const ALL: [VolumeUnit; 6] = [
        Self::Milliliters,
        Self::Liters,
        Self::Cups,
        Self::Ounces,
        Self::Tablespoons,
        Self::Teaspoons,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Milliliters => "milliliters",
            Self::Liters => "liters",
            Self::Cups => "cups",
            Self::Ounces => "ounces",
            Self::Tablespoons => "tablespoons",
            Self::Teaspoons => "teaspoons",
        }
    }

    fn from_name(key: &str) -> Option<Self> {
        match key {
            "milliliters" => Some(Self::Milliliters),
            "liters" => Some(Self::Liters),
            "cups" => Some(Self::Cups),
            "ounces" => Some(Self::Ounces),
            "tablespoons" => Some(Self::Tablespoons),
            "teaspoons" => Some(Self::Teaspoons),
            _ => None,
        }
    }

    /// Milliliters per one of this unit.
    pub fn milliliters_per_unit(self) -> Real {
        match self {
            Self::Milliliters => 1.0,
            Self::Liters => MILLILITERS_PER_LITER,
            Self::Cups => MILLILITERS_PER_CUP,
            Self::Ounces => MILLILITERS_PER_OUNCE,
            Self::Tablespoons => MILLILITERS_PER_TABLESPOON,
            Self::Teaspoons => MILLILITERS_PER_TEASPOON,
        }
    }

    /// Convert a magnitude in this unit to milliliters.
    pub fn to_base(self, v: Real) -> Real {
        v * self.milliliters_per_unit()
    }

    /// Convert a magnitude in milliliters to this unit.
    pub fn from_base(self, milliliters: Real) -> Real {
        milliliters / self.milliliters_per_unit()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 2] = [Self::Celsius, Self::Fahrenheit];

    pub fn name(self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }

    fn from_name(key: &str) -> Option<Self> {
        match key {
            "celsius" => Some(Self::Celsius),
            "fahrenheit" => Some(Self::Fahrenheit),
            _ => None,
        }
    }

    /// Convert a reading in this unit to degrees Celsius.
    pub fn to_base(self, v: Real) -> Real {
        use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit};
        match self {
            Self::Celsius => v,
            Self::Fahrenheit => UomTemperature::new::<degree_fahrenheit>(v).get::<degree_celsius>(),
        }
    }

    /// Convert a reading in degrees Celsius to this unit.
    pub fn from_base(self, celsius: Real) -> Real {
        use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit};
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => {
                UomTemperature::new::<degree_celsius>(celsius).get::<degree_fahrenheit>()
            }
        }
    }
}

/// Dimensionless count, used for products declared without a measured amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CountUnit {
    Pieces,
}

impl CountUnit {
    pub const ALL: [CountUnit; 1] = [Self::Pieces];

    pub fn name(self) -> &'static str {
        match self {
            Self::Pieces => "pieces",
        }
    }

    fn from_name(key: &str) -> Option<Self> {
        match key {
            "pieces" => Some(Self::Pieces),
            _ => None,
        }
    }

    pub fn to_base(self, v: Real) -> Real {
        v
    }

    pub fn from_base(self, pieces: Real) -> Real {
        pieces
    }
}

/// A registered unit. The variant is the unit's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    Time(TimeUnit),
    Mass(MassUnit),
    Volume(VolumeUnit),
    Temperature(TemperatureUnit),
    Count(CountUnit),
}

impl Unit {
    /// Resolve `name` under `category`.
    pub fn parse(name: &str, category: UnitCategory) -> UnitResult<Self> {
        category.parse_unit(name)
    }

    pub fn category(self) -> UnitCategory {
        match self {
            Self::Time(_) => UnitCategory::Time,
            Self::Mass(_) => UnitCategory::Mass,
            Self::Volume(_) => UnitCategory::Volume,
            Self::Temperature(_) => UnitCategory::Temperature,
            Self::Count(_) => UnitCategory::Count,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Time(u) => u.name(),
            Self::Mass(u) => u.name(),
            Self::Volume(u) => u.name(),
            Self::Temperature(u) => u.name(),
            Self::Count(u) => u.name(),
        }
    }

    /// Convert a magnitude in this unit to the category's base representation.
    pub fn to_base(self, v: Real) -> Real {
        match self {
            Self::Time(u) => u.to_base(v),
            Self::Mass(u) => u.to_base(v),
            Self::Volume(u) => u.to_base(v),
            Self::Temperature(u) => u.to_base(v),
            Self::Count(u) => u.to_base(v),
        }
    }

    /// Convert a base-representation magnitude to this unit.
    pub fn from_base(self, base: Real) -> Real {
        match self {
            Self::Time(u) => u.from_base(base),
            Self::Mass(u) => u.from_base(base),
            Self::Volume(u) => u.from_base(base),
            Self::Temperature(u) => u.from_base(base),
            Self::Count(u) => u.from_base(base),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<TimeUnit> for Unit {
    fn from(u: TimeUnit) -> Self {
        Self::Time(u)
    }
}

impl From<MassUnit> for Unit {
    fn from(u: MassUnit) -> Self {
        Self::Mass(u)
    }
}

impl From<VolumeUnit> for Unit {
    fn from(u: VolumeUnit) -> Self {
        Self::Volume(u)
    }
}

impl From<TemperatureUnit> for Unit {
    fn from(u: TemperatureUnit) -> Self {
        Self::Temperature(u)
    }
}

impl From<CountUnit> for Unit {
    fn from(u: CountUnit) -> Self {
        Self::Count(u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};

    fn close(a: Real, b: Real) -> bool {
        nearly_equal(a, b, Tolerances::default())
    }

    #[test]
    fn base_units_are_identity() {
        for category in UnitCategory::ALL {
            let base = category.base_unit();
            assert_eq!(base.category(), category);
            assert_eq!(base.to_base(123.5), 123.5);
            assert_eq!(base.from_base(123.5), 123.5);
        }
    }

    #[test]
    fn known_factors() {
        assert_eq!(Unit::Time(TimeUnit::Minutes).to_base(5.0), 300.0);
        assert_eq!(Unit::Time(TimeUnit::Hours).to_base(1.0), 3_600.0);
        assert_eq!(Unit::Mass(MassUnit::Kilograms).to_base(0.5), 500.0);
        assert_eq!(Unit::Mass(MassUnit::Pounds).to_base(1.0), 453.592);
        assert_eq!(Unit::Volume(VolumeUnit::Liters).to_base(2.0), 2_000.0);
        assert_eq!(Unit::Volume(VolumeUnit::Cups).to_base(1.0), 240.0);
        assert_eq!(Unit::Volume(VolumeUnit::Ounces).to_base(1.0), 29.5735);
        assert_eq!(Unit::Volume(VolumeUnit::Tablespoons).to_base(1.0), 14.7868);
        assert_eq!(Unit::Volume(VolumeUnit::Teaspoons).to_base(1.0), 4.9289);
        assert_eq!(Unit::Volume(VolumeUnit::Cups).from_base(480.0), 2.0);
    }

    #[test]
    fn metric_factors_agree_with_si() {
        use uom::si::f64::{Mass, Volume};
        use uom::si::{mass, volume};

        let kg = Mass::new::<mass::kilogram>(1.0).get::<mass::gram>();
        assert!(close(kg, MassUnit::Kilograms.grams_per_unit()));
        let l = Volume::new::<volume::liter>(1.0).get::<volume::milliliter>();
        assert!(close(l, VolumeUnit::Liters.milliliters_per_unit()));
    }

    #[test]
    fn temperature_is_affine() {
        let f = Unit::Temperature(TemperatureUnit::Fahrenheit);
        assert!(close(f.to_base(32.0) + 1.0, 1.0));
        assert!(close(f.to_base(212.0), 100.0));
        assert!(close(f.from_base(100.0), 212.0));
        assert!(close(f.from_base(-40.0), -40.0));
    }

    #[test]
    fn parse_accepts_registered_names_only() {
        assert_eq!(
            UnitCategory::Volume.parse_unit("liters").unwrap(),
            Unit::Volume(VolumeUnit::Liters)
        );
        let err = UnitCategory::Volume.parse_unit("gallons").unwrap_err();
        assert_eq!(
            err,
            UnitError::InvalidUnit {
                unit: "gallons".into(),
                category: UnitCategory::Volume
            }
        );
        assert!(UnitCategory::Mass.parse_unit("fahrenheit").is_err());
        assert!(UnitCategory::Mass.parse_unit("pieces").is_err());
    }

    #[test]
    fn parse_rejects_variant_spellings() {
        for name in ["Gram", " grams ", "gram", "GRAMS"] {
            assert_eq!(
                UnitCategory::Mass.parse_unit(name).unwrap_err(),
                UnitError::InvalidUnit {
                    unit: name.into(),
                    category: UnitCategory::Mass
                }
            );
        }
        assert!(UnitCategory::Volume.parse_unit("liter").is_err());
        assert!(UnitCategory::Volume.parse_unit("cup").is_err());
        assert!(UnitCategory::Count.parse_unit("piece").is_err());
    }

    #[test]
    fn every_listed_unit_parses_back() {
        for category in UnitCategory::ALL {
            for unit in category.units() {
                assert_eq!(category.parse_unit(unit.name()).unwrap(), unit);
                assert_eq!(unit.category(), category);
            }
        }
    }

    #[test]
    fn consumable_and_additive_sets() {
        let consumable: Vec<_> = UnitCategory::ALL
            .into_iter()
            .filter(|c| c.is_consumable())
            .collect();
        assert_eq!(consumable, vec![UnitCategory::Mass, UnitCategory::Volume]);
        assert!(!UnitCategory::Temperature.is_additive());
        assert!(UnitCategory::Time.is_additive());
    }

    #[test]
    fn category_names_round_trip() {
        for category in UnitCategory::ALL {
            assert_eq!(UnitCategory::from_name(category.name()), Some(category));
        }
        assert_eq!(UnitCategory::from_name("weight"), None);
        assert_eq!(UnitCategory::from_name("Mass"), None);
    }
}
