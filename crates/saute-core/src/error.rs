use thiserror::Error;

use crate::units::UnitCategory;

pub type UnitResult<T> = Result<T, UnitError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("Invalid unit '{unit}' for unit category {category}")]
    InvalidUnit { unit: String, category: UnitCategory },

    #[error("Unit category mismatch: expected {expected}, found {found}")]
    CategoryMismatch {
        expected: UnitCategory,
        found: UnitCategory,
    },

    #[error("Quantities of category {category} cannot be added or subtracted")]
    NotAdditive { category: UnitCategory },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
