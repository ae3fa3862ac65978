//! saute-core: quantity model for saute.
//!
//! Contains:
//! - units (closed per-category unit registry, conversions via uom)
//! - quantity (magnitude + unit, conversion and same-category comparison)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod quantity;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{UnitError, UnitResult};
pub use numeric::*;
pub use quantity::Quantity;
pub use units::*;
