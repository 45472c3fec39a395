//! Cost estimates that sit next to the plan editor.
//!
//! [`BudgetInput::estimate`] gives a rough construction budget from built-up
//! area, quality and city; [`MaterialCatalog::estimate`] prices a bill of
//! materials. Both are plain arithmetic over rupee amounts.

mod budget;
mod format;
mod materials;

pub use budget::{BudgetBreakdown, BudgetInput, CityTier, Quality, MIN_AREA_SQFT};
pub use format::format_rupees;
pub use materials::{MaterialCatalog, MaterialEstimate, MaterialItem, MaterialLine};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EstimateError {
    #[error("area must be a finite number of sq ft, got {0}")]
    InvalidArea(f64),
    #[error("area must be at least {min} sq ft, got {got}")]
    AreaTooSmall { min: f64, got: f64 },
    #[error("at least one floor is required")]
    NoFloors,
    #[error("quantity for '{0}' must be a finite, non-negative number")]
    InvalidQuantity(String),
    #[error("unknown material '{0}'")]
    UnknownMaterial(String),
}
