use crate::EstimateError;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// Smallest built-up area the calculator accepts.
pub const MIN_AREA_SQFT: f64 = 100.0;

const MATERIALS_SHARE: f64 = 0.6;
const LABOUR_SHARE: f64 = 0.3;
const SERVICES_SHARE: f64 = 0.1;

/// Finish quality, which sets the base rate per square foot.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Quality {
    Economy,
    #[default]
    Standard,
    Premium,
}

impl Quality {
    /// Rupees per square foot.
    pub fn rate(self) -> f64 {
        match self {
            Self::Economy => 1200.0,
            Self::Standard => 1600.0,
            Self::Premium => 2200.0,
        }
    }

    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// City class, applied as a multiplier on the base cost.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CityTier {
    Metro,
    Tier1,
    #[default]
    Tier2,
}

impl CityTier {
    pub fn factor(self) -> f64 {
        match self {
            Self::Metro => 1.15,
            Self::Tier1 => 1.05,
            Self::Tier2 => 1.0,
        }
    }

    pub fn key(self) -> &'static str {
        self.into()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetInput {
    pub area_sqft: f64,
    pub floors: u32,
    #[serde(default)]
    pub quality: Quality,
    #[serde(default)]
    pub city: CityTier,
}

impl Default for BudgetInput {
    fn default() -> Self {
        Self {
            area_sqft: 1200.0,
            floors: 1,
            quality: Quality::Standard,
            city: CityTier::Tier2,
        }
    }
}

/// Estimated total and how it splits across cost heads.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    /// Whole rupees.
    pub total: f64,
    pub materials: f64,
    pub labour: f64,
    pub services: f64,
}

impl BudgetInput {
    pub fn validate(&self) -> Result<(), EstimateError> {
        if !self.area_sqft.is_finite() {
            return Err(EstimateError::InvalidArea(self.area_sqft));
        }
        if self.area_sqft < MIN_AREA_SQFT {
            return Err(EstimateError::AreaTooSmall {
                min: MIN_AREA_SQFT,
                got: self.area_sqft,
            });
        }
        if self.floors == 0 {
            return Err(EstimateError::NoFloors);
        }
        Ok(())
    }

    pub fn estimate(&self) -> Result<BudgetBreakdown, EstimateError> {
        self.validate()?;

        let base =
            self.quality.rate() * self.area_sqft * f64::from(self.floors) * self.city.factor();
        Ok(BudgetBreakdown {
            total: base.round(),
            materials: base * MATERIALS_SHARE,
            labour: base * LABOUR_SHARE,
            services: base * SERVICES_SHARE,
        })
    }
}
