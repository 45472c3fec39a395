use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// Architectural style requested for the plan.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlanStyle {
    #[default]
    Modern,
    Traditional,
    Contemporary,
}

impl PlanStyle {
    pub fn key(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for PlanStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Modern => "Modern",
            Self::Traditional => "Traditional",
            Self::Contemporary => "Contemporary",
        })
    }
}

/// Plot and style details handed over when an editing session starts.
///
/// Shown in the editor header; nothing in the editor depends on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    pub length_ft: u32,
    pub width_ft: u32,
    #[serde(default = "default_floors")]
    pub floors: u8,
    #[serde(default)]
    pub style: PlanStyle,
}

fn default_floors() -> u8 {
    1
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            length_ft: 40,
            width_ft: 30,
            floors: 1,
            style: PlanStyle::Modern,
        }
    }
}

impl PlanConfig {
    /// One-line summary, e.g. `40' × 30' | 1 Floor(s) | Modern`.
    pub fn summary(&self) -> String {
        format!(
            "{}' × {}' | {} Floor(s) | {}",
            self.length_ft, self.width_ft, self.floors, self.style
        )
    }
}
