use serde::{Deserialize, Serialize};

/// Patient age band. Ages are assumed pre-validated to `[0, 120]`
/// by the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    /// Under 13.
    Child,
    /// 13 through 17.
    Adolescent,
    /// 18 through 64.
    Adult,
    /// 65 and over.
    Senior,
}

/// Dosing bucket used for guidance and limit lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeTier {
    Child,
    Adult,
}

impl AgeGroup {
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=12 => Self::Child,
            13..=17 => Self::Adolescent,
            18..=64 => Self::Adult,
            _ => Self::Senior,
        }
    }

    pub fn tier(&self) -> AgeTier {
        match self {
            Self::Child | Self::Adolescent => AgeTier::Child,
            Self::Adult | Self::Senior => AgeTier::Adult,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Child => "child",
            Self::Adolescent => "adolescent",
            Self::Adult => "adult",
            Self::Senior => "senior",
        }
    }
}

impl AgeTier {
    pub fn for_age(age: u32) -> Self {
        AgeGroup::from_age(age).tier()
    }
}
