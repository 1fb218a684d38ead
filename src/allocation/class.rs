//! Building classes and their size tiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::TownError;

/// Number of size variants every class is split into
pub const TIER_COUNT: usize = 3;

/// Land-use class of a building
///
/// Declaration order is the allocation order: descriptors are emitted
/// class by class in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingClass {
    Residential,
    Commerce,
    Industry,
    Recreation,
}

impl BuildingClass {
    pub const ALL: [BuildingClass; 4] = [
        BuildingClass::Residential,
        BuildingClass::Commerce,
        BuildingClass::Industry,
        BuildingClass::Recreation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuildingClass::Residential => "residential",
            BuildingClass::Commerce => "commerce",
            BuildingClass::Industry => "industry",
            BuildingClass::Recreation => "recreation",
        }
    }

    /// Relative size of the small, medium and large variants
    ///
    /// Only the ratios inside one class matter: a tier's share of the class
    /// land (and occupants) is its multiplier over the sum of the three.
    pub fn size_multipliers(&self) -> [f64; TIER_COUNT] {
        match self {
            BuildingClass::Residential => [0.5, 1.0, 1.5],
            BuildingClass::Commerce => [1.0, 2.0, 3.0],
            BuildingClass::Industry => [2.0, 4.0, 6.0],
            BuildingClass::Recreation => [1.5, 3.0, 4.5],
        }
    }

    /// Width over height of the drawn footprint
    pub fn aspect_ratio(&self) -> f64 {
        match self {
            BuildingClass::Residential => 1.0,
            BuildingClass::Commerce => 1.0,
            BuildingClass::Industry => 1.6, // long warehouse halls
            BuildingClass::Recreation => 1.3,
        }
    }
}

impl fmt::Display for BuildingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuildingClass {
    type Err = TownError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BuildingClass::ALL
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                TownError::InvalidInput(format!(
                    "unknown building class '{}' (expected one of residential, commerce, industry, recreation)",
                    wanted
                ))
            })
    }
}

/// Discrete size variant within a class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

impl SizeTier {
    pub const ALL: [SizeTier; TIER_COUNT] = [SizeTier::Small, SizeTier::Medium, SizeTier::Large];

    #[inline]
    pub fn index(&self) -> usize {
        match self {
            SizeTier::Small => 0,
            SizeTier::Medium => 1,
            SizeTier::Large => 2,
        }
    }
}
