//! Color definitions for building classes and roads

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::allocation::BuildingClass;

/// Background color of an empty map
pub const BACKGROUND: [u8; 3] = [255, 255, 255];

/// Asphalt gray used for roads
pub const ROAD: [u8; 3] = [50, 50, 50];

/// RGB colors used by the rasterizer
///
/// Overridable from the `[render]` table of a config file, e.g.
/// `residential = [40, 160, 60]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub residential: [u8; 3],
    pub commerce: [u8; 3],
    pub industry: [u8; 3],
    pub recreation: [u8; 3],
    pub road: [u8; 3],
    pub background: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            residential: [0, 255, 0],  // Green
            commerce: [255, 0, 0],     // Red
            industry: [0, 0, 255],     // Blue
            recreation: [128, 128, 128], // Gray
            road: ROAD,
            background: BACKGROUND,
        }
    }
}

impl Palette {
    /// Fill color for a building class
    pub fn class_color(&self, class: BuildingClass) -> Rgb<u8> {
        match class {
            BuildingClass::Residential => Rgb(self.residential),
            BuildingClass::Commerce => Rgb(self.commerce),
            BuildingClass::Industry => Rgb(self.industry),
            BuildingClass::Recreation => Rgb(self.recreation),
        }
    }

    pub fn road_color(&self) -> Rgb<u8> {
        Rgb(self.road)
    }

    pub fn background_color(&self) -> Rgb<u8> {
        Rgb(self.background)
    }
}
