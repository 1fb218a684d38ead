//! Generator configuration with documented constants
//!
//! Every heuristic used by the allocator and the layout engine lives here.
//! None of them is a physical law; they were picked so that a town of a few
//! thousand people on a few square kilometers renders as a readable map.
//! Callers needing different tuning pass a different config rather than
//! forking the algorithm.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::allocation::{BuildingClass, TIER_COUNT};
use crate::core::error::{Result, TownError};
use crate::render::colors::Palette;

/// Complete configuration for one generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TownConfig {
    pub allocation: AllocationConfig,
    pub layout: LayoutConfig,
    pub roads: RoadConfig,
    pub render: Palette,
}

/// Constants turning (population, area, mix) into building counts and sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Average residents served by one building
    ///
    /// At 40, a town of 1000 people on one area unit gets 25 buildings.
    pub base_population_per_building: f64,

    /// Area (in input units) that counts as "one unit" for area scaling
    ///
    /// Areas at or below this do not add buildings beyond the population term.
    pub base_area_per_building: f64,

    /// Exponent applied to the area term of the building count
    ///
    /// 0.5 (square root) damps growth so a 100x larger area yields 10x more
    /// buildings, not 100x. This is a policy, not a derivation.
    pub area_damping_exponent: f64,

    /// Slope of the per-class footprint multiplier `1 + slope * share`
    ///
    /// Dominant land uses trend toward larger structures: at 5.0 a class
    /// holding 60% of the mix builds 4x the footprint of a 0% class.
    pub footprint_multiplier_slope: f64,

    /// Share of a class's buildings going to the small, medium, large tiers
    pub tier_proportions: [f64; TIER_COUNT],

    /// Largest footprint any single building may take, as a fraction of the
    /// total area
    ///
    /// Binds when counts are tiny (e.g. 3 buildings on 1 km²), keeping one
    /// building from swallowing the map.
    pub max_footprint_fraction: f64,

    /// Upper bound on the rounded building total
    ///
    /// Requests above it are rejected as invalid input instead of producing
    /// a plan nobody can place or draw.
    pub max_buildings: u64,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            base_population_per_building: 40.0,
            base_area_per_building: 1.0,
            area_damping_exponent: 0.5,
            footprint_multiplier_slope: 5.0,
            tier_proportions: [0.4, 0.4, 0.2],
            max_footprint_fraction: 0.1,
            max_buildings: 1_000_000,
        }
    }
}

/// Canvas sizing and placement constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Pixels per unit of length (the square root of one area unit)
    pub pixels_per_unit: f64,

    /// Canvas side never drops below this many pixels
    pub min_canvas_side: u32,

    /// Canvas side never exceeds this many pixels
    pub max_canvas_side: u32,

    /// Fraction of its allocated lot that a drawn building covers
    ///
    /// The allocator hands out all of the land, so drawing lots at full size
    /// would leave no room for streets. At 0.25 each building is drawn at
    /// half its lot's side length.
    pub lot_coverage: f64,

    /// Smallest side length of a drawn building (pixels)
    pub min_building_side: u32,

    /// Largest side length of a drawn building (pixels)
    pub max_building_side: u32,

    /// Pixels added on every side of a bounding box before overlap tests
    ///
    /// Both boxes are expanded, so neighbors end up at least twice this far
    /// apart, which leaves room for a road between them.
    pub spacing_margin: u32,

    /// Random positions tried per building before it is dropped
    pub max_attempts: u32,

    /// Class that may be drawn as an L shape (`None` disables the variant)
    pub l_shape_class: Option<BuildingClass>,

    /// Probability that a building of `l_shape_class` becomes an L
    pub l_shape_chance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: 300.0,
            min_canvas_side: 200,
            max_canvas_side: 2000,
            lot_coverage: 0.25,
            min_building_side: 4,
            max_building_side: 80,
            spacing_margin: 3,
            max_attempts: 150,
            l_shape_class: Some(BuildingClass::Commerce),
            l_shape_chance: 0.3,
        }
    }
}

/// Road drawing constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadConfig {
    /// Stroke width in pixels, centered on the road's axis
    pub width: u32,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self { width: 5 }
    }
}

impl TownConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded town config");
        Ok(config)
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: TownConfig = toml::from_str(content)?;
        config.validate().map_err(TownError::Config)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        let a = &self.allocation;
        if !(a.base_population_per_building > 0.0) || !(a.base_area_per_building > 0.0) {
            return Err("base_population_per_building and base_area_per_building must be positive".into());
        }
        if !(a.area_damping_exponent >= 0.0) || !(a.footprint_multiplier_slope >= 0.0) {
            return Err("area_damping_exponent and footprint_multiplier_slope must be non-negative".into());
        }
        if a.tier_proportions.iter().any(|p| !(*p >= 0.0))
            || !(a.tier_proportions.iter().sum::<f64>() > 0.0)
        {
            return Err(format!(
                "tier_proportions {:?} must be non-negative with a positive sum",
                a.tier_proportions
            ));
        }
        if !(a.max_footprint_fraction > 0.0 && a.max_footprint_fraction <= 1.0) {
            return Err(format!(
                "max_footprint_fraction ({}) must be in (0, 1]",
                a.max_footprint_fraction
            ));
        }
        if a.max_buildings == 0 {
            return Err("max_buildings must be at least 1".into());
        }

        let l = &self.layout;
        if !(l.pixels_per_unit > 0.0) {
            return Err("pixels_per_unit must be positive".into());
        }
        if l.min_canvas_side == 0 || l.min_canvas_side > l.max_canvas_side {
            return Err(format!(
                "min_canvas_side ({}) must be positive and <= max_canvas_side ({})",
                l.min_canvas_side, l.max_canvas_side
            ));
        }
        if l.min_building_side == 0 || l.min_building_side > l.max_building_side {
            return Err(format!(
                "min_building_side ({}) must be positive and <= max_building_side ({})",
                l.min_building_side, l.max_building_side
            ));
        }
        if l.max_building_side > l.min_canvas_side {
            return Err(format!(
                "max_building_side ({}) must fit on the smallest canvas ({})",
                l.max_building_side, l.min_canvas_side
            ));
        }
        if !(l.lot_coverage > 0.0 && l.lot_coverage <= 1.0) {
            return Err(format!("lot_coverage ({}) must be in (0, 1]", l.lot_coverage));
        }
        if !(0.0..=1.0).contains(&l.l_shape_chance) {
            return Err(format!("l_shape_chance ({}) must be in [0, 1]", l.l_shape_chance));
        }
        if l.max_attempts == 0 {
            return Err("max_attempts must be at least 1".into());
        }

        if self.roads.width == 0 {
            return Err("road width must be at least 1 pixel".into());
        }

        Ok(())
    }
}
