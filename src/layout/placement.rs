//! Greedy randomized placement of buildings on the canvas
//!
//! Buildings are placed in allocation order. Each one tries a bounded number
//! of uniformly random positions and takes the first whose margin-expanded
//! box clears every box placed before it. A building that finds no spot is
//! dropped, so dense towns still produce a usable (if sparser) map.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::allocation::{BuildingClass, BuildingDescriptor};
use crate::core::config::LayoutConfig;
use crate::core::error::{Result, TownError};
use crate::core::types::{Point, Rect};
use crate::layout::footprint::{building_size, canvas_side, pixel_scale};
use crate::layout::shape::BuildingShape;
use crate::spatial::RectIndex;

/// Canvas dimensions and the scale used to convert area to pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSurface {
    pub width: u32,
    pub height: u32,
    /// Pixels per unit of length
    pub pixels_per_unit: f64,
}

impl LayoutSurface {
    /// Square canvas sized from the town area
    pub fn for_area(area: f64, config: &LayoutConfig) -> Self {
        let side = canvas_side(area, config);
        Self {
            width: side,
            height: side,
            pixels_per_unit: pixel_scale(area, side),
        }
    }
}

/// A descriptor with its position and pixel size on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedBuilding {
    pub descriptor: BuildingDescriptor,
    /// Bounding box; lies fully inside the canvas
    pub bounds: Rect,
    pub shape: BuildingShape,
}

impl PlacedBuilding {
    pub fn class(&self) -> BuildingClass {
        self.descriptor.class
    }

    pub fn x(&self) -> i32 {
        self.bounds.x
    }

    pub fn y(&self) -> i32 {
        self.bounds.y
    }

    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Pixel blocks painted for this building
    pub fn blocks(&self) -> Vec<Rect> {
        self.shape.blocks(self.bounds)
    }
}

/// Result of placing a set of buildings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub surface: LayoutSurface,
    pub spacing_margin: u32,
    /// Placed buildings, in allocation order
    pub placed: Vec<PlacedBuilding>,
    /// Buildings that found no free position
    pub dropped: Vec<BuildingDescriptor>,
}

impl Layout {
    pub fn placed_count(&self, class: BuildingClass) -> usize {
        self.placed.iter().filter(|b| b.class() == class).count()
    }

    pub fn dropped_count(&self, class: BuildingClass) -> usize {
        self.dropped.iter().filter(|d| d.class == class).count()
    }
}

/// Place `buildings` on `surface`.
///
/// Deterministic for a given rng state. Never fails: buildings that exhaust
/// their attempts are logged and listed in [`Layout::dropped`].
pub fn place<R: Rng>(
    buildings: &[BuildingDescriptor],
    surface: LayoutSurface,
    config: &LayoutConfig,
    rng: &mut R,
) -> Layout {
    let margin = config.spacing_margin;
    let mut occupied = RectIndex::new(config.max_building_side + 2 * margin);
    let mut placed = Vec::with_capacity(buildings.len());
    let mut dropped = Vec::new();

    for (index, descriptor) in buildings.iter().enumerate() {
        match try_place(index, descriptor, surface, &occupied, config, rng) {
            Ok(building) => {
                occupied.insert(building.bounds.expand(margin));
                placed.push(building);
            }
            Err(err @ TownError::PlacementExhausted { .. }) => {
                tracing::debug!("dropping building: {}", err);
                dropped.push(*descriptor);
            }
            Err(err) => {
                tracing::error!("unexpected placement failure: {}", err);
                dropped.push(*descriptor);
            }
        }
    }

    tracing::info!(
        placed = placed.len(),
        dropped = dropped.len(),
        width = surface.width,
        height = surface.height,
        "layout complete"
    );
    if dropped.len() * 2 > buildings.len() {
        tracing::warn!(
            "{} of {} buildings did not fit on the canvas",
            dropped.len(),
            buildings.len()
        );
    }

    Layout {
        surface,
        spacing_margin: margin,
        placed,
        dropped,
    }
}

/// Try random positions for one building
fn try_place<R: Rng>(
    index: usize,
    descriptor: &BuildingDescriptor,
    surface: LayoutSurface,
    occupied: &RectIndex,
    config: &LayoutConfig,
    rng: &mut R,
) -> Result<PlacedBuilding> {
    let (width, height) = building_size(descriptor, surface.pixels_per_unit, config);
    let width = width.min(surface.width);
    let height = height.min(surface.height);

    for _ in 0..config.max_attempts {
        let x = rng.gen_range(0..=surface.width - width) as i32;
        let y = rng.gen_range(0..=surface.height - height) as i32;
        let bounds = Rect::new(x, y, width, height);

        if !occupied.intersects_any(&bounds.expand(config.spacing_margin)) {
            let shape = pick_shape(descriptor.class, config, rng);
            return Ok(PlacedBuilding {
                descriptor: *descriptor,
                bounds,
                shape,
            });
        }
    }

    Err(TownError::PlacementExhausted {
        index,
        class: descriptor.class,
        attempts: config.max_attempts,
    })
}

fn pick_shape<R: Rng>(class: BuildingClass, config: &LayoutConfig, rng: &mut R) -> BuildingShape {
    if config.l_shape_class == Some(class) && rng.gen::<f64>() < config.l_shape_chance {
        BuildingShape::L {
            quarter_turns: rng.gen_range(0..4),
        }
    } else {
        BuildingShape::Rectangle
    }
}
