//! Conversions from land area to pixels

use crate::allocation::BuildingDescriptor;
use crate::core::config::LayoutConfig;

/// Side length of the square canvas for a town of `area` units.
///
/// Grows with `sqrt(area)` and is clamped to the configured bounds.
pub fn canvas_side(area: f64, config: &LayoutConfig) -> u32 {
    let raw = config.pixels_per_unit * area.max(0.0).sqrt();
    if !raw.is_finite() {
        return config.max_canvas_side;
    }
    (raw.round() as u32).clamp(config.min_canvas_side, config.max_canvas_side)
}

/// Pixels per unit of length once the canvas side is fixed
pub fn pixel_scale(area: f64, canvas_side: u32) -> f64 {
    canvas_side as f64 / area.sqrt()
}

/// Pixel width and height of a building's drawn footprint.
///
/// The drawn area is `lot_coverage` of the allocated footprint, stretched to
/// the class aspect ratio. Each side is clamped to the configured range, so
/// degenerate footprints still produce a visible box.
pub fn building_size(descriptor: &BuildingDescriptor, scale: f64, config: &LayoutConfig) -> (u32, u32) {
    let side = (descriptor.footprint_area * config.lot_coverage).max(0.0).sqrt() * scale;
    let stretch = descriptor.class.aspect_ratio().sqrt();
    (
        clamp_side(side * stretch, config),
        clamp_side(side / stretch, config),
    )
}

fn clamp_side(side: f64, config: &LayoutConfig) -> u32 {
    if !side.is_finite() {
        return config.min_building_side;
    }
    (side.round().max(0.0) as u32).clamp(config.min_building_side, config.max_building_side)
}
