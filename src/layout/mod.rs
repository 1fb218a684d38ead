//! Placing allocated buildings on the canvas

pub mod footprint;
pub mod placement;
pub mod shape;

pub use footprint::{building_size, canvas_side, pixel_scale};
pub use placement::{place, Layout, LayoutSurface, PlacedBuilding};
pub use shape::BuildingShape;
