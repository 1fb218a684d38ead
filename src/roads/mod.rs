//! Road network connecting placed buildings

pub mod router;

pub use router::{nearest_neighbor, route, stroke_rect, Axis, RoadSegment};
