//! Nearest-neighbor road network with Manhattan routing
//!
//! Every building sends one road to its nearest neighbor (Manhattan distance
//! between box centers). A road is an L of two axis-aligned legs that starts
//! on the source's edge facing the target and ends on the target's facing
//! edge, so it never cuts through either interior.
//!
//! The neighbor search is a linear scan per building. That is fine for the
//! few hundred buildings a map holds; a spatial index can replace it without
//! changing `route`.

use serde::{Deserialize, Serialize};

use crate::core::config::RoadConfig;
use crate::core::types::{Point, Rect};
use crate::layout::PlacedBuilding;

/// Axis of a road's first (longer) leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Two-leg road from one building to its nearest neighbor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadSegment {
    /// Index of the source building in the placed sequence
    pub from: usize,
    /// Index of the target building
    pub to: usize,
    /// Point on the source's facing edge
    pub start: Point,
    /// Where the first leg turns into the second
    pub corner: Point,
    /// Point on the target's facing edge
    pub end: Point,
    /// Axis of the first leg
    pub axis: Axis,
    /// Stroke width in pixels
    pub width: u32,
}

impl RoadSegment {
    /// The two straight legs: start→corner, corner→end
    pub fn legs(&self) -> [(Point, Point); 2] {
        [(self.start, self.corner), (self.corner, self.end)]
    }

    /// Pixel boxes covered by the stroked legs (unclipped)
    pub fn stroke_rects(&self) -> [Rect; 2] {
        self.legs().map(|(a, b)| stroke_rect(a, b, self.width))
    }

    /// Manhattan length of the road
    pub fn length(&self) -> i64 {
        self.start.manhattan(&self.corner) + self.corner.manhattan(&self.end)
    }
}

/// Box covered by a straight leg stroked `width` pixels wide
pub fn stroke_rect(a: Point, b: Point, width: u32) -> Rect {
    let before = (width / 2) as i32;
    let x0 = a.x.min(b.x);
    let y0 = a.y.min(b.y);
    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);
    if a.y == b.y {
        Rect::new(x0, y0 - before, (x1 - x0) as u32 + 1, width)
    } else {
        Rect::new(x0 - before, y0, width, (y1 - y0) as u32 + 1)
    }
}

/// Connect every building to its nearest neighbor.
///
/// Produces one segment per building (none for fewer than two buildings).
/// Deterministic: depends only on the order and boxes of `placed`.
pub fn route(placed: &[PlacedBuilding], config: &RoadConfig) -> Vec<RoadSegment> {
    let roads: Vec<RoadSegment> = (0..placed.len())
        .filter_map(|from| {
            let to = nearest_neighbor(placed, from)?;
            Some(connect(from, &placed[from].bounds, to, &placed[to].bounds, config.width))
        })
        .collect();

    tracing::debug!(roads = roads.len(), buildings = placed.len(), "routed roads");
    roads
}

/// Index of the building whose center is closest to building `index`.
///
/// Ties go to the first building encountered.
pub fn nearest_neighbor(placed: &[PlacedBuilding], index: usize) -> Option<usize> {
    let origin = placed.get(index)?.center();
    let mut best: Option<(usize, i64)> = None;
    for (other, building) in placed.iter().enumerate() {
        if other == index {
            continue;
        }
        let dist = origin.manhattan(&building.center());
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((other, dist));
        }
    }
    best.map(|(other, _)| other)
}

/// Route between the facing edges of two boxes.
///
/// The longer center-to-center axis picks the edges and the first leg.
fn connect(from: usize, src: &Rect, to: usize, dst: &Rect, width: u32) -> RoadSegment {
    let c1 = src.center();
    let c2 = dst.center();
    let dx = c2.x - c1.x;
    let dy = c2.y - c1.y;

    let (start, end, corner, axis) = if dx.abs() > dy.abs() {
        let (sx, ex) = if dx > 0 { (src.right(), dst.x) } else { (src.x, dst.right()) };
        let start = Point::new(sx, c1.y);
        let end = Point::new(ex, c2.y);
        (start, end, Point::new(end.x, start.y), Axis::Horizontal)
    } else {
        let (sy, ey) = if dy > 0 { (src.bottom(), dst.y) } else { (src.y, dst.bottom()) };
        let start = Point::new(c1.x, sy);
        let end = Point::new(c2.x, ey);
        (start, end, Point::new(start.x, end.y), Axis::Vertical)
    };

    RoadSegment {
        from,
        to,
        start,
        corner,
        end,
        axis,
        width,
    }
}
