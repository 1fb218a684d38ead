//! Rasterizing roads and buildings into an RGB pixel buffer

use image::{Rgb, RgbImage};

use crate::core::types::Rect;
use crate::layout::PlacedBuilding;
use crate::render::colors::Palette;
use crate::roads::RoadSegment;

/// Owned RGB pixel buffer, interleaved and row-major
///
/// Each generation gets its own canvas; nothing is shared between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel at (x, y), `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        if x < self.width() && y < self.height() {
            Some(*self.image.get_pixel(x, y))
        } else {
            None
        }
    }

    /// Raw bytes, `width * height * 3`
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.image.into_raw()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Paint a box, silently clipped to the canvas
    pub fn fill_rect(&mut self, rect: Rect, color: Rgb<u8>) {
        let Some((xs, ys)) = rect.clip(self.width(), self.height()) else {
            return;
        };
        for y in ys {
            for x in xs.clone() {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    pub fn draw_road(&mut self, road: &RoadSegment, color: Rgb<u8>) {
        for rect in road.stroke_rects() {
            self.fill_rect(rect, color);
        }
    }

    pub fn draw_building(&mut self, building: &PlacedBuilding, color: Rgb<u8>) {
        for block in building.blocks() {
            self.fill_rect(block, color);
        }
    }
}

/// Draw roads, then buildings on top of them.
///
/// Pure: the same inputs always produce the same bytes.
pub fn render(
    width: u32,
    height: u32,
    placed: &[PlacedBuilding],
    roads: &[RoadSegment],
    palette: &Palette,
) -> Canvas {
    let mut canvas = Canvas::new(width, height, palette.background_color());

    let road_color = palette.road_color();
    for road in roads {
        canvas.draw_road(road, road_color);
    }

    for building in placed {
        canvas.draw_building(building, palette.class_color(building.class()));
    }

    tracing::debug!(width, height, buildings = placed.len(), roads = roads.len(), "rendered canvas");
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::{BuildingClass, BuildingDescriptor, SizeTier};
    use crate::core::types::Point;
    use crate::layout::BuildingShape;
    use crate::roads::Axis;

    fn building(class: BuildingClass, bounds: Rect, shape: BuildingShape) -> PlacedBuilding {
        PlacedBuilding {
            descriptor: BuildingDescriptor {
                class,
                tier: SizeTier::Medium,
                footprint_area: 0.01,
                capacity: 4.0,
            },
            bounds,
            shape,
        }
    }

    #[test]
    fn test_raw_layout_is_rgb_row_major() {
        let mut canvas = Canvas::new(4, 3, Rgb([255, 255, 255]));
        canvas.fill_rect(Rect::new(1, 2, 1, 1), Rgb([1, 2, 3]));
        let raw = canvas.as_raw();
        assert_eq!(raw.len(), 4 * 3 * 3);
        let offset = (2 * 4 + 1) * 3;
        assert_eq!(&raw[offset..offset + 3], &[1, 2, 3]);
    }

    #[test]
    fn test_fill_rect_clips_silently() {
        let mut canvas = Canvas::new(10, 10, Rgb([255, 255, 255]));
        canvas.fill_rect(Rect::new(-5, 8, 30, 30), Rgb([0, 0, 0]));
        canvas.fill_rect(Rect::new(50, 50, 3, 3), Rgb([0, 0, 0]));
        assert_eq!(canvas.pixel(0, 9), Some(Rgb([0, 0, 0])));
        assert_eq!(canvas.pixel(9, 7), Some(Rgb([255, 255, 255])));
        assert_eq!(canvas.pixel(10, 0), None);
    }

    #[test]
    fn test_buildings_occlude_roads() {
        let palette = Palette::default();
        let placed = [building(
            BuildingClass::Industry,
            Rect::new(10, 10, 10, 10),
            BuildingShape::Rectangle,
        )];
        let road = RoadSegment {
            from: 0,
            to: 0,
            start: Point::new(0, 15),
            corner: Point::new(30, 15),
            end: Point::new(30, 15),
            axis: Axis::Horizontal,
            width: 3,
        };
        let canvas = render(40, 40, &placed, &[road], &palette);
        assert_eq!(canvas.pixel(15, 15), Some(palette.class_color(BuildingClass::Industry)));
        assert_eq!(canvas.pixel(5, 15), Some(palette.road_color()));
        assert_eq!(canvas.pixel(5, 5), Some(palette.background_color()));
    }

    #[test]
    fn test_l_shape_leaves_gap() {
        let palette = Palette::default();
        let placed = [building(
            BuildingClass::Commerce,
            Rect::new(0, 0, 20, 30),
            BuildingShape::L { quarter_turns: 0 },
        )];
        let canvas = render(40, 40, &placed, &[], &palette);
        let fill = palette.class_color(BuildingClass::Commerce);
        assert_eq!(canvas.pixel(5, 5), Some(fill));
        assert_eq!(canvas.pixel(15, 25), Some(fill));
        assert_eq!(canvas.pixel(15, 5), Some(palette.background_color()));
    }

    #[test]
    fn test_render_is_idempotent() {
        let palette = Palette::default();
        let placed = [
            building(BuildingClass::Residential, Rect::new(5, 5, 8, 8), BuildingShape::Rectangle),
            building(BuildingClass::Recreation, Rect::new(30, 30, 8, 8), BuildingShape::Rectangle),
        ];
        let roads = crate::roads::route(&placed, &crate::core::config::RoadConfig::default());
        let a = render(50, 50, &placed, &roads, &palette);
        let b = render(50, 50, &placed, &roads, &palette);
        assert_eq!(a.as_raw(), b.as_raw());
    }
}
