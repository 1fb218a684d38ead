//! Sparse hash grid of pixel boxes for overlap queries

use ahash::AHashMap;

use crate::core::types::Rect;

/// Buckets boxes by the grid cells they cover so that an overlap query only
/// looks at boxes in nearby cells instead of every box placed so far.
#[derive(Debug, Clone)]
pub struct RectIndex {
    cell_size: u32,
    cells: AHashMap<(i32, i32), Vec<usize>>,
    rects: Vec<Rect>,
}

impl RectIndex {
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell_size: cell_size.max(1),
            cells: AHashMap::new(),
            rects: Vec::new(),
        }
    }

    #[inline]
    fn cell_coord(&self, x: i32, y: i32) -> (i32, i32) {
        let size = self.cell_size as i32;
        (x.div_euclid(size), y.div_euclid(size))
    }

    /// Cells touched by the box (inclusive ranges)
    fn cell_span(&self, rect: &Rect) -> ((i32, i32), (i32, i32)) {
        let (x0, y0) = self.cell_coord(rect.x, rect.y);
        // Last covered pixel; an empty box occupies only its origin cell
        let last_x = if rect.width > 0 { rect.right() - 1 } else { rect.x };
        let last_y = if rect.height > 0 { rect.bottom() - 1 } else { rect.y };
        let (x1, y1) = self.cell_coord(last_x, last_y);
        ((x0, x1), (y0, y1))
    }

    /// Store a box; returns its insertion index
    pub fn insert(&mut self, rect: Rect) -> usize {
        let id = self.rects.len();
        let ((x0, x1), (y0, y1)) = self.cell_span(&rect);
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                self.cells.entry((cx, cy)).or_default().push(id);
            }
        }
        self.rects.push(rect);
        id
    }

    /// True when `rect` shares a pixel with any stored box
    pub fn intersects_any(&self, rect: &Rect) -> bool {
        let ((x0, x1), (y0, y1)) = self.cell_span(rect);
        (y0..=y1).any(|cy| {
            (x0..=x1).any(|cx| {
                self.cells
                    .get(&(cx, cy))
                    .into_iter()
                    .flatten()
                    .any(|&id| self.rects[id].intersects(rect))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_across_cells() {
        let mut index = RectIndex::new(16);
        index.insert(Rect::new(0, 0, 40, 10));
        index.insert(Rect::new(100, 100, 10, 10));

        assert!(index.intersects_any(&Rect::new(35, 5, 10, 10)));
        assert!(!index.intersects_any(&Rect::new(50, 50, 10, 10)));
        assert!(index.intersects_any(&Rect::new(0, 0, 200, 200)));
    }

    #[test]
    fn test_negative_coordinates() {
        let mut index = RectIndex::new(10);
        index.insert(Rect::new(-15, -15, 10, 10));
        assert!(index.intersects_any(&Rect::new(-8, -8, 4, 4)));
        assert!(!index.intersects_any(&Rect::new(-5, -5, 4, 4)));
    }

    #[test]
    fn test_insert_returns_sequential_ids() {
        let mut index = RectIndex::new(8);
        assert_eq!(index.insert(Rect::new(0, 0, 4, 4)), 0);
        assert_eq!(index.insert(Rect::new(50, 50, 4, 4)), 1);
    }

    #[test]
    fn test_touching_boxes_do_not_overlap() {
        let mut index = RectIndex::new(8);
        index.insert(Rect::new(0, 0, 8, 8));
        assert!(!index.intersects_any(&Rect::new(8, 0, 8, 8)));
        assert!(index.intersects_any(&Rect::new(7, 7, 8, 8)));
    }
}
