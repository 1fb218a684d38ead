//! Drawn shape of a placed building
//!
//! Shapes are cosmetic: overlap tests always use the bounding box, and a
//! shape only decides which blocks inside that box get painted.

use serde::{Deserialize, Serialize};

use crate::core::types::Rect;

/// Block grid of the L footprint, rows top to bottom
const L_GRID: [[bool; 2]; 3] = [
    [true, false],
    [true, false],
    [true, true],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingShape {
    /// Solid box
    #[default]
    Rectangle,
    /// L built from a 3x2 block grid, rotated clockwise by `quarter_turns`
    L { quarter_turns: u8 },
}

impl BuildingShape {
    /// Block grid of the shape after rotation (`true` = painted)
    pub fn grid(&self) -> Vec<Vec<bool>> {
        match self {
            BuildingShape::Rectangle => vec![vec![true]],
            BuildingShape::L { quarter_turns } => {
                let mut grid: Vec<Vec<bool>> = L_GRID.iter().map(|row| row.to_vec()).collect();
                for _ in 0..(quarter_turns % 4) {
                    grid = rotate_clockwise(&grid);
                }
                grid
            }
        }
    }

    /// Painted blocks of the shape fitted into `bounds`.
    ///
    /// Block edges are spread evenly so the blocks tile the box exactly,
    /// whatever its size.
    pub fn blocks(&self, bounds: Rect) -> Vec<Rect> {
        if let BuildingShape::Rectangle = self {
            return vec![bounds];
        }
        let grid = self.grid();
        let rows = grid.len() as i64;
        let cols = grid.first().map_or(0, Vec::len) as i64;
        let edge = |origin: i32, span: u32, i: i64, n: i64| origin + (span as i64 * i / n) as i32;

        let mut blocks = Vec::new();
        for (r, row) in grid.iter().enumerate() {
            for (c, &filled) in row.iter().enumerate() {
                if !filled {
                    continue;
                }
                let (r, c) = (r as i64, c as i64);
                let x0 = edge(bounds.x, bounds.width, c, cols);
                let x1 = edge(bounds.x, bounds.width, c + 1, cols);
                let y0 = edge(bounds.y, bounds.height, r, rows);
                let y1 = edge(bounds.y, bounds.height, r + 1, rows);
                if x1 > x0 && y1 > y0 {
                    blocks.push(Rect::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32));
                }
            }
        }
        blocks
    }
}

/// Rotate a block grid 90° clockwise
fn rotate_clockwise(grid: &[Vec<bool>]) -> Vec<Vec<bool>> {
    let rows = grid.len();
    let cols = grid.first().map_or(0, Vec::len);
    (0..cols)
        .map(|c| (0..rows).map(|r| grid[rows - 1 - r][c]).collect())
        .collect()
}
