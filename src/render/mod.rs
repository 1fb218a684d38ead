//! Raster output of a generated town
//!
//! Rendering only reads the layout and road network; it owns nothing beyond
//! the canvas it returns.

pub mod canvas;
pub mod colors;

pub use canvas::{render, Canvas};
pub use colors::Palette;
