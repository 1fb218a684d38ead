//! Spatial lookup structures

pub mod rect_index;

pub use rect_index::RectIndex;
