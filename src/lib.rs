//! Town Planner - synthetic town maps from population and area
//!
//! The pipeline runs in four stages, each usable on its own:
//! [`allocation`] turns population, area and a class mix into building
//! descriptors, [`layout`] places them on a canvas, [`roads`] connects each
//! building to its nearest neighbor, and [`render`] rasterizes the result.
//! [`town::generate`] chains them for one request.

pub mod allocation;
pub mod core;
pub mod layout;
pub mod render;
pub mod report;
pub mod roads;
pub mod spatial;
pub mod town;

pub use crate::core::config::TownConfig;
pub use crate::core::error::{Result, TownError};
pub use town::{generate, Town, TownRequest};
