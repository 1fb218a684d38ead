pub mod config;
pub mod error;
pub mod types;

pub use config::{AllocationConfig, LayoutConfig, RoadConfig, TownConfig};
pub use error::{Result, TownError};
pub use types::{Point, Rect};
