use thiserror::Error;

use crate::allocation::BuildingClass;

#[derive(Error, Debug)]
pub enum TownError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A single building found no free spot. `place` resolves this by
    /// dropping the building, so it never reaches callers of the pipeline.
    #[error("No free position for building #{index} ({class}) after {attempts} attempts")]
    PlacementExhausted {
        index: usize,
        class: BuildingClass,
        attempts: u32,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TownError>;
