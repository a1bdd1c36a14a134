use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown algorithm/variant combination: {algorithm}/{variant}")]
    UnknownHeuristic { algorithm: String, variant: String },

    #[error("bin dimensions must be greater than 0 (got {width}x{height})")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "sprite '{name}' ({width}x{height}) exceeds the maximum bin size ({max_width}x{max_height})"
    )]
    SpriteTooLarge {
        name: String,
        width: i32,
        height: i32,
        max_width: i32,
        max_height: i32,
    },

    #[error("input directory {} does not exist", .0.display())]
    MissingInputDir(PathBuf),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
