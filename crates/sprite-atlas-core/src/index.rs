//! Serde model of the sprite index emitted next to the atlas rasters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub w: i32,
    pub h: i32,
}

/// One record per packed sprite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteInfo {
    pub filename: String,
    /// Position and size inside the atlas.
    pub region: Region,
    /// Bounds of the (possibly rotated) source image.
    #[serde(rename = "sourceSize")]
    pub source_size: Dimensions,
    /// Location of the opaque region inside the source; present only when
    /// the sprite was trimmed.
    #[serde(rename = "sourceRect", skip_serializing_if = "Option::is_none", default)]
    pub source_rect: Option<Region>,
    pub trimmed: bool,
    pub rotated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasMeta {
    pub version: String,
    /// `YYYY-MM-DD HH:MM:SS`, local time.
    pub timestamp: String,
}

/// One atlas raster and its sprites, keyed by filename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasEntry {
    #[serde(rename = "atlasName")]
    pub atlas_name: String,
    #[serde(rename = "totalSize")]
    pub total_size: Dimensions,
    #[serde(rename = "spriteList")]
    pub sprite_list: BTreeMap<String, SpriteInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasIndex {
    pub meta: AtlasMeta,
    pub atlases: Vec<AtlasEntry>,
}

impl AtlasIndex {
    pub fn new(atlases: Vec<AtlasEntry>) -> Self {
        Self {
            meta: AtlasMeta {
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            },
            atlases,
        }
    }
}
