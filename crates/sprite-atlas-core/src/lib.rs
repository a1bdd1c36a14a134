//! Core library for packing sprites into texture atlases.
//!
//! - Algorithms: MaxRects (BSSF/BLSF/BAF/BL/CP), Guillotine (best/worst
//!   fit + split rules), Skyline (pocket scoring with left/right
//!   placement), selected by a compact [`Heuristic`] bitmask
//! - The [`Packer`] façade sorts, packs, reports leftovers and can shrink
//!   the bin to a tight bounding box afterwards
//! - The pipeline measures sources (optionally alpha-trimmed), overflows
//!   into additional bins, composes RGBA atlases in parallel and emits a
//!   serde sprite index; `unpack` restores the original sprites
//!
//! Quick example:
//! ```ignore
//! use sprite_atlas_core::prelude::*;
//! # fn main() -> sprite_atlas_core::Result<()> {
//! let mut packer = Packer::new(256, 256, Heuristic::MAX_RECTS_BAF)?;
//! packer.insert([Size::with_id(0, 128, 128), Size::with_id(1, 64, 64)]);
//! assert!(packer.pack());
//! println!("placed: {}", packer.packed().len());
//! # Ok(()) }
//! ```

pub mod compose;
pub mod config;
pub mod error;
pub mod geom;
pub mod heuristic;
pub mod index;
pub mod packer;
pub mod pipeline;
pub mod sort;
pub mod trim;
pub mod unpack;

pub use compose::{compose_atlas, ComposedAtlas};
pub use config::{PackConfig, PackConfigBuilder, DEFAULT_SIZE};
pub use error::{AtlasError, Result};
pub use geom::{Point, Rect, Size};
pub use heuristic::Heuristic;
pub use index::{AtlasEntry, AtlasIndex, AtlasMeta, Dimensions, Region, SpriteInfo};
pub use packer::{Algorithm, GuillotineBin, MaxRectsBin, Packer, SkylineBin};
pub use pipeline::{pack_sprites, scan_sources, SpriteSource};
pub use sort::SortKind;
pub use trim::alpha_bbox;
pub use unpack::unpack_atlases;

/// Convenience prelude bringing the primary APIs into scope.
pub mod prelude {
    pub use crate::compose::{compose_atlas, ComposedAtlas};
    pub use crate::config::{PackConfig, PackConfigBuilder};
    pub use crate::geom::{Point, Rect, Size};
    pub use crate::heuristic::Heuristic;
    pub use crate::index::{AtlasEntry, AtlasIndex, SpriteInfo};
    pub use crate::packer::Packer;
    pub use crate::pipeline::{pack_sprites, scan_sources, SpriteSource};
    pub use crate::sort::SortKind;
    pub use crate::unpack::unpack_atlases;
}
