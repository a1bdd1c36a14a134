//! The inverse of composition: cut every sprite back out of its atlas,
//! undo trimming and rotation, and write the result to disk.

use crate::error::Result;
use crate::index::AtlasIndex;
use image::{imageops, RgbaImage};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

/// Reads a sprite index, decodes the atlas rasters found next to it and
/// writes one image per sprite under `output_dir`, creating parent
/// directories as needed. Sprites of one atlas are restored in parallel;
/// the first worker error aborts the run.
#[instrument(skip_all)]
pub fn unpack_atlases(index_path: &Path, output_dir: &Path) -> Result<()> {
    let data = fs::read_to_string(index_path)?;
    let index: AtlasIndex = serde_json::from_str(&data)?;
    fs::create_dir_all(output_dir)?;
    let atlas_dir = index_path.parent().unwrap_or_else(|| Path::new("."));

    for entry in &index.atlases {
        let atlas = image::open(atlas_dir.join(&entry.atlas_name))?.to_rgba8();
        entry
            .sprite_list
            .par_iter()
            .try_for_each(|(name, sprite)| -> Result<()> {
                let region = sprite.region;
                let mut raster = imageops::crop_imm(
                    &atlas,
                    region.x.max(0) as u32,
                    region.y.max(0) as u32,
                    region.w.max(0) as u32,
                    region.h.max(0) as u32,
                )
                .to_image();
                if sprite.trimmed {
                    if let Some(rect) = sprite.source_rect {
                        // Re-seat the opaque region inside the recorded
                        // (still rotated) source bounds.
                        let mut restored = RgbaImage::new(
                            sprite.source_size.w.max(0) as u32,
                            sprite.source_size.h.max(0) as u32,
                        );
                        imageops::replace(&mut restored, &raster, rect.x as i64, rect.y as i64);
                        raster = restored;
                    }
                }
                if sprite.rotated {
                    // Quarter-turn counter-clockwise, undoing the
                    // compositor's clockwise rotation.
                    raster = imageops::rotate270(&raster);
                }
                let out_path = output_dir.join(name);
                if let Some(parent) = out_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                raster.save(&out_path)?;
                Ok(())
            })?;
        info!(
            atlas = %entry.atlas_name,
            sprites = entry.sprite_list.len(),
            "atlas unpacked"
        );
    }
    Ok(())
}
