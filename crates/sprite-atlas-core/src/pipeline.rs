//! Offline pipeline: measure sources, pack them into one or more bins.

use crate::config::PackConfig;
use crate::error::{AtlasError, Result};
use crate::geom::{Rect, Size};
use crate::packer::Packer;
use crate::trim::alpha_bbox;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// A sprite discovered on disk, measured and optionally trimmed.
#[derive(Debug, Clone)]
pub struct SpriteSource {
    pub path: PathBuf,
    /// Footprint handed to the packer; `id` indexes the source list.
    pub size: Size,
    /// Opaque region inside the original image. Full bounds when trimming
    /// is off or the image is fully transparent.
    pub trim: Rect,
    /// Set when trimming found no opaque pixel at all.
    pub fully_transparent: bool,
}

/// Measures every input file, in parallel. With trimming enabled each file
/// is fully decoded and its alpha bounding box computed; otherwise only
/// the header is read. The first worker error aborts the scan.
#[instrument(skip_all)]
pub fn scan_sources(paths: &[PathBuf], cfg: &PackConfig) -> Result<Vec<SpriteSource>> {
    paths
        .par_iter()
        .enumerate()
        .map(|(index, path)| scan_one(index as i32, path, cfg))
        .collect()
}

fn scan_one(id: i32, path: &Path, cfg: &PackConfig) -> Result<SpriteSource> {
    if cfg.trim {
        let image = image::open(path)?;
        let (bbox, fully_transparent) = alpha_bbox(&image, cfg.trim_threshold);
        Ok(SpriteSource {
            path: path.to_path_buf(),
            size: Size::with_id(id, bbox.width(), bbox.height()),
            trim: bbox,
            fully_transparent,
        })
    } else {
        let (width, height) = image::image_dimensions(path)?;
        let (width, height) = (width as i32, height as i32);
        Ok(SpriteSource {
            path: path.to_path_buf(),
            size: Size::with_id(id, width, height),
            trim: Rect::new(0, 0, width, height),
            fully_transparent: false,
        })
    }
}

/// Packs the sources into as many bins as needed: each round packs a fresh
/// [`Packer`] over the remaining sizes and yields one bin. A round that
/// places nothing means some sprite can never fit and the driver bails.
#[instrument(skip_all)]
pub fn pack_sprites(sources: &[SpriteSource], cfg: &PackConfig) -> Result<Vec<Packer>> {
    cfg.validate()?;
    let mut remaining: Vec<Size> = sources.iter().map(|s| s.size).collect();
    let mut bins: Vec<Packer> = Vec::new();
    while !remaining.is_empty() {
        let mut packer = Packer::new(cfg.max_width, cfg.max_height, cfg.heuristic)?;
        packer.allow_rotate(cfg.allow_rotate);
        packer.set_padding(cfg.padding);
        packer.set_sorter(cfg.sort, cfg.sort_reverse);
        packer.insert(remaining.iter().copied());
        let complete = packer.pack();
        if packer.packed().is_empty() {
            let offender = remaining[0];
            let name = sources
                .get(offender.id as usize)
                .map(|s| s.path.display().to_string())
                .unwrap_or_else(|| format!("#{}", offender.id));
            return Err(AtlasError::SpriteTooLarge {
                name,
                width: offender.width,
                height: offender.height,
                max_width: cfg.max_width,
                max_height: cfg.max_height,
            });
        }
        if complete && cfg.auto_size {
            packer.shrink();
        }
        remaining = packer.unpacked().to_vec();
        info!(
            bin = bins.len(),
            packed = packer.packed().len(),
            leftover = remaining.len(),
            occupancy = format!("{:.2}%", packer.used_rate(true) * 100.0),
            "bin packed"
        );
        bins.push(packer);
    }
    Ok(bins)
}
