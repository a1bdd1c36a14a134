//! Atlas composition: decode each placed sprite, apply its rotation
//! parity, and blit it onto the destination raster while building the
//! per-sprite index records.

use crate::config::PackConfig;
use crate::error::Result;
use crate::geom::Rect;
use crate::index::{Dimensions, Region, SpriteInfo};
use crate::packer::Packer;
use crate::pipeline::SpriteSource;
use image::{imageops, RgbaImage};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::instrument;

/// A composed raster plus its sprite records, keyed by filename.
pub struct ComposedAtlas {
    pub pixels: RgbaImage,
    pub sprites: BTreeMap<String, SpriteInfo>,
}

/// Renders every placed rectangle of `packer` onto a fresh transparent
/// canvas. Workers decode and rotate sources concurrently; a mutex
/// serialises writes to the shared canvas and sprite map. The first
/// worker error aborts the composition.
#[instrument(skip_all)]
pub fn compose_atlas(
    packer: &Packer,
    sources: &[SpriteSource],
    cfg: &PackConfig,
) -> Result<ComposedAtlas> {
    let mut size = packer.min_size();
    if cfg.power_of_two {
        size.width = next_power_of_two(size.width);
        size.height = next_power_of_two(size.height);
    }
    let canvas = Mutex::new(RgbaImage::new(
        size.width.max(0) as u32,
        size.height.max(0) as u32,
    ));
    let sprites = Mutex::new(BTreeMap::new());

    packer.packed().par_iter().try_for_each(|rect| -> Result<()> {
        let source = &sources[rect.size.id as usize];
        let mut raster = image::open(&source.path)?.to_rgba8();
        let mut trim = source.trim;
        let rotated = packer.rotation_parity(rect.size.id);
        if rotated {
            // Quarter-turn clockwise; the trim rectangle follows into the
            // rotated frame.
            let orig_height = raster.height() as i32;
            raster = imageops::rotate90(&raster);
            trim = Rect::new(
                orig_height - trim.y() - trim.height(),
                trim.x(),
                trim.height(),
                trim.width(),
            );
        }
        let (source_w, source_h) = (raster.width() as i32, raster.height() as i32);
        let trimmed = trim.x() > 0
            || trim.y() > 0
            || trim.width() < source_w
            || trim.height() < source_h;
        let filename = source
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let info = SpriteInfo {
            filename: filename.clone(),
            region: Region {
                x: rect.x(),
                y: rect.y(),
                w: rect.width(),
                h: rect.height(),
            },
            source_size: Dimensions {
                w: source_w,
                h: source_h,
            },
            source_rect: trimmed.then_some(Region {
                x: trim.x(),
                y: trim.y(),
                w: trim.width(),
                h: trim.height(),
            }),
            trimmed,
            rotated,
        };
        {
            let mut canvas = canvas.lock().unwrap();
            blit(
                &raster,
                &mut canvas,
                trim.x(),
                trim.y(),
                rect.x(),
                rect.y(),
                rect.width(),
                rect.height(),
            );
        }
        sprites.lock().unwrap().insert(filename, info);
        Ok(())
    })?;

    Ok(ComposedAtlas {
        pixels: canvas.into_inner().unwrap(),
        sprites: sprites.into_inner().unwrap(),
    })
}

/// Source-replace copy of a `w x h` window, clipped to both rasters.
fn blit(src: &RgbaImage, dst: &mut RgbaImage, sx: i32, sy: i32, dx: i32, dy: i32, w: i32, h: i32) {
    let (sw, sh) = (src.width() as i32, src.height() as i32);
    let (dw, dh) = (dst.width() as i32, dst.height() as i32);
    for row in 0..h {
        let src_y = sy + row;
        let dst_y = dy + row;
        if src_y < 0 || src_y >= sh || dst_y < 0 || dst_y >= dh {
            continue;
        }
        for col in 0..w {
            let src_x = sx + col;
            let dst_x = dx + col;
            if src_x < 0 || src_x >= sw || dst_x < 0 || dst_x >= dw {
                continue;
            }
            dst.put_pixel(
                dst_x as u32,
                dst_y as u32,
                *src.get_pixel(src_x as u32, src_y as u32),
            );
        }
    }
}

fn next_power_of_two(v: i32) -> i32 {
    if v <= 1 {
        1
    } else {
        (v as u32).next_power_of_two() as i32
    }
}
