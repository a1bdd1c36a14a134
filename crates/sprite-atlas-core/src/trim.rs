//! Alpha-trim bounding-box detection.

use crate::geom::Rect;
use image::{DynamicImage, GenericImageView, RgbaImage};

/// Finds the bounding box of all pixels whose alpha exceeds `threshold`.
///
/// Returns the box as `[min_x, min_y, max_x + 1, max_y + 1)` together with
/// a flag that is `true` when the image holds no such pixel, in which case
/// the full image bounds are returned and the caller decides how to treat
/// the sprite.
pub fn alpha_bbox(image: &DynamicImage, threshold: u8) -> (Rect, bool) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return (Rect::new(0, 0, width as i32, height as i32), true);
    }
    match image {
        // Direct index into the pixel buffer at stride 4.
        DynamicImage::ImageRgba8(buffer) => rgba8_bbox(buffer, threshold),
        other => generic_bbox(other, threshold),
    }
}

fn rgba8_bbox(buffer: &RgbaImage, threshold: u8) -> (Rect, bool) {
    let (width, height) = buffer.dimensions();
    let raw = buffer.as_raw();
    let mut min_x = width as i32;
    let mut min_y = height as i32;
    let mut max_x = -1i32;
    let mut max_y = -1i32;
    let mut i = 3usize;
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            if raw[i] > threshold {
                if x < min_x {
                    min_x = x;
                }
                if y < min_y {
                    min_y = y;
                }
                if x > max_x {
                    max_x = x;
                }
                if y > max_y {
                    max_y = y;
                }
            }
            i += 4;
        }
    }
    finish(width as i32, height as i32, min_x, min_y, max_x, max_y)
}

fn generic_bbox(image: &DynamicImage, threshold: u8) -> (Rect, bool) {
    let (width, height) = image.dimensions();
    let mut min_x = width as i32;
    let mut min_y = height as i32;
    let mut max_x = -1i32;
    let mut max_y = -1i32;
    for (x, y, pixel) in image.pixels() {
        if pixel.0[3] > threshold {
            let (x, y) = (x as i32, y as i32);
            if x < min_x {
                min_x = x;
            }
            if y < min_y {
                min_y = y;
            }
            if x > max_x {
                max_x = x;
            }
            if y > max_y {
                max_y = y;
            }
        }
    }
    finish(width as i32, height as i32, min_x, min_y, max_x, max_y)
}

fn finish(width: i32, height: i32, min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> (Rect, bool) {
    if max_x < 0 {
        // Fully transparent.
        return (Rect::new(0, 0, width, height), true);
    }
    (
        Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1),
        false,
    )
}
