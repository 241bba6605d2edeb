//! Crop extraction and area-averaging resize to the canonical output size.

use crate::types::BoundingRect;
use image::{imageops, Rgb, RgbImage};

/// Extract `rect` from `image` and resize it to `output_size` × `output_size`.
///
/// The rectangle is cropped as-is: no padding and no aspect-ratio
/// preservation, so a non-square rectangle distorts on resize. The caller
/// guarantees the rectangle lies within the image; out-of-range or
/// zero-sized rectangles are clamped to at least one in-bounds source pixel
/// rather than producing an empty crop.
pub fn crop_and_resize(image: &RgbImage, rect: BoundingRect, output_size: u32) -> RgbImage {
    let rect = clamp_rect(rect, image.width(), image.height());
    let crop = imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image();
    resize_area(&crop, output_size, output_size)
}

fn clamp_rect(rect: BoundingRect, image_width: u32, image_height: u32) -> BoundingRect {
    let x = rect.x.min(image_width.saturating_sub(1));
    let y = rect.y.min(image_height.saturating_sub(1));
    let width = rect.width.clamp(1, image_width - x);
    let height = rect.height.clamp(1, image_height - y);
    BoundingRect::new(x, y, width, height)
}

/// Box-filter (area-averaging) resample.
///
/// Each destination pixel is the coverage-weighted mean of every source
/// pixel its back-projected footprint overlaps. Exact for integer shrink
/// factors and alias-free for arbitrary downscales; on upscale the footprint
/// covers at most a couple of source pixels and degrades to blocky
/// replication, which is acceptable for the rare smaller-than-target crop.
pub fn resize_area(src: &RgbImage, dst_width: u32, dst_height: u32) -> RgbImage {
    let (src_width, src_height) = src.dimensions();
    debug_assert!(src_width > 0 && src_height > 0);

    let scale_x = src_width as f64 / dst_width as f64;
    let scale_y = src_height as f64 / dst_height as f64;

    RgbImage::from_fn(dst_width, dst_height, |dx, dy| {
        // Footprint of this destination pixel in source coordinates
        let sx0 = dx as f64 * scale_x;
        let sx1 = (dx + 1) as f64 * scale_x;
        let sy0 = dy as f64 * scale_y;
        let sy1 = (dy + 1) as f64 * scale_y;

        let ix0 = sx0.floor() as u32;
        let ix1 = (sx1.ceil() as u32).min(src_width);
        let iy0 = sy0.floor() as u32;
        let iy1 = (sy1.ceil() as u32).min(src_height);

        let mut acc = [0.0f64; 3];
        let mut total_weight = 0.0f64;

        for iy in iy0..iy1 {
            let wy = overlap(iy, sy0, sy1);
            if wy <= 0.0 {
                continue;
            }
            for ix in ix0..ix1 {
                let wx = overlap(ix, sx0, sx1);
                if wx <= 0.0 {
                    continue;
                }
                let weight = wx * wy;
                let px = src.get_pixel(ix, iy).0;
                for c in 0..3 {
                    acc[c] += weight * px[c] as f64;
                }
                total_weight += weight;
            }
        }

        let mut out = [0u8; 3];
        if total_weight > 0.0 {
            for c in 0..3 {
                out[c] = (acc[c] / total_weight).round().clamp(0.0, 255.0) as u8;
            }
        }
        Rgb(out)
    })
}

/// Length of the overlap between source pixel `[i, i+1)` and span `[a, b)`.
fn overlap(i: u32, a: f64, b: f64) -> f64 {
    let lo = (i as f64).max(a);
    let hi = ((i + 1) as f64).min(b);
    hi - lo
}
