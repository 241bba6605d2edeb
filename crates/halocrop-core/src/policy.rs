//! Rectangle selection: located marker or deterministic positional fallback.

use crate::config::CropConfig;
use crate::types::BoundingRect;

/// Choose the crop rectangle for an `image_width` × `image_height` image.
///
/// A located marker rectangle is used as-is. Otherwise a square is placed
/// right of center (a portrait subject is typically offset right of the
/// caption area): side `min(floor(width × fallback_width_frac), height)`,
/// centered at `(floor(width × fallback_center_x_frac),
/// floor(height × fallback_center_y_frac))`, clamped into the image. The
/// clamp can shrink the square when the nominal placement would overflow.
///
/// Requires a non-degenerate image (`width, height >= 1`); zero-area inputs
/// are rejected before any geometry runs.
pub fn select_rectangle(
    image_width: u32,
    image_height: u32,
    located: Option<BoundingRect>,
    config: &CropConfig,
) -> BoundingRect {
    debug_assert!(image_width > 0 && image_height > 0);
    located.unwrap_or_else(|| fallback_rectangle(image_width, image_height, config))
}

fn fallback_rectangle(image_width: u32, image_height: u32, config: &CropConfig) -> BoundingRect {
    let crop_w = (image_width as f64 * config.fallback_width_frac) as u32;
    let center_x = (image_width as f64 * config.fallback_center_x_frac) as u32;
    let center_y = (image_height as f64 * config.fallback_center_y_frac) as u32;

    // Extremely flat or narrow images can drive the nominal side to zero;
    // clamp to a single pixel instead of emitting an empty rectangle.
    let side = crop_w.min(image_height).max(1);

    let x1 = center_x.saturating_sub(side / 2).min(image_width - 1);
    let y1 = center_y.saturating_sub(side / 2).min(image_height - 1);
    let x2 = (x1 + side).min(image_width);
    let y2 = (y1 + side).min(image_height);

    BoundingRect::new(x1, y1, x2 - x1, y2 - y1)
}
