//! Exterior contour extraction from the binary marker mask.

use crate::types::MarkerContour;
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};

/// Trace the exterior boundaries of all connected foreground regions.
///
/// Only top-level outer borders are returned; holes and anything nested
/// inside a hole are irrelevant to marker selection. Output order follows
/// the raster scan of the mask, which makes downstream tie-breaking
/// deterministic.
pub fn find_external_contours(mask: &GrayImage) -> Vec<MarkerContour> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| MarkerContour::new(c.points.iter().map(|p| (p.x, p.y)).collect()))
        .collect()
}

/// Select the contour with the largest enclosed area.
///
/// Comparison is strictly-greater, so the first contour encountered wins a
/// tie. Returns the winner together with its area.
pub fn largest_by_area(contours: &[MarkerContour]) -> Option<(&MarkerContour, f64)> {
    let mut best: Option<(&MarkerContour, f64)> = None;
    for contour in contours {
        let area = contour.area();
        match best {
            Some((_, best_area)) if area <= best_area => {}
            _ => best = Some((contour, area)),
        }
    }
    best
}
