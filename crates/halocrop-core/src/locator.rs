//! Marker locator: finds the yellow marker drawn around the subject.
//!
//! Staged pipeline over explicit intermediates (HSV image, binary mask,
//! contours) so each stage is testable with synthetic fixtures:
//! convert → threshold → trace exterior contours → pick largest → gate → box.

use crate::color::{threshold, to_hsv};
use crate::config::CropConfig;
use crate::contour::{find_external_contours, largest_by_area};
use crate::types::BoundingRect;
use image::RgbImage;

/// Locate the marker and return its bounding rectangle.
///
/// `None` means "no acceptable marker": either nothing matched the color
/// band, or the largest matching region did not exceed the minimum-area
/// gate. Absence is a normal outcome, handled by the fallback policy, not
/// an error.
pub fn locate(image: &RgbImage, config: &CropConfig) -> Option<BoundingRect> {
    let hsv = to_hsv(image);
    let mask = threshold(&hsv, config.hsv_lower, config.hsv_upper);
    let contours = find_external_contours(&mask);

    let (best, area) = largest_by_area(&contours)?;
    if area <= config.min_marker_area {
        tracing::debug!(
            area,
            min_marker_area = config.min_marker_area,
            "largest contour rejected by area gate"
        );
        return None;
    }

    let rect = best.bounding_rect(image.width(), image.height());
    if let Some(r) = rect {
        tracing::debug!(x = r.x, y = r.y, width = r.width, height = r.height, area, "marker located");
    }
    rect
}
