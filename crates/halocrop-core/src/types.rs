use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in source-image pixel coordinates.
///
/// Invariant (maintained by both producers, the marker locator and the
/// fallback policy): `x + width <= image width`, `y + height <= image height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether this rectangle lies entirely within an `image_width` ×
    /// `image_height` image.
    pub fn fits_within(&self, image_width: u32, image_height: u32) -> bool {
        self.right() <= image_width && self.bottom() <= image_height
    }
}

/// Exterior boundary of one connected mask region, as traced boundary points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerContour {
    pub points: Vec<(i32, i32)>,
}

impl MarkerContour {
    pub fn new(points: Vec<(i32, i32)>) -> Self {
        Self { points }
    }

    /// Enclosed polygon area via the shoelace formula.
    ///
    /// This is the polygon-area semantics of the boundary trace (a solid
    /// axis-aligned region of w × h pixels encloses (w−1)·(h−1)), which is
    /// what the area acceptance gate is calibrated against.
    pub fn area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }
        let mut twice_area: i64 = 0;
        for i in 0..self.points.len() {
            let (x0, y0) = self.points[i];
            let (x1, y1) = self.points[(i + 1) % self.points.len()];
            twice_area += x0 as i64 * y1 as i64 - x1 as i64 * y0 as i64;
        }
        twice_area.unsigned_abs() as f64 / 2.0
    }

    /// Minimal axis-aligned bounding rectangle of the boundary points,
    /// clamped into an `image_width` × `image_height` image.
    ///
    /// Returns `None` for an empty point set.
    pub fn bounding_rect(&self, image_width: u32, image_height: u32) -> Option<BoundingRect> {
        if self.points.is_empty() || image_width == 0 || image_height == 0 {
            return None;
        }

        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;
        for &(x, y) in &self.points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        // Boundary points are pixel coordinates, so the enclosing rectangle
        // spans max − min + 1 pixels per axis.
        let x = min_x.clamp(0, image_width as i32 - 1) as u32;
        let y = min_y.clamp(0, image_height as i32 - 1) as u32;
        let right = (max_x + 1).clamp(x as i32 + 1, image_width as i32) as u32;
        let bottom = (max_y + 1).clamp(y as i32 + 1, image_height as i32) as u32;

        Some(BoundingRect::new(x, y, right - x, bottom - y))
    }
}

/// Which branch of the crop policy produced the output rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropOutcome {
    /// The yellow marker was located and its bounding rectangle used.
    Marker,
    /// No acceptable marker; the deterministic right-of-center square was used.
    Fallback,
}
