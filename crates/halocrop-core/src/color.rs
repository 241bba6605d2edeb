//! RGB → HSV conversion and band thresholding.
//!
//! Hue uses the degrees/2 convention (0–179) so that an 8-bit channel can
//! carry the full wheel; saturation and value span 0–255. The marker band in
//! [`CropConfig`](crate::CropConfig) is calibrated against this scaling.

use crate::config::CropConfig;
use image::{GrayImage, Luma, RgbImage};

/// Mask value for pixels inside the acceptance band.
pub const MASK_ON: u8 = 255;

/// A decoded image in HSV space, row-major `[h, s, v]` triples.
///
/// Transient intermediate between decoding and thresholding; never persisted.
#[derive(Debug, Clone)]
pub struct HsvImage {
    width: u32,
    height: u32,
    data: Vec<[u8; 3]>,
}

impl HsvImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.data[(y * self.width + x) as usize]
    }
}

/// Convert one 8-bit RGB sample to HSV.
///
/// Achromatic pixels (max == min) report hue 0.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;

    if max == min {
        return [0, 0, v];
    }

    let delta = (max - min) as f32;
    let s = (delta * 255.0 / max as f32).round() as u8;

    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let mut hue_deg = if max == r {
        60.0 * (gf - bf) / delta
    } else if max == g {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    if hue_deg < 0.0 {
        hue_deg += 360.0;
    }

    // Degrees/2 so the wheel fits in a byte; 360° wraps to 0.
    let h = ((hue_deg / 2.0).round() as u16 % 180) as u8;
    [h, s, v]
}

/// Convert a full image to HSV.
pub fn to_hsv(image: &RgbImage) -> HsvImage {
    let data = image.pixels().map(|p| rgb_to_hsv(p.0)).collect();
    HsvImage {
        width: image.width(),
        height: image.height(),
        data,
    }
}

/// Build the binary marker mask: 255 where every HSV channel lies inside the
/// inclusive `[lower, upper]` band, 0 elsewhere.
pub fn threshold(hsv: &HsvImage, lower: [u8; 3], upper: [u8; 3]) -> GrayImage {
    GrayImage::from_fn(hsv.width, hsv.height, |x, y| {
        let px = hsv.get(x, y);
        let inside = (0..3).all(|c| lower[c] <= px[c] && px[c] <= upper[c]);
        Luma([if inside { MASK_ON } else { 0 }])
    })
}

/// Whether one RGB sample falls inside the configured marker band.
pub fn in_marker_band(rgb: [u8; 3], config: &CropConfig) -> bool {
    let px = rgb_to_hsv(rgb);
    (0..3).all(|c| config.hsv_lower[c] <= px[c] && px[c] <= config.hsv_upper[c])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_primaries() {
        assert_eq!(rgb_to_hsv([255, 0, 0]), [0, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 255, 0]), [60, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 0, 255]), [120, 255, 255]);
    }

    #[test]
    fn test_pure_yellow() {
        // 60° → 30 under degrees/2
        assert_eq!(rgb_to_hsv([255, 255, 0]), [30, 255, 255]);
    }

    #[test]
    fn test_achromatic() {
        assert_eq!(rgb_to_hsv([0, 0, 0]), [0, 0, 0]);
        assert_eq!(rgb_to_hsv([255, 255, 255]), [0, 0, 255]);
        assert_eq!(rgb_to_hsv([128, 128, 128]), [0, 0, 128]);
    }

    #[test]
    fn test_desaturated_yellow() {
        // (200, 180, 40): V=200, S=round(160·255/200)=204, H=52.5° → 26
        assert_eq!(rgb_to_hsv([200, 180, 40]), [26, 204, 200]);
    }

    #[test]
    fn test_default_band_accepts_yellow_rejects_others() {
        let config = CropConfig::default();
        assert!(in_marker_band([255, 255, 0], &config));
        assert!(in_marker_band([200, 180, 40], &config));
        // Red, blue, white, black: all outside
        assert!(!in_marker_band([255, 0, 0], &config));
        assert!(!in_marker_band([0, 0, 255], &config));
        assert!(!in_marker_band([255, 255, 255], &config));
        assert!(!in_marker_band([0, 0, 0], &config));
        // Dark yellow fails the value gate
        assert!(!in_marker_band([90, 90, 0], &config));
    }

    #[test]
    fn test_band_bounds_are_inclusive() {
        let config = CropConfig::default();
        // Hue exactly 15 (30°): green slightly above half of red.
        // r=255, g=128, b=0 → H = 60·128/255 ≈ 30.1° → 15
        assert_eq!(rgb_to_hsv([255, 128, 0])[0], 15);
        assert!(in_marker_band([255, 128, 0], &config));
        // Hue exactly 45 (90°): chartreuse, r half of g.
        // r=128, g=255, b=0 → H = 120 − 60·128/255 ≈ 89.9° → 45
        assert_eq!(rgb_to_hsv([128, 255, 0])[0], 45);
        assert!(in_marker_band([128, 255, 0], &config));
    }

    #[test]
    fn test_threshold_mask_values() {
        let mut img = RgbImage::from_pixel(4, 2, Rgb([10, 10, 10]));
        img.put_pixel(1, 0, Rgb([255, 255, 0]));
        img.put_pixel(2, 1, Rgb([255, 255, 0]));

        let config = CropConfig::default();
        let mask = threshold(&to_hsv(&img), config.hsv_lower, config.hsv_upper);

        assert_eq!(mask.dimensions(), (4, 2));
        assert_eq!(mask.get_pixel(1, 0).0[0], MASK_ON);
        assert_eq!(mask.get_pixel(2, 1).0[0], MASK_ON);
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        assert_eq!(mask.get_pixel(3, 1).0[0], 0);
    }

    #[test]
    fn test_to_hsv_dimensions_and_indexing() {
        let mut img = RgbImage::from_pixel(3, 3, Rgb([0, 0, 0]));
        img.put_pixel(2, 1, Rgb([0, 255, 0]));
        let hsv = to_hsv(&img);
        assert_eq!((hsv.width(), hsv.height()), (3, 3));
        assert_eq!(hsv.get(2, 1), [60, 255, 255]);
        assert_eq!(hsv.get(1, 2), [0, 0, 0]);
    }
}
