use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// All tunables of the crop pipeline in one place.
///
/// Every field has a default matching the production calibration; a partial
/// TOML file overrides only the fields it names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropConfig {
    /// Lower inclusive bound of the marker acceptance band, `[h, s, v]`.
    /// Hue uses the degrees/2 convention (0–179), so the default band
    /// [15, 45] spans 30°–90°: true yellow.
    pub hsv_lower: [u8; 3],
    /// Upper inclusive bound of the marker acceptance band, `[h, s, v]`.
    pub hsv_upper: [u8; 3],
    /// A contour is accepted only if its enclosed area is strictly greater
    /// than this, in square pixels. Suppresses small yellow specks.
    pub min_marker_area: f64,
    /// Side length of the square output image.
    pub output_size: u32,
    /// Fallback square side, as a fraction of image width (capped at image
    /// height).
    pub fallback_width_frac: f64,
    /// Fallback square center, as a fraction of image width.
    pub fallback_center_x_frac: f64,
    /// Fallback square center, as a fraction of image height.
    pub fallback_center_y_frac: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            hsv_lower: [15, 100, 100],
            hsv_upper: [45, 255, 255],
            min_marker_area: 1000.0,
            output_size: 500,
            fallback_width_frac: 0.45,
            fallback_center_x_frac: 0.75,
            fallback_center_y_frac: 0.5,
        }
    }
}

impl CropConfig {
    /// Load a configuration from a TOML file, filling unspecified fields
    /// from the defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
