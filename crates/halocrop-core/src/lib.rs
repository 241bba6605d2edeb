//! halocrop-core — marker-guided portrait normalization.
//!
//! Locates the yellow circular marker drawn around a subject via HSV band
//! thresholding and exterior contour extraction, crops to its bounding
//! rectangle (or a deterministic right-of-center fallback square when no
//! marker passes the area gate), and resizes to a fixed square output with
//! area-averaging resampling.

pub mod color;
pub mod config;
pub mod contour;
pub mod cropper;
pub mod locator;
pub mod policy;
pub mod processor;
pub mod types;

pub use config::{ConfigError, CropConfig};
pub use cropper::crop_and_resize;
pub use locator::locate;
pub use policy::select_rectangle;
pub use processor::{process, CropReport, ProcessError};
pub use types::{BoundingRect, CropOutcome, MarkerContour};
