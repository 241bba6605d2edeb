//! Per-item processing: decode → locate → select → crop/resize → write.

use crate::config::CropConfig;
use crate::cropper::crop_and_resize;
use crate::locator::locate;
use crate::policy::select_rectangle;
use crate::types::{BoundingRect, CropOutcome};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("image {path} decoded to zero area")]
    EmptyImage { path: PathBuf },
    #[error("cannot create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// What `process` did for one item.
#[derive(Debug, Clone, Copy)]
pub struct CropReport {
    /// Which branch produced the rectangle.
    pub outcome: CropOutcome,
    /// The source-image rectangle that was cropped.
    pub rect: BoundingRect,
}

/// Normalize one portrait: read `input`, crop to the marker (or the
/// positional fallback), resize to the configured square, write `output`.
///
/// Intermediate output directories are created as needed (idempotent).
/// Marker absence is not a failure; every error variant means no output
/// was written for this item. Invocations share no state and may run in
/// parallel on distinct outputs.
pub fn process(
    input: &Path,
    output: &Path,
    config: &CropConfig,
) -> Result<CropReport, ProcessError> {
    let image = image::open(input)
        .map_err(|source| ProcessError::Decode {
            path: input.to_path_buf(),
            source,
        })?
        .to_rgb8();

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ProcessError::EmptyImage {
            path: input.to_path_buf(),
        });
    }

    let located = locate(&image, config);
    let outcome = if located.is_some() {
        CropOutcome::Marker
    } else {
        CropOutcome::Fallback
    };
    let rect = select_rectangle(width, height, located, config);
    let result = crop_and_resize(&image, rect, config.output_size);

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| ProcessError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    result.save(output).map_err(|source| ProcessError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    match outcome {
        CropOutcome::Marker => tracing::info!(
            input = %input.display(),
            output = %output.display(),
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            "cropped from marker"
        ),
        CropOutcome::Fallback => tracing::info!(
            input = %input.display(),
            output = %output.display(),
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            "marker not found, used positional fallback"
        ),
    }

    Ok(CropReport { outcome, rect })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("halocrop-test-{}-{name}", std::process::id()))
    }

    fn marker_image() -> RgbImage {
        let mut img = RgbImage::from_pixel(640, 480, Rgb([80, 80, 80]));
        for y in 100..300 {
            for x in 200..420 {
                img.put_pixel(x, y, Rgb([255, 230, 30]));
            }
        }
        img
    }

    #[test]
    fn test_marker_roundtrip() {
        let input = temp_path("marker-in.png");
        let output = temp_path("marker-out.png");
        marker_image().save(&input).unwrap();

        let report = process(&input, &output, &CropConfig::default()).unwrap();
        assert_eq!(report.outcome, CropOutcome::Marker);
        assert_eq!(report.rect, BoundingRect::new(200, 100, 220, 200));

        let written = image::open(&output).unwrap().to_rgb8();
        assert_eq!(written.dimensions(), (500, 500));

        let _ = std::fs::remove_file(&input);
        let _ = std::fs::remove_file(&output);
    }

    #[test]
    fn test_fallback_roundtrip() {
        let input = temp_path("fallback-in.png");
        let output = temp_path("fallback-out.png");
        RgbImage::from_pixel(1000, 800, Rgb([80, 80, 80]))
            .save(&input)
            .unwrap();

        let report = process(&input, &output, &CropConfig::default()).unwrap();
        assert_eq!(report.outcome, CropOutcome::Fallback);
        assert_eq!(report.rect, BoundingRect::new(525, 175, 450, 450));

        let written = image::open(&output).unwrap().to_rgb8();
        assert_eq!(written.dimensions(), (500, 500));

        let _ = std::fs::remove_file(&input);
        let _ = std::fs::remove_file(&output);
    }

    #[test]
    fn test_missing_input_is_decode_error() {
        let input = temp_path("does-not-exist.png");
        let output = temp_path("never-written.png");

        let err = process(&input, &output, &CropConfig::default()).unwrap_err();
        assert!(matches!(err, ProcessError::Decode { .. }), "{err:?}");
        assert!(!output.exists(), "no output may be written on decode failure");
    }

    #[test]
    fn test_garbage_input_is_decode_error() {
        let input = temp_path("garbage.png");
        let output = temp_path("garbage-out.png");
        std::fs::write(&input, b"not an image at all").unwrap();

        let err = process(&input, &output, &CropConfig::default()).unwrap_err();
        assert!(matches!(err, ProcessError::Decode { .. }), "{err:?}");
        assert!(!output.exists());

        let _ = std::fs::remove_file(&input);
    }

    #[test]
    fn test_creates_nested_output_dirs() {
        let input = temp_path("nested-in.png");
        let dir = temp_path("nested-dir");
        let output = dir.join("a/b/out.png");
        marker_image().save(&input).unwrap();

        process(&input, &output, &CropConfig::default()).unwrap();
        assert!(output.exists());

        // Idempotent: a second run into the existing directory succeeds
        process(&input, &output, &CropConfig::default()).unwrap();

        let _ = std::fs::remove_file(&input);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_idempotent_pixels() {
        let input = temp_path("idem-in.png");
        let out_a = temp_path("idem-a.png");
        let out_b = temp_path("idem-b.png");
        marker_image().save(&input).unwrap();

        let config = CropConfig::default();
        process(&input, &out_a, &config).unwrap();
        process(&input, &out_b, &config).unwrap();

        let a = image::open(&out_a).unwrap().to_rgb8();
        let b = image::open(&out_b).unwrap().to_rgb8();
        assert_eq!(a.as_raw(), b.as_raw());

        for p in [&input, &out_a, &out_b] {
            let _ = std::fs::remove_file(p);
        }
    }

    #[test]
    fn test_custom_output_size() {
        let input = temp_path("size-in.png");
        let output = temp_path("size-out.png");
        marker_image().save(&input).unwrap();

        let config = CropConfig {
            output_size: 128,
            ..CropConfig::default()
        };
        process(&input, &output, &config).unwrap();
        let written = image::open(&output).unwrap().to_rgb8();
        assert_eq!(written.dimensions(), (128, 128));

        let _ = std::fs::remove_file(&input);
        let _ = std::fs::remove_file(&output);
    }
}
