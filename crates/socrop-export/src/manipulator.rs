//! Image manipulator backed by the `image` crate.

use crate::{transform, uri_to_path};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use socrop_core::export::{BoxFuture, ExportError, ExportFormat, ExportResult, ImageManipulator};
use socrop_core::{ManipulatedImage, ManipulationAction, SaveOptions};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Decodes local files, applies the actions and writes the result into an
/// output directory under a fresh name.
pub struct ImageCrateManipulator {
    output_dir: PathBuf,
}

impl ImageCrateManipulator {
    /// Creates the output directory if it doesn't exist.
    pub fn new(output_dir: PathBuf) -> ExportResult<Self> {
        if !output_dir.exists() {
            fs::create_dir_all(&output_dir).map_err(|e| {
                ExportError::Manipulation(format!(
                    "Failed to create output directory {}: {e}",
                    output_dir.display()
                ))
            })?;
        }
        Ok(Self { output_dir })
    }

    /// Render into a `socrop` folder under the system temp directory.
    pub fn in_temp_dir() -> ExportResult<Self> {
        Self::new(std::env::temp_dir().join("socrop"))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Delete a rendered file once the gallery holds its own copy.
    /// Files outside the output directory are left alone.
    pub fn discard(&self, image: &ManipulatedImage) -> ExportResult<()> {
        let path = uri_to_path(&image.uri);
        if !path.starts_with(&self.output_dir) {
            log::warn!(
                "Not discarding {}, outside {}",
                path.display(),
                self.output_dir.display()
            );
            return Ok(());
        }
        fs::remove_file(&path).map_err(|e| {
            ExportError::Manipulation(format!("Failed to remove {}: {e}", path.display()))
        })?;
        log::debug!("Discarded {}", path.display());
        Ok(())
    }

    fn render(
        &self,
        uri: &str,
        actions: &[ManipulationAction],
        options: SaveOptions,
    ) -> ExportResult<ManipulatedImage> {
        let source = uri_to_path(uri);
        let mut image = image::open(&source).map_err(|e| {
            ExportError::Manipulation(format!("Failed to decode {}: {e}", source.display()))
        })?;

        for action in actions {
            log::debug!("Applying {action:?}");
            image = transform::apply(image, action);
        }

        let path = self
            .output_dir
            .join(format!("socrop-{}.{}", Uuid::new_v4(), options.format.extension()));
        encode(&image, &path, options)?;

        Ok(ManipulatedImage {
            uri: path.to_string_lossy().into_owned(),
            width: image.width(),
            height: image.height(),
        })
    }
}

impl ImageManipulator for ImageCrateManipulator {
    fn manipulate<'a>(
        &'a self,
        uri: &'a str,
        actions: &'a [ManipulationAction],
        options: SaveOptions,
    ) -> BoxFuture<'a, ExportResult<ManipulatedImage>> {
        Box::pin(async move { self.render(uri, actions, options) })
    }
}

/// JPEG quality for a `0.0..=1.0` compress factor.
fn jpeg_quality(compress: f64) -> u8 {
    (compress * 100.0).round().clamp(1.0, 100.0) as u8
}

/// PNG and WebP are written lossless, so `compress` only affects JPEG.
fn encode(image: &DynamicImage, path: &Path, options: SaveOptions) -> ExportResult<()> {
    let fail = |e: image::ImageError| {
        ExportError::Manipulation(format!("Failed to encode {}: {e}", path.display()))
    };

    match options.format {
        ExportFormat::Jpeg => {
            let file = File::create(path).map_err(|e| {
                ExportError::Manipulation(format!("Failed to create {}: {e}", path.display()))
            })?;
            let mut encoder =
                JpegEncoder::new_with_quality(BufWriter::new(file), jpeg_quality(options.compress));
            encoder.encode_image(&image.to_rgb8()).map_err(fail)
        }
        ExportFormat::Png => image.save_with_format(path, ImageFormat::Png).map_err(fail),
        ExportFormat::Webp => DynamicImage::ImageRgba8(image.to_rgba8())
            .save_with_format(path, ImageFormat::WebP)
            .map_err(fail),
    }
}
