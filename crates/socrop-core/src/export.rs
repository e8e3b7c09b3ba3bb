//! Export contract: turning a finished edit into a saved file.
//!
//! The core never touches pixels. It plans the geometric actions, hands them
//! to an [`ImageManipulator`], then saves the result through a
//! [`MediaLibrary`]. Crop and adjustments only affect the preview.

use crate::state::EditorState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use thiserror::Error;

/// Export errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("No image selected")]
    NoImage,
    #[error("Permission to save photos was not granted")]
    PermissionDenied,
    #[error("Image manipulation failed: {0}")]
    Manipulation(String),
    #[error("Saving to the gallery failed: {0}")]
    Save(String),
}

impl ExportError {
    /// Whether trying again (possibly after user action) can succeed without
    /// changing the edit.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ExportError::NoImage)
    }
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Boxed future returned by export collaborators.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {value:?}")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Jpeg,
    Png,
    Webp,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Jpeg, ExportFormat::Png, ExportFormat::Webp];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
            ExportFormat::Webp => "webp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "JPG",
            ExportFormat::Png => "PNG",
            ExportFormat::Webp => "WEBP",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "Smaller file size",
            ExportFormat::Png => "Best quality",
            ExportFormat::Webp => "Modern format",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            "png" => Ok(ExportFormat::Png),
            "webp" => Ok(ExportFormat::Webp),
            _ => Err(ParseOptionError {
                kind: "format",
                value: s.to_string(),
            }),
        }
    }
}

/// Compression level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportQuality {
    #[default]
    Max,
    High,
    Medium,
    Low,
}

impl ExportQuality {
    pub const ALL: [ExportQuality; 4] = [
        ExportQuality::Max,
        ExportQuality::High,
        ExportQuality::Medium,
        ExportQuality::Low,
    ];

    /// Compression factor in `0.0..=1.0`, 1.0 being best quality.
    pub fn compress(&self) -> f64 {
        match self {
            ExportQuality::Max => 1.0,
            ExportQuality::High => 0.85,
            ExportQuality::Medium => 0.6,
            ExportQuality::Low => 0.3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportQuality::Max => "Max",
            ExportQuality::High => "High",
            ExportQuality::Medium => "Medium",
            ExportQuality::Low => "Low",
        }
    }
}

impl fmt::Display for ExportQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExportQuality {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|q| q.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseOptionError {
                kind: "quality",
                value: s.to_string(),
            })
    }
}

/// Target widths offered by the export screen. 0 keeps the original size.
pub const RESIZE_OPTIONS: [u32; 6] = [0, 2000, 1500, 1080, 720, 480];

/// Settings chosen on the export screen. Not part of the edit itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub quality: ExportQuality,
    /// Output width in pixels, 0 for the original size.
    pub max_size: u32,
}

impl ExportOptions {
    pub fn save_options(&self) -> SaveOptions {
        SaveOptions {
            format: self.format,
            compress: self.quality.compress(),
        }
    }
}

/// Encoding parameters passed to the manipulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaveOptions {
    pub format: ExportFormat,
    pub compress: f64,
}

/// One geometric step applied to the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ManipulationAction {
    /// Clockwise degrees.
    Rotate { degrees: i32 },
    FlipHorizontal,
    FlipVertical,
    /// Scale to `width`, keeping the aspect ratio.
    Resize { width: u32 },
}

/// Actions that reproduce the edit's geometry, in the order they must run.
pub fn plan_actions(state: &EditorState, options: &ExportOptions) -> Vec<ManipulationAction> {
    let mut actions = Vec::new();
    if state.rotation != 0 {
        actions.push(ManipulationAction::Rotate {
            degrees: state.rotation,
        });
    }
    if state.flip_h {
        actions.push(ManipulationAction::FlipHorizontal);
    }
    if state.flip_v {
        actions.push(ManipulationAction::FlipVertical);
    }
    if options.max_size > 0 {
        actions.push(ManipulationAction::Resize {
            width: options.max_size,
        });
    }
    actions
}

/// A rendered file produced by the manipulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManipulatedImage {
    pub uri: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// An entry in the user's photo library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAsset {
    pub id: String,
    pub uri: String,
}

/// Applies geometric actions to an image and encodes the result.
pub trait ImageManipulator: Send + Sync {
    fn manipulate<'a>(
        &'a self,
        uri: &'a str,
        actions: &'a [ManipulationAction],
        options: SaveOptions,
    ) -> BoxFuture<'a, ExportResult<ManipulatedImage>>;
}

/// The user's photo library.
pub trait MediaLibrary: Send + Sync {
    /// Ask for write access.
    fn request_permission(&self) -> BoxFuture<'_, ExportResult<PermissionStatus>>;

    /// Copy a rendered file into the library.
    fn save<'a>(&'a self, uri: &'a str) -> BoxFuture<'a, ExportResult<SavedAsset>>;
}

/// What a successful export produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOutcome {
    pub actions: Vec<ManipulationAction>,
    pub image: ManipulatedImage,
    pub asset: SavedAsset,
}

/// Runs an export against a pair of collaborators.
pub struct Exporter<M, L> {
    manipulator: M,
    library: L,
}

impl<M: ImageManipulator, L: MediaLibrary> Exporter<M, L> {
    pub fn new(manipulator: M, library: L) -> Self {
        Self {
            manipulator,
            library,
        }
    }

    pub fn manipulator(&self) -> &M {
        &self.manipulator
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    /// Render `state` and save it to the library.
    ///
    /// The state is only read; a failed export leaves the edit intact and can
    /// simply be retried.
    pub async fn export(
        &self,
        state: &EditorState,
        options: &ExportOptions,
    ) -> ExportResult<ExportOutcome> {
        let uri = state.image_uri.as_deref().ok_or(ExportError::NoImage)?;
        let actions = plan_actions(state, options);
        log::info!(
            "Exporting {uri} as {} ({}) with {} action(s)",
            options.format,
            options.quality,
            actions.len()
        );

        let image = self
            .manipulator
            .manipulate(uri, &actions, options.save_options())
            .await
            .inspect_err(|e| log::warn!("Export failed: {e}"))?;

        let status = self.library.request_permission().await?;
        if status != PermissionStatus::Granted {
            log::warn!("Gallery permission {status:?}, not saving {}", image.uri);
            return Err(ExportError::PermissionDenied);
        }

        let asset = self
            .library
            .save(&image.uri)
            .await
            .inspect_err(|e| log::warn!("Export failed: {e}"))?;
        log::info!("Saved {} as {}", image.uri, asset.id);

        Ok(ExportOutcome {
            actions,
            image,
            asset,
        })
    }
}
