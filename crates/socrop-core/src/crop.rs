//! Crop aspect ratios.

use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel aspect ratio meaning "no fixed ratio".
pub const FREE_ASPECT: &str = "free";

/// Horizontal padding between the viewport edge and the preview canvas.
const CANVAS_MARGIN: f64 = 24.0;
/// Tallest a fixed-ratio canvas may get, as a fraction of the viewport width.
const MAX_CANVAS_HEIGHT_FACTOR: f64 = 0.55;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CropRatioError {
    #[error("aspect ratio must look like \"w:h\", got {0:?}")]
    Malformed(String),
    #[error("aspect ratio components must be positive, got {0:?}")]
    ZeroComponent(String),
}

/// The crop ratio chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropSettings {
    /// `"w:h"` or `"free"`.
    pub aspect_ratio: String,
    pub label: String,
}

impl CropSettings {
    pub fn new(aspect_ratio: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            aspect_ratio: aspect_ratio.into(),
            label: label.into(),
        }
    }

    pub fn free() -> Self {
        Self::new(FREE_ASPECT, "Free")
    }

    pub fn is_free(&self) -> bool {
        self.aspect_ratio == FREE_ASPECT
    }

    /// Parsed `(width, height)` ratio, or `None` for the free ratio.
    pub fn ratio(&self) -> Result<Option<(u32, u32)>, CropRatioError> {
        if self.is_free() {
            return Ok(None);
        }
        let malformed = || CropRatioError::Malformed(self.aspect_ratio.clone());
        let (w, h) = self.aspect_ratio.split_once(':').ok_or_else(malformed)?;
        let w: u32 = w.trim().parse().map_err(|_| malformed())?;
        let h: u32 = h.trim().parse().map_err(|_| malformed())?;
        if w == 0 || h == 0 {
            return Err(CropRatioError::ZeroComponent(self.aspect_ratio.clone()));
        }
        Ok(Some((w, h)))
    }
}

/// A built-in crop choice offered by the crop panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropPreset {
    pub aspect_ratio: &'static str,
    pub label: &'static str,
}

impl CropPreset {
    const fn new(aspect_ratio: &'static str, label: &'static str) -> Self {
        Self {
            aspect_ratio,
            label,
        }
    }

    pub fn settings(&self) -> CropSettings {
        CropSettings::new(self.aspect_ratio, self.label)
    }

    /// Tapping a preset selects it, tapping the already-active ratio clears it.
    pub fn toggle_from(&self, current: Option<&CropSettings>) -> Option<CropSettings> {
        match current {
            Some(active) if active.aspect_ratio == self.aspect_ratio => None,
            _ => Some(self.settings()),
        }
    }
}

/// Plain aspect ratios.
pub const CROP_RATIOS: &[CropPreset] = &[
    CropPreset::new(FREE_ASPECT, "Free"),
    CropPreset::new("1:1", "1:1"),
    CropPreset::new("4:5", "4:5"),
    CropPreset::new("9:16", "9:16"),
    CropPreset::new("16:9", "16:9"),
    CropPreset::new("3:2", "3:2"),
    CropPreset::new("2:3", "2:3"),
    CropPreset::new("4:3", "4:3"),
    CropPreset::new("3:4", "3:4"),
    CropPreset::new("21:9", "21:9"),
];

/// Ratios named after the platform they target.
pub const SOCIAL_PRESETS: &[CropPreset] = &[
    CropPreset::new("1:1", "Instagram Post"),
    CropPreset::new("4:5", "Instagram Portrait"),
    CropPreset::new("9:16", "Story / Reels"),
    CropPreset::new("16:9", "YouTube / Cover"),
    CropPreset::new("2:3", "Pinterest"),
    CropPreset::new("4:3", "Facebook"),
];

/// Size of the preview canvas for a viewport of the given width.
///
/// Square by default; a fixed ratio keeps the full width unless the canvas
/// would exceed the height cap, in which case the width shrinks instead.
/// Malformed ratios fall back to the square canvas.
pub fn canvas_size(viewport_width: f64, crop: Option<&CropSettings>) -> Size {
    let mut width = (viewport_width - CANVAS_MARGIN).max(0.0);
    let mut height = width;

    if let Some((rw, rh)) = crop.and_then(|c| c.ratio().ok().flatten()) {
        let (rw, rh) = (f64::from(rw), f64::from(rh));
        height = width * (rh / rw);
        let max_height = viewport_width * MAX_CANVAS_HEIGHT_FACTOR;
        if height > max_height {
            height = max_height;
            width = height * (rw / rh);
        }
    }

    Size::new(width, height)
}
