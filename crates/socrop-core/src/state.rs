//! The editing state of one photo.

use crate::adjustments::Adjustments;
use crate::crop::CropSettings;
use crate::filters::DEFAULT_INTENSITY;
use crate::overlays::{DrawPath, OverlayId, TextOverlay};
use serde::{Deserialize, Serialize};

/// Every pending edit for the current photo.
///
/// Values of this type are snapshots: the store replaces its state wholesale
/// and the history keeps clones, so nothing here is shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    /// Opaque handle of the source image; `None` before a photo is picked.
    pub image_uri: Option<String>,
    pub adjustments: Adjustments,
    /// Id of the selected filter preset; `None` means "Original".
    pub active_filter: Option<String>,
    pub filter_intensity: i32,
    /// Back to front.
    pub text_overlays: Vec<TextOverlay>,
    /// In drawing order.
    pub draw_paths: Vec<DrawPath>,
    /// Degrees, clockwise.
    pub rotation: i32,
    pub flip_h: bool,
    pub flip_v: bool,
    pub crop_ratio: Option<CropSettings>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            image_uri: None,
            adjustments: Adjustments::NEUTRAL,
            active_filter: None,
            filter_intensity: DEFAULT_INTENSITY,
            text_overlays: Vec::new(),
            draw_paths: Vec::new(),
            rotation: 0,
            flip_h: false,
            flip_v: false,
            crop_ratio: None,
        }
    }
}

impl EditorState {
    /// A fresh state for a newly picked photo.
    pub fn with_image(uri: Option<String>) -> Self {
        Self {
            image_uri: uri,
            ..Self::default()
        }
    }

    pub fn has_image(&self) -> bool {
        self.image_uri.is_some()
    }

    pub fn text_overlay(&self, id: OverlayId) -> Option<&TextOverlay> {
        self.text_overlays.iter().find(|t| t.id == id)
    }

    /// Whether export has geometric work to do besides resizing.
    pub fn is_transformed(&self) -> bool {
        self.rotation != 0 || self.flip_h || self.flip_v
    }

    /// Serialize the state to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a state from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::SerializableColor;
    use kurbo::Point;

    #[test]
    fn test_default_state() {
        let state = EditorState::default();
        assert!(!state.has_image());
        assert!(state.adjustments.is_neutral());
        assert_eq!(state.filter_intensity, 100);
        assert!(state.text_overlays.is_empty());
        assert!(!state.is_transformed());
    }

    #[test]
    fn test_with_image() {
        let state = EditorState::with_image(Some("file:///a.jpg".into()));
        assert_eq!(state.image_uri.as_deref(), Some("file:///a.jpg"));
        assert_eq!(
            EditorState {
                image_uri: None,
                ..state
            },
            EditorState::default()
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let mut state = EditorState::with_image(Some("content://photo/1".into()));
        state.adjustments.warmth = 35;
        state.active_filter = Some("warm_glow".into());
        state.rotation = -45;
        state.flip_v = true;
        state.crop_ratio = Some(CropSettings::new("4:5", "Instagram Portrait"));
        state.text_overlays.push(TextOverlay::new("caption"));
        state.draw_paths.push(
            DrawPath::new(
                vec![Point::new(0.1, 0.1), Point::new(0.2, 0.3)],
                SerializableColor::black(),
                6.0,
            )
            .unwrap(),
        );

        let json = state.to_json().unwrap();
        assert!(json.contains("\"warm_glow\""));
        assert_eq!(EditorState::from_json(&json).unwrap(), state);
    }

    #[test]
    fn test_find_overlay() {
        let mut state = EditorState::default();
        let overlay = TextOverlay::new("x");
        let id = overlay.id;
        state.text_overlays.push(overlay);
        assert_eq!(state.text_overlay(id).map(|t| t.text.as_str()), Some("x"));
        assert!(state.text_overlay(uuid::Uuid::new_v4()).is_none());
    }
}
