//! Text overlays.

use super::OverlayId;
use crate::color::SerializableColor;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Font size a new overlay starts with.
pub const DEFAULT_FONT_SIZE: f64 = 28.0;

/// Sizes offered by the text tool.
pub const FONT_SIZES: [f64; 17] = [
    10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 28.0, 32.0, 36.0, 40.0, 44.0, 48.0, 56.0,
    64.0, 72.0,
];

/// Letter spacing steps offered by the text tool.
pub const LETTER_SPACINGS: [f64; 10] = [-2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 6.0, 8.0, 10.0];

/// Text color swatches.
pub const TEXT_COLORS: [SerializableColor; 22] = [
    SerializableColor::rgb(0xFF, 0xFF, 0xFF),
    SerializableColor::rgb(0x00, 0x00, 0x00),
    SerializableColor::rgb(0xFF, 0x47, 0x57),
    SerializableColor::rgb(0xFF, 0x6B, 0x81),
    SerializableColor::rgb(0xFF, 0x38, 0x38),
    SerializableColor::rgb(0xFF, 0xA5, 0x02),
    SerializableColor::rgb(0xFF, 0xEA, 0xA7),
    SerializableColor::rgb(0xFD, 0xCB, 0x6E),
    SerializableColor::rgb(0x2E, 0xD5, 0x73),
    SerializableColor::rgb(0x00, 0xD4, 0xAA),
    SerializableColor::rgb(0x00, 0xCE, 0xC9),
    SerializableColor::rgb(0x1E, 0x90, 0xFF),
    SerializableColor::rgb(0x09, 0x84, 0xE3),
    SerializableColor::rgb(0x53, 0x52, 0xED),
    SerializableColor::rgb(0x6C, 0x5C, 0xE7),
    SerializableColor::rgb(0xA2, 0x9B, 0xFE),
    SerializableColor::rgb(0xFD, 0x79, 0xA8),
    SerializableColor::rgb(0xE8, 0x43, 0x93),
    SerializableColor::rgb(0xB2, 0xBE, 0xC3),
    SerializableColor::rgb(0x63, 0x6E, 0x72),
    SerializableColor::rgb(0xDF, 0xE6, 0xE9),
    SerializableColor::rgb(0x74, 0xB9, 0xFF),
];

/// Label background swatches. The first entry means no background.
pub const BACKGROUND_COLORS: [SerializableColor; 10] = [
    SerializableColor::transparent(),
    SerializableColor::new(0x00, 0x00, 0x00, 0xCC),
    SerializableColor::new(0xFF, 0xFF, 0xFF, 0xCC),
    SerializableColor::new(0xFF, 0x47, 0x57, 0xCC),
    SerializableColor::new(0xFF, 0xA5, 0x02, 0xCC),
    SerializableColor::new(0x00, 0xD4, 0xAA, 0xCC),
    SerializableColor::new(0x1E, 0x90, 0xFF, 0xCC),
    SerializableColor::new(0x53, 0x52, 0xED, 0xCC),
    SerializableColor::new(0xFD, 0x79, 0xA8, 0xCC),
    SerializableColor::new(0x2E, 0xD5, 0x73, 0xCC),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// A caption placed on the photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    pub id: OverlayId,
    pub text: String,
    /// Horizontal anchor, as a fraction of the canvas width.
    pub x: f64,
    /// Vertical anchor, as a fraction of the canvas height.
    pub y: f64,
    pub font_size: f64,
    pub color: SerializableColor,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub text_align: TextAlign,
    pub shadow_enabled: bool,
    pub shadow_color: SerializableColor,
    pub opacity: f64,
    pub letter_spacing: f64,
    pub background_color: SerializableColor,
}

impl TextOverlay {
    /// Create an overlay with the text tool's defaults, centered on the canvas.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), text)
    }

    pub fn with_id(id: OverlayId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            x: 0.5,
            y: 0.5,
            font_size: DEFAULT_FONT_SIZE,
            color: SerializableColor::white(),
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            text_align: TextAlign::Center,
            shadow_enabled: true,
            // rgba(0,0,0,0.6)
            shadow_color: SerializableColor::new(0, 0, 0, 153),
            opacity: 1.0,
            letter_spacing: 0.0,
            background_color: SerializableColor::transparent(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn has_background(&self) -> bool {
        !self.background_color.is_transparent()
    }

    /// Merge the fields present in `patch`. The id never changes.
    pub fn apply(&mut self, patch: &TextOverlayPatch) {
        if let Some(text) = &patch.text {
            self.text.clone_from(text);
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(font_weight) = patch.font_weight {
            self.font_weight = font_weight;
        }
        if let Some(font_style) = patch.font_style {
            self.font_style = font_style;
        }
        if let Some(text_align) = patch.text_align {
            self.text_align = text_align;
        }
        if let Some(shadow_enabled) = patch.shadow_enabled {
            self.shadow_enabled = shadow_enabled;
        }
        if let Some(shadow_color) = patch.shadow_color {
            self.shadow_color = shadow_color;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
        if let Some(letter_spacing) = patch.letter_spacing {
            self.letter_spacing = letter_spacing;
        }
        if let Some(background_color) = patch.background_color {
            self.background_color = background_color;
        }
    }
}

/// A partial update for a [`TextOverlay`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOverlayPatch {
    pub text: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub font_size: Option<f64>,
    pub color: Option<SerializableColor>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub text_align: Option<TextAlign>,
    pub shadow_enabled: Option<bool>,
    pub shadow_color: Option<SerializableColor>,
    pub opacity: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub background_color: Option<SerializableColor>,
}

impl TextOverlayPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
