//! Content layered over the photo: text captions and freehand strokes.

mod draw;
mod text;

pub use draw::{BRUSH_COLORS, BRUSH_WIDTHS, DEFAULT_BRUSH_WIDTH, DrawPath, DrawPathError, StrokeBuilder};
pub use text::{
    BACKGROUND_COLORS, FONT_SIZES, FontStyle, FontWeight, LETTER_SPACINGS, TEXT_COLORS, TextAlign,
    TextOverlay, TextOverlayPatch,
};

use uuid::Uuid;

/// Unique identifier for overlays and strokes.
pub type OverlayId = Uuid;
