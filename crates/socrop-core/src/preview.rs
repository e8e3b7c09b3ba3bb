//! Data for the live preview.
//!
//! The preview is a cosmetic approximation: adjustments become translucent
//! color washes over the photo instead of real pixel math. This module
//! computes everything a renderer needs to draw it.

use crate::adjustments::AdjustmentKey;
use crate::color::SerializableColor;
use crate::crop::canvas_size;
use crate::overlays::{DrawPath, OverlayId, TextOverlay};
use crate::state::EditorState;
use kurbo::{Affine, BezPath, Point, Size, Vec2};
use serde::{Serialize, Serializer};

/// Preview text is drawn smaller than the exported size.
pub const PREVIEW_FONT_SCALE: f64 = 0.6;

const WHITE: SerializableColor = SerializableColor::rgb(255, 255, 255);
const BLACK: SerializableColor = SerializableColor::rgb(0, 0, 0);
const GRAY: SerializableColor = SerializableColor::rgb(128, 128, 128);

/// A full-canvas color wash standing in for one adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TintLayer {
    pub adjustment: AdjustmentKey,
    /// Opaque base color; `alpha` carries the strength.
    pub color: SerializableColor,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vignette {
    pub border_width: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewStroke {
    pub id: OverlayId,
    /// Polyline in canvas coordinates.
    #[serde(serialize_with = "serialize_svg")]
    pub path: BezPath,
    pub color: SerializableColor,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewText {
    pub id: OverlayId,
    pub text: String,
    /// Center of the label in canvas coordinates.
    pub anchor: Point,
    pub font_size: f64,
    pub color: SerializableColor,
    pub opacity: f64,
    pub shadow: bool,
    pub background: Option<SerializableColor>,
}

/// Everything needed to draw one frame of the preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewModel {
    pub image_uri: Option<String>,
    pub canvas: Size,
    /// Rotation then mirroring, both about the canvas center.
    pub image_transform: Affine,
    /// Contrast is faked through image opacity.
    pub image_opacity: f64,
    /// Washes in draw order. Zero-valued adjustments have no layer.
    pub tints: Vec<TintLayer>,
    pub vignette: Option<Vignette>,
    pub strokes: Vec<PreviewStroke>,
    pub texts: Vec<PreviewText>,
}

impl PreviewModel {
    pub fn from_state(state: &EditorState, viewport_width: f64) -> Self {
        let canvas = canvas_size(viewport_width, state.crop_ratio.as_ref());
        let adj = &state.adjustments;

        Self {
            image_uri: state.image_uri.clone(),
            canvas,
            image_transform: image_transform(canvas, state.rotation, state.flip_h, state.flip_v),
            image_opacity: contrast_opacity(adj.contrast),
            tints: tint_layers(state),
            vignette: (adj.vignette > 0).then(|| {
                let v = f64::from(adj.vignette);
                Vignette {
                    border_width: 40.0 + v * 0.4,
                    alpha: v / 130.0,
                }
            }),
            strokes: state
                .draw_paths
                .iter()
                .map(|path| preview_stroke(path, canvas))
                .collect(),
            texts: state
                .text_overlays
                .iter()
                .map(|overlay| preview_text(overlay, canvas))
                .collect(),
        }
    }

    pub fn tint(&self, key: AdjustmentKey) -> Option<&TintLayer> {
        self.tints.iter().find(|t| t.adjustment == key)
    }
}

fn image_transform(canvas: Size, rotation: i32, flip_h: bool, flip_v: bool) -> Affine {
    let center = Vec2::new(canvas.width / 2.0, canvas.height / 2.0);
    let sx = if flip_h { -1.0 } else { 1.0 };
    let sy = if flip_v { -1.0 } else { 1.0 };
    Affine::translate(center)
        * Affine::rotate(f64::from(rotation).to_radians())
        * Affine::scale_non_uniform(sx, sy)
        * Affine::translate(-center)
}

fn contrast_opacity(contrast: i32) -> f64 {
    let v = f64::from(contrast);
    match contrast {
        c if c > 0 => 1.0 + v / 200.0,
        c if c < 0 => 1.0 + v / 300.0,
        _ => 1.0,
    }
}

/// How one adjustment maps onto a wash.
struct TintRule {
    key: AdjustmentKey,
    positive: Option<SerializableColor>,
    negative: Option<SerializableColor>,
    divisor: f64,
}

const TINT_RULES: [TintRule; 9] = [
    TintRule {
        key: AdjustmentKey::Brightness,
        positive: Some(WHITE),
        negative: Some(BLACK),
        divisor: 200.0,
    },
    TintRule {
        key: AdjustmentKey::Exposure,
        positive: Some(WHITE),
        negative: Some(BLACK),
        divisor: 250.0,
    },
    TintRule {
        key: AdjustmentKey::Warmth,
        positive: Some(SerializableColor::rgb(255, 140, 0)),
        negative: Some(SerializableColor::rgb(30, 100, 255)),
        divisor: 300.0,
    },
    TintRule {
        key: AdjustmentKey::Tint,
        positive: Some(SerializableColor::rgb(200, 50, 200)),
        negative: Some(SerializableColor::rgb(50, 200, 50)),
        divisor: 400.0,
    },
    TintRule {
        key: AdjustmentKey::Saturation,
        positive: None,
        negative: Some(GRAY),
        divisor: 150.0,
    },
    TintRule {
        key: AdjustmentKey::Highlights,
        positive: Some(WHITE),
        negative: None,
        divisor: 350.0,
    },
    TintRule {
        key: AdjustmentKey::Shadows,
        positive: None,
        negative: Some(BLACK),
        divisor: 250.0,
    },
    TintRule {
        key: AdjustmentKey::Fade,
        positive: Some(SerializableColor::rgb(200, 200, 210)),
        negative: None,
        divisor: 250.0,
    },
    TintRule {
        key: AdjustmentKey::Grain,
        positive: Some(GRAY),
        negative: None,
        divisor: 500.0,
    },
];

fn tint_layers(state: &EditorState) -> Vec<TintLayer> {
    TINT_RULES
        .iter()
        .filter_map(|rule| {
            let value = state.adjustments.get(rule.key);
            let color = match value {
                v if v > 0 => rule.positive?,
                v if v < 0 => rule.negative?,
                _ => return None,
            };
            Some(TintLayer {
                adjustment: rule.key,
                color,
                alpha: f64::from(value.unsigned_abs()) / rule.divisor,
            })
        })
        .collect()
}

fn preview_stroke(path: &DrawPath, canvas: Size) -> PreviewStroke {
    PreviewStroke {
        id: path.id(),
        path: path.to_canvas_path(canvas),
        color: path.color(),
        width: path.width(),
    }
}

fn preview_text(overlay: &TextOverlay, canvas: Size) -> PreviewText {
    PreviewText {
        id: overlay.id,
        text: overlay.text.clone(),
        anchor: Point::new(overlay.x * canvas.width, overlay.y * canvas.height),
        font_size: overlay.font_size * PREVIEW_FONT_SCALE,
        color: overlay.color,
        opacity: overlay.opacity,
        shadow: overlay.shadow_enabled,
        background: overlay.has_background().then_some(overlay.background_color),
    }
}

fn serialize_svg<S: Serializer>(path: &BezPath, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_svg())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crop::CropSettings;

    const EPS: f64 = 1e-9;

    fn state() -> EditorState {
        EditorState::with_image(Some("file:///p.jpg".into()))
    }

    #[test]
    fn test_neutral_preview() {
        let preview = PreviewModel::from_state(&state(), 400.0);
        assert!(preview.tints.is_empty());
        assert!(preview.vignette.is_none());
        assert_eq!(preview.image_opacity, 1.0);
        assert_eq!(preview.image_transform, Affine::IDENTITY);
        assert_eq!(preview.canvas, Size::new(376.0, 376.0));
    }

    #[test]
    fn test_signed_tints() {
        let mut s = state();
        s.adjustments.brightness = 50;
        s.adjustments.warmth = -60;
        let preview = PreviewModel::from_state(&s, 400.0);

        let brightness = preview.tint(AdjustmentKey::Brightness).unwrap();
        assert_eq!(brightness.color, WHITE);
        assert!((brightness.alpha - 0.25).abs() < EPS);

        let warmth = preview.tint(AdjustmentKey::Warmth).unwrap();
        assert_eq!(warmth.color, SerializableColor::rgb(30, 100, 255));
        assert!((warmth.alpha - 0.2).abs() < EPS);
    }

    #[test]
    fn test_one_sided_tints() {
        let mut s = state();
        s.adjustments.saturation = 40;
        s.adjustments.highlights = -40;
        s.adjustments.shadows = 40;
        assert!(PreviewModel::from_state(&s, 400.0).tints.is_empty());

        s.adjustments.saturation = -75;
        s.adjustments.shadows = -50;
        s.adjustments.grain = 50;
        let preview = PreviewModel::from_state(&s, 400.0);
        let keys: Vec<_> = preview.tints.iter().map(|t| t.adjustment).collect();
        assert_eq!(
            keys,
            vec![
                AdjustmentKey::Saturation,
                AdjustmentKey::Shadows,
                AdjustmentKey::Grain
            ]
        );
        assert!((preview.tints[0].alpha - 0.5).abs() < EPS);
        assert!((preview.tints[1].alpha - 0.2).abs() < EPS);
        assert!((preview.tints[2].alpha - 0.1).abs() < EPS);
    }

    #[test]
    fn test_contrast_and_vignette() {
        let mut s = state();
        s.adjustments.contrast = 50;
        s.adjustments.vignette = 65;
        let preview = PreviewModel::from_state(&s, 400.0);
        assert!((preview.image_opacity - 1.25).abs() < EPS);
        let vignette = preview.vignette.unwrap();
        assert!((vignette.border_width - 66.0).abs() < EPS);
        assert!((vignette.alpha - 0.5).abs() < EPS);

        s.adjustments.contrast = -30;
        let preview = PreviewModel::from_state(&s, 400.0);
        assert!((preview.image_opacity - 0.9).abs() < EPS);
    }

    #[test]
    fn test_transform() {
        let mut s = state();
        s.rotation = 90;
        let preview = PreviewModel::from_state(&s, 224.0);
        // Canvas is 200x200; the top-left corner swings to the top-right.
        let p = preview.image_transform * Point::new(0.0, 0.0);
        assert!((p.x - 200.0).abs() < EPS);
        assert!(p.y.abs() < EPS);

        s.rotation = 0;
        s.flip_h = true;
        let preview = PreviewModel::from_state(&s, 224.0);
        let p = preview.image_transform * Point::new(50.0, 10.0);
        assert!((p.x - 150.0).abs() < EPS);
        assert!((p.y - 10.0).abs() < EPS);
    }

    #[test]
    fn test_overlays_projected() {
        let mut s = state();
        s.crop_ratio = Some(CropSettings::new("16:9", "16:9"));
        let mut text = TextOverlay::new("hello");
        text.x = 0.25;
        text.font_size = 40.0;
        s.text_overlays.push(text);
        s.draw_paths.push(
            DrawPath::new(
                vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
                SerializableColor::white(),
                4.0,
            )
            .unwrap(),
        );

        let preview = PreviewModel::from_state(&s, 344.0);
        assert_eq!(preview.canvas, Size::new(320.0, 180.0));

        let label = &preview.texts[0];
        assert_eq!(label.anchor, Point::new(80.0, 90.0));
        assert!((label.font_size - 24.0).abs() < EPS);
        assert!(label.background.is_none());

        let json = serde_json::to_value(&preview).unwrap();
        let svg = json["strokes"][0]["path"].as_str().unwrap();
        assert!(svg.starts_with('M'));
        assert!(svg.contains("320"));
    }
}
