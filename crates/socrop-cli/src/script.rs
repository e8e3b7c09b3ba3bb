//! JSON edit scripts.
//!
//! A script is an optional starting image plus a list of steps, each naming
//! one store operation:
//!
//! ```json
//! {
//!   "image": "file:///photos/beach.jpg",
//!   "steps": [
//!     { "op": "apply_filter", "id": "vivid" },
//!     { "op": "set_filter_intensity", "value": 60 },
//!     { "op": "commit" },
//!     { "op": "add_text", "text": "Summer", "style": { "color": "#FFD93D" } },
//!     { "op": "rotate" }
//!   ]
//! }
//! ```

use crate::error::{CliError, StepError};
use kurbo::Point;
use serde::Deserialize;
use socrop_core::overlays::DEFAULT_BRUSH_WIDTH;
use socrop_core::{
    AdjustmentKey, CropSettings, EditorStateStore, FilterCatalog, FontStyle, FontWeight,
    OverlayId, SerializableColor, StrokeBuilder, TextAlign, TextOverlay, TextOverlayPatch,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EditScript {
    /// Loaded before the first step, starting a fresh session.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    SetImage { uri: Option<String> },
    SetAdjustment { key: AdjustmentKey, value: i32 },
    ResetAdjustment { key: AdjustmentKey },
    ResetAllAdjustments,
    /// `None` or `"original"` removes the filter.
    ApplyFilter { id: Option<String> },
    SetActiveFilter { id: Option<String> },
    SetFilterIntensity { value: i32 },
    AddText {
        text: String,
        #[serde(default)]
        id: Option<OverlayId>,
        #[serde(default)]
        style: TextStyle,
    },
    UpdateText {
        id: OverlayId,
        #[serde(default)]
        style: TextStyle,
    },
    RemoveText { id: OverlayId },
    Draw {
        points: Vec<[f64; 2]>,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        width: Option<f64>,
        /// Douglas-Peucker tolerance in normalized units.
        #[serde(default)]
        simplify: Option<f64>,
    },
    ClearDrawings,
    Rotate,
    RotateBy { degrees: i32 },
    FlipHorizontal,
    FlipVertical,
    Crop {
        #[serde(default)]
        ratio: Option<String>,
        #[serde(default)]
        label: Option<String>,
    },
    Commit,
    Undo,
    Redo,
    Reset,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::SetImage { .. } => "set_image",
            Step::SetAdjustment { .. } => "set_adjustment",
            Step::ResetAdjustment { .. } => "reset_adjustment",
            Step::ResetAllAdjustments => "reset_all_adjustments",
            Step::ApplyFilter { .. } => "apply_filter",
            Step::SetActiveFilter { .. } => "set_active_filter",
            Step::SetFilterIntensity { .. } => "set_filter_intensity",
            Step::AddText { .. } => "add_text",
            Step::UpdateText { .. } => "update_text",
            Step::RemoveText { .. } => "remove_text",
            Step::Draw { .. } => "draw",
            Step::ClearDrawings => "clear_drawings",
            Step::Rotate => "rotate",
            Step::RotateBy { .. } => "rotate_by",
            Step::FlipHorizontal => "flip_horizontal",
            Step::FlipVertical => "flip_vertical",
            Step::Crop { .. } => "crop",
            Step::Commit => "commit",
            Step::Undo => "undo",
            Step::Redo => "redo",
            Step::Reset => "reset",
        }
    }

    /// Run this step against `store`.
    pub fn apply(
        &self,
        store: &mut EditorStateStore,
        catalog: &FilterCatalog,
    ) -> Result<(), StepError> {
        match self {
            Step::SetImage { uri } => store.set_image_uri(uri.clone()),
            Step::SetAdjustment { key, value } => store.set_adjustment(*key, *value),
            Step::ResetAdjustment { key } => store.reset_adjustment(*key),
            Step::ResetAllAdjustments => store.reset_all_adjustments(),
            Step::ApplyFilter { id } => {
                let preset = match id.as_deref() {
                    None => None,
                    Some(id) => Some(
                        catalog
                            .get(id)
                            .ok_or_else(|| StepError::UnknownFilter(id.to_string()))?,
                    ),
                };
                store.apply_filter(preset);
            }
            Step::SetActiveFilter { id } => store.set_active_filter(id.clone()),
            Step::SetFilterIntensity { value } => store.change_filter_intensity(*value, catalog),
            Step::AddText { text, id, style } => {
                let mut overlay = match id {
                    Some(id) => TextOverlay::with_id(*id, text.clone()),
                    None => TextOverlay::new(text.clone()),
                };
                overlay.apply(&style.to_patch()?);
                store.add_text_overlay(overlay);
            }
            Step::UpdateText { id, style } => {
                if !store.update_text_overlay(*id, &style.to_patch()?) {
                    log::warn!("No text overlay {id}, update ignored");
                }
            }
            Step::RemoveText { id } => {
                if !store.remove_text_overlay(*id) {
                    log::warn!("No text overlay {id}, remove ignored");
                }
            }
            Step::Draw {
                points,
                color,
                width,
                simplify,
            } => {
                let color = match color {
                    Some(c) => SerializableColor::parse(c)?,
                    None => SerializableColor::white(),
                };
                let mut stroke = StrokeBuilder::new(color, width.unwrap_or(DEFAULT_BRUSH_WIDTH));
                for &[x, y] in points {
                    stroke.push(Point::new(x, y));
                }
                if let Some(tolerance) = simplify {
                    stroke.simplify(*tolerance);
                }
                if stroke.len() < 2 {
                    log::warn!("Skipping stroke with {} point(s)", stroke.len());
                } else {
                    store.add_draw_path(stroke.finish()?);
                }
            }
            Step::ClearDrawings => store.clear_draw_paths(),
            Step::Rotate => store.rotate(),
            Step::RotateBy { degrees } => store.rotate_by(*degrees),
            Step::FlipHorizontal => store.flip_horizontal(),
            Step::FlipVertical => store.flip_vertical(),
            Step::Crop { ratio, label } => {
                let crop = match ratio {
                    None => None,
                    Some(ratio) => {
                        let label = label.clone().unwrap_or_else(|| ratio.clone());
                        let settings = CropSettings::new(ratio.clone(), label);
                        settings.ratio()?;
                        Some(settings)
                    }
                };
                store.set_crop_ratio(crop);
            }
            Step::Commit => store.commit_to_history(),
            Step::Undo => {
                if !store.undo() {
                    log::debug!("Nothing to undo");
                }
            }
            Step::Redo => {
                if !store.redo() {
                    log::debug!("Nothing to redo");
                }
            }
            Step::Reset => store.reset_editor(),
        }
        Ok(())
    }
}

/// Text styling as written in a script. Colors are CSS-like strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub text: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub text_align: Option<TextAlign>,
    pub shadow_enabled: Option<bool>,
    pub shadow_color: Option<String>,
    pub opacity: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub background_color: Option<String>,
}

impl TextStyle {
    pub fn to_patch(&self) -> Result<TextOverlayPatch, StepError> {
        let parse = |c: &Option<String>| c.as_deref().map(SerializableColor::parse).transpose();
        Ok(TextOverlayPatch {
            text: self.text.clone(),
            x: self.x,
            y: self.y,
            font_size: self.font_size,
            color: parse(&self.color)?,
            font_weight: self.font_weight,
            font_style: self.font_style,
            text_align: self.text_align,
            shadow_enabled: self.shadow_enabled,
            shadow_color: parse(&self.shadow_color)?,
            opacity: self.opacity,
            letter_spacing: self.letter_spacing,
            background_color: parse(&self.background_color)?,
        })
    }
}

impl EditScript {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Replay every step in order, stopping at the first one that fails.
    pub fn replay(
        &self,
        store: &mut EditorStateStore,
        catalog: &FilterCatalog,
    ) -> Result<(), CliError> {
        if let Some(image) = &self.image {
            store.set_image_uri(Some(image.clone()));
        }
        for (index, step) in self.steps.iter().enumerate() {
            log::trace!("Step {index}: {step:?}");
            step.apply(store, catalog).map_err(|source| CliError::Step {
                index,
                op: step.name(),
                source,
            })?;
        }
        log::debug!(
            "Replayed {} step(s), revision {}",
            self.steps.len(),
            store.revision()
        );
        Ok(())
    }
}
