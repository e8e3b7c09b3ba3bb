//! The editor state store.
//!
//! Mutations edit the working state only. Nothing reaches the undo history
//! until [`EditorStateStore::commit_to_history`] is called, which lets
//! continuous gestures (slider drags, strokes) commit once on release.

use crate::adjustments::{AdjustmentKey, AdjustmentPolicy, Adjustments};
use crate::crop::CropSettings;
use crate::filters::{DEFAULT_INTENSITY, FilterCatalog, FilterPreset};
use crate::history::{DEFAULT_HISTORY_LIMIT, History, HistoryStatus};
use crate::overlays::{DrawPath, OverlayId, TextOverlay, TextOverlayPatch};
use crate::state::EditorState;
use serde::{Deserialize, Serialize};

/// Tunables for an [`EditorStateStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Snapshots kept for undo. Values below 1 behave as 1.
    pub history_limit: usize,
    pub adjustment_policy: AdjustmentPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            adjustment_policy: AdjustmentPolicy::default(),
        }
    }
}

/// Owns the editing state of one session and its undo history.
#[derive(Debug, Clone)]
pub struct EditorStateStore {
    state: EditorState,
    history: History,
    config: StoreConfig,
    revision: u64,
}

impl Default for EditorStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorStateStore {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        let state = EditorState::default();
        Self {
            history: History::new(state.clone(), config.history_limit),
            state,
            config,
            revision: 0,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// An owned copy of the current state, for handing to export.
    pub fn snapshot(&self) -> EditorState {
        self.state.clone()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Counter bumped by every operation that changes the state or history.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_status(&self) -> HistoryStatus {
        self.history.status()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    // --- Session ---

    /// Start over with a new photo. Clears every edit and the history.
    pub fn set_image_uri(&mut self, uri: Option<String>) {
        log::debug!("Loading image {uri:?}, resetting session");
        self.state = EditorState::with_image(uri);
        self.history.reset(self.state.clone());
        self.touch();
    }

    /// Drop the photo, every edit and the history.
    pub fn reset_editor(&mut self) {
        log::debug!("Resetting editor");
        self.state = EditorState::default();
        self.history.reset(self.state.clone());
        self.touch();
    }

    // --- Adjustments ---

    pub fn set_adjustment(&mut self, key: AdjustmentKey, value: i32) {
        let value = self.config.adjustment_policy.adjustment(key, value);
        self.state.adjustments.set(key, value);
        self.touch();
    }

    pub fn reset_adjustment(&mut self, key: AdjustmentKey) {
        self.state.adjustments.set(key, 0);
        self.touch();
    }

    /// Zero every slider and drop the active filter.
    pub fn reset_all_adjustments(&mut self) {
        self.state.adjustments = Adjustments::NEUTRAL;
        self.state.active_filter = None;
        self.state.filter_intensity = DEFAULT_INTENSITY;
        self.touch();
    }

    fn write_adjustments(&mut self, adjustments: Adjustments) {
        let policy = self.config.adjustment_policy;
        for (key, value) in adjustments.iter() {
            self.state.adjustments.set(key, policy.adjustment(key, value));
        }
    }

    // --- Filters ---

    pub fn set_active_filter(&mut self, filter: Option<String>) {
        self.state.active_filter = filter;
        self.touch();
    }

    pub fn set_filter_intensity(&mut self, intensity: i32) {
        self.state.filter_intensity = self.config.adjustment_policy.intensity(intensity);
        self.touch();
    }

    /// Select a preset and write its deltas at the current intensity.
    ///
    /// `None` or the "original" preset clears the filter and zeroes every
    /// slider. The intensity itself is left alone.
    pub fn apply_filter(&mut self, preset: Option<&FilterPreset>) {
        match preset {
            Some(preset) if !preset.is_original() => {
                self.state.active_filter = Some(preset.id.clone());
                let deltas = preset.adjustments_at(self.state.filter_intensity);
                self.write_adjustments(deltas);
            }
            _ => {
                self.state.active_filter = None;
                self.state.adjustments = Adjustments::NEUTRAL;
            }
        }
        self.touch();
    }

    /// Change the intensity and rescale the active preset's deltas to match.
    ///
    /// If the active filter is not in `catalog`, only the intensity changes.
    pub fn change_filter_intensity(&mut self, intensity: i32, catalog: &FilterCatalog) {
        self.set_filter_intensity(intensity);
        let intensity = self.state.filter_intensity;
        let deltas = self
            .state
            .active_filter
            .as_deref()
            .and_then(|id| catalog.get(id))
            .map(|preset| preset.adjustments_at(intensity));
        match deltas {
            Some(deltas) => self.write_adjustments(deltas),
            None => {
                if let Some(id) = &self.state.active_filter {
                    log::debug!("Active filter {id:?} not in catalog, adjustments untouched");
                }
            }
        }
    }

    // --- Text ---

    pub fn add_text_overlay(&mut self, overlay: TextOverlay) {
        self.state.text_overlays.push(overlay);
        self.touch();
    }

    /// Merge `patch` into the overlay with `id`. Returns `false` if no such
    /// overlay exists, in which case nothing changes.
    pub fn update_text_overlay(&mut self, id: OverlayId, patch: &TextOverlayPatch) -> bool {
        let Some(overlay) = self.state.text_overlays.iter_mut().find(|t| t.id == id) else {
            log::debug!("Ignoring update for unknown text overlay {id}");
            return false;
        };
        overlay.apply(patch);
        self.touch();
        true
    }

    /// Remove the overlay with `id`. Returns `false` if no such overlay exists.
    pub fn remove_text_overlay(&mut self, id: OverlayId) -> bool {
        let before = self.state.text_overlays.len();
        self.state.text_overlays.retain(|t| t.id != id);
        if self.state.text_overlays.len() == before {
            log::debug!("Ignoring removal of unknown text overlay {id}");
            return false;
        }
        self.touch();
        true
    }

    // --- Drawing ---

    pub fn add_draw_path(&mut self, path: DrawPath) {
        self.state.draw_paths.push(path);
        self.touch();
    }

    pub fn clear_draw_paths(&mut self) {
        self.state.draw_paths.clear();
        self.touch();
    }

    // --- Transform ---

    /// Quarter turn clockwise. The remainder keeps the sign, so a negative
    /// rotation stays negative until it passes zero.
    pub fn rotate(&mut self) {
        self.state.rotation = (self.state.rotation % 360 + 90) % 360;
        self.touch();
    }

    /// Rotate by an arbitrary amount. The result is not wrapped.
    pub fn rotate_by(&mut self, degrees: i32) {
        self.state.rotation = self.state.rotation.saturating_add(degrees);
        self.touch();
    }

    pub fn flip_horizontal(&mut self) {
        self.state.flip_h = !self.state.flip_h;
        self.touch();
    }

    pub fn flip_vertical(&mut self) {
        self.state.flip_v = !self.state.flip_v;
        self.touch();
    }

    pub fn set_crop_ratio(&mut self, crop: Option<CropSettings>) {
        self.state.crop_ratio = crop;
        self.touch();
    }

    // --- History ---

    /// Record the current state as a new undo step.
    pub fn commit_to_history(&mut self) {
        self.history.commit(self.state.clone());
        log::debug!(
            "Committed snapshot {}/{}",
            self.history.position() + 1,
            self.history.len()
        );
        self.touch();
    }

    /// Load the previous snapshot. Uncommitted edits are discarded.
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo() else {
            return false;
        };
        self.state = previous.clone();
        log::debug!("Undo to snapshot {}", self.history.position());
        self.touch();
        true
    }

    /// Load the next snapshot. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo() else {
            return false;
        };
        self.state = next.clone();
        log::debug!("Redo to snapshot {}", self.history.position());
        self.touch();
        true
    }
}
