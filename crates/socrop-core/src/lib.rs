//! Socrop Core Library
//!
//! Platform-agnostic editing state for the Socrop photo editor: the
//! adjustment model, overlays, presets, the undo history and the contracts
//! the preview and export layers consume.

pub mod adjustments;
pub mod color;
pub mod config;
pub mod crop;
pub mod export;
pub mod filters;
pub mod history;
pub mod overlays;
pub mod preview;
pub mod state;
pub mod store;

pub use adjustments::{AdjustmentKey, AdjustmentPolicy, Adjustments};
pub use color::{ColorParseError, SerializableColor};
pub use config::{ConfigError, SessionConfig};
pub use crop::{CropPreset, CropRatioError, CropSettings};
pub use export::{
    BoxFuture, ExportError, ExportFormat, ExportOptions, ExportOutcome, ExportQuality,
    ExportResult, Exporter, ImageManipulator, ManipulatedImage, ManipulationAction, MediaLibrary,
    PermissionStatus, SaveOptions, SavedAsset, plan_actions,
};
pub use filters::{FilterCatalog, FilterPreset};
pub use history::{History, HistoryStatus, DEFAULT_HISTORY_LIMIT};
pub use overlays::{
    DrawPath, DrawPathError, FontStyle, FontWeight, OverlayId, StrokeBuilder, TextAlign,
    TextOverlay, TextOverlayPatch,
};
pub use preview::{PreviewModel, PreviewStroke, PreviewText, TintLayer, Vignette};
pub use state::EditorState;
pub use store::{EditorStateStore, StoreConfig};
