//! Subcommand implementations.

use crate::cli::{ApplyArgs, PresetsArgs, PreviewArgs};
use crate::error::CliError;
use crate::script::EditScript;
use serde::Serialize;
use socrop_core::{
    EditorState, EditorStateStore, ExportOptions, ExportOutcome, Exporter, FilterCatalog,
    FilterPreset, ManipulationAction, PreviewModel, SessionConfig, plan_actions,
};
use socrop_export::{DirectoryGallery, ImageCrateManipulator};
use std::fs;
use std::path::Path;

/// Result of `socrop apply`.
#[derive(Debug, Serialize)]
pub struct ApplyOutcome {
    pub options: ExportOptions,
    pub actions: Vec<ManipulationAction>,
    /// `None` on a dry run.
    pub export: Option<ExportOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<EditorState>,
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig, CliError> {
    match path {
        Some(path) => Ok(SessionConfig::load(path)?),
        None => Ok(SessionConfig::default()),
    }
}

fn load_script(path: &Path) -> Result<EditScript, CliError> {
    let json = fs::read_to_string(path).map_err(|source| CliError::ReadScript {
        path: path.to_path_buf(),
        source,
    })?;
    EditScript::from_json(&json).map_err(|source| CliError::ParseScript {
        path: path.to_path_buf(),
        source,
    })
}

fn replay(script: &Path, config: &SessionConfig) -> Result<EditorStateStore, CliError> {
    let script = load_script(script)?;
    let mut store = EditorStateStore::with_config(config.store);
    script.replay(&mut store, &FilterCatalog::builtin())?;
    Ok(store)
}

/// Replay the script and export the result.
pub fn run_apply(args: &ApplyArgs) -> Result<ApplyOutcome, CliError> {
    let config = load_config(args.config.as_deref())?;
    let store = replay(&args.script, &config)?;

    let mut options = config.export;
    if let Some(format) = args.format {
        options.format = format;
    }
    if let Some(quality) = args.quality {
        options.quality = quality;
    }
    if let Some(max_size) = args.max_size {
        options.max_size = max_size;
    }

    let state = store.state();
    let actions = plan_actions(state, &options);

    let export = if args.dry_run {
        log::info!("Dry run, planned {} action(s)", actions.len());
        None
    } else {
        let manipulator = match &config.output_dir {
            Some(dir) => ImageCrateManipulator::new(dir.clone())?,
            None => ImageCrateManipulator::in_temp_dir()?,
        };
        let gallery = match args.gallery.as_ref().or(config.gallery_dir.as_ref()) {
            Some(dir) => DirectoryGallery::new(dir.clone()),
            None => DirectoryGallery::default_location()?,
        };
        let exporter = Exporter::new(manipulator, gallery);
        let outcome = pollster::block_on(exporter.export(state, &options))?;
        if let Err(e) = exporter.manipulator().discard(&outcome.image) {
            log::warn!("{e}");
        }
        Some(outcome)
    };

    Ok(ApplyOutcome {
        options,
        actions,
        export,
        state: args.print_state.then(|| store.snapshot()),
    })
}

/// Replay the script and lay out its preview.
pub fn run_preview(args: &PreviewArgs) -> Result<PreviewModel, CliError> {
    let config = load_config(args.config.as_deref())?;
    let store = replay(&args.script, &config)?;
    Ok(PreviewModel::from_state(store.state(), args.viewport))
}

/// Presets listed under a category, in catalog order.
pub fn run_presets(args: &PresetsArgs) -> Vec<FilterPreset> {
    let catalog = FilterCatalog::builtin();
    let presets: Vec<FilterPreset> = catalog
        .in_category(&args.category)
        .into_iter()
        .cloned()
        .collect();
    if presets.len() <= 1 {
        log::warn!(
            "No presets in category {:?} (known: {})",
            args.category,
            catalog.categories().join(", ")
        );
    }
    presets
}
