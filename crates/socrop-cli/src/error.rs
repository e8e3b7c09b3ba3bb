use socrop_core::{ColorParseError, ConfigError, CropRatioError, DrawPathError, ExportError};
use std::path::PathBuf;
use thiserror::Error;

/// Why a single script step could not run.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Color(#[from] ColorParseError),
    #[error(transparent)]
    Crop(#[from] CropRatioError),
    #[error(transparent)]
    Path(#[from] DrawPathError),
    #[error("unknown filter preset {0:?}")]
    UnknownFilter(String),
}

/// CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to read script {path}: {source}")]
    ReadScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script {path}: {source}")]
    ParseScript {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Step {index} ({op}): {source}")]
    Step {
        index: usize,
        op: &'static str,
        #[source]
        source: StepError,
    },
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}
