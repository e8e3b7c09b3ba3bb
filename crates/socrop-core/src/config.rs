//! Session configuration.

use crate::export::ExportOptions;
use crate::store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything an editing session can be configured with. Every field is
/// optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub store: StoreConfig,
    /// Export settings preselected on the export screen.
    pub export: ExportOptions,
    /// Where exported photos are saved. `None` picks the platform default.
    pub gallery_dir: Option<PathBuf>,
    /// Scratch directory for rendered files. `None` uses the system temp dir.
    pub output_dir: Option<PathBuf>,
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustments::AdjustmentPolicy;
    use crate::export::ExportFormat;
    use crate::history::DEFAULT_HISTORY_LIMIT;

    #[test]
    fn test_empty_config_is_default() {
        let config = SessionConfig::from_json("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.store.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.store.adjustment_policy, AdjustmentPolicy::Trust);
    }

    #[test]
    fn test_partial_config() {
        let config = SessionConfig::from_json(
            r#"{
                "store": { "adjustment_policy": "clamp" },
                "export": { "format": "webp", "max_size": 1080 },
                "gallery_dir": "/tmp/gallery"
            }"#,
        )
        .unwrap();
        assert_eq!(config.store.adjustment_policy, AdjustmentPolicy::Clamp);
        assert_eq!(config.store.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.export.format, ExportFormat::Webp);
        assert_eq!(config.export.max_size, 1080);
        assert_eq!(config.gallery_dir, Some(PathBuf::from("/tmp/gallery")));
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            SessionConfig::from_json(r#"{"store": {"history_limit": "lots"}}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SessionConfig::load(Path::new("/definitely/not/here.json")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_roundtrip() {
        let config = SessionConfig {
            output_dir: Some(PathBuf::from("/tmp/out")),
            ..SessionConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(SessionConfig::from_json(&json).unwrap(), config);
    }
}
