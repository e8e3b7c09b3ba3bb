//! A photo library that is a plain directory.

use crate::uri_to_path;
use socrop_core::export::{BoxFuture, ExportError, ExportResult, MediaLibrary};
use socrop_core::{PermissionStatus, SavedAsset};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Saves exported photos by copying them into a directory.
///
/// Permission is granted when the directory exists or can be created.
pub struct DirectoryGallery {
    dir: PathBuf,
}

impl DirectoryGallery {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Gallery in the default location.
    ///
    /// The user's pictures folder if there is one, otherwise the home
    /// directory, in both cases under `Socrop/`.
    pub fn default_location() -> ExportResult<Self> {
        let base = dirs::picture_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| ExportError::Save("Could not determine a pictures directory".into()))?;
        Ok(Self::new(base.join("Socrop")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn check_access(&self) -> PermissionStatus {
        match fs::create_dir_all(&self.dir) {
            Ok(()) if self.dir.is_dir() => PermissionStatus::Granted,
            Ok(()) => PermissionStatus::Denied,
            Err(e) => {
                log::warn!("Gallery {} is not writable: {e}", self.dir.display());
                PermissionStatus::Denied
            }
        }
    }

    fn copy_in(&self, uri: &str) -> ExportResult<SavedAsset> {
        let source = uri_to_path(uri);
        let id = Uuid::new_v4().simple().to_string();
        let file_name = match source.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("IMG_{id}.{ext}"),
            None => format!("IMG_{id}"),
        };
        let dest = self.dir.join(file_name);

        fs::copy(&source, &dest).map_err(|e| {
            ExportError::Save(format!(
                "Failed to copy {} to {}: {e}",
                source.display(),
                dest.display()
            ))
        })?;

        Ok(SavedAsset {
            id,
            uri: dest.to_string_lossy().into_owned(),
        })
    }
}

impl MediaLibrary for DirectoryGallery {
    fn request_permission(&self) -> BoxFuture<'_, ExportResult<PermissionStatus>> {
        Box::pin(async move { Ok(self.check_access()) })
    }

    fn save<'a>(&'a self, uri: &'a str) -> BoxFuture<'a, ExportResult<SavedAsset>> {
        Box::pin(async move { self.copy_in(uri) })
    }
}
