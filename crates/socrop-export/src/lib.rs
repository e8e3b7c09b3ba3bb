//! Socrop Export
//!
//! Native implementations of the export collaborators: an image manipulator
//! backed by the `image` crate and a gallery that is a plain directory.

mod gallery;
mod manipulator;
pub mod transform;

pub use gallery::DirectoryGallery;
pub use manipulator::ImageCrateManipulator;

use std::path::PathBuf;

/// Local path for a `file://` URI or a bare path.
pub fn uri_to_path(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))
}
