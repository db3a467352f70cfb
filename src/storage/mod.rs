//! # Storage Layer
//!
//! Filesystem access for the version refresh.
//!
//! ## Files
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Repository root | Directory containing `.git` | nearest ancestor of the working directory |
//! | Manifest | NuGet `.nuspec` XML | `Mile.HyperV.NuGet/Mile.HyperV.nuspec` |
//!
//! ## Write Safety
//!
//! - The manifest is overwritten in place with no backup or temp-file rename
//! - Concurrent runs against the same manifest are not coordinated
//! - Formatting outside the version text is preserved byte for byte
//!
//! ## Key Types
//!
//! - [`Repository`] - Locates the repository root
//! - [`Manifest`] - Reads, edits, and writes the `.nuspec` file

mod manifest;
mod repository;

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

pub use manifest::{Manifest, ManifestError};
pub use repository::{Repository, RepositoryError};

/// Result of stamping a manifest
#[derive(Debug, Clone, Serialize)]
pub struct StampOutcome {
    pub manifest: PathBuf,
    pub previous_version: Option<String>,
    pub version: String,
    /// False when the `package/metadata/version` chain was missing
    pub applied: bool,
}

/// Writes `version` into the manifest at `path` and saves it
///
/// A manifest without the version element is saved back unchanged.
pub fn stamp_manifest(path: &Path, version: &str) -> Result<StampOutcome> {
    let mut manifest = Manifest::load(path)?;
    let previous_version = manifest.version().map(str::to_string);
    let applied = manifest.set_version(version);
    manifest.save()?;

    Ok(StampOutcome {
        manifest: manifest.path().to_path_buf(),
        previous_version,
        version: version.to_string(),
        applied,
    })
}
