//! Repository root discovery
//!
//! Walks upward from a starting directory until one contains `.git`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::config::{MANIFEST_RELATIVE_PATH, REPOSITORY_MARKER};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not in a git repository (searched upward from {})", start.display())]
    NotFound { start: PathBuf },
}

/// A checked-out repository
#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    /// Finds the repository containing the current directory
    pub fn discover() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Self::discover_from(cwd)
    }

    /// Finds the repository containing `start`
    ///
    /// `start` is made absolute first so the walk can reach the filesystem root.
    /// The marker may be a directory (regular clone) or a file (worktree or
    /// submodule checkout).
    pub fn discover_from(start: impl AsRef<Path>) -> Result<Self> {
        let start = start.as_ref();
        let mut current = std::path::absolute(start)
            .with_context(|| format!("Failed to resolve path: {}", start.display()))?;

        loop {
            if current.join(REPOSITORY_MARKER).exists() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(RepositoryError::NotFound {
                    start: start.to_path_buf(),
                }
                .into());
            }
        }
    }

    /// Returns the repository root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the NuGet manifest inside this repository
    pub fn manifest_path(&self) -> PathBuf {
        MANIFEST_RELATIVE_PATH
            .iter()
            .fold(self.root.clone(), |path, part| path.join(part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_root_from_subdirectory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let sub_dir = dir.path().join("sub").join("dir");
        fs::create_dir_all(&sub_dir).unwrap();

        let repo = Repository::discover_from(&sub_dir).unwrap();
        assert_eq!(repo.root(), dir.path());
    }

    #[test]
    fn finds_root_at_start() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let repo = Repository::discover_from(dir.path()).unwrap();
        assert_eq!(repo.root(), dir.path());
    }

    #[test]
    fn nearest_marker_wins() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let nested = dir.path().join("vendor").join("nested");
        fs::create_dir_all(nested.join(".git")).unwrap();

        let repo = Repository::discover_from(nested.join("src")).unwrap();
        assert_eq!(repo.root(), nested);
    }

    #[test]
    fn worktree_marker_file_counts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".git"), "gitdir: /elsewhere/.git/worktrees/wt\n").unwrap();

        let repo = Repository::discover_from(dir.path()).unwrap();
        assert_eq!(repo.root(), dir.path());
    }

    #[test]
    fn missing_marker_fails() {
        let dir = TempDir::new().unwrap();
        let sub_dir = dir.path().join("a").join("b");
        fs::create_dir_all(&sub_dir).unwrap();

        // Only meaningful when the temp dir itself is outside any repository
        let outside_repo = dir
            .path()
            .ancestors()
            .all(|p| !p.join(REPOSITORY_MARKER).exists());
        if !outside_repo {
            return;
        }

        let err = Repository::discover_from(&sub_dir).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::NotFound { .. })
        ));
    }

    #[test]
    fn manifest_path_is_fixed() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let repo = Repository::discover_from(dir.path()).unwrap();
        assert_eq!(
            repo.manifest_path(),
            dir.path().join("Mile.HyperV.NuGet").join("Mile.HyperV.nuspec")
        );
    }
}
