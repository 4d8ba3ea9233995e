//! Staged output directories.
//!
//! Bundles are assembled inside a temporary directory created next to
//! their final location and moved into place with a single rename once
//! every step has succeeded. A failed run leaves the target untouched; the
//! staging area is removed when the [`StagingDir`] is dropped.

use crate::bundler::error::{Context, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tempfile::TempDir;
use tokio::fs;

/// A directory being assembled for a final `target` path.
#[derive(Debug)]
pub struct StagingDir {
    temp: TempDir,
    root: PathBuf,
    target: PathBuf,
}

impl StagingDir {
    /// Creates an empty staging root for `target`.
    ///
    /// The staging area lives in the target's parent directory so the final
    /// rename never crosses a filesystem boundary. The parent is created if
    /// it does not exist yet.
    pub async fn new(target: &Path) -> Result<Self> {
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let name = target
            .file_name()
            .with_context(|| format!("invalid bundle path {}", target.display()))?;

        super::fs::create_dir_all(&parent).await?;

        let temp = tempfile::Builder::new()
            .prefix(".kodegen-staging-")
            .tempdir_in(&parent)
            .fs_context("failed to create staging directory in", &parent)?;
        let root = temp.path().join(name);
        super::fs::create_dir(&root).await?;

        log::debug!("Staging {} in {}", target.display(), temp.path().display());

        Ok(Self {
            temp,
            root,
            target: target.to_path_buf(),
        })
    }

    /// Path files are written to while staging.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Moves the staged tree to its target, replacing any previous version.
    ///
    /// A previous version is first moved aside into the staging area, and put
    /// back if the staged tree cannot be moved into place. Should that fail
    /// too, the staging area is kept on disk so the previous version survives.
    pub async fn commit(self) -> Result<PathBuf> {
        let Self { temp, root, target } = self;

        let mut aside_name = target.file_name().unwrap_or_default().to_os_string();
        aside_name.push(".previous");
        let aside = temp.path().join(aside_name);

        let replaced = match fs::symlink_metadata(&target).await {
            Ok(_) => {
                fs::rename(&target, &aside)
                    .await
                    .fs_context("failed to move previous bundle aside", &target)?;
                true
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => return Err(e).fs_context("failed to inspect bundle path", &target),
        };

        if let Err(e) = fs::rename(&root, &target).await {
            if replaced {
                if let Err(restore) = fs::rename(&aside, &target).await {
                    let kept = preserve(temp, &aside);
                    log::warn!(
                        "Could not restore previous bundle at {}: {}; it was left at {}",
                        target.display(),
                        restore,
                        kept.display()
                    );
                }
            }
            return Err(e).fs_context("failed to move staged bundle into place at", &target);
        }

        // Removes the staging area together with any replaced version.
        drop(temp);

        log::debug!("Committed {}", target.display());
        Ok(target)
    }
}

/// Keeps the staging area on disk, returning where `aside` now lives.
fn preserve(temp: TempDir, aside: &Path) -> PathBuf {
    let dir = temp.keep();
    match aside.file_name() {
        Some(name) => dir.join(name),
        None => dir,
    }
}
