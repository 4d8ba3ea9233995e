//! File system utilities for bundling.
//!
//! Provides idempotent directory creation and file copies with
//! path-aware error context.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Ensures `parent/name` exists as a directory and returns its path.
///
/// An existing directory is reused as is.
pub async fn ensure_sub_dir(parent: &Path, name: &str) -> Result<PathBuf> {
    let dir = parent.join(name);
    create_dir(&dir).await?;
    Ok(dir)
}

/// Creates the given directory, succeeding if it already exists.
pub async fn create_dir(path: &Path) -> Result<()> {
    match fs::create_dir(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(e).fs_context("failed to create directory", path),
    }
}

/// Creates all of the directories of the specified path.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .fs_context("failed to create directory", path)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        create_dir_all(dest_dir).await?;
    }
    fs::copy(from, to)
        .await
        .fs_context("failed to copy file to", to)?;
    Ok(())
}

/// Copies an executable, making sure the copy is executable.
///
/// The copy is byte-identical; on Unix the permission bits of the source
/// are kept and the execute bits are added for everyone.
pub async fn copy_exe_file(from: &Path, to: &Path) -> Result<()> {
    copy_file(from, to).await?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(to)
            .await
            .fs_context("failed to read permissions of", to)?
            .permissions();
        perms.set_mode(perms.mode() | 0o755);
        fs::set_permissions(to, perms)
            .await
            .fs_context("failed to set permissions of", to)?;
    }

    Ok(())
}

/// Writes `contents` to a new file at `path`.
pub async fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, contents)
        .await
        .fs_context("failed to write file", path)
}
