//! Artifact checksum calculation.
//!
//! Bundles are usually directories (`.app`, `wasm/`), so hashing covers
//! whole trees as well as single files.

use crate::{
    bail,
    bundler::error::{ErrorExt, Result},
};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Calculates the SHA-256 checksum of a file or directory tree.
///
/// Directory entries are hashed in sorted order, each contributing its
/// NUL-terminated relative path, its length and its content, so identical
/// trees hash identically regardless of traversal order.
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading artifact metadata", path)?;

    let mut hasher = Sha256::new();
    if metadata.is_file() {
        hash_file(&mut hasher, path).await?;
    } else if metadata.is_dir() {
        for file in sorted_files(path)? {
            let rel_path = file.strip_prefix(path)?;
            let len = tokio::fs::metadata(&file)
                .await
                .fs_context("reading artifact metadata", &file)?
                .len();
            hasher.update(rel_path.to_string_lossy().as_bytes());
            hasher.update([0u8]);
            hasher.update(len.to_le_bytes());
            hash_file(&mut hasher, &file).await?;
        }
    } else {
        bail!("Path is neither file nor directory: {}", path.display())
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Total size in bytes of a file or of every file below a directory.
pub async fn calculate_size(path: &Path) -> Result<u64> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading artifact metadata", path)?;
    if !metadata.is_dir() {
        return Ok(metadata.len());
    }

    let mut size = 0u64;
    for file in sorted_files(path)? {
        size += tokio::fs::metadata(&file)
            .await
            .fs_context("reading artifact metadata", &file)?
            .len();
    }
    Ok(size)
}

fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

async fn hash_file(hasher: &mut Sha256, file_path: &Path) -> Result<()> {
    let mut file = tokio::fs::File::open(file_path)
        .await
        .fs_context("opening file for hashing", file_path)?;
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", file_path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(())
}
