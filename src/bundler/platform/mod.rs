//! Platform-specific bundlers.
//!
//! Each platform module exposes a `bundle_project(&Settings)` entry point
//! returning the paths it produced.

pub mod macos;
pub mod wasm;

use std::{fmt, path::PathBuf, str::FromStr};

/// Kind of bundle to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageType {
    /// macOS application bundle (`<Name>.app`).
    MacOsBundle,
    /// WebAssembly web bundle (`wasm/`).
    Wasm,
}

impl PackageType {
    /// All supported package types.
    pub const ALL: [PackageType; 2] = [PackageType::MacOsBundle, PackageType::Wasm];

    /// Canonical short name used on the command line.
    pub fn short_name(&self) -> &'static str {
        match self {
            PackageType::MacOsBundle => "darwin",
            PackageType::Wasm => "wasm",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageType::MacOsBundle => f.write_str("macOS"),
            PackageType::Wasm => f.write_str("WebAssembly"),
        }
    }
}

impl FromStr for PackageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "darwin" | "macos" | "macos-bundle" => Ok(PackageType::MacOsBundle),
            "wasm" | "web" | "webassembly" => Ok(PackageType::Wasm),
            other => Err(format!(
                "unsupported target: {}. Valid targets: {}",
                other,
                PackageType::ALL.map(|t| t.short_name()).join(", ")
            )),
        }
    }
}

/// A produced bundle.
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// Platform the bundle targets.
    pub package_type: PackageType,
    /// Paths written by the platform bundler; the first is the bundle root.
    pub paths: Vec<PathBuf>,
    /// Total size in bytes of every file under `paths`.
    pub size: u64,
    /// Hex-encoded SHA-256 of the first path (file or directory tree).
    pub checksum: String,
}
