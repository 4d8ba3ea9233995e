//! Core Settings struct and implementations.

use super::PackageSettings;
use crate::bundler::platform::PackageType;
use std::path::{Path, PathBuf};

/// Main settings for a packaging run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder), which fills
/// in defaults for everything the caller left out.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Application metadata.
    package: PackageSettings,

    /// Platform to package for.
    package_type: PackageType,

    /// Compiled executable (or WebAssembly module).
    ///
    /// None means discover it from the source directory.
    executable: Option<PathBuf>,

    /// Source image for the application icon.
    icon: PathBuf,

    /// Project directory, scanned for translations and build outputs.
    source_directory: PathBuf,

    /// Directory the bundle is written into.
    project_out_directory: PathBuf,

    /// Use the icon image as is instead of applying the platform mask.
    raw_icon: bool,
}

impl Settings {
    /// Returns the application metadata.
    pub fn package_settings(&self) -> &PackageSettings {
        &self.package
    }

    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the reverse-domain application identifier.
    pub fn app_id(&self) -> &str {
        &self.package.app_id
    }

    /// Returns the platform being packaged for.
    pub fn package_type(&self) -> PackageType {
        self.package_type
    }

    /// Returns the executable path, if one was given.
    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    /// Returns the icon source path.
    pub fn icon(&self) -> &Path {
        &self.icon
    }

    /// Returns the project source directory.
    pub fn source_directory(&self) -> &Path {
        &self.source_directory
    }

    /// Returns the directory bundles are written into.
    pub fn project_out_directory(&self) -> &Path {
        &self.project_out_directory
    }

    /// Whether the icon is used without masking.
    pub fn raw_icon(&self) -> bool {
        self.raw_icon
    }

    pub(super) fn new(
        package: PackageSettings,
        package_type: PackageType,
        executable: Option<PathBuf>,
        icon: PathBuf,
        source_directory: PathBuf,
        project_out_directory: PathBuf,
        raw_icon: bool,
    ) -> Self {
        Self {
            package,
            package_type,
            executable,
            icon,
            source_directory,
            project_out_directory,
            raw_icon,
        }
    }
}
