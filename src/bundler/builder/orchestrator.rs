//! Main packaging façade.

use crate::{
    bail,
    bundler::{
        BundledArtifact, PackageType, Result, Settings,
        platform::{macos, wasm},
    },
};
use std::path::Path;

use super::checksum::{calculate_sha256, calculate_size};

/// Packages an application for one target platform.
///
/// Packaging runs its steps strictly in sequence. Nothing guards the output
/// directory against a concurrent run writing the same bundle, so callers
/// must serialize runs that share an output directory.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_app::bundler::{Packager, Settings};
///
/// # async fn example(settings: Settings) -> kodegen_bundler_app::bundler::Result<()> {
/// let artifact = Packager::new(settings).package().await?;
/// println!("{} bundle at {}", artifact.package_type, artifact.paths[0].display());
/// println!("SHA256: {}", artifact.checksum);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Packager {
    settings: Settings,
}

impl Packager {
    /// Creates a packager for the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the packaging settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Directory the bundle is written into.
    pub fn output_directory(&self) -> &Path {
        self.settings.project_out_directory()
    }

    /// Builds the bundle for the configured [`PackageType`].
    ///
    /// Inputs are checked before anything is written. On failure the bundle
    /// location is left as it was before the call.
    pub async fn package(&self) -> Result<BundledArtifact> {
        self.validate()?;

        let package_type = self.settings.package_type();
        let paths = match package_type {
            PackageType::MacOsBundle => macos::bundle_project(&self.settings).await?,
            PackageType::Wasm => wasm::bundle_project(&self.settings).await?,
        };

        let Some(root) = paths.first() else {
            bail!(
                "Platform bundler for {:?} returned no paths - this indicates a bundler bug",
                package_type
            );
        };

        let mut size = 0u64;
        for path in &paths {
            size += calculate_size(path).await?;
        }
        let checksum = calculate_sha256(root).await?;

        log::debug!("{} bundle: {} bytes, sha256 {}", package_type, size, checksum);

        Ok(BundledArtifact {
            package_type,
            paths,
            size,
            checksum,
        })
    }

    fn validate(&self) -> Result<()> {
        let icon = self.settings.icon();
        if !icon.is_file() {
            bail!("missing application icon at \"{}\"", icon.display());
        }
        if let Some(exe) = self.settings.executable() {
            if !exe.is_file() {
                bail!("executable {} does not exist", exe.display());
            }
        } else if self.settings.package_type() == PackageType::MacOsBundle {
            bail!("an executable is required to build a macOS bundle");
        }
        Ok(())
    }
}
