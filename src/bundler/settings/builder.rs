//! Builder for constructing Settings.

use super::{PackageSettings, Settings, package::DEFAULT_BUILD};
use crate::bundler::{
    error::{Context, ErrorExt, Result},
    platform::PackageType,
};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Icon looked up in the source directory when none is given.
pub const DEFAULT_ICON_NAME: &str = "Icon.png";

const DEFAULT_VERSION: &str = "1.0.0";

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_app::bundler::{PackageSettings, PackageType, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_app::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .package_type(PackageType::Wasm)
///     .source_directory("apps/demo")
///     .package_settings(PackageSettings {
///         product_name: "Demo".into(),
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    package_type: Option<PackageType>,
    package_settings: Option<PackageSettings>,
    executable: Option<PathBuf>,
    icon: Option<PathBuf>,
    source_directory: Option<PathBuf>,
    project_out_directory: Option<PathBuf>,
    raw_icon: bool,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the platform to package for.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn package_type(mut self, package_type: PackageType) -> Self {
        self.package_type = Some(package_type);
        self
    }

    /// Sets application metadata.
    ///
    /// Default: empty metadata, completed from the executable name.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets the executable to bundle.
    pub fn executable<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.executable = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the icon source image.
    ///
    /// Default: `Icon.png` in the source directory
    pub fn icon<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.icon = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the project source directory.
    ///
    /// Default: the current directory
    pub fn source_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the directory bundles are written into.
    ///
    /// Default: the source directory
    pub fn project_out_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_out_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Uses the icon image unmodified instead of masking it.
    pub fn raw_icon(mut self, raw: bool) -> Self {
        self.raw_icon = raw;
        self
    }

    /// Builds the settings, filling in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the package type is missing, the current directory
    /// cannot be determined, or no product name can be derived.
    pub fn build(self) -> Result<Settings> {
        let package_type = self.package_type.context("package_type is required")?;

        let source_directory = match self.source_directory {
            Some(dir) if !dir.as_os_str().is_empty() => absolute(&dir)?,
            _ => std::env::current_dir().fs_context("failed to read current directory", ".")?,
        };
        let project_out_directory = match self.project_out_directory {
            Some(dir) if !dir.as_os_str().is_empty() => absolute(&dir)?,
            _ => source_directory.clone(),
        };
        let icon = match self.icon {
            Some(icon) if !icon.as_os_str().is_empty() => absolute(&icon)?,
            _ => source_directory.join(DEFAULT_ICON_NAME),
        };
        let executable = match self.executable {
            Some(exe) if !exe.as_os_str().is_empty() => Some(absolute(&exe)?),
            _ => None,
        };

        let mut package = self.package_settings.unwrap_or_default();
        if package.product_name.is_empty() {
            package.product_name = executable
                .as_deref()
                .and_then(Path::file_stem)
                .or_else(|| source_directory.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .context("could not derive an application name, please provide one")?;
        }
        if package.version.is_empty() {
            package.version = DEFAULT_VERSION.to_string();
        }
        package.build.get_or_insert(DEFAULT_BUILD);
        if package.app_id.is_empty() {
            package.app_id = default_app_id(&package.product_name);
            log::warn!(
                "No application identifier given, using {}",
                package.app_id
            );
        }

        Ok(Settings::new(
            package,
            package_type,
            executable,
            icon,
            source_directory,
            project_out_directory,
            self.raw_icon,
        ))
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("failed to resolve path", path)?
        .into_owned())
}

/// Placeholder identifier derived from the product name.
fn default_app_id(product_name: &str) -> String {
    let suffix: String = product_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_lowercase();
    format!("com.example.{}", if suffix.is_empty() { "app" } else { &suffix })
}
