//! Application metadata discovery from a project's Cargo.toml

use crate::bundler::PackageSettings;
use crate::error::{BundlerError, CliError, Result};
use std::path::Path;

/// Loads packaging metadata for the project rooted at `source_dir`.
///
/// Returns empty metadata when the directory has no Cargo.toml; the
/// settings builder then derives defaults.
pub fn load_package_settings(source_dir: &Path) -> Result<PackageSettings> {
    let cargo_toml_path = source_dir.join("Cargo.toml");
    if !cargo_toml_path.is_file() {
        log::debug!("No Cargo.toml in {}", source_dir.display());
        return Ok(PackageSettings::default());
    }
    load_manifest(&cargo_toml_path)
}

/// Load manifest from Cargo.toml
///
/// Reads:
///
/// ```toml
/// [package]
/// name = "demo"
/// version = "1.0.0"
///
/// [package.metadata.bundle]
/// name = "Demo"                  # display name, defaults to package.name
/// identifier = "com.example.demo"
/// build = 3
/// category = "games"
/// ```
pub fn load_manifest(cargo_toml_path: &Path) -> Result<PackageSettings> {
    let manifest = std::fs::read_to_string(cargo_toml_path).map_err(|e| {
        BundlerError::Cli(CliError::ExecutionFailed {
            command: "read_cargo_toml".to_string(),
            reason: format!("Failed to read {}: {}", cargo_toml_path.display(), e),
        })
    })?;

    let toml_value: toml::Table = toml::from_str(&manifest)?;

    let package = toml_value.get("package").ok_or_else(|| {
        BundlerError::Cli(CliError::InvalidArguments {
            reason: format!("No [package] section in {}", cargo_toml_path.display()),
        })
    })?;
    let bundle = package.get("metadata").and_then(|m| m.get("bundle"));

    let package_name = package
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            BundlerError::Cli(CliError::InvalidArguments {
                reason: "Missing 'name' in [package]".to_string(),
            })
        })?
        .to_string();

    let bundle_str = |key: &str| {
        bundle
            .and_then(|b| b.get(key))
            .and_then(|v| v.as_str())
            .map(String::from)
    };

    let build = match bundle.and_then(|b| b.get("build")) {
        None => None,
        Some(value) => Some(
            value
                .as_integer()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| {
                    BundlerError::Cli(CliError::InvalidArguments {
                        reason: format!("bundle build must be a non-negative integer, got {value}"),
                    })
                })?,
        ),
    };

    Ok(PackageSettings {
        product_name: bundle_str("name").unwrap_or(package_name),
        app_id: bundle_str("identifier").unwrap_or_default(),
        version: package
            .get("version")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        build,
        category: bundle_str("category"),
    })
}
