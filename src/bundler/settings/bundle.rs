//! Template data for bundle metadata files.

use super::{PackageSettings, package::DEFAULT_BUILD};
use serde::Serialize;

/// Application attributes rendered into a bundle's metadata file.
///
/// Built once per packaging run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleMetadata {
    /// Display name.
    pub name: String,

    /// File name of the bundled executable.
    pub exe_name: String,

    /// Reverse-domain application identifier.
    pub app_id: String,

    /// Version string.
    pub version: String,

    /// Build number.
    pub build: u32,

    /// Lower-cased category, empty when none was given.
    pub category: String,

    /// Supported locale codes, e.g. `["en", "fr-CA"]`.
    pub languages: Vec<String>,
}

impl BundleMetadata {
    /// Combines caller metadata with the executable name and discovered locales.
    pub fn new(
        package: &PackageSettings,
        exe_name: impl Into<String>,
        languages: Vec<String>,
    ) -> Self {
        Self {
            name: package.product_name.clone(),
            exe_name: exe_name.into(),
            app_id: package.app_id.clone(),
            version: package.version.clone(),
            build: package.build.unwrap_or(DEFAULT_BUILD),
            category: package
                .category
                .as_deref()
                .unwrap_or_default()
                .to_lowercase(),
            languages,
        }
    }
}
