//! Application metadata supplied by the caller.

/// Build number declared when the caller gives none.
pub const DEFAULT_BUILD: u32 = 1;

/// Application metadata shared by every target platform.
///
/// Usually derived from the project's `Cargo.toml` (see
/// [`crate::metadata::load_manifest`]) and overridden by command line flags.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_app::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     product_name: "Demo".into(),
///     app_id: "com.example.demo".into(),
///     version: "1.0".into(),
///     build: Some(3),
///     category: Some("Games".into()),
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSettings {
    /// Display name, also used as the bundle directory name (`<name>.app`).
    pub product_name: String,

    /// Reverse-domain application identifier, e.g. "com.example.demo".
    pub app_id: String,

    /// Version string, e.g. "1.0" or "2.3.1".
    pub version: String,

    /// Monotonically increasing build number.
    ///
    /// Default: None (the bundle declares build 1)
    pub build: Option<u32>,

    /// Application category, e.g. "games" or "developer-tools".
    ///
    /// Default: None (no category is declared)
    pub category: Option<String>,
}
