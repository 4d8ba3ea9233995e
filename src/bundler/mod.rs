//! Native application bundling.
//!
//! Turns a compiled application executable into an installable bundle for a
//! target platform:
//!
//! - macOS `.app` bundles (`Info.plist`, executable, `icon.icns`)
//! - WebAssembly web bundles (`index.html`, module, icon) used by `serve`
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_app::bundler::{PackageSettings, PackageType, Packager, SettingsBuilder};
//!
//! # async fn example() -> kodegen_bundler_app::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .package_type(PackageType::MacOsBundle)
//!     .executable("target/release/demo")
//!     .icon("assets/Icon.png")
//!     .package_settings(PackageSettings {
//!         product_name: "Demo".into(),
//!         app_id: "com.example.demo".into(),
//!         version: "1.0".into(),
//!         build: Some(3),
//!         category: Some("games".into()),
//!     })
//!     .build()?;
//!
//! let artifact = Packager::new(settings).package().await?;
//! println!("Created {}", artifact.paths[0].display());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod platform;
pub mod resources;
pub mod settings;
pub mod utils;

pub use builder::Packager;
pub use error::{Error, Result};
pub use platform::{BundledArtifact, PackageType};
pub use settings::{BundleMetadata, PackageSettings, Settings, SettingsBuilder};
