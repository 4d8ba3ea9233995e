//! macOS application bundles.
//!
//! Produces `<Name>.app` directories:
//!
//! ```text
//! <Name>.app/
//! └── Contents/
//!     ├── Info.plist
//!     ├── MacOS/<exe-name>
//!     └── Resources/icon.icns
//! ```

pub mod app;
mod template;

pub use app::{bundle_project, package_darwin, render_info_plist};
