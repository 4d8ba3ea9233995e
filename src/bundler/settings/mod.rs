//! Configuration structures for packaging operations.
//!
//! [`PackageSettings`] carries the caller's application metadata,
//! [`Settings`] adds paths and the target platform, and [`BundleMetadata`]
//! is the immutable record rendered into platform metadata files.

mod builder;
mod bundle;
mod core;
mod package;

pub use builder::SettingsBuilder;
pub use bundle::BundleMetadata;
pub use core::Settings;
pub use package::PackageSettings;
