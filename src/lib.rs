//! Application bundler library for packaging GUI executables
//!
//! This library provides:
//! - macOS `.app` bundles (Info.plist, executable, masked `icon.icns`)
//! - WebAssembly web bundles, and a local HTTP server for them
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;
pub mod server;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
