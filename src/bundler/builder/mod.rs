//! Packaging orchestration.
//!
//! This module provides the [`Packager`] façade that validates settings,
//! delegates to the platform bundler for the requested target and
//! describes the result as a [`BundledArtifact`](crate::bundler::BundledArtifact).
//!
//! - [`checksum`] - SHA-256 and size of produced bundles
//! - [`orchestrator`] - the [`Packager`] itself

mod checksum;
mod orchestrator;

pub use checksum::{calculate_sha256, calculate_size};
pub use orchestrator::Packager;
