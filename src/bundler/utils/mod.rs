//! Filesystem helpers shared by the platform bundlers.

pub mod fs;
pub mod staging;
