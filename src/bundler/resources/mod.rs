//! Bundle resources derived from project inputs.
//!
//! - [`icons`] - icon decoding, macOS masking and ICNS encoding
//! - [`translations`] - locale discovery from translation files

pub mod icons;
pub mod translations;
