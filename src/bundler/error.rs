//! Error types for packaging operations.
//!
//! Every failure is wrapped with a short description of the operation that
//! produced it before travelling up the call chain. Nothing is retried.

use std::{fmt::Display, io, path::PathBuf};
use thiserror::Error as DeriveError;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the bundler.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with a description of the failing operation.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// Filesystem failure tied to a path.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying I/O error
        error: io::Error,
    },

    /// Raw I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Image decoding, resizing or encoding failure.
    #[error("{0}")]
    ImageError(#[from] image::ImageError),

    /// Template registration failure.
    #[error("{0}")]
    TemplateError(#[from] Box<handlebars::TemplateError>),

    /// Template rendering failure.
    #[error("{0}")]
    RenderError(#[from] handlebars::RenderError),

    /// Directory traversal failure.
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Invalid glob pattern.
    #[error("{0}")]
    GlobPatternError(#[from] glob::PatternError),

    /// Path prefix stripping failure.
    #[error("{0}")]
    StripError(#[from] std::path::StripPrefixError),

    /// Free-form error.
    #[error("{0}")]
    GenericError(String),
}

/// Adds human-readable context to results and options.
pub trait Context<T> {
    /// Wraps the error with a fixed description.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Wraps the error with a lazily built description.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Attaches an operation description and path to I/O results.
pub trait ErrorExt<T> {
    /// Converts an I/O error into [`Error::Fs`].
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

impl From<handlebars::TemplateError> for Error {
    fn from(error: handlebars::TemplateError) -> Self {
        Self::TemplateError(Box::new(error))
    }
}

/// Returns early with a [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::Error::GenericError($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
