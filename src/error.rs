//! Top-level error types for the command line tool.
//!
//! Validation problems are reported as [`CliError`]s before any packaging
//! work starts; everything else wraps the failing layer's error.

use thiserror::Error;

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all command operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// The HTTP listener could not be bound or failed while serving
    #[error("failed to serve on {addr}: {error}")]
    Listener {
        /// Address the listener was bound to
        addr: String,
        /// Underlying I/O error
        #[source]
        error: std::io::Error,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Port outside of `1..=65535`
    #[error(
        "the port must be a strictly positive number and be strictly smaller than 65536 (Got {port})"
    )]
    InvalidPort {
        /// Offending value
        port: i64,
    },

    /// Positional arguments given to a command that takes none
    #[error("unexpected parameter after flags: {arguments:?}")]
    UnexpectedArguments {
        /// The stray arguments
        arguments: Vec<String>,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}
