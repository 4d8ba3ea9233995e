//! Command line interface for the application bundler.
//!
//! Parses arguments and dispatches to the `package` and `serve` commands.

mod args;
pub mod commands;

pub use args::{Args, Command, PackageArgs, ServeArgs};

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    execute(Args::parse_args()).await
}

/// Executes already parsed arguments, returning the process exit code.
pub async fn execute(args: Args) -> Result<i32> {
    match args.command {
        Command::Package(args) => commands::package::run(args).await,
        Command::Serve(args) => commands::serve::run(args).await,
    }
}
