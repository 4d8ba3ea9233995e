//! `serve` command.

use crate::{
    bundler::PackageSettings,
    cli::ServeArgs,
    error::Result,
    metadata,
    server::{ServeOptions, Server},
};
use std::path::PathBuf;

/// Builds the WebAssembly bundle and serves it until interrupted.
pub async fn run(args: ServeArgs) -> Result<i32> {
    let options = ServeOptions {
        source_dir: non_empty(args.source_dir),
        icon: non_empty(args.icon),
        port: args.port,
        args: args.args,
    };

    let source_dir = match &options.source_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    // Option errors take precedence over a broken manifest.
    let mut server = Server::new(options, PackageSettings::default());
    server.validate()?;
    server.set_package_settings(metadata::load_package_settings(&source_dir)?);

    server.serve().await?;
    Ok(0)
}

fn non_empty(value: String) -> Option<PathBuf> {
    (!value.is_empty()).then(|| PathBuf::from(value))
}
