//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap; semantic checks
//! (ports, stray arguments) happen in the commands themselves.

use crate::bundler::{PackageSettings, PackageType};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Native bundle packager for GUI applications
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_app",
    version,
    about = "Packages GUI applications into native bundles",
    long_about = "Packages a compiled GUI application into an installable bundle, or serves its WebAssembly build locally.

Usage:
  kodegen_bundler_app package --os darwin --exe target/release/demo --icon Icon.png --app-id com.example.demo
  kodegen_bundler_app serve --source-dir . --port 8080"
)]
pub struct Args {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Package an application for distribution.
    Package(PackageArgs),

    /// Package an application using WebAssembly and expose it via a web server.
    ///
    /// The port the web server listens on can be overridden with --port.
    Serve(ServeArgs),
}

/// Arguments of the `package` command
#[derive(clap::Args, Debug)]
pub struct PackageArgs {
    /// Target to package for: darwin, wasm
    #[arg(long = "os", value_name = "OS", default_value = "darwin")]
    pub os: PackageType,

    /// Executable (or WebAssembly module) to package
    #[arg(long, value_name = "PATH")]
    pub exe: Option<PathBuf>,

    /// Application icon source image (default: Icon.png in the source directory)
    #[arg(long, value_name = "PATH")]
    pub icon: Option<PathBuf>,

    /// Application display name
    #[arg(long)]
    pub name: Option<String>,

    /// Reverse-domain application identifier, e.g. com.example.demo
    #[arg(long = "app-id", value_name = "ID")]
    pub app_id: Option<String>,

    /// Application version
    #[arg(long = "app-version", value_name = "VERSION")]
    pub app_version: Option<String>,

    /// Build number
    #[arg(long = "app-build", value_name = "BUILD")]
    pub app_build: Option<u32>,

    /// Application category, e.g. games
    #[arg(long)]
    pub category: Option<String>,

    /// Project directory (default: current directory)
    #[arg(long = "source-dir", value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Directory to write the bundle into (default: source directory)
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Use the icon as is instead of applying the platform mask
    #[arg(long = "raw-icon")]
    pub raw_icon: bool,
}

impl PackageArgs {
    /// Applies explicit flags on top of metadata read from the project.
    pub fn apply_to(&self, mut package: PackageSettings) -> PackageSettings {
        if let Some(name) = &self.name {
            package.product_name = name.clone();
        }
        if let Some(app_id) = &self.app_id {
            package.app_id = app_id.clone();
        }
        if let Some(version) = &self.app_version {
            package.version = version.clone();
        }
        if let Some(build) = self.app_build {
            package.build = Some(build);
        }
        if let Some(category) = &self.category {
            package.category = Some(category.clone());
        }
        package
    }
}

/// Arguments of the `serve` command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// The directory to package, if executable is not set
    #[arg(long = "source-dir", alias = "sourceDir", value_name = "DIR", default_value = "")]
    pub source_dir: String,

    /// The name of the application icon file
    #[arg(long, value_name = "PATH", default_value = "")]
    pub icon: String,

    /// The port to have the http server listen on
    #[arg(long, default_value_t = 8080, allow_negative_numbers = true)]
    pub port: i64,

    /// Not accepted; captured so it can be reported
    #[arg(hide = true)]
    pub args: Vec<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
