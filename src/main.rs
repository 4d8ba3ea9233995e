//! Kodegen Bundler App - native bundle packager for GUI applications.
//!
//! This binary packages compiled applications into platform bundles and
//! serves WebAssembly builds over HTTP for local testing.

use kodegen_bundler_app::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
