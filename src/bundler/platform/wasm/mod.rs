//! WebAssembly web bundles.
//!
//! Produces a `wasm/` directory that can be served as static files:
//!
//! ```text
//! wasm/
//! ├── index.html
//! ├── <module>.wasm
//! ├── <module>.js      (when the module ships a loader)
//! └── icon.png
//! ```

mod template;

use crate::{
    bail,
    bundler::{
        error::{Context, Error, ErrorExt, Result},
        resources::icons::load_icon,
        settings::Settings,
        utils::{fs, staging::StagingDir},
    },
};
use handlebars::Handlebars;
use image::ImageFormat;
use std::{
    collections::BTreeMap,
    io::Cursor,
    path::{Path, PathBuf},
};
use template::INDEX_HTML_TEMPLATE;

/// Target triple WebAssembly modules are built for.
pub const WASM_TARGET: &str = "wasm32-unknown-unknown";

/// Name of the web bundle directory inside the output directory.
pub const WEB_DIR_NAME: &str = "wasm";

/// Bundle project as a static web page.
///
/// # Process
///
/// 1. Locates (building if needed) the WebAssembly module
/// 2. Decodes the icon
/// 3. Stages `index.html`, the module, its loader and `icon.png`
/// 4. Moves the directory to `<output>/wasm`
///
/// # Returns
///
/// Vector containing the path of the `wasm` directory.
pub async fn bundle_project(settings: &Settings) -> Result<Vec<PathBuf>> {
    log::info!("Creating WebAssembly bundle for {}", settings.product_name());

    let module = locate_module(settings).await?;
    let module_name = module
        .file_name()
        .with_context(|| format!("invalid module path {}", module.display()))?
        .to_string_lossy()
        .into_owned();
    log::debug!("Using WebAssembly module {}", module.display());

    let icon_png = encode_icon_png(settings.icon()).await?;

    let web_dir = settings.project_out_directory().join(WEB_DIR_NAME);
    let staging = StagingDir::new(&web_dir).await?;
    let stage = staging.path();

    let loader = find_loader(&module);
    let loader_name = match &loader {
        Some(path) => {
            let name = path
                .file_name()
                .context("invalid loader path")?
                .to_string_lossy()
                .into_owned();
            fs::copy_file(path, &stage.join(&name))
                .await
                .context("failed to copy module loader")?;
            Some(name)
        }
        None => None,
    };

    let index = render_index_html(settings.product_name(), &module_name, loader_name.as_deref())
        .context("failed to write index.html template")?;
    fs::write_file(&stage.join("index.html"), index).await?;

    fs::copy_file(&module, &stage.join(&module_name))
        .await
        .context("failed to copy WebAssembly module")?;
    fs::write_file(&stage.join("icon.png"), icon_png).await?;

    let web_dir = staging.commit().await?;
    log::info!("✓ Created {}", web_dir.display());
    Ok(vec![web_dir])
}

/// Renders `index.html`.
pub fn render_index_html(name: &str, module: &str, loader: Option<&str>) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_template_string("index.html", INDEX_HTML_TEMPLATE)?;

    let mut data = BTreeMap::new();
    data.insert("name", name.to_string());
    data.insert("module", module.to_string());
    if let Some(loader) = loader {
        data.insert("loader", loader.to_string());
    }

    Ok(handlebars.render("index.html", &data)?)
}

/// Returns the module to bundle, building it if none exists yet.
async fn locate_module(settings: &Settings) -> Result<PathBuf> {
    if let Some(exe) = settings.executable() {
        if !exe.is_file() {
            bail!("WebAssembly module {} does not exist", exe.display());
        }
        return Ok(exe.to_path_buf());
    }

    let source_dir = settings.source_directory();
    if let Some(module) = find_module(source_dir)? {
        return Ok(module);
    }

    build_module(source_dir).await?;
    find_module(source_dir)?
        .with_context(|| format!("no WebAssembly module found in {}", source_dir.display()))
}

/// Looks for a `.wasm` file in the source directory, then in cargo's
/// release output for [`WASM_TARGET`].
fn find_module(source_dir: &Path) -> Result<Option<PathBuf>> {
    let root = source_dir
        .to_str()
        .context("source directory contains non-UTF8 characters")?;
    let root = glob::Pattern::escape(root);
    let patterns = [
        format!("{root}/*.wasm"),
        format!("{root}/target/{WASM_TARGET}/release/*.wasm"),
    ];

    for pattern in patterns {
        let found = glob::glob(&pattern)?
            .filter_map(std::result::Result::ok)
            .find(|path| path.is_file());
        if found.is_some() {
            return Ok(found);
        }
    }
    Ok(None)
}

/// Runs `cargo build --release --target wasm32-unknown-unknown`.
async fn build_module(source_dir: &Path) -> Result<()> {
    if !source_dir.join("Cargo.toml").is_file() {
        bail!(
            "no WebAssembly module found in {} and no Cargo.toml to build one",
            source_dir.display()
        );
    }

    let cargo = which::which("cargo")
        .map_err(|e| Error::GenericError(format!("cargo not found in PATH: {e}")))?;

    log::info!("Building WebAssembly module in {}", source_dir.display());
    let output = tokio::process::Command::new(cargo)
        .args(["build", "--release", "--target", WASM_TARGET])
        .current_dir(source_dir)
        .output()
        .await
        .fs_context("failed to run cargo in", source_dir)?;

    if !output.status.success() {
        bail!(
            "cargo build failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(())
}

/// Finds the JavaScript loader shipped next to a module.
///
/// wasm-bindgen writes `<name>.js` beside `<name>_bg.wasm`.
fn find_loader(module: &Path) -> Option<PathBuf> {
    let stem = module.file_stem()?.to_str()?;
    [stem, stem.trim_end_matches("_bg")]
        .into_iter()
        .map(|name| module.with_file_name(format!("{name}.js")))
        .find(|path| path.is_file())
}

/// Decodes the icon and re-encodes it as PNG.
async fn encode_icon_png(icon: &Path) -> Result<Vec<u8>> {
    let icon = icon.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
        let image = load_icon(&icon)?;
        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(Error::from)
            .context("failed to encode icon.png")?;
        Ok(buffer)
    })
    .await
    .map_err(|e| Error::GenericError(format!("icon conversion task panicked: {e}")))?
}
