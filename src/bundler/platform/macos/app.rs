//! macOS `.app` bundle writer.

use super::template::INFO_PLIST_TEMPLATE;
use crate::bundler::{
    error::{Context, Error, Result},
    resources::{
        icons::{encode_icns, load_icon, prepare_icon},
        translations::{dedup_languages, find_languages},
    },
    settings::{BundleMetadata, Settings},
    utils::{fs, staging::StagingDir},
};
use handlebars::Handlebars;
use std::path::{Path, PathBuf};

/// Bundle project as a macOS `.app`.
///
/// # Process
///
/// 1. Scans the source directory for translation locales
/// 2. Stages `<Name>.app` next to its final location
/// 3. Writes `Info.plist`, the executable and `icon.icns` into the stage
/// 4. Moves the finished bundle into the output directory
///
/// # Returns
///
/// Vector containing the path of the `.app` directory.
pub async fn bundle_project(settings: &Settings) -> Result<Vec<PathBuf>> {
    let exe = settings
        .executable()
        .context("an executable is required to build a macOS bundle")?;
    let exe_name = exe
        .file_name()
        .with_context(|| format!("invalid executable path {}", exe.display()))?
        .to_string_lossy()
        .into_owned();

    log::info!("Creating macOS bundle for {}", settings.product_name());

    let source_dir = settings.source_directory().to_path_buf();
    let languages = tokio::task::spawn_blocking(move || find_languages(&source_dir))
        .await
        .map_err(|e| Error::GenericError(format!("translation scan task panicked: {e}")))?
        .context("failed to find translation languages")?;
    if !languages.is_empty() {
        log::debug!("Declaring localizations: {}", languages.join(", "));
    }

    let metadata = BundleMetadata::new(
        settings.package_settings(),
        exe_name,
        dedup_languages(languages),
    );
    let app_path = settings
        .project_out_directory()
        .join(format!("{}.app", settings.product_name()));

    package_darwin(exe, settings.icon(), &metadata, settings.raw_icon(), &app_path).await?;

    log::info!("✓ Created {}", app_path.display());
    Ok(vec![app_path])
}

/// Writes a complete `.app` bundle at `app_path`.
///
/// The bundle is assembled in a staging directory and only moved to
/// `app_path` once every file has been written, so a failure leaves any
/// existing bundle at `app_path` untouched.
pub async fn package_darwin(
    executable: &Path,
    icon: &Path,
    metadata: &BundleMetadata,
    raw_icon: bool,
    app_path: &Path,
) -> Result<PathBuf> {
    let staging = StagingDir::new(app_path).await?;
    write_bundle(staging.path(), executable, icon, metadata, raw_icon).await?;
    staging.commit().await
}

async fn write_bundle(
    app_dir: &Path,
    executable: &Path,
    icon: &Path,
    metadata: &BundleMetadata,
    raw_icon: bool,
) -> Result<()> {
    let contents_dir = fs::ensure_sub_dir(app_dir, "Contents").await?;

    let info_plist = render_info_plist(metadata).context("failed to write plist template")?;
    fs::write_file(&contents_dir.join("Info.plist"), info_plist)
        .await
        .context("failed to create plist template")?;

    let macos_dir = fs::ensure_sub_dir(&contents_dir, "MacOS").await?;
    fs::copy_exe_file(executable, &macos_dir.join(&metadata.exe_name))
        .await
        .context("failed to copy executable")?;

    let resources_dir = fs::ensure_sub_dir(&contents_dir, "Resources").await?;
    write_icns(icon, raw_icon, &resources_dir.join("icon.icns")).await
}

/// Renders `Info.plist` for the given metadata.
pub fn render_info_plist(metadata: &BundleMetadata) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_template_string("Info.plist", INFO_PLIST_TEMPLATE)?;
    Ok(handlebars.render("Info.plist", metadata)?)
}

/// Converts the icon source into `icon.icns` at `dest`.
///
/// The source is decoded and encoded before `dest` is created.
async fn write_icns(icon: &Path, raw_icon: bool, dest: &Path) -> Result<()> {
    let icon = icon.to_path_buf();
    let encoded = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
        let source = load_icon(&icon)?;
        let image = prepare_icon(source, raw_icon);
        let mut buffer = Vec::new();
        encode_icns(&image, &mut buffer)?;
        Ok(buffer)
    })
    .await
    .map_err(|e| Error::GenericError(format!("icon conversion task panicked: {e}")))??;

    fs::write_file(dest, encoded)
        .await
        .context("failed to open destination file")
}
