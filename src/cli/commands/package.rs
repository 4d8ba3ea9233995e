//! `package` command.

use crate::{
    bundler::{Packager, SettingsBuilder},
    cli::PackageArgs,
    error::Result,
    metadata,
};

/// Packages the application and reports the created bundle.
pub async fn run(args: PackageArgs) -> Result<i32> {
    let source_dir = match &args.source_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let package = args.apply_to(metadata::load_package_settings(&source_dir)?);

    let mut builder = SettingsBuilder::new()
        .package_type(args.os)
        .package_settings(package)
        .source_directory(&source_dir)
        .raw_icon(args.raw_icon);
    if let Some(exe) = &args.exe {
        builder = builder.executable(exe);
    }
    if let Some(icon) = &args.icon {
        builder = builder.icon(icon);
    }
    if let Some(dir) = &args.output_dir {
        builder = builder.project_out_directory(dir);
    }

    let artifact = Packager::new(builder.build()?).package().await?;

    for path in &artifact.paths {
        println!("Created {} bundle: {}", artifact.package_type, path.display());
    }
    log::info!("SHA256: {} ({} bytes)", artifact.checksum, artifact.size);

    Ok(0)
}
