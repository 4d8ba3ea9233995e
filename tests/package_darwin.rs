mod common;

use icns::{IconFamily, IconType};
use kodegen_bundler_app::bundler::{
    BundleMetadata, PackageSettings, PackageType, Packager, SettingsBuilder,
    platform::macos::{package_darwin, render_info_plist},
};
use std::{fs, path::Path};

fn demo_settings() -> PackageSettings {
    PackageSettings {
        product_name: "Demo".into(),
        app_id: "com.example.demo".into(),
        version: "1.0".into(),
        build: Some(3),
        category: Some("Games".into()),
    }
}

fn plist_dict(path: &Path) -> plist::Dictionary {
    plist::Value::from_file(path)
        .unwrap()
        .into_dictionary()
        .unwrap()
}

fn plist_string<'a>(dict: &'a plist::Dictionary, key: &str) -> &'a str {
    dict.get(key).and_then(|v| v.as_string()).unwrap_or_default()
}

#[tokio::test]
async fn packages_a_complete_app_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path();
    let exe = common::write_exe(&src.join("bin/demo"));
    let icon = common::write_png(&src.join("Icon.png"), 256, 256, [0, 128, 255, 255]);
    fs::create_dir_all(src.join("translations")).unwrap();
    fs::write(src.join("translations/en.json"), "{}").unwrap();
    fs::write(src.join("translations/fr-CA.json"), "{}").unwrap();

    let settings = SettingsBuilder::new()
        .package_type(PackageType::MacOsBundle)
        .package_settings(demo_settings())
        .executable(&exe)
        .icon(&icon)
        .source_directory(src)
        .project_out_directory(src.join("out"))
        .build()
        .unwrap();

    let artifact = Packager::new(settings).package().await.unwrap();
    let app = src.join("out/Demo.app");
    assert_eq!(artifact.package_type, PackageType::MacOsBundle);
    assert_eq!(artifact.paths, vec![app.clone()]);
    assert_eq!(artifact.checksum.len(), 64);
    assert!(artifact.size > 0);

    let info = app.join("Contents/Info.plist");
    assert!(fs::read_to_string(&info).unwrap().contains("com.example.demo"));
    let dict = plist_dict(&info);
    assert_eq!(plist_string(&dict, "CFBundleName"), "Demo");
    assert_eq!(plist_string(&dict, "CFBundleExecutable"), "demo");
    assert_eq!(plist_string(&dict, "CFBundleIdentifier"), "com.example.demo");
    assert_eq!(plist_string(&dict, "CFBundleShortVersionString"), "1.0");
    assert_eq!(plist_string(&dict, "CFBundleVersion"), "3");
    assert_eq!(plist_string(&dict, "CFBundleIconFile"), "icon.icns");
    assert_eq!(
        plist_string(&dict, "LSApplicationCategoryType"),
        "public.app-category.games"
    );
    let languages: Vec<&str> = dict
        .get("CFBundleLocalizations")
        .and_then(|v| v.as_array())
        .unwrap()
        .iter()
        .filter_map(|v| v.as_string())
        .collect();
    assert_eq!(languages, vec!["en", "fr-CA"]);

    let copied = app.join("Contents/MacOS/demo");
    assert_eq!(fs::read(&copied).unwrap(), fs::read(&exe).unwrap());
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&copied).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    let icns = fs::File::open(app.join("Contents/Resources/icon.icns")).unwrap();
    let family = IconFamily::read(icns).unwrap();
    assert!(family.available_icons().contains(&IconType::RGBA32_512x512_2x));
}

#[tokio::test]
async fn rerunning_replaces_the_previous_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path();
    let exe = common::write_exe(&src.join("demo"));
    let icon = common::write_png(&src.join("Icon.png"), 64, 64, [10, 20, 30, 255]);
    let app = src.join("Demo.app");
    fs::create_dir_all(app.join("Contents")).unwrap();
    fs::write(app.join("stale.txt"), "old").unwrap();

    let metadata = BundleMetadata::new(&demo_settings(), "demo", vec![]);
    package_darwin(&exe, &icon, &metadata, true, &app).await.unwrap();

    assert!(!app.join("stale.txt").exists());
    assert!(app.join("Contents/Info.plist").is_file());
    assert!(app.join("Contents/MacOS/demo").is_file());
    assert!(app.join("Contents/Resources/icon.icns").is_file());

    // Only the bundle remains next to the inputs; staging is cleaned up.
    let mut names: Vec<String> = fs::read_dir(src)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Demo.app", "Icon.png", "demo"]);
}

#[tokio::test]
async fn corrupt_icon_leaves_no_bundle_behind() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path();
    let exe = common::write_exe(&src.join("demo"));
    let icon = src.join("Icon.png");
    fs::write(&icon, b"not an image").unwrap();
    let out = src.join("out");

    let settings = SettingsBuilder::new()
        .package_type(PackageType::MacOsBundle)
        .package_settings(demo_settings())
        .executable(&exe)
        .source_directory(src)
        .project_out_directory(&out)
        .build()
        .unwrap();

    let err = Packager::new(settings).package().await.unwrap_err();
    assert!(err.to_string().contains("decode"), "unexpected error: {err}");
    assert!(!out.join("Demo.app").exists());
    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
}

#[tokio::test]
async fn failed_run_keeps_the_existing_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path();
    let exe = common::write_exe(&src.join("demo"));
    let app = src.join("Demo.app");
    fs::create_dir_all(&app).unwrap();
    fs::write(app.join("keep.txt"), "previous").unwrap();
    let icon = src.join("broken.png");
    fs::write(&icon, b"\x89PNG broken").unwrap();

    let metadata = BundleMetadata::new(&demo_settings(), "demo", vec![]);
    assert!(package_darwin(&exe, &icon, &metadata, false, &app).await.is_err());
    assert_eq!(fs::read_to_string(app.join("keep.txt")).unwrap(), "previous");
}

#[tokio::test]
async fn missing_icon_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path();
    let exe = common::write_exe(&src.join("demo"));

    let settings = SettingsBuilder::new()
        .package_type(PackageType::MacOsBundle)
        .package_settings(demo_settings())
        .executable(&exe)
        .source_directory(src)
        .project_out_directory(src.join("out"))
        .build()
        .unwrap();

    let err = Packager::new(settings).package().await.unwrap_err();
    assert!(err.to_string().contains("missing application icon"));
    assert!(!src.join("out").exists());
}

#[test]
fn plist_omits_empty_category_and_languages() {
    let package = PackageSettings {
        category: None,
        ..demo_settings()
    };
    let plist = render_info_plist(&BundleMetadata::new(&package, "demo", vec![])).unwrap();

    assert!(!plist.contains("LSApplicationCategoryType"));
    assert!(!plist.contains("CFBundleLocalizations"));
    let dict = plist::Value::from_reader_xml(plist.as_bytes())
        .unwrap()
        .into_dictionary()
        .unwrap();
    assert_eq!(plist_string(&dict, "CFBundleIdentifier"), "com.example.demo");
}

#[test]
fn plist_escapes_markup_in_names() {
    let package = PackageSettings {
        product_name: "Tom & Jerry <Deluxe>".into(),
        ..demo_settings()
    };
    let metadata = BundleMetadata::new(&package, "demo", vec!["en".into()]);
    let plist = render_info_plist(&metadata).unwrap();

    let dict = plist::Value::from_reader_xml(plist.as_bytes())
        .unwrap()
        .into_dictionary()
        .unwrap();
    assert_eq!(plist_string(&dict, "CFBundleName"), "Tom & Jerry <Deluxe>");
}

#[test]
fn metadata_lowercases_category() {
    let metadata = BundleMetadata::new(&demo_settings(), "demo", vec!["en".into()]);
    assert_eq!(metadata.category, "games");
    assert_eq!(metadata.build, 3);
    assert_eq!(metadata.exe_name, "demo");
}

#[cfg(unix)]
#[tokio::test]
async fn unreadable_translations_abort_packaging() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let src = dir.path();
    let exe = common::write_exe(&src.join("demo"));
    let icon = common::write_png(&src.join("Icon.png"), 32, 32, [10, 20, 30, 255]);
    let locked = src.join("locale");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("en.json"), "{}").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read the directory regardless of its mode.
    let readable = fs::read_dir(&locked).is_ok();

    let settings = SettingsBuilder::new()
        .package_type(PackageType::MacOsBundle)
        .package_settings(demo_settings())
        .executable(&exe)
        .icon(&icon)
        .source_directory(src)
        .project_out_directory(src.join("out"))
        .build()
        .unwrap();
    let result = Packager::new(settings).package().await;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if readable {
        assert!(result.is_ok());
    } else {
        let err = result.unwrap_err();
        assert!(err.to_string().contains("translation"), "unexpected error: {err}");
        assert!(!src.join("out/Demo.app").exists());
    }
}

#[tokio::test]
async fn explicit_zero_build_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path();
    let exe = common::write_exe(&src.join("demo"));
    let icon = common::write_png(&src.join("Icon.png"), 32, 32, [10, 20, 30, 255]);

    let settings = SettingsBuilder::new()
        .package_type(PackageType::MacOsBundle)
        .package_settings(PackageSettings {
            build: Some(0),
            ..demo_settings()
        })
        .executable(&exe)
        .icon(&icon)
        .source_directory(src)
        .build()
        .unwrap();
    assert_eq!(settings.package_settings().build, Some(0));

    let artifact = Packager::new(settings).package().await.unwrap();
    let dict = plist_dict(&artifact.paths[0].join("Contents/Info.plist"));
    assert_eq!(plist_string(&dict, "CFBundleVersion"), "0");
}

#[test]
fn missing_build_defaults_to_one() {
    let settings = SettingsBuilder::new()
        .package_type(PackageType::MacOsBundle)
        .package_settings(PackageSettings {
            build: None,
            ..demo_settings()
        })
        .build()
        .unwrap();
    assert_eq!(settings.package_settings().build, Some(1));
}
