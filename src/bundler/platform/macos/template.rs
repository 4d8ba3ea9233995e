//! Info.plist template.

/// Handlebars template rendered from a
/// [`BundleMetadata`](crate::bundler::BundleMetadata).
pub const INFO_PLIST_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleName</key>
	<string>{{name}}</string>
	<key>CFBundleExecutable</key>
	<string>{{exe_name}}</string>
	<key>CFBundleIdentifier</key>
	<string>{{app_id}}</string>
	<key>CFBundleIconFile</key>
	<string>icon.icns</string>
	<key>CFBundleShortVersionString</key>
	<string>{{version}}</string>
	<key>CFBundleVersion</key>
	<string>{{build}}</string>
	<key>CFBundleSupportedPlatforms</key>
	<array>
		<string>MacOSX</string>
	</array>
	<key>CFBundleInfoDictionaryVersion</key>
	<string>6.0</string>
	<key>CFBundlePackageType</key>
	<string>APPL</string>
	<key>NSHighResolutionCapable</key>
	<true/>
	<key>LSMinimumSystemVersion</key>
	<string>10.11</string>
{{#if category}}
	<key>LSApplicationCategoryType</key>
	<string>public.app-category.{{category}}</string>
{{/if}}
{{#if languages}}
	<key>CFBundleLocalizations</key>
	<array>
{{#each languages}}
		<string>{{this}}</string>
{{/each}}
	</array>
{{/if}}
</dict>
</plist>
"#;
