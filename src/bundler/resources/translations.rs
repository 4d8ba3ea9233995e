//! Translation locale discovery.
//!
//! Translation files are named after the locale they provide, e.g.
//! `translations/en.json` or `translations/fr-CA.json`. Scanning a project
//! tree for such files yields the locales the application supports.

use crate::bundler::error::{Context, Error, Result};
use std::{collections::HashSet, io, path::Path};
use walkdir::WalkDir;

/// Extension translation files must carry, compared case-sensitively.
const TRANSLATION_EXTENSION: &str = ".json";

/// Returns every locale code found under `root`.
///
/// Every regular `.json` file whose base name is a locale code contributes
/// that code. Entries are visited in file name order, and duplicates are
/// kept. A missing `root` yields an empty list; any other traversal error is
/// returned.
pub fn find_languages(root: &Path) -> Result<Vec<String>> {
    let mut languages = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if is_not_found(&e) => continue,
            Err(e) => {
                return Err(Error::from(e)).with_context(|| {
                    format!("failed to scan {} for translations", root.display())
                });
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(code) = locale_from_path(entry.path()) {
            log::debug!("Found translation {}", entry.path().display());
            languages.push(code.to_string());
        }
    }

    Ok(languages)
}

/// Extracts the locale code from a translation file path.
pub fn locale_from_path(path: &Path) -> Option<&str> {
    let stem = path
        .file_name()?
        .to_str()?
        .strip_suffix(TRANSLATION_EXTENSION)?;
    is_locale_code(stem).then_some(stem)
}

/// Checks the `ll` / `ll-CC` locale grammar.
///
/// `ll` is a two letter lower-case language, `CC` an optional two letter
/// upper-case region.
pub fn is_locale_code(code: &str) -> bool {
    let (language, region) = match code.split_once('-') {
        Some((language, region)) => (language, Some(region)),
        None => (code, None),
    };

    let is_language = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_lowercase());
    let is_region = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_uppercase());

    is_language(language) && region.is_none_or(is_region)
}

/// Drops repeated codes, keeping the first occurrence of each.
pub fn dedup_languages(languages: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    languages
        .into_iter()
        .filter(|code| seen.insert(code.clone()))
        .collect()
}

fn is_not_found(error: &walkdir::Error) -> bool {
    error
        .io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}
