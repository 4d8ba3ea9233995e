//! Static file service for a bundle directory.
//!
//! Files, `index.html` lookup and trailing-slash redirects come from
//! [`ServeDir`]. Requests it cannot answer fall through to a directory
//! listing, or a 404 when the path is not a directory.

use axum::{
    Router,
    extract::State,
    handler::Handler,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use handlebars::Handlebars;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde::Serialize;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tower_http::services::ServeDir;

/// Bytes escaped in a single listing link.
const LINK_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const LISTING_TEMPLATE: &str = r#"<!doctype html>
<meta name="viewport" content="width=device-width">
<pre>
{{#each entries}}<a href="{{href}}">{{name}}</a>
{{/each}}</pre>
"#;

#[derive(Serialize)]
struct Entry {
    name: String,
    href: String,
}

#[derive(Serialize)]
struct Listing {
    entries: Vec<Entry>,
}

/// Builds a router serving files below `root`.
///
/// Directories redirect to their slash-terminated form, serve their
/// `index.html` when present and are listed otherwise.
pub fn router(root: PathBuf) -> Router {
    let listing = list_directory.with_state(Arc::new(root.clone()));
    let files = ServeDir::new(root)
        .append_index_html_on_directories(true)
        .fallback(listing);
    Router::new().fallback_service(files)
}

async fn list_directory(State(root): State<Arc<PathBuf>>, uri: Uri) -> Response {
    let Some(dir) = resolve(&root, uri.path()) else {
        return not_found();
    };
    if !tokio::fs::metadata(&dir).await.is_ok_and(|m| m.is_dir()) {
        return not_found();
    }

    let entries = match read_entries(&dir).await {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Failed to list {}: {}", dir.display(), e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error reading directory\n")
                .into_response();
        }
    };

    match render_listing(entries) {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            log::warn!("Failed to render listing of {}: {}", dir.display(), e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Maps a URL path onto the served tree, rejecting parent references.
fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
    let mut path = root.to_path_buf();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s if s.contains(['\\', '\0']) => return None,
            s => path.push(s),
        }
    }
    Some(path)
}

async fn read_entries(dir: &Path) -> std::io::Result<Vec<Entry>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().await.is_ok_and(|t| t.is_dir());
        entries.push(listing_entry(name, is_dir));
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn listing_entry(mut name: String, is_dir: bool) -> Entry {
    let mut href = utf8_percent_encode(&name, LINK_ENCODE_SET).to_string();
    if is_dir {
        name.push('/');
        href.push('/');
    }
    Entry { name, href }
}

fn render_listing(entries: Vec<Entry>) -> Result<String, handlebars::RenderError> {
    Handlebars::new().render_template(LISTING_TEMPLATE, &Listing { entries })
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found\n").into_response()
}
