//! Client-side view manifest.
//!
//! Lists the client view scripts under a `public/` directory once at startup and
//! publishes their web paths as the `viewFiles` app local for the client bundle.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::app::App;
use crate::error::Result;

/// App local holding the web paths of client view scripts.
pub const VIEW_FILES_LOCAL: &str = "viewFiles";

/// Scan `view_path` (non-recursive), store web paths in app locals and return the
/// full file paths, sorted by name.
pub async fn load_client_views(app: &App, view_path: &Path) -> Result<Vec<PathBuf>> {
    let extension = app.config().views.client_view_extension.as_str();

    let mut entries = tokio::fs::read_dir(view_path).await?;
    let mut views = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == extension) {
            views.push(path);
        }
    }
    views.sort();

    let web_paths: Vec<Value> = views
        .iter()
        .map(|view| Value::String(web_path(&view.to_string_lossy())))
        .collect();
    tracing::info!(
        dir = %view_path.display(),
        count = web_paths.len(),
        "Client views loaded"
    );
    app.set_local(VIEW_FILES_LOCAL, Value::Array(web_paths));

    Ok(views)
}

/// Browser path of a file below a `public/` directory: separators become `/` and
/// everything up to and including the last `public/` becomes `/`.
pub fn web_path(file_path: &str) -> String {
    let normalized = file_path.replace('\\', "/");
    match normalized.rfind("public/") {
        Some(pos) if pos > 0 => format!("/{}", &normalized[pos + "public/".len()..]),
        _ => normalized,
    }
}
