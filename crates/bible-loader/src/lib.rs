//! bible-loader
//!
//! The two `SourceLoader` backends: local files under a corpus root and HTTP
//! fetches under a base URL. Which one a store uses is decided once, from
//! `ContentConfig::loader`, by [`from_config`].

pub mod fs;
pub mod http;

pub use fs::FilesystemLoader;
pub use http::HttpLoader;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bible_core::config::{ContentConfig, LoaderKind};
use bible_core::{Error, Result, SourceLoader};

pub fn from_config(config: &ContentConfig, base: &Path) -> Result<Arc<dyn SourceLoader>> {
    match config.loader {
        LoaderKind::Filesystem => {
            let root = config.data_root(base);
            tracing::info!(root = %root.display(), "using filesystem loader");
            Ok(Arc::new(FilesystemLoader::new(root)))
        }
        LoaderKind::Http => {
            let base_url = config
                .base_url
                .as_deref()
                .ok_or_else(|| Error::InvalidConfig("http loader requires base_url".to_string()))?;
            tracing::info!(base_url, "using http loader");
            Ok(Arc::new(HttpLoader::new(base_url, Duration::from_secs(config.http_timeout_secs))?))
        }
    }
}

/// Split a corpus-relative path into its segments.
///
/// Rejects absolute paths, `..`, empty segments in the middle and control
/// characters, so request-derived names (book names end up in paths) can
/// never leave the corpus root.
pub(crate) fn checked_segments(path: &str) -> Result<Vec<&str>> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('/') || trimmed.contains('\\') || trimmed.chars().any(char::is_control) {
        return Err(Error::InvalidPath(path.to_string()));
    }
    let segments: Vec<&str> = trimmed.split('/').collect();
    if segments.iter().any(|s| s.is_empty() || *s == "." || *s == "..") {
        return Err(Error::InvalidPath(path.to_string()));
    }
    Ok(segments)
}
