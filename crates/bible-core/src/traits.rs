use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Retrieval of content files by path relative to the corpus root.
///
/// A missing file is `Ok(None)`, never an error, so callers can keep trying
/// other names and shapes. `Err` is reserved for reads that failed outright.
#[async_trait]
pub trait SourceLoader: Send + Sync {
    /// Short label for logs (root directory or base URL).
    fn describe(&self) -> String;

    async fn fetch_text(&self, path: &str) -> Result<Option<String>>;

    /// Entry names directly under `path`, when the backend can enumerate.
    async fn list_dir(&self, _path: &str) -> Result<Option<Vec<String>>> {
        Ok(None)
    }

    /// Parsed JSON at `path`. Failures are logged and reported as absent.
    async fn fetch_json(&self, path: &str) -> Option<Value> {
        match self.fetch_text(path).await {
            Ok(Some(text)) => match serde_json::from_str(&text) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(path, error = %e, "unparseable JSON");
                    None
                }
            },
            Ok(None) => {
                tracing::debug!(path, "not found");
                None
            }
            Err(e) => {
                tracing::warn!(path, loader = %self.describe(), error = %e, "fetch failed");
                None
            }
        }
    }
}
