use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;

use bible_core::{Error, Result, SourceLoader};

use crate::checked_segments;

const USER_AGENT: &str = concat!("bible-content/", env!("CARGO_PKG_VERSION"));

/// Fetches corpus files from static hosting, relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpLoader {
    client: Client,
    base: Url,
}

impl HttpLoader {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base = Url::parse(&normalized)
            .map_err(|e| Error::InvalidConfig(format!("invalid base_url '{base_url}': {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self { client, base })
    }

    pub fn url_for(&self, path: &str) -> Result<Url> {
        let segments = checked_segments(path)?;
        let mut url = self.base.clone();
        {
            let mut parts = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidConfig(format!("base_url '{}' cannot be a base", self.base)))?;
            parts.pop_if_empty();
            parts.extend(segments);
        }
        Ok(url)
    }
}

#[async_trait]
impl SourceLoader for HttpLoader {
    fn describe(&self) -> String {
        self.base.to_string()
    }

    async fn fetch_text(&self, path: &str) -> Result<Option<String>> {
        let url = self.url_for(path)?;
        tracing::debug!(%url, "fetching");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::Http(format!("{status} for {url}")));
        }
        let body = response.text().await.map_err(|e| Error::Http(e.to_string()))?;
        Ok(Some(body))
    }
}
