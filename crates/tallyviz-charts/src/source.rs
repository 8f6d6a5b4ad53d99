//! Data sources for the passenger table.

use crate::traits::DataSource;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tallyviz_common::{ChartError, Result};
use tracing::{debug, instrument};
use url::Url;

/// Reads a table from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source for `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// File to read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DataSource for FileSource {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<String> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ChartError::data_with_source(format!("cannot read {}", self.path.display()), e)
        })?;
        debug!(bytes = content.len(), "read data file");
        Ok(content)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Downloads a table over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSource {
    /// Creates a source for `url`, rejecting malformed URLs.
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| ChartError::validation_field(format!("invalid data URL '{url}': {e}"), "url"))?;
        Ok(Self::with_client(reqwest::Client::new(), url))
    }

    /// Creates a source that reuses an existing client.
    pub fn with_client(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    /// Address to download.
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl DataSource for HttpSource {
    #[instrument(level = "debug", skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<String> {
        let network = |e: reqwest::Error| {
            ChartError::network_with_source(format!("failed to fetch {}", self.url), e)
        };

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(network)?
            .error_for_status()
            .map_err(network)?;
        let body = response.text().await.map_err(network)?;
        debug!(bytes = body.len(), "downloaded data");
        Ok(body)
    }

    fn describe(&self) -> String {
        format!("url {}", self.url)
    }
}

/// A table already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InlineSource {
    content: String,
}

impl InlineSource {
    /// Wraps `content`.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

#[async_trait]
impl DataSource for InlineSource {
    async fn fetch(&self) -> Result<String> {
        Ok(self.content.clone())
    }

    fn describe(&self) -> String {
        format!("{} inline bytes", self.content.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_a_data_error() {
        let source = FileSource::new("/definitely/not/here.csv");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, ChartError::Data { .. }));
        assert!(source.describe().contains("here.csv"));
    }

    #[tokio::test]
    async fn test_inline_source_returns_content() {
        let source = InlineSource::new("a,b\n1,2\n");
        assert_eq!(source.fetch().await.unwrap(), "a,b\n1,2\n");
    }

    #[test]
    fn test_http_source_rejects_bad_url() {
        assert!(HttpSource::new("not a url").is_err());
        let source = HttpSource::new("https://example.com/passengers.csv").unwrap();
        assert_eq!(source.url().path(), "/passengers.csv");
    }
}
