use crate::core::ContentSource;
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Reads the metadata document and post bodies over HTTP.
///
/// Bodies live at `<posts_url>/<slug>.md`. Without an explicit posts URL they
/// are looked up in a `posts/` directory next to the metadata document.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    metadata_url: Url,
    posts_url: Url,
}

impl HttpSource {
    pub fn new(metadata_url: &str, posts_url: Option<&str>) -> Result<Self> {
        Self::with_client(Client::new(), metadata_url, posts_url)
    }

    pub fn with_timeout(
        metadata_url: &str,
        posts_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Self::with_client(client, metadata_url, posts_url)
    }

    fn with_client(client: Client, metadata_url: &str, posts_url: Option<&str>) -> Result<Self> {
        let metadata_url = parse_url("metadata_url", metadata_url)?;
        let posts_url = match posts_url {
            Some(url) => parse_url("posts_url", url)?,
            None => metadata_url
                .join("posts/")
                .map_err(|e| CatalogError::InvalidConfigValueError {
                    field: "metadata_url".to_string(),
                    value: metadata_url.to_string(),
                    reason: format!("Cannot derive posts location: {}", e),
                })?,
        };

        Ok(Self {
            client,
            metadata_url,
            posts_url,
        })
    }

    pub fn post_url(&self, slug: &str) -> Result<Url> {
        let mut url = self.posts_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidConfigValueError {
                field: "posts_url".to_string(),
                value: self.posts_url.to_string(),
                reason: "URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .push(&format!("{}.md", slug));
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("Response status for {}: {}", url, status);

        if !status.is_success() {
            return Err(CatalogError::fetch(url, format!("server returned {}", status)));
        }
        Ok(response)
    }
}

fn parse_url(field: &str, value: &str) -> Result<Url> {
    crate::utils::validation::validate_url(field, value)?;
    Url::parse(value).map_err(|e| CatalogError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })
}

#[async_trait]
impl ContentSource for HttpSource {
    fn metadata_location(&self) -> String {
        self.metadata_url.to_string()
    }

    async fn fetch_metadata(&self) -> Result<Vec<u8>> {
        let response = self.get(self.metadata_url.clone()).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn fetch_post_body(&self, slug: &str) -> Result<String> {
        let response = self.get(self.post_url(slug)?).await?;
        Ok(response.text().await?)
    }
}
