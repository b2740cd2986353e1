use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the metadata document and post bodies come from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human-readable location of the metadata document, used in errors and logs.
    fn metadata_location(&self) -> String;

    /// Raw bytes of the metadata document.
    async fn fetch_metadata(&self) -> Result<Vec<u8>>;

    /// Raw text of the body document for `slug`, front matter included.
    async fn fetch_post_body(&self, slug: &str) -> Result<String>;
}

#[async_trait]
impl<S: ContentSource + ?Sized> ContentSource for Box<S> {
    fn metadata_location(&self) -> String {
        (**self).metadata_location()
    }

    async fn fetch_metadata(&self) -> Result<Vec<u8>> {
        (**self).fetch_metadata().await
    }

    async fn fetch_post_body(&self, slug: &str) -> Result<String> {
        (**self).fetch_post_body(slug).await
    }
}

pub trait ConfigProvider: Send + Sync {
    fn metadata_url(&self) -> Option<&str>;
    fn posts_url(&self) -> Option<&str>;
    fn source_directory(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> Option<u64>;
    fn page_size(&self) -> usize;
    fn related_count(&self) -> usize;
}
