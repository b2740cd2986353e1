use crate::core::body::strip_front_matter;
use crate::core::schema::parse_metadata;
use crate::core::views::find_by_slug;
use crate::domain::model::{Post, PostSummary};
use crate::domain::ports::ContentSource;
use crate::utils::error::Result;
use std::ops::Deref;
use std::sync::Arc;

/// Immutable, source-ordered collection of post summaries for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    posts: Arc<[PostSummary]>,
}

impl Catalog {
    pub fn new(posts: Vec<PostSummary>) -> Self {
        Self {
            posts: posts.into(),
        }
    }

    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    pub fn find(&self, slug: &str) -> Result<&PostSummary> {
        find_by_slug(&self.posts, slug)
    }
}

impl Deref for Catalog {
    type Target = [PostSummary];

    fn deref(&self) -> &Self::Target {
        &self.posts
    }
}

pub struct ContentCatalog<S: ContentSource> {
    source: S,
}

impl<S: ContentSource> ContentCatalog<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and validate the metadata document. Every call goes back to the
    /// source.
    pub async fn load(&self) -> Result<Catalog> {
        let location = self.source.metadata_location();
        tracing::debug!("Loading post metadata from {}", location);

        let bytes = self.source.fetch_metadata().await?;
        tracing::debug!("Received {} bytes of metadata", bytes.len());

        let posts = parse_metadata(&bytes, &location)?;
        tracing::info!("Loaded {} posts from {}", posts.len(), location);

        Ok(Catalog::new(posts))
    }

    /// Summary and front-matter-free body of the post `slug`.
    pub async fn load_post(&self, catalog: &Catalog, slug: &str) -> Result<Post> {
        let summary = catalog.find(slug)?.clone();

        tracing::debug!("Fetching body for post '{}'", slug);
        let raw = self.source.fetch_post_body(slug).await?;
        let body = strip_front_matter(&raw).to_string();

        Ok(Post { summary, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{CatalogError, ErrorCategory};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockSource {
        metadata: std::result::Result<String, String>,
        bodies: HashMap<String, String>,
        metadata_calls: AtomicUsize,
        body_calls: AtomicUsize,
    }

    impl MockSource {
        fn new(metadata: serde_json::Value) -> Self {
            Self {
                metadata: Ok(metadata.to_string()),
                bodies: HashMap::new(),
                metadata_calls: AtomicUsize::new(0),
                body_calls: AtomicUsize::new(0),
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                metadata: Err(reason.to_string()),
                ..Self::new(serde_json::json!([]))
            }
        }

        fn with_body(mut self, slug: &str, body: &str) -> Self {
            self.bodies.insert(slug.to_string(), body.to_string());
            self
        }
    }

    #[async_trait]
    impl ContentSource for MockSource {
        fn metadata_location(&self) -> String {
            "mock://posts.json".to_string()
        }

        async fn fetch_metadata(&self) -> Result<Vec<u8>> {
            self.metadata_calls.fetch_add(1, Ordering::SeqCst);
            match &self.metadata {
                Ok(doc) => Ok(doc.as_bytes().to_vec()),
                Err(reason) => Err(CatalogError::fetch(self.metadata_location(), reason)),
            }
        }

        async fn fetch_post_body(&self, slug: &str) -> Result<String> {
            self.body_calls.fetch_add(1, Ordering::SeqCst);
            self.bodies
                .get(slug)
                .cloned()
                .ok_or_else(|| CatalogError::fetch(format!("mock://posts/{slug}.md"), "missing"))
        }
    }

    fn metadata() -> serde_json::Value {
        serde_json::json!([
            {"slug": "a", "title": "A", "date": "2024-01-01", "tags": ["ml"]},
            {"slug": "b", "title": "B", "date": "2024-03-01", "tags": ["ml", "cv"]},
            {"slug": "c", "title": "C", "date": "2024-02-01", "tags": []}
        ])
    }

    #[tokio::test]
    async fn test_load_keeps_source_order_and_refetches() {
        let catalog = ContentCatalog::new(MockSource::new(metadata()));

        let loaded = catalog.load().await.unwrap();
        let slugs: Vec<&str> = loaded.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "c"]);

        catalog.load().await.unwrap();
        assert_eq!(catalog.source().metadata_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_load_propagates_fetch_error() {
        let catalog = ContentCatalog::new(MockSource::failing("connection reset"));
        let err = catalog.load().await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Fetch);
    }

    #[tokio::test]
    async fn test_load_post_strips_front_matter() {
        let source = MockSource::new(metadata())
            .with_body("b", "---\ntitle: B\n---\n# Vision\n\nText.\n");
        let catalog = ContentCatalog::new(source);
        let loaded = catalog.load().await.unwrap();

        let post = catalog.load_post(&loaded, "b").await.unwrap();
        assert_eq!(post.summary.title, "B");
        assert_eq!(post.body, "# Vision\n\nText.\n");
    }

    #[tokio::test]
    async fn test_load_post_unknown_slug_skips_fetch() {
        let catalog = ContentCatalog::new(MockSource::new(metadata()));
        let loaded = catalog.load().await.unwrap();

        let err = catalog.load_post(&loaded, "missing").await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(catalog.source().body_calls.load(Ordering::SeqCst), 0);
    }
}
