use crate::core::ContentSource;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::is_path_safe_slug;
use async_trait::async_trait;
use std::path::PathBuf;

pub const DEFAULT_METADATA_FILE: &str = "posts.json";
pub const DEFAULT_POSTS_DIR: &str = "posts";

/// Reads content from a directory laid out like the site's static assets:
/// `<root>/posts.json` and `<root>/posts/<slug>.md`.
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
    metadata_file: String,
    posts_dir: String,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            metadata_file: DEFAULT_METADATA_FILE.to_string(),
            posts_dir: DEFAULT_POSTS_DIR.to_string(),
        }
    }

    pub fn with_metadata_file(mut self, file: impl Into<String>) -> Self {
        self.metadata_file = file.into();
        self
    }

    pub fn with_posts_dir(mut self, dir: impl Into<String>) -> Self {
        self.posts_dir = dir.into();
        self
    }

    fn metadata_path(&self) -> PathBuf {
        self.root.join(&self.metadata_file)
    }

    fn post_path(&self, slug: &str) -> Result<PathBuf> {
        if !is_path_safe_slug(slug) {
            return Err(CatalogError::not_found(slug));
        }
        Ok(self.root.join(&self.posts_dir).join(format!("{}.md", slug)))
    }
}

#[async_trait]
impl ContentSource for LocalSource {
    fn metadata_location(&self) -> String {
        self.metadata_path().display().to_string()
    }

    async fn fetch_metadata(&self) -> Result<Vec<u8>> {
        let path = self.metadata_path();
        tracing::debug!("Reading metadata from {}", path.display());
        tokio::fs::read(&path)
            .await
            .map_err(|e| CatalogError::fetch(path.display().to_string(), e))
    }

    async fn fetch_post_body(&self, slug: &str) -> Result<String> {
        let path = self.post_path(slug)?;
        tracing::debug!("Reading post body from {}", path.display());
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| CatalogError::fetch(path.display().to_string(), e))
    }
}
