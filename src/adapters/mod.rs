// Adapters layer: concrete content sources behind the `ContentSource` port.

pub mod http;
pub mod local;

pub use http::HttpSource;
pub use local::LocalSource;

use crate::core::{ConfigProvider, ContentSource};
use crate::utils::error::{CatalogError, Result};
use std::time::Duration;

/// Build the source a configuration points at: HTTP when a metadata URL is
/// set, otherwise a local directory.
pub fn source_from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Box<dyn ContentSource>> {
    if let Some(metadata_url) = config.metadata_url() {
        let source = match config.timeout_seconds() {
            Some(secs) => HttpSource::with_timeout(
                metadata_url,
                config.posts_url(),
                Duration::from_secs(secs),
            )?,
            None => HttpSource::new(metadata_url, config.posts_url())?,
        };
        tracing::debug!("Using HTTP source {}", metadata_url);
        return Ok(Box::new(source));
    }

    if let Some(directory) = config.source_directory() {
        tracing::debug!("Using local source {}", directory);
        return Ok(Box::new(LocalSource::new(directory)));
    }

    Err(CatalogError::MissingConfigError {
        field: "metadata_url or source directory".to_string(),
    })
}
