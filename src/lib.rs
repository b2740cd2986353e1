//! Read-only catalog of blog post summaries loaded from a static JSON
//! document, with the filter, search, sort and paging views a blog front end
//! needs.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{source_from_config, HttpSource, LocalSource};
pub use config::CatalogConfig;
pub use crate::core::{
    catalog::{Catalog, ContentCatalog},
    listing::{Listing, ListingQuery},
    views::ALL_POSTS_TAG,
};
pub use domain::model::{Post, PostDate, PostSummary};
pub use utils::error::{CatalogError, ErrorCategory, Result};
