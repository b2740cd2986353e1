pub mod toml_config;

pub use toml_config::CatalogConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "content-catalog")]
#[command(about = "Browse a blog's post catalog from its static metadata")]
pub struct CliConfig {
    /// URL of the JSON metadata document
    #[arg(long, global = true)]
    pub metadata_url: Option<String>,

    /// Base URL of the Markdown post bodies
    #[arg(long, global = true)]
    pub posts_url: Option<String>,

    /// Read content from a local directory instead of over HTTP
    #[arg(long, global = true, conflicts_with = "metadata_url")]
    pub source_dir: Option<String>,

    /// TOML configuration file; command line options take precedence
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List posts, newest first
    List {
        #[arg(long)]
        tag: Option<String>,

        #[arg(long)]
        search: Option<String>,

        /// Zero-based page index
        #[arg(long, default_value = "0")]
        page: usize,

        #[arg(long)]
        page_size: Option<usize>,

        /// Include draft entries flagged as previews
        #[arg(long)]
        include_previews: bool,
    },

    /// Featured posts, in catalog order
    Featured,

    /// The hero post
    Hero,

    /// Distinct tags
    Tags,

    /// Posts related to the given one
    Related {
        slug: String,

        #[arg(long)]
        max: Option<usize>,
    },

    /// A post's summary and Markdown body
    Show { slug: String },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Config file (if any) overlaid with command line options.
    pub fn resolve(&self) -> Result<CatalogConfig> {
        let mut config = match &self.config {
            Some(path) => CatalogConfig::from_file(path)?,
            None => CatalogConfig::default(),
        };

        if let Some(url) = &self.metadata_url {
            config.source.metadata_url = Some(url.clone());
            config.source.directory = None;
        }
        if let Some(dir) = &self.source_dir {
            config.source.directory = Some(dir.clone());
            config.source.metadata_url = None;
        }
        if let Some(url) = &self.posts_url {
            config.source.posts_url = Some(url.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            config.source.timeout_seconds = Some(timeout);
        }

        Ok(config)
    }
}
