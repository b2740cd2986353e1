use crate::core::ConfigProvider;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const DEFAULT_RELATED_COUNT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub source: SourceConfig,
    pub listing: ListingConfig,
}

/// Where content is read from: either `metadata_url` (HTTP) or `directory`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub metadata_url: Option<String>,
    pub posts_url: Option<String>,
    pub directory: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub page_size: usize,
    pub related_count: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            related_count: DEFAULT_RELATED_COUNT,
        }
    }
}

impl CatalogConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CONTENT_HOST})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for CatalogConfig {
    fn metadata_url(&self) -> Option<&str> {
        self.source.metadata_url.as_deref()
    }

    fn posts_url(&self) -> Option<&str> {
        self.source.posts_url.as_deref()
    }

    fn source_directory(&self) -> Option<&str> {
        self.source.directory.as_deref()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.source.timeout_seconds
    }

    fn page_size(&self) -> usize {
        self.listing.page_size
    }

    fn related_count(&self) -> usize {
        self.listing.related_count
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        match (&self.source.metadata_url, &self.source.directory) {
            (Some(_), Some(_)) => {
                return Err(CatalogError::ConfigError {
                    message: "source.metadata_url and source.directory are mutually exclusive"
                        .to_string(),
                });
            }
            (Some(url), None) => {
                validate_url("source.metadata_url", url)?;
                if let Some(posts_url) = &self.source.posts_url {
                    validate_url("source.posts_url", posts_url)?;
                }
            }
            (None, directory) => {
                let directory =
                    validate_required_field("source.metadata_url or source.directory", directory)?;
                validate_path("source.directory", directory)?;
            }
        }

        if let Some(timeout) = self.source.timeout_seconds {
            validate_range("source.timeout_seconds", timeout, 1, 300)?;
        }

        validate_range("listing.page_size", self.listing.page_size, 1, 100)?;
        validate_range("listing.related_count", self.listing.related_count, 1, 50)?;

        tracing::debug!("Catalog configuration validation passed");
        Ok(())
    }
}
