use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to fetch {resource}: {reason}")]
    FetchError { resource: String, reason: String },

    #[error("Schema violation in item {index} (field `{field}`): {reason}")]
    SchemaError {
        index: usize,
        field: String,
        reason: String,
    },

    #[error("No post with slug '{slug}'")]
    NotFoundError { slug: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

/// Coarse classification used by callers to pick a fallback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Fetch,
    Schema,
    NotFound,
    Config,
}

impl CatalogError {
    pub fn fetch(resource: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        CatalogError::FetchError {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }

    pub fn schema(index: usize, field: &str, reason: impl Into<String>) -> Self {
        CatalogError::SchemaError {
            index,
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_found(slug: &str) -> Self {
        CatalogError::NotFoundError {
            slug: slug.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::FetchError { .. } => ErrorCategory::Fetch,
            CatalogError::SchemaError { .. } => ErrorCategory::Schema,
            CatalogError::NotFoundError { .. } => ErrorCategory::NotFound,
            CatalogError::IoError(_)
            | CatalogError::ConfigError { .. }
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::MissingConfigError { .. } => ErrorCategory::Config,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Fetch => "The content could not be retrieved.".to_string(),
            ErrorCategory::Schema => "The content index is malformed.".to_string(),
            ErrorCategory::NotFound => match self {
                CatalogError::NotFoundError { slug } => format!("No post named '{}' exists.", slug),
                _ => "The requested post does not exist.".to_string(),
            },
            ErrorCategory::Config => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Fetch => "Check the metadata URL or source directory and that the server is reachable",
            ErrorCategory::Schema => "Make sure every entry has non-empty slug, title and date fields and that slugs are unique",
            ErrorCategory::NotFound => "List the available posts with `content-catalog list`",
            ErrorCategory::Config => "Review the command line options and configuration file",
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        let resource = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "remote resource".to_string());
        CatalogError::fetch(resource, err)
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
