//! Site-Seed: a bounded website crawler for bootstrapping a profile
//!
//! This crate fetches a user's homepage, extracts structured metadata and body
//! text, walks a capped set of same-domain pages breadth-first, and persists the
//! crawl state so a caller can poll progress while the crawl runs in the background.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod service;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Seed operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: state::CrawlStatus,
        to: state::CrawlStatus,
    },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Background task error: {0}")]
    Task(String),
}

impl CrawlerError {
    /// Returns true if the error means the requested record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Storage(storage::StorageError::NotFound(_))
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Site-Seed operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{extract, ExtractionResult};
pub use service::{CrawlService, StartedCrawl, StatusReport};
pub use state::{CrawlStatus, Deletion};
pub use url::{domain_of, normalize_seed, path_of, resolve_internal};
