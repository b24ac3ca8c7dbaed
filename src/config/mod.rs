//! Configuration module for Site-Seed
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing keys fall back to the crawl limits the
//! onboarding flow expects (depth 2, 50 pages, 500ms between fetches).
//!
//! # Example
//!
//! ```no_run
//! use site_seed::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("site-seed.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
