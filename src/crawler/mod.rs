//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with per-profile timeouts and redirect caps
//! - Fetch-and-extract of the seed and of individual pages
//! - The breadth-first frontier with depth and page budget
//! - The persisted crawl run driving the state tracker

mod coordinator;
mod fetcher;
mod frontier;
mod scraper;

pub use coordinator::{CrawlRun, CrawlSummary, OFF_SITE_ERROR};
pub use fetcher::{
    build_http_client, FetchError, FetchProfile, FetchedDocument, Fetcher, ACCEPT_HTML,
};
pub use frontier::{Frontier, QueuedPage};
pub use scraper::{CrawledPage, PageOutcome, Scraper, SeedPage};

use crate::config::Config;
use crate::Result;

/// Builds a scraper from the full configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Scraper)` - HTTP clients built successfully
/// * `Err(CrawlerError)` - The HTTP client could not be built
pub fn build_scraper(config: &Config) -> Result<Scraper> {
    let fetcher = Fetcher::new(&config.user_agent, &config.crawler)?;
    Ok(Scraper::new(fetcher, config.crawler.clone()))
}
