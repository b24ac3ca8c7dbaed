//! Persisted crawl run
//!
//! This module drives one website crawl through the tracker:
//! - Fetching and extracting the seed, which is fatal on failure
//! - Registering discovered pages as `pending`
//! - Walking the frontier with the politeness delay
//! - Resolving each page and publishing the counters as it goes

use crate::crawler::frontier::{Frontier, QueuedPage};
use crate::crawler::scraper::{PageOutcome, Scraper};
use crate::extract::ExtractionResult;
use crate::state::{CrawlStatus, CrawlTracker};
use crate::storage::NewPage;
use crate::url::path_of;
use crate::Result;
use std::collections::HashMap;
use std::time::Instant;

/// Error text stored for pages whose fetch ended on another host
pub const OFF_SITE_ERROR: &str = "Redirected to a different domain";

/// Final numbers of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub website_id: i64,
    pub status: CrawlStatus,
    pub pages_found: u32,
    /// Seed included
    pub pages_scraped: u32,
    pub pages_failed: u32,
}

/// One crawl of one website
///
/// The website must already be `processing` (see
/// [`CrawlTracker::begin_website`]); the run owns every transition after
/// that until the website is `completed` or `failed`.
pub struct CrawlRun {
    website_id: i64,
    scraper: Scraper,
    tracker: CrawlTracker,
    page_ids: HashMap<String, i64>,
    pages_found: u32,
    pages_scraped: u32,
    pages_failed: u32,
}

impl CrawlRun {
    pub fn new(website_id: i64, scraper: Scraper, tracker: CrawlTracker) -> Self {
        Self {
            website_id,
            scraper,
            tracker,
            page_ids: HashMap::new(),
            pages_found: 0,
            pages_scraped: 0,
            pages_failed: 0,
        }
    }

    /// Runs the crawl to completion
    ///
    /// A seed failure is recorded on the website and reported through the
    /// summary; only storage failures are returned as errors.
    pub async fn run(mut self) -> Result<CrawlSummary> {
        let start_time = Instant::now();
        let website = self.tracker.website(self.website_id)?;
        tracing::info!("Starting crawl of website {} ({})", website.id, website.url);

        let seed = match self.scraper.fetch_seed(&website.url).await {
            Ok(seed) => seed,
            Err(e) => {
                tracing::error!("Seed fetch failed for {}: {}", website.url, e);
                self.tracker.fail_website(self.website_id, &e.to_string())?;
                return Ok(self.summary(CrawlStatus::Failed));
            }
        };

        self.tracker.record_seed(self.website_id, &seed.extraction)?;
        self.pages_scraped = 1;

        let config = self.scraper.config().clone();
        let mut frontier = Frontier::new(&seed.base_url, config.max_depth, config.max_pages);
        let admitted = frontier.admit(&seed.extraction.internal_links, 1);
        self.register(&admitted)?;

        while let Some(entry) = frontier.next() {
            let Some(&page_id) = self.page_ids.get(&entry.url) else {
                // Soft-deleted in an earlier run
                continue;
            };

            tokio::time::sleep(config.politeness_delay()).await;

            self.tracker.begin_page(page_id)?;
            let outcome = self
                .scraper
                .fetch_page_outcome(&entry.url, &seed.base_url)
                .await;
            frontier.record_resolved();

            if let Some(extraction) = self.resolve_page(page_id, &entry, outcome)? {
                if frontier.can_expand(entry.depth) {
                    let admitted = frontier.admit(&extraction.internal_links, entry.depth + 1);
                    self.register(&admitted)?;
                }
            }

            self.tracker
                .update_counters(self.website_id, self.pages_found, self.pages_scraped)?;
        }

        self.tracker.complete_website(self.website_id)?;

        tracing::info!(
            "Crawl of website {} completed: {} found, {} scraped, {} failed in {:?}",
            self.website_id,
            self.pages_found,
            self.pages_scraped,
            self.pages_failed,
            start_time.elapsed()
        );

        Ok(self.summary(CrawlStatus::Completed))
    }

    /// Persists newly admitted URLs as pending pages
    fn register(&mut self, admitted: &[QueuedPage]) -> Result<()> {
        if admitted.is_empty() {
            return Ok(());
        }

        let new_pages: Vec<NewPage> = admitted
            .iter()
            .map(|entry| NewPage {
                url: entry.url.clone(),
                path: path_of(&entry.url),
                depth: entry.depth,
            })
            .collect();

        let registered = self.tracker.register_pages(self.website_id, &new_pages)?;
        self.pages_found += registered.len() as u32;
        for page in registered {
            self.page_ids.insert(page.url, page.id);
        }

        self.tracker
            .update_counters(self.website_id, self.pages_found, self.pages_scraped)
    }

    /// Stores a page outcome, returning the extraction when it succeeded
    fn resolve_page(
        &mut self,
        page_id: i64,
        entry: &QueuedPage,
        outcome: PageOutcome,
    ) -> Result<Option<ExtractionResult>> {
        match outcome {
            PageOutcome::Scraped(extraction) => {
                tracing::debug!("Scraped {} (depth {})", entry.url, entry.depth);
                self.tracker.complete_page(page_id, &extraction)?;
                self.pages_scraped += 1;
                Ok(Some(extraction))
            }
            PageOutcome::CrossOrigin => {
                tracing::warn!("Page {} left the site", entry.url);
                self.tracker.fail_page(page_id, OFF_SITE_ERROR)?;
                self.pages_failed += 1;
                Ok(None)
            }
            PageOutcome::Failed(e) => {
                tracing::warn!("Failed to fetch {}: {}", entry.url, e);
                self.tracker.fail_page(page_id, &e.to_string())?;
                self.pages_failed += 1;
                Ok(None)
            }
        }
    }

    fn summary(&self, status: CrawlStatus) -> CrawlSummary {
        CrawlSummary {
            website_id: self.website_id,
            status,
            pages_found: self.pages_found,
            pages_scraped: self.pages_scraped,
            pages_failed: self.pages_failed,
        }
    }
}
