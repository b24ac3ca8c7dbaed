//! Crawl service used by the onboarding workflow
//!
//! `CrawlService` is the produced interface of the crate: submit a seed,
//! start or await a crawl, poll its status, and curate the resulting pages.
//! Background crawls run on their own tokio task; their failures are
//! persisted on the website and never surface to the caller that started
//! them.

use crate::config::Config;
use crate::crawler::{build_scraper, CrawlRun, CrawlSummary, PageOutcome, Scraper, OFF_SITE_ERROR};
use crate::state::{CrawlStatus, CrawlTracker};
use crate::storage::{open_storage, PageRecord, PageStats, SqliteStorage, Storage, WebsiteRecord};
use crate::url::normalize_seed;
use crate::{CrawlerError, Result};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use url::Url;

/// A crawl that was accepted and is running in the background
#[derive(Debug)]
pub struct StartedCrawl {
    /// The website as it was when the crawl started (`processing`)
    pub website: WebsiteRecord,

    /// Completes when the background crawl has finished and persisted its
    /// outcome; dropping it does not cancel the crawl
    pub task: JoinHandle<()>,
}

/// A website together with its page counts
///
/// The website's `total_pages_*` counters describe the latest run only.
/// `page_stats` counts every visible page row, including rows an earlier run
/// created that the latest run no longer reached; those keep their last
/// status until a later crawl links to them again.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub website: WebsiteRecord,
    pub page_stats: PageStats,
}

/// Entry point for submitting, crawling, and inspecting websites
#[derive(Clone)]
pub struct CrawlService {
    scraper: Scraper,
    tracker: CrawlTracker,
}

impl CrawlService {
    /// Opens the configured database and builds the HTTP clients
    pub fn new(config: &Config) -> Result<Self> {
        let storage = open_storage(Path::new(&config.output.database_path))?;
        let scraper = build_scraper(config)?;
        Ok(Self::with_storage(storage, scraper))
    }

    /// Builds a service over an already opened database
    pub fn with_storage(storage: SqliteStorage, scraper: Scraper) -> Self {
        Self {
            scraper,
            tracker: CrawlTracker::new(Arc::new(Mutex::new(storage))),
        }
    }

    /// Records a seed URL for a user as a `pending` website
    ///
    /// The URL is given an `https://` scheme when it has none. The first
    /// website of a user becomes their primary one.
    pub fn submit_seed(&self, user_id: &str, url: &str) -> Result<WebsiteRecord> {
        let seed = normalize_seed(url.trim());
        let parsed = Url::parse(&seed)?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(CrawlerError::UrlParse(url::ParseError::EmptyHost));
        }

        let website = self
            .tracker
            .with_storage(|storage| Ok(storage.create_website(user_id, &seed)?))?;

        tracing::info!(
            "Submitted website {} for user {}: {}{}",
            website.id,
            user_id,
            website.url,
            if website.is_primary { " (primary)" } else { "" }
        );

        Ok(website)
    }

    /// Starts a crawl in the background and returns immediately
    ///
    /// Fails synchronously when the website does not exist or is already
    /// being crawled. Must be called from within a tokio runtime.
    pub fn start_crawl(&self, website_id: i64) -> Result<StartedCrawl> {
        let website = self.tracker.begin_website(website_id)?;
        let run = CrawlRun::new(website_id, self.scraper.clone(), self.tracker.clone());
        let tracker = self.tracker.clone();

        let task = tokio::spawn(async move {
            // The run gets its own task so a panic surfaces here as a JoinError
            let outcome = match tokio::spawn(run.run()).await {
                Ok(result) => result,
                Err(e) => Err(CrawlerError::Task(e.to_string())),
            };
            finish_background(&tracker, website_id, outcome);
        });

        Ok(StartedCrawl { website, task })
    }

    /// Runs a crawl in the caller's task and waits for it to finish
    ///
    /// Seed failures are reported through the summary's status; an error is
    /// returned only when the run itself could not proceed, after recording
    /// it on the website.
    pub async fn run_crawl(&self, website_id: i64) -> Result<CrawlSummary> {
        self.tracker.begin_website(website_id)?;
        let run = CrawlRun::new(website_id, self.scraper.clone(), self.tracker.clone());

        match run.run().await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                record_run_error(&self.tracker, website_id, &e);
                Err(e)
            }
        }
    }

    /// Gets a website with its current page counts
    pub fn get_status(&self, website_id: i64) -> Result<StatusReport> {
        let website = self.tracker.website(website_id)?;
        let page_stats = self.tracker.page_stats(website_id)?;
        Ok(StatusReport {
            website,
            page_stats,
        })
    }

    /// Lists a website's pages, soft-deleted ones excluded
    pub fn list_pages(&self, website_id: i64) -> Result<Vec<PageRecord>> {
        self.tracker.website(website_id)?;
        self.tracker
            .with_storage(|storage| Ok(storage.find_pages_by_website(website_id, false)?))
    }

    /// Fetches a single page again and stores the new outcome
    ///
    /// Leaves the website and every other page untouched. Soft-deleted pages
    /// are treated as missing.
    pub async fn refetch_page(&self, page_id: i64) -> Result<PageRecord> {
        let page = self.visible_page(page_id)?;
        tracing::info!("Refetching page {} ({})", page.id, page.url);

        self.tracker.begin_page(page.id)?;
        let outcome = self.scraper.fetch_page_outcome(&page.url, &page.url).await;

        match outcome {
            PageOutcome::Scraped(extraction) => self.tracker.complete_page(page.id, &extraction)?,
            PageOutcome::CrossOrigin => self.tracker.fail_page(page.id, OFF_SITE_ERROR)?,
            PageOutcome::Failed(e) => {
                tracing::warn!("Refetch of {} failed: {}", page.url, e);
                self.tracker.fail_page(page.id, &e.to_string())?
            }
        }

        self.page(page_id)
    }

    /// Soft-deletes a page on behalf of `actor` and returns it
    pub fn soft_delete_page(&self, page_id: i64, actor: &str) -> Result<PageRecord> {
        self.tracker.with_storage(|storage| Ok(storage.soft_delete_page(page_id, actor)?))?;
        tracing::info!("Page {} deleted by {}", page_id, actor);
        self.page(page_id)
    }

    /// True once the user has at least one fully crawled website
    pub fn can_finalize_onboarding(&self, user_id: &str) -> Result<bool> {
        Ok(self
            .websites_for_user(user_id)?
            .iter()
            .any(|website| website.status == CrawlStatus::Completed))
    }

    /// Gets every website a user submitted, oldest first
    pub fn websites_for_user(&self, user_id: &str) -> Result<Vec<WebsiteRecord>> {
        self.tracker
            .with_storage(|storage| Ok(storage.find_websites_by_user(user_id)?))
    }

    fn page(&self, page_id: i64) -> Result<PageRecord> {
        self.tracker
            .with_storage(|storage| Ok(storage.find_page(page_id)?))?
            .ok_or(CrawlerError::NotFound {
                entity: "Page",
                id: page_id,
            })
    }

    fn visible_page(&self, page_id: i64) -> Result<PageRecord> {
        let page = self.page(page_id)?;
        if page.deletion.is_deleted() {
            return Err(CrawlerError::NotFound {
                entity: "Page",
                id: page_id,
            });
        }
        Ok(page)
    }
}

/// Logs and persists the end of a background run
fn finish_background(tracker: &CrawlTracker, website_id: i64, outcome: Result<CrawlSummary>) {
    match outcome {
        Ok(summary) => tracing::info!(
            "Background crawl of website {} finished as {}",
            website_id,
            summary.status
        ),
        Err(e) => record_run_error(tracker, website_id, &e),
    }
}

fn record_run_error(tracker: &CrawlTracker, website_id: i64, error: &CrawlerError) {
    tracing::error!("Crawl of website {} aborted: {}", website_id, error);
    if let Err(persist_error) = tracker.fail_website(website_id, &error.to_string()) {
        tracing::error!(
            "Could not record failure of website {}: {}",
            website_id,
            persist_error
        );
    }
}
