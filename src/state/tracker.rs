//! Persisted crawl state machine
//!
//! `CrawlTracker` is the only writer of website and page statuses during a
//! crawl. Each method takes the storage lock for a single check-and-write and
//! releases it before returning, so no lock is ever held across an await.

use crate::extract::ExtractionResult;
use crate::state::CrawlStatus;
use crate::storage::{
    NewPage, PageRecord, PageStats, PageUpdate, SqliteStorage, Storage, StorageError,
    WebsiteRecord, WebsiteUpdate,
};
use crate::{CrawlerError, Result};
use chrono::Utc;
use std::sync::{Arc, Mutex};

/// Storage handle shared between the service and running crawls
pub type SharedStorage = Arc<Mutex<SqliteStorage>>;

/// Applies validated status transitions and counters through storage
#[derive(Clone)]
pub struct CrawlTracker {
    storage: SharedStorage,
}

impl CrawlTracker {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// Runs `f` with exclusive access to storage
    pub(crate) fn with_storage<T>(
        &self,
        f: impl FnOnce(&mut SqliteStorage) -> Result<T>,
    ) -> Result<T> {
        let mut storage = self
            .storage
            .lock()
            .map_err(|_| StorageError::Database("storage lock poisoned".to_string()))?;
        f(&mut storage)
    }

    /// Gets a website or fails with `NotFound`
    pub fn website(&self, website_id: i64) -> Result<WebsiteRecord> {
        self.with_storage(|storage| load_website(storage, website_id))
    }

    // ===== Website transitions =====

    /// Moves a website into `processing` for a new run
    ///
    /// Clears the previous error and resets both counters. Fails with
    /// `InvalidTransition` when the website is already being crawled.
    pub fn begin_website(&self, website_id: i64) -> Result<WebsiteRecord> {
        self.with_storage(|storage| {
            let website = load_website(storage, website_id)?;
            ensure_transition(website.status, CrawlStatus::Processing)?;

            storage.update_website(
                website_id,
                &WebsiteUpdate {
                    status: Some(CrawlStatus::Processing),
                    error_message: Some(None),
                    total_pages_found: Some(0),
                    total_pages_scraped: Some(0),
                    ..Default::default()
                },
            )?;
            load_website(storage, website_id)
        })
    }

    /// Stores the seed's extraction; the seed counts as the first scraped page
    pub fn record_seed(&self, website_id: i64, extraction: &ExtractionResult) -> Result<()> {
        self.with_storage(|storage| {
            storage.update_website(
                website_id,
                &WebsiteUpdate {
                    extraction: Some(extraction.clone()),
                    last_scraped_at: Some(Utc::now()),
                    total_pages_scraped: Some(1),
                    ..Default::default()
                },
            )?;
            Ok(())
        })
    }

    /// Marks the run finished
    pub fn complete_website(&self, website_id: i64) -> Result<()> {
        self.with_storage(|storage| {
            let website = load_website(storage, website_id)?;
            ensure_transition(website.status, CrawlStatus::Completed)?;

            storage.update_website(
                website_id,
                &WebsiteUpdate {
                    status: Some(CrawlStatus::Completed),
                    last_scraped_at: Some(Utc::now()),
                    ..Default::default()
                },
            )?;
            Ok(())
        })
    }

    /// Marks the run failed with a human-readable reason
    pub fn fail_website(&self, website_id: i64, error: &str) -> Result<()> {
        self.with_storage(|storage| {
            let website = load_website(storage, website_id)?;
            ensure_transition(website.status, CrawlStatus::Failed)?;

            storage.update_website(
                website_id,
                &WebsiteUpdate {
                    status: Some(CrawlStatus::Failed),
                    error_message: Some(Some(error.to_string())),
                    ..Default::default()
                },
            )?;
            Ok(())
        })
    }

    /// Publishes the run's counters
    pub fn update_counters(&self, website_id: i64, found: u32, scraped: u32) -> Result<()> {
        self.with_storage(|storage| {
            storage.update_website(
                website_id,
                &WebsiteUpdate {
                    total_pages_found: Some(found),
                    total_pages_scraped: Some(scraped),
                    ..Default::default()
                },
            )?;
            Ok(())
        })
    }

    // ===== Page transitions =====

    /// Registers discovered pages as `pending`
    ///
    /// Rows left over from an earlier run are reset to `pending` at their new
    /// depth. Rows this run never rediscovers are not touched. Soft-deleted
    /// pages stay deleted and are left out of the result, so a re-crawl never
    /// resurrects them.
    pub fn register_pages(&self, website_id: i64, pages: &[NewPage]) -> Result<Vec<PageRecord>> {
        if pages.is_empty() {
            return Ok(Vec::new());
        }

        self.with_storage(|storage| {
            let rows = storage.create_pages(website_id, pages)?;
            let mut registered = Vec::with_capacity(rows.len());

            for ((mut page, created), new_page) in rows.into_iter().zip(pages) {
                if page.deletion.is_deleted() {
                    tracing::debug!("Skipping soft-deleted page {}", page.url);
                    continue;
                }
                if !created {
                    storage.update_page(
                        page.id,
                        &PageUpdate {
                            status: Some(CrawlStatus::Pending),
                            error_message: Some(None),
                            depth: Some(new_page.depth),
                            ..Default::default()
                        },
                    )?;
                    page.status = CrawlStatus::Pending;
                    page.error_message = None;
                    page.depth = new_page.depth;
                }
                registered.push(page);
            }

            Ok(registered)
        })
    }

    /// Moves a page into `processing`
    ///
    /// Unlike websites, a page may be forced back into `processing` from any
    /// state so it can be refetched on demand.
    pub fn begin_page(&self, page_id: i64) -> Result<()> {
        self.with_storage(|storage| {
            storage.update_page(
                page_id,
                &PageUpdate {
                    status: Some(CrawlStatus::Processing),
                    error_message: Some(None),
                    ..Default::default()
                },
            )?;
            Ok(())
        })
    }

    pub fn complete_page(&self, page_id: i64, extraction: &ExtractionResult) -> Result<()> {
        self.with_storage(|storage| {
            storage.update_page(
                page_id,
                &PageUpdate {
                    status: Some(CrawlStatus::Completed),
                    error_message: Some(None),
                    extraction: Some(extraction.clone()),
                    last_scraped_at: Some(Utc::now()),
                    ..Default::default()
                },
            )?;
            Ok(())
        })
    }

    pub fn fail_page(&self, page_id: i64, error: &str) -> Result<()> {
        self.with_storage(|storage| {
            storage.update_page(
                page_id,
                &PageUpdate {
                    status: Some(CrawlStatus::Failed),
                    error_message: Some(Some(error.to_string())),
                    last_scraped_at: Some(Utc::now()),
                    ..Default::default()
                },
            )?;
            Ok(())
        })
    }

    pub fn page_stats(&self, website_id: i64) -> Result<PageStats> {
        self.with_storage(|storage| Ok(storage.count_page_statuses(website_id)?))
    }
}

fn load_website(storage: &SqliteStorage, website_id: i64) -> Result<WebsiteRecord> {
    storage
        .find_website(website_id)?
        .ok_or(CrawlerError::NotFound {
            entity: "Website",
            id: website_id,
        })
}

fn ensure_transition(from: CrawlStatus, to: CrawlStatus) -> Result<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CrawlerError::InvalidTransition { from, to })
    }
}
