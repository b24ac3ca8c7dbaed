//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::{
    NewPage, PageRecord, PageStats, PageUpdate, WebsiteRecord, WebsiteUpdate,
};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// This trait defines all database operations needed by the crawl tracker
/// and the service layer.
pub trait Storage {
    // ===== Website Management =====

    /// Creates a pending website for a user
    ///
    /// The first website a user submits becomes their primary one; the
    /// decision is made inside the insert so concurrent submissions cannot
    /// both become primary.
    fn create_website(&mut self, user_id: &str, url: &str) -> StorageResult<WebsiteRecord>;

    /// Applies a partial update to a website
    ///
    /// Fails with `NotFound` when no row has this id.
    fn update_website(&mut self, website_id: i64, update: &WebsiteUpdate) -> StorageResult<()>;

    /// Gets a website by ID
    fn find_website(&self, website_id: i64) -> StorageResult<Option<WebsiteRecord>>;

    /// Gets every website of a user, oldest first
    fn find_websites_by_user(&self, user_id: &str) -> StorageResult<Vec<WebsiteRecord>>;

    // ===== Page Management =====

    /// Inserts a page or returns the existing row for the same website and URL
    ///
    /// # Returns
    ///
    /// The page record and whether it was newly created
    fn create_page(&mut self, website_id: i64, page: &NewPage)
        -> StorageResult<(PageRecord, bool)>;

    /// Inserts several pages in one transaction, reusing existing rows
    fn create_pages(
        &mut self,
        website_id: i64,
        pages: &[NewPage],
    ) -> StorageResult<Vec<(PageRecord, bool)>>;

    /// Applies a partial update to a page
    ///
    /// Fails with `NotFound` when no row has this id.
    fn update_page(&mut self, page_id: i64, update: &PageUpdate) -> StorageResult<()>;

    /// Gets the pages of a website ordered by depth, then discovery order
    ///
    /// Soft-deleted pages are only returned when `include_deleted` is set.
    fn find_pages_by_website(
        &self,
        website_id: i64,
        include_deleted: bool,
    ) -> StorageResult<Vec<PageRecord>>;

    /// Gets a page by ID, soft-deleted or not
    fn find_page(&self, page_id: i64) -> StorageResult<Option<PageRecord>>;

    /// Gets a page by its canonical URL within a website
    fn find_page_by_url(&self, website_id: i64, url: &str) -> StorageResult<Option<PageRecord>>;

    /// Soft-deletes a page
    ///
    /// Deleting an already deleted page keeps the original timestamp and
    /// actor.
    fn soft_delete_page(&mut self, page_id: i64, actor: &str) -> StorageResult<()>;

    // ===== Statistics =====

    /// Counts a website's non-deleted pages by status
    fn count_page_statuses(&self, website_id: i64) -> StorageResult<PageStats>;
}
