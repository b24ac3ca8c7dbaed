//! Storage module for persisting crawl data
//!
//! This module handles all database operations for the crawler, including:
//! - SQLite database initialization and schema management
//! - Website and page records with their metadata bags
//! - Typed partial updates and per-website page statistics

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::extract::{ClassifiedLink, ExtractionResult};
use crate::state::{CrawlStatus, Deletion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(StorageError)` - Failed to open or migrate the database
pub fn open_storage(path: &Path) -> StorageResult<SqliteStorage> {
    SqliteStorage::new(path)
}

/// Metadata bag stored with a website, serialized as JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub favicon: Option<String>,
    pub og_image: Option<String>,
    pub headings: Vec<String>,
    pub all_links: Vec<ClassifiedLink>,
    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,
}

impl From<&ExtractionResult> for WebsiteMetadata {
    fn from(result: &ExtractionResult) -> Self {
        Self {
            title: result.title.clone(),
            description: result.description.clone(),
            keywords: result.keywords.clone(),
            favicon: result.favicon.clone(),
            og_image: result.og_image.clone(),
            headings: result.headings.clone(),
            all_links: result.all_links.clone(),
            internal_links: result.internal_links.clone(),
            external_links: result.external_links.clone(),
        }
    }
}

/// Metadata bag stored with a page; pages carry no favicon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub og_image: Option<String>,
    pub headings: Vec<String>,
    pub all_links: Vec<ClassifiedLink>,
    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,
}

impl From<&ExtractionResult> for PageMetadata {
    fn from(result: &ExtractionResult) -> Self {
        Self {
            title: result.title.clone(),
            description: result.description.clone(),
            keywords: result.keywords.clone(),
            og_image: result.og_image.clone(),
            headings: result.headings.clone(),
            all_links: result.all_links.clone(),
            internal_links: result.internal_links.clone(),
            external_links: result.external_links.clone(),
        }
    }
}

/// Represents a submitted website in the database
#[derive(Debug, Clone)]
pub struct WebsiteRecord {
    pub id: i64,
    pub user_id: String,
    pub url: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub metadata: Option<WebsiteMetadata>,
    pub status: CrawlStatus,
    pub error_message: Option<String>,
    pub last_scraped_at: Option<DateTime<Utc>>,
    pub total_pages_found: u32,
    pub total_pages_scraped: u32,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Represents a crawled page of a website
#[derive(Debug, Clone)]
pub struct PageRecord {
    pub id: i64,
    pub website_id: i64,
    pub url: String,
    pub path: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub metadata: Option<PageMetadata>,
    pub word_count: Option<u32>,
    pub status: CrawlStatus,
    pub error_message: Option<String>,
    pub last_scraped_at: Option<DateTime<Utc>>,
    pub depth: u32,
    pub deletion: Deletion,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A page row to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPage {
    pub url: String,
    pub path: String,
    pub depth: u32,
}

/// Per-status page counts of one website, soft-deleted pages excluded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageStats {
    pub total: u64,
    pub completed: u64,
    pub pending: u64,
    pub processing: u64,
    pub failed: u64,
}

/// Partial update of a website row; `None` fields are left untouched
///
/// `error_message: Some(None)` clears the stored error.
#[derive(Debug, Clone, Default)]
pub struct WebsiteUpdate {
    pub status: Option<CrawlStatus>,
    pub error_message: Option<Option<String>>,
    pub extraction: Option<ExtractionResult>,
    pub last_scraped_at: Option<DateTime<Utc>>,
    pub total_pages_found: Option<u32>,
    pub total_pages_scraped: Option<u32>,
}

impl WebsiteUpdate {
    pub fn status(status: CrawlStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Partial update of a page row; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct PageUpdate {
    pub status: Option<CrawlStatus>,
    pub error_message: Option<Option<String>>,
    pub extraction: Option<ExtractionResult>,
    pub last_scraped_at: Option<DateTime<Utc>>,
    pub depth: Option<u32>,
}

impl PageUpdate {
    pub fn status(status: CrawlStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}
