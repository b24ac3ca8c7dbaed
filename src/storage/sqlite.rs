//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.
//! Timestamps are stored as RFC 3339 text and metadata bags as JSON text.

use crate::state::{CrawlStatus, Deletion};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{
    NewPage, PageMetadata, PageRecord, PageStats, PageUpdate, WebsiteMetadata, WebsiteRecord,
    WebsiteUpdate,
};
use chrono::{DateTime, Utc};
use rusqlite::types::{ToSql, Type};
use rusqlite::{params, params_from_iter, Connection, ErrorCode, OptionalExtension, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

const WEBSITE_COLUMNS: &str = "id, user_id, url, name, description, content, metadata, status,
    error_message, last_scraped_at, total_pages_found, total_pages_scraped, is_primary,
    created_at, updated_at";

const PAGE_COLUMNS: &str = "id, website_id, url, path, title, description, content, metadata,
    word_count, status, error_message, last_scraped_at, depth, deleted_at, deleted_by,
    created_at, updated_at";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = 5000;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl Storage for SqliteStorage {
    // ===== Website Management =====

    fn create_website(&mut self, user_id: &str, url: &str) -> StorageResult<WebsiteRecord> {
        let now = timestamp(Utc::now());
        self.conn
            .execute(
                "INSERT INTO websites (user_id, url, status, is_primary, created_at, updated_at)
                 VALUES (?1, ?2, ?3,
                         NOT EXISTS (SELECT 1 FROM websites WHERE user_id = ?1 AND is_primary = 1),
                         ?4, ?4)",
                params![user_id, url, CrawlStatus::Pending.to_db_string(), now],
            )
            .map_err(constraint_error)?;

        let id = self.conn.last_insert_rowid();
        select_website(&self.conn, id)?
            .ok_or_else(|| StorageError::NotFound(format!("Website ID {}", id)))
    }

    fn update_website(&mut self, website_id: i64, update: &WebsiteUpdate) -> StorageResult<()> {
        let mut assignments = Assignments::new();

        if let Some(status) = update.status {
            assignments.set("status", status.to_db_string());
        }
        if let Some(error) = &update.error_message {
            assignments.set("error_message", error.clone());
        }
        if let Some(result) = &update.extraction {
            assignments.set("name", result.title.clone());
            assignments.set("description", result.description.clone());
            assignments.set("content", result.content.clone());
            assignments.set("metadata", to_json(&WebsiteMetadata::from(result))?);
        }
        if let Some(at) = update.last_scraped_at {
            assignments.set("last_scraped_at", timestamp(at));
        }
        if let Some(found) = update.total_pages_found {
            assignments.set("total_pages_found", found);
        }
        if let Some(scraped) = update.total_pages_scraped {
            assignments.set("total_pages_scraped", scraped);
        }

        let changed = assignments.execute(&self.conn, "websites", website_id)?;
        if changed == 0 {
            return Err(StorageError::NotFound(format!("Website ID {}", website_id)));
        }
        Ok(())
    }

    fn find_website(&self, website_id: i64) -> StorageResult<Option<WebsiteRecord>> {
        select_website(&self.conn, website_id)
    }

    fn find_websites_by_user(&self, user_id: &str) -> StorageResult<Vec<WebsiteRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM websites WHERE user_id = ?1 ORDER BY id",
            WEBSITE_COLUMNS
        ))?;

        let websites = stmt
            .query_map(params![user_id], website_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(websites)
    }

    // ===== Page Management =====

    fn create_page(
        &mut self,
        website_id: i64,
        page: &NewPage,
    ) -> StorageResult<(PageRecord, bool)> {
        insert_page(&self.conn, website_id, page)
    }

    fn create_pages(
        &mut self,
        website_id: i64,
        pages: &[NewPage],
    ) -> StorageResult<Vec<(PageRecord, bool)>> {
        let tx = self.conn.transaction()?;
        let mut created = Vec::with_capacity(pages.len());
        for page in pages {
            created.push(insert_page(&tx, website_id, page)?);
        }
        tx.commit()?;
        Ok(created)
    }

    fn update_page(&mut self, page_id: i64, update: &PageUpdate) -> StorageResult<()> {
        let mut assignments = Assignments::new();

        if let Some(status) = update.status {
            assignments.set("status", status.to_db_string());
        }
        if let Some(error) = &update.error_message {
            assignments.set("error_message", error.clone());
        }
        if let Some(result) = &update.extraction {
            assignments.set("title", result.title.clone());
            assignments.set("description", result.description.clone());
            assignments.set("content", result.content.clone());
            assignments.set("metadata", to_json(&PageMetadata::from(result))?);
            assignments.set("word_count", result.word_count as i64);
        }
        if let Some(at) = update.last_scraped_at {
            assignments.set("last_scraped_at", timestamp(at));
        }
        if let Some(depth) = update.depth {
            assignments.set("depth", depth);
        }

        let changed = assignments.execute(&self.conn, "pages", page_id)?;
        if changed == 0 {
            return Err(StorageError::NotFound(format!("Page ID {}", page_id)));
        }
        Ok(())
    }

    fn find_pages_by_website(
        &self,
        website_id: i64,
        include_deleted: bool,
    ) -> StorageResult<Vec<PageRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM pages
             WHERE website_id = ?1 AND (?2 OR deleted_at IS NULL)
             ORDER BY depth, id",
            PAGE_COLUMNS
        ))?;

        let pages = stmt
            .query_map(params![website_id, include_deleted], page_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pages)
    }

    fn find_page(&self, page_id: i64) -> StorageResult<Option<PageRecord>> {
        select_page(&self.conn, page_id)
    }

    fn find_page_by_url(&self, website_id: i64, url: &str) -> StorageResult<Option<PageRecord>> {
        select_page_by_url(&self.conn, website_id, url)
    }

    fn soft_delete_page(&mut self, page_id: i64, actor: &str) -> StorageResult<()> {
        let now = timestamp(Utc::now());
        let changed = self.conn.execute(
            "UPDATE pages SET deleted_at = ?1, deleted_by = ?2, updated_at = ?1
             WHERE id = ?3 AND deleted_at IS NULL",
            params![now, actor, page_id],
        )?;

        if changed == 0 && select_page(&self.conn, page_id)?.is_none() {
            return Err(StorageError::NotFound(format!("Page ID {}", page_id)));
        }
        Ok(())
    }

    // ===== Statistics =====

    fn count_page_statuses(&self, website_id: i64) -> StorageResult<PageStats> {
        let mut stmt = self.conn.prepare(
            "SELECT status, COUNT(*) FROM pages
             WHERE website_id = ?1 AND deleted_at IS NULL
             GROUP BY status",
        )?;

        let rows = stmt.query_map(params![website_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut stats = PageStats::default();
        for row in rows {
            let (status, count) = row?;
            let count = count as u64;
            stats.total += count;
            match CrawlStatus::from_db_string(&status) {
                Some(CrawlStatus::Pending) => stats.pending += count,
                Some(CrawlStatus::Processing) => stats.processing += count,
                Some(CrawlStatus::Completed) => stats.completed += count,
                Some(CrawlStatus::Failed) => stats.failed += count,
                None => tracing::warn!("Unknown page status {:?} in database", status),
            }
        }

        Ok(stats)
    }
}

/// Column assignments of a dynamic `UPDATE ... SET` statement
///
/// `updated_at` is always refreshed.
struct Assignments {
    columns: Vec<&'static str>,
    values: Vec<Box<dyn ToSql>>,
}

impl Assignments {
    fn new() -> Self {
        let mut assignments = Self {
            columns: Vec::new(),
            values: Vec::new(),
        };
        assignments.set("updated_at", timestamp(Utc::now()));
        assignments
    }

    fn set<T: ToSql + 'static>(&mut self, column: &'static str, value: T) {
        self.columns.push(column);
        self.values.push(Box::new(value));
    }

    fn execute(self, conn: &Connection, table: &str, id: i64) -> rusqlite::Result<usize> {
        let set_clause = self
            .columns
            .iter()
            .map(|column| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {} WHERE id = ?", table, set_clause);

        let mut values = self.values;
        values.push(Box::new(id));
        conn.execute(&sql, params_from_iter(values.iter()))
    }
}

fn insert_page(
    conn: &Connection,
    website_id: i64,
    page: &NewPage,
) -> StorageResult<(PageRecord, bool)> {
    let now = timestamp(Utc::now());
    let inserted = conn
        .execute(
            "INSERT INTO pages (website_id, url, path, status, depth, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             ON CONFLICT(website_id, url) DO NOTHING",
            params![
                website_id,
                page.url,
                page.path,
                CrawlStatus::Pending.to_db_string(),
                page.depth,
                now
            ],
        )
        .map_err(constraint_error)?;

    let record = select_page_by_url(conn, website_id, &page.url)?
        .ok_or_else(|| StorageError::NotFound(format!("Page {}", page.url)))?;

    Ok((record, inserted == 1))
}

fn select_website(conn: &Connection, website_id: i64) -> StorageResult<Option<WebsiteRecord>> {
    let website = conn
        .query_row(
            &format!("SELECT {} FROM websites WHERE id = ?1", WEBSITE_COLUMNS),
            params![website_id],
            website_from_row,
        )
        .optional()?;
    Ok(website)
}

fn select_page(conn: &Connection, page_id: i64) -> StorageResult<Option<PageRecord>> {
    let page = conn
        .query_row(
            &format!("SELECT {} FROM pages WHERE id = ?1", PAGE_COLUMNS),
            params![page_id],
            page_from_row,
        )
        .optional()?;
    Ok(page)
}

fn select_page_by_url(
    conn: &Connection,
    website_id: i64,
    url: &str,
) -> StorageResult<Option<PageRecord>> {
    let page = conn
        .query_row(
            &format!(
                "SELECT {} FROM pages WHERE website_id = ?1 AND url = ?2",
                PAGE_COLUMNS
            ),
            params![website_id, url],
            page_from_row,
        )
        .optional()?;
    Ok(page)
}

fn website_from_row(row: &Row) -> rusqlite::Result<WebsiteRecord> {
    Ok(WebsiteRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        url: row.get(2)?,
        name: row.get(3)?,
        description: row.get(4)?,
        content: row.get(5)?,
        metadata: json_column(row, 6)?,
        status: status_column(row, 7)?,
        error_message: row.get(8)?,
        last_scraped_at: optional_timestamp(row, 9)?,
        total_pages_found: row.get(10)?,
        total_pages_scraped: row.get(11)?,
        is_primary: row.get(12)?,
        created_at: parse_timestamp(13, row.get(13)?)?,
        updated_at: parse_timestamp(14, row.get(14)?)?,
    })
}

fn page_from_row(row: &Row) -> rusqlite::Result<PageRecord> {
    Ok(PageRecord {
        id: row.get(0)?,
        website_id: row.get(1)?,
        url: row.get(2)?,
        path: row.get(3)?,
        title: row.get(4)?,
        description: row.get(5)?,
        content: row.get(6)?,
        metadata: json_column(row, 7)?,
        word_count: row.get(8)?,
        status: status_column(row, 9)?,
        error_message: row.get(10)?,
        last_scraped_at: optional_timestamp(row, 11)?,
        depth: row.get(12)?,
        deletion: Deletion::from_columns(optional_timestamp(row, 13)?, row.get(14)?),
        created_at: parse_timestamp(15, row.get(15)?)?,
        updated_at: parse_timestamp(16, row.get(16)?)?,
    })
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

fn parse_timestamp(idx: usize, raw: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn optional_timestamp(row: &Row, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    row.get::<_, Option<String>>(idx)?
        .map(|raw| parse_timestamp(idx, raw))
        .transpose()
}

fn status_column(row: &Row, idx: usize) -> rusqlite::Result<CrawlStatus> {
    let raw: String = row.get(idx)?;
    CrawlStatus::from_db_string(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown status {:?}", raw).into(),
        )
    })
}

fn json_column<T: DeserializeOwned>(row: &Row, idx: usize) -> rusqlite::Result<Option<T>> {
    row.get::<_, Option<String>>(idx)?
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

fn to_json<T: Serialize>(value: &T) -> StorageResult<String> {
    serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Surfaces UNIQUE / FOREIGN KEY failures as constraint violations
fn constraint_error(error: rusqlite::Error) -> StorageError {
    match &error {
        rusqlite::Error::SqliteFailure(failure, message)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            StorageError::ConstraintViolation(
                message.clone().unwrap_or_else(|| failure.to_string()),
            )
        }
        _ => StorageError::Sqlite(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractionResult;

    fn storage() -> SqliteStorage {
        SqliteStorage::new_in_memory().unwrap()
    }

    fn new_page(url: &str, depth: u32) -> NewPage {
        NewPage {
            url: url.to_string(),
            path: crate::url::path_of(url),
            depth,
        }
    }

    #[test]
    fn test_first_website_is_primary() {
        let mut storage = storage();

        let first = storage.create_website("user-1", "https://a.test").unwrap();
        let second = storage.create_website("user-1", "https://b.test").unwrap();
        let other_user = storage.create_website("user-2", "https://c.test").unwrap();

        assert!(first.is_primary);
        assert!(!second.is_primary);
        assert!(other_user.is_primary);
        assert_eq!(first.status, CrawlStatus::Pending);
        assert_eq!(first.total_pages_found, 0);
        assert!(first.metadata.is_none());
    }

    #[test]
    fn test_find_websites_by_user() {
        let mut storage = storage();
        storage.create_website("user-1", "https://a.test").unwrap();
        storage.create_website("user-2", "https://b.test").unwrap();
        storage.create_website("user-1", "https://c.test").unwrap();

        let urls: Vec<String> = storage
            .find_websites_by_user("user-1")
            .unwrap()
            .into_iter()
            .map(|w| w.url)
            .collect();
        assert_eq!(urls, vec!["https://a.test", "https://c.test"]);
        assert!(storage.find_websites_by_user("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_update_website_partial() {
        let mut storage = storage();
        let website = storage.create_website("user-1", "https://a.test").unwrap();

        storage
            .update_website(
                website.id,
                &WebsiteUpdate {
                    status: Some(CrawlStatus::Failed),
                    error_message: Some(Some("boom".to_string())),
                    ..Default::default()
                },
            )
            .unwrap();
        let failed = storage.find_website(website.id).unwrap().unwrap();
        assert_eq!(failed.status, CrawlStatus::Failed);
        assert_eq!(failed.error_message.as_deref(), Some("boom"));

        storage
            .update_website(
                website.id,
                &WebsiteUpdate {
                    status: Some(CrawlStatus::Processing),
                    error_message: Some(None),
                    total_pages_found: Some(0),
                    ..Default::default()
                },
            )
            .unwrap();
        let restarted = storage.find_website(website.id).unwrap().unwrap();
        assert_eq!(restarted.status, CrawlStatus::Processing);
        assert_eq!(restarted.error_message, None);
        assert_eq!(restarted.url, "https://a.test");
    }

    #[test]
    fn test_update_website_stores_metadata() {
        let mut storage = storage();
        let website = storage.create_website("user-1", "https://a.test").unwrap();
        let extraction = ExtractionResult {
            title: Some("A".to_string()),
            keywords: vec!["one".to_string()],
            favicon: Some("https://a.test/favicon.ico".to_string()),
            content: "Hello".to_string(),
            word_count: 1,
            ..Default::default()
        };

        storage
            .update_website(
                website.id,
                &WebsiteUpdate {
                    extraction: Some(extraction.clone()),
                    last_scraped_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .unwrap();

        let stored = storage.find_website(website.id).unwrap().unwrap();
        assert_eq!(stored.name.as_deref(), Some("A"));
        assert_eq!(stored.content.as_deref(), Some("Hello"));
        assert!(stored.last_scraped_at.is_some());
        assert_eq!(stored.metadata, Some(WebsiteMetadata::from(&extraction)));
    }

    #[test]
    fn test_update_missing_rows_not_found() {
        let mut storage = storage();
        let website = storage.update_website(42, &WebsiteUpdate::status(CrawlStatus::Failed));
        let page = storage.update_page(42, &PageUpdate::status(CrawlStatus::Failed));

        assert!(matches!(website, Err(StorageError::NotFound(_))));
        assert!(matches!(page, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_create_page_reuses_existing_row() {
        let mut storage = storage();
        let website = storage.create_website("user-1", "https://a.test").unwrap();

        let (first, created) = storage
            .create_page(website.id, &new_page("https://a.test/about", 1))
            .unwrap();
        assert!(created);
        assert_eq!(first.path, "/about");
        assert_eq!(first.status, CrawlStatus::Pending);

        let (second, created) = storage
            .create_page(website.id, &new_page("https://a.test/about", 2))
            .unwrap();
        assert!(!created);
        assert_eq!(second.id, first.id);
        assert_eq!(second.depth, 1);
    }

    #[test]
    fn test_same_url_allowed_under_different_websites() {
        let mut storage = storage();
        let a = storage.create_website("user-1", "https://a.test").unwrap();
        let b = storage.create_website("user-2", "https://a.test").unwrap();

        let (page_a, _) = storage.create_page(a.id, &new_page("https://a.test/x", 1)).unwrap();
        let (page_b, created) = storage.create_page(b.id, &new_page("https://a.test/x", 1)).unwrap();
        assert!(created);
        assert_ne!(page_a.id, page_b.id);
    }

    #[test]
    fn test_create_page_requires_website() {
        let mut storage = storage();
        let result = storage.create_page(99, &new_page("https://a.test/x", 1));
        assert!(matches!(result, Err(StorageError::ConstraintViolation(_))));
    }

    #[test]
    fn test_create_pages_batch() {
        let mut storage = storage();
        let website = storage.create_website("user-1", "https://a.test").unwrap();

        let created = storage
            .create_pages(
                website.id,
                &[
                    new_page("https://a.test/one", 1),
                    new_page("https://a.test/two", 1),
                    new_page("https://a.test/one", 1),
                ],
            )
            .unwrap();

        assert_eq!(created.len(), 3);
        assert!(created[0].1 && created[1].1 && !created[2].1);
        assert_eq!(created[0].0.id, created[2].0.id);
        assert_eq!(storage.find_pages_by_website(website.id, false).unwrap().len(), 2);
    }

    #[test]
    fn test_update_page_with_extraction() {
        let mut storage = storage();
        let website = storage.create_website("user-1", "https://a.test").unwrap();
        let (page, _) = storage
            .create_page(website.id, &new_page("https://a.test/about", 1))
            .unwrap();

        let extraction = ExtractionResult {
            title: Some("About".to_string()),
            content: "About us here".to_string(),
            word_count: 3,
            ..Default::default()
        };
        storage
            .update_page(
                page.id,
                &PageUpdate {
                    status: Some(CrawlStatus::Completed),
                    extraction: Some(extraction.clone()),
                    last_scraped_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .unwrap();

        let stored = storage.find_page(page.id).unwrap().unwrap();
        assert_eq!(stored.status, CrawlStatus::Completed);
        assert_eq!(stored.title.as_deref(), Some("About"));
        assert_eq!(stored.word_count, Some(3));
        assert_eq!(stored.metadata, Some(PageMetadata::from(&extraction)));
        assert!(stored.last_scraped_at.is_some());
    }

    #[test]
    fn test_soft_delete_hides_page() {
        let mut storage = storage();
        let website = storage.create_website("user-1", "https://a.test").unwrap();
        let (keep, _) = storage.create_page(website.id, &new_page("https://a.test/a", 1)).unwrap();
        let (gone, _) = storage.create_page(website.id, &new_page("https://a.test/b", 1)).unwrap();

        storage.soft_delete_page(gone.id, "admin").unwrap();

        let visible = storage.find_pages_by_website(website.id, false).unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, keep.id);
        assert_eq!(storage.find_pages_by_website(website.id, true).unwrap().len(), 2);

        let deleted = storage.find_page(gone.id).unwrap().unwrap();
        assert!(matches!(deleted.deletion, Deletion::Deleted { ref by, .. } if by == "admin"));
    }

    #[test]
    fn test_soft_delete_keeps_first_actor() {
        let mut storage = storage();
        let website = storage.create_website("user-1", "https://a.test").unwrap();
        let (page, _) = storage.create_page(website.id, &new_page("https://a.test/a", 1)).unwrap();

        storage.soft_delete_page(page.id, "first").unwrap();
        storage.soft_delete_page(page.id, "second").unwrap();

        let deleted = storage.find_page(page.id).unwrap().unwrap();
        assert!(matches!(deleted.deletion, Deletion::Deleted { ref by, .. } if by == "first"));
    }

    #[test]
    fn test_soft_delete_missing_page() {
        let mut storage = storage();
        assert!(matches!(
            storage.soft_delete_page(7, "admin"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_count_page_statuses_excludes_deleted() {
        let mut storage = storage();
        let website = storage.create_website("user-1", "https://a.test").unwrap();
        let pages = storage
            .create_pages(
                website.id,
                &[
                    new_page("https://a.test/1", 1),
                    new_page("https://a.test/2", 1),
                    new_page("https://a.test/3", 1),
                    new_page("https://a.test/4", 2),
                ],
            )
            .unwrap();

        storage
            .update_page(pages[0].0.id, &PageUpdate::status(CrawlStatus::Completed))
            .unwrap();
        storage
            .update_page(pages[1].0.id, &PageUpdate::status(CrawlStatus::Failed))
            .unwrap();
        storage
            .update_page(pages[2].0.id, &PageUpdate::status(CrawlStatus::Processing))
            .unwrap();
        storage.soft_delete_page(pages[1].0.id, "admin").unwrap();

        let stats = storage.count_page_statuses(website.id).unwrap();
        assert_eq!(
            stats,
            PageStats {
                total: 3,
                completed: 1,
                pending: 1,
                processing: 1,
                failed: 0,
            }
        );
    }

    #[test]
    fn test_find_page_by_url() {
        let mut storage = storage();
        let website = storage.create_website("user-1", "https://a.test").unwrap();
        storage.create_page(website.id, &new_page("https://a.test/a", 1)).unwrap();

        assert!(storage
            .find_page_by_url(website.id, "https://a.test/a")
            .unwrap()
            .is_some());
        assert!(storage
            .find_page_by_url(website.id, "https://a.test/b")
            .unwrap()
            .is_none());
    }
}
