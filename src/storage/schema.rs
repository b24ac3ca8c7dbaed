//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the site-seed database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Submitted websites, one crawl state machine each
CREATE TABLE IF NOT EXISTS websites (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    url TEXT NOT NULL,
    name TEXT,
    description TEXT,
    content TEXT,
    metadata TEXT,
    status TEXT NOT NULL,
    error_message TEXT,
    last_scraped_at TEXT,
    total_pages_found INTEGER NOT NULL DEFAULT 0,
    total_pages_scraped INTEGER NOT NULL DEFAULT 0,
    is_primary INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_websites_user ON websites(user_id);
CREATE INDEX IF NOT EXISTS idx_websites_status ON websites(status);

-- At most one primary website per user
CREATE UNIQUE INDEX IF NOT EXISTS idx_websites_primary
    ON websites(user_id) WHERE is_primary = 1;

-- Pages discovered under a website
CREATE TABLE IF NOT EXISTS pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    website_id INTEGER NOT NULL REFERENCES websites(id) ON DELETE CASCADE,
    url TEXT NOT NULL,
    path TEXT NOT NULL,
    title TEXT,
    description TEXT,
    content TEXT,
    metadata TEXT,
    word_count INTEGER,
    status TEXT NOT NULL,
    error_message TEXT,
    last_scraped_at TEXT,
    depth INTEGER NOT NULL,
    deleted_at TEXT,
    deleted_by TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE(website_id, url)
);

CREATE INDEX IF NOT EXISTS idx_pages_website ON pages(website_id);
CREATE INDEX IF NOT EXISTS idx_pages_status ON pages(website_id, status);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
