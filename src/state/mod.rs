//! State module for tracking crawl progress
//!
//! This module owns the persisted state machine of a website crawl.
//!
//! # Components
//!
//! - `CrawlStatus`: Lifecycle of websites and pages (pending, processing, completed, failed)
//! - `Deletion`: Soft-delete state of a page
//! - `CrawlTracker`: Applies validated transitions and counters through storage

mod crawl_status;
mod deletion;
mod tracker;

// Re-export main types
pub use crawl_status::CrawlStatus;
pub use deletion::Deletion;
pub use tracker::{CrawlTracker, SharedStorage};
