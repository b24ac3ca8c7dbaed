//! Output module for rendering crawl state
//!
//! This module handles:
//! - Website status summaries with per-status page counts
//! - Page listings

pub mod stats;

pub use stats::{format_page_list, format_status_report, print_status_report};
