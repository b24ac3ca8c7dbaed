//! Status reports for the CLI
//!
//! This module renders website status and page listings as plain text.

use crate::service::StatusReport;
use crate::state::{CrawlStatus, Deletion};
use crate::storage::PageRecord;
use std::fmt;

/// Renders a website's status and page counts
pub fn format_status_report(report: &StatusReport) -> String {
    StatusView(report).to_string()
}

/// Prints a status report to stdout
pub fn print_status_report(report: &StatusReport) {
    print!("{}", StatusView(report));
}

/// Renders one line per page: id, status, depth, URL, and title or error
pub fn format_page_list(pages: &[PageRecord]) -> String {
    PageListView(pages).to_string()
}

struct StatusView<'a>(&'a StatusReport);

impl fmt::Display for StatusView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let website = &self.0.website;
        let stats = &self.0.page_stats;

        writeln!(f, "=== Website {} ===\n", website.id)?;
        writeln!(f, "Overview:")?;
        writeln!(f, "  URL: {}", website.url)?;
        writeln!(f, "  User: {}", website.user_id)?;
        writeln!(
            f,
            "  Primary: {}",
            if website.is_primary { "yes" } else { "no" }
        )?;
        if let Some(name) = &website.name {
            writeln!(f, "  Title: {}", name)?;
        }
        writeln!(f, "  Status: {}", website.status)?;
        if let Some(error) = &website.error_message {
            writeln!(f, "  Error: {}", error)?;
        }
        if let Some(scraped_at) = website.last_scraped_at {
            writeln!(f, "  Last scraped: {}", scraped_at.to_rfc3339())?;
        }
        writeln!(f)?;

        writeln!(f, "Pages:")?;
        writeln!(f, "  Found: {}", website.total_pages_found)?;
        writeln!(f, "  Scraped (seed included): {}", website.total_pages_scraped)?;
        for (status, count) in [
            (CrawlStatus::Completed, stats.completed),
            (CrawlStatus::Failed, stats.failed),
            (CrawlStatus::Processing, stats.processing),
            (CrawlStatus::Pending, stats.pending),
        ] {
            writeln!(
                f,
                "  {}: {} ({:.1}%)",
                status,
                count,
                percentage(count, stats.total)
            )?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Success Rate: {:.1}% ({} / {} pages successfully scraped)",
            percentage(stats.completed, stats.total),
            stats.completed,
            stats.total
        )
    }
}

struct PageListView<'a>(&'a [PageRecord]);

impl fmt::Display for PageListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No pages.");
        }

        for page in self.0 {
            let detail = match (&page.status, &page.error_message, &page.title) {
                (CrawlStatus::Failed, Some(error), _) => format!("error: {}", error),
                (_, _, Some(title)) => title.clone(),
                _ => String::new(),
            };
            let deleted = match &page.deletion {
                Deletion::Deleted { by, .. } => format!(" [deleted by {}]", by),
                Deletion::Active => String::new(),
            };
            writeln!(
                f,
                "{:>6}  {:<10}  d{}  {}  {}{}",
                page.id, page.status, page.depth, page.url, detail, deleted
            )?;
        }
        Ok(())
    }
}

fn percentage(count: u64, total: u64) -> f64 {
    if total > 0 {
        (count as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{PageStats, WebsiteRecord};
    use chrono::Utc;

    fn website() -> WebsiteRecord {
        WebsiteRecord {
            id: 7,
            user_id: "user-1".to_string(),
            url: "https://jane.design".to_string(),
            name: Some("Jane Doe".to_string()),
            description: None,
            content: None,
            metadata: None,
            status: CrawlStatus::Completed,
            error_message: None,
            last_scraped_at: None,
            total_pages_found: 4,
            total_pages_scraped: 4,
            is_primary: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn page(id: i64, status: CrawlStatus, error: Option<&str>) -> PageRecord {
        PageRecord {
            id,
            website_id: 7,
            url: format!("https://jane.design/{}", id),
            path: format!("/{}", id),
            title: Some(format!("Page {}", id)),
            description: None,
            content: None,
            metadata: None,
            word_count: None,
            status,
            error_message: error.map(str::to_string),
            last_scraped_at: None,
            depth: 1,
            deletion: Deletion::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_report_contents() {
        let report = StatusReport {
            website: website(),
            page_stats: PageStats {
                total: 4,
                completed: 3,
                pending: 0,
                processing: 0,
                failed: 1,
            },
        };

        let text = format_status_report(&report);
        assert!(text.contains("=== Website 7 ==="));
        assert!(text.contains("Status: completed"));
        assert!(text.contains("Primary: yes"));
        assert!(text.contains("completed: 3 (75.0%)"));
        assert!(text.contains("failed: 1 (25.0%)"));
        assert!(text.contains("Success Rate: 75.0% (3 / 4"));
    }

    #[test]
    fn test_status_report_without_pages() {
        let report = StatusReport {
            website: website(),
            page_stats: PageStats::default(),
        };
        let text = format_status_report(&report);
        assert!(text.contains("Success Rate: 0.0% (0 / 0"));
    }

    #[test]
    fn test_page_list() {
        let text = format_page_list(&[
            page(1, CrawlStatus::Completed, None),
            page(2, CrawlStatus::Failed, Some("HTTP 500")),
        ]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("https://jane.design/1"));
        assert!(lines[0].ends_with("Page 1"));
        assert!(lines[1].contains("error: HTTP 500"));
        assert_eq!(format_page_list(&[]), "No pages.\n");
    }

    #[test]
    fn test_failed_website_and_deleted_page() {
        let mut failed = website();
        failed.status = CrawlStatus::Failed;
        failed.error_message = Some("Fetch error: HTTP 503".to_string());
        let text = format_status_report(&StatusReport {
            website: failed,
            page_stats: PageStats::default(),
        });
        assert!(text.contains("Status: failed"));
        assert!(text.contains("Error: Fetch error: HTTP 503"));
        assert!(text.ends_with("pages successfully scraped)\n"));

        let mut hidden = page(3, CrawlStatus::Completed, None);
        hidden.deletion = Deletion::Deleted {
            at: Utc::now(),
            by: "curator".to_string(),
        };
        let listing = format_page_list(&[hidden]);
        assert!(listing.trim_end().ends_with("Page 3 [deleted by curator]"));
    }
}
