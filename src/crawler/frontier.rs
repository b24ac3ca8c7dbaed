//! Breadth-first crawl frontier
//!
//! This module handles:
//! - FIFO ordering of discovered URLs
//! - The request-scoped visited set
//! - Depth and page-budget limits

use std::collections::{HashSet, VecDeque};

/// A URL waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedPage {
    /// Canonical URL
    pub url: String,

    /// Link distance from the seed (the seed's own links are depth 1)
    pub depth: u32,
}

/// Frontier for one crawl run
///
/// URLs are marked visited when admitted, not when fetched, so a URL linked
/// from many pages is queued once. Every in-depth URL is admitted; the page
/// budget only limits how many are dequeued, so a run can find more pages
/// than it fetches.
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<QueuedPage>,
    visited: HashSet<String>,
    max_depth: u32,
    max_pages: u32,
    admitted: u32,
    resolved: u32,
}

impl Frontier {
    /// Creates a frontier whose visited set already holds the seed
    pub fn new(seed: &str, max_depth: u32, max_pages: u32) -> Self {
        let mut visited = HashSet::new();
        visited.insert(seed.to_string());

        Self {
            queue: VecDeque::new(),
            visited,
            max_depth,
            max_pages,
            admitted: 0,
            resolved: 0,
        }
    }

    /// Queues the URLs not seen before at `depth`
    ///
    /// Returns the newly admitted entries in order. Nothing is admitted past
    /// the maximum depth.
    pub fn admit<'a, I>(&mut self, urls: I, depth: u32) -> Vec<QueuedPage>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut admitted = Vec::new();
        if depth > self.max_depth {
            return admitted;
        }

        for url in urls {
            if !self.visited.insert(url.clone()) {
                continue;
            }

            let entry = QueuedPage {
                url: url.clone(),
                depth,
            };
            self.queue.push_back(entry.clone());
            self.admitted += 1;
            admitted.push(entry);
        }

        admitted
    }

    /// Pops the next page to fetch
    ///
    /// Returns `None` when the queue is drained or the budget is spent.
    pub fn next(&mut self) -> Option<QueuedPage> {
        while self.resolved < self.max_pages {
            let entry = self.queue.pop_front()?;
            if entry.depth > self.max_depth {
                continue;
            }
            return Some(entry);
        }
        None
    }

    /// Counts one fetched page, successful or not, against the budget
    pub fn record_resolved(&mut self) {
        self.resolved += 1;
    }

    /// Whether links found at `depth` may be followed
    pub fn can_expand(&self, depth: u32) -> bool {
        depth < self.max_depth
    }

    pub fn resolved(&self) -> u32 {
        self.resolved
    }

    pub fn admitted(&self) -> u32 {
        self.admitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new("https://a.test", 2, 50);
        frontier.admit(&urls(&["https://a.test/1", "https://a.test/2"]), 1);
        frontier.admit(&urls(&["https://a.test/3"]), 2);

        let order: Vec<String> = std::iter::from_fn(|| frontier.next())
            .map(|entry| entry.url)
            .collect();
        assert_eq!(
            order,
            vec!["https://a.test/1", "https://a.test/2", "https://a.test/3"]
        );
    }

    #[test]
    fn test_seed_and_duplicates_never_admitted() {
        let mut frontier = Frontier::new("https://a.test", 2, 50);
        let first = frontier.admit(
            &urls(&["https://a.test", "https://a.test/x", "https://a.test/x"]),
            1,
        );
        let second = frontier.admit(&urls(&["https://a.test/x"]), 2);

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(frontier.admitted(), 1);
    }

    #[test]
    fn test_depth_limit() {
        let mut frontier = Frontier::new("https://a.test", 2, 50);
        assert!(frontier.admit(&urls(&["https://a.test/deep"]), 3).is_empty());
        assert!(frontier.can_expand(1));
        assert!(!frontier.can_expand(2));
    }

    #[test]
    fn test_budget_does_not_limit_admission() {
        let mut frontier = Frontier::new("https://a.test", 2, 3);
        let many: Vec<String> = (0..10).map(|i| format!("https://a.test/{}", i)).collect();

        assert_eq!(frontier.admit(&many, 1).len(), 10);
        assert_eq!(frontier.admit(&urls(&["https://a.test/late"]), 2).len(), 1);
        assert_eq!(frontier.admitted(), 11);

        let mut fetched = 0;
        while frontier.next().is_some() {
            frontier.record_resolved();
            fetched += 1;
        }
        assert_eq!(fetched, 3);
    }

    #[test]
    fn test_budget_stops_dequeue() {
        let mut frontier = Frontier::new("https://a.test", 2, 2);
        frontier.admit(&urls(&["https://a.test/1", "https://a.test/2"]), 1);

        assert!(frontier.next().is_some());
        frontier.record_resolved();
        assert!(frontier.next().is_some());
        frontier.record_resolved();

        assert_eq!(frontier.next(), None);
        assert_eq!(frontier.resolved(), 2);
    }
}
