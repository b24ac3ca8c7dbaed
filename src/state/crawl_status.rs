/// Lifecycle status shared by websites and pages
///
/// Both follow `pending -> processing -> {completed, failed}`. A finished
/// record may be sent back to `processing` by a new crawl or a refetch.
use std::fmt;

/// Represents where a website or page is in its crawl lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlStatus {
    /// Created, never fetched
    Pending,

    /// A fetch for this record is in flight
    Processing,

    /// Fetched and extracted successfully
    Completed,

    /// The last fetch failed; the error message explains why
    Failed,
}

impl CrawlStatus {
    /// Returns true if the transition `self -> next` is allowed
    ///
    /// `processing -> processing` is rejected so two crawls can never own the
    /// same website at once.
    pub fn can_transition_to(&self, next: CrawlStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Processing)
                | (Self::Processing, Self::Completed)
                | (Self::Processing, Self::Failed)
                | (Self::Completed, Self::Processing)
                | (Self::Failed, Self::Processing)
        )
    }

    /// Converts the status to its database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Parses a status from its database string representation
    ///
    /// Returns None if the string doesn't match any known status.
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Returns all statuses
    pub fn all() -> [Self; 4] {
        [
            Self::Pending,
            Self::Processing,
            Self::Completed,
            Self::Failed,
        ]
    }
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_db_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_string_roundtrip() {
        for status in CrawlStatus::all() {
            assert_eq!(
                CrawlStatus::from_db_string(status.to_db_string()),
                Some(status)
            );
        }
        assert_eq!(CrawlStatus::from_db_string("queued"), None);
    }

    #[test]
    fn test_forward_transitions() {
        assert!(CrawlStatus::Pending.can_transition_to(CrawlStatus::Processing));
        assert!(CrawlStatus::Processing.can_transition_to(CrawlStatus::Completed));
        assert!(CrawlStatus::Processing.can_transition_to(CrawlStatus::Failed));
    }

    #[test]
    fn test_restart_from_terminal() {
        assert!(CrawlStatus::Completed.can_transition_to(CrawlStatus::Processing));
        assert!(CrawlStatus::Failed.can_transition_to(CrawlStatus::Processing));
    }

    #[test]
    fn test_rejected_transitions() {
        assert!(!CrawlStatus::Processing.can_transition_to(CrawlStatus::Processing));
        assert!(!CrawlStatus::Pending.can_transition_to(CrawlStatus::Completed));
        assert!(!CrawlStatus::Completed.can_transition_to(CrawlStatus::Failed));
        assert!(!CrawlStatus::Failed.can_transition_to(CrawlStatus::Pending));
    }

    #[test]
    fn test_display() {
        assert_eq!(CrawlStatus::Processing.to_string(), "processing");
    }
}
