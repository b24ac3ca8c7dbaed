//! Soft-delete state for pages

use chrono::{DateTime, Utc};

/// Whether a page is visible or has been soft-deleted
///
/// Persisted as the nullable `deleted_at` / `deleted_by` column pair; a row
/// with `deleted_at` set is deleted regardless of `deleted_by`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Deletion {
    #[default]
    Active,
    Deleted { at: DateTime<Utc>, by: String },
}

impl Deletion {
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }

    /// Builds the state from its two database columns
    pub fn from_columns(deleted_at: Option<DateTime<Utc>>, deleted_by: Option<String>) -> Self {
        match deleted_at {
            Some(at) => Self::Deleted {
                at,
                by: deleted_by.unwrap_or_default(),
            },
            None => Self::Active,
        }
    }
}
