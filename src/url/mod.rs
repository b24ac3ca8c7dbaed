//! URL handling module for Site-Seed
//!
//! This module owns the single canonical URL form used for de-duplication:
//! seed normalization, relative link resolution, same-origin checks, and
//! skip-pattern filtering all live here so the crawler never compares two
//! spellings of the same page.

mod domain;
mod filter;
mod normalize;

// Re-export main functions
pub use domain::{domain_of, path_of};
pub use filter::is_skipped;
pub use normalize::{
    canonicalize, normalize_seed, resolve_absolute, resolve_against, resolve_internal,
};

/// Returns true if both URLs resolve to the same non-empty hostname
pub fn same_domain(a: &str, b: &str) -> bool {
    let domain = domain_of(a);
    !domain.is_empty() && domain == domain_of(b)
}
