//! Anchor discovery and internal/external classification

use crate::extract::meta::parse_attributes;
use crate::url::{resolve_absolute, resolve_against};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use url::Url;

/// Caps on each link list kept per page
pub const MAX_ALL_LINKS: usize = 100;
pub const MAX_INTERNAL_LINKS: usize = 100;
pub const MAX_EXTERNAL_LINKS: usize = 50;

static ANCHOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<a\b([^>]*)>").unwrap());

/// Bare boolean `download` attribute, which the key=value parser cannot see
static DOWNLOAD_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|\s)download(?:\s*=|\s|/|$)").unwrap());

/// Schemes that never point at a page
const IGNORED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:", "data:", "sms:", "ftp:"];

/// Whether a link stays on the page's own host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Internal,
    External,
}

/// An absolute link found on a page together with its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLink {
    pub url: String,
    pub kind: LinkKind,
}

/// The three link lists produced for one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLinks {
    /// Every http(s) link, fragment removed, deduplicated
    pub all: Vec<ClassifiedLink>,
    /// Canonical same-host links that pass the skip filter
    pub internal: Vec<String>,
    /// Links to other hosts, fragment removed
    pub external: Vec<String>,
}

/// Collects and classifies the `href` of every `<a>` tag
///
/// Anchors with a `download` attribute, fragment-only hrefs, and
/// non-navigational schemes are ignored. Each list is deduplicated and
/// capped on its own, so a page with 300 external links still yields its
/// internal ones.
pub fn extract_links(html: &str, base_url: &Url) -> PageLinks {
    let mut links = PageLinks::default();
    let mut seen_all = HashSet::new();
    let mut seen_internal = HashSet::new();
    let mut seen_external = HashSet::new();

    for caps in ANCHOR.captures_iter(html) {
        if DOWNLOAD_ATTR.is_match(&caps[1]) {
            continue;
        }
        let attrs = parse_attributes(&caps[1]);
        let Some(href) = attrs.get("href").map(|h| h.trim()) else {
            continue;
        };
        if is_ignored_href(href) {
            continue;
        }

        let Some(absolute) = resolve_absolute(href, base_url) else {
            continue;
        };
        let kind = if absolute.host_str() == base_url.host_str() {
            LinkKind::Internal
        } else {
            LinkKind::External
        };

        if links.all.len() < MAX_ALL_LINKS && seen_all.insert(absolute.to_string()) {
            links.all.push(ClassifiedLink {
                url: absolute.to_string(),
                kind,
            });
        }

        match kind {
            LinkKind::Internal => {
                if links.internal.len() >= MAX_INTERNAL_LINKS {
                    continue;
                }
                if let Some(canonical) = resolve_against(href, base_url) {
                    if seen_internal.insert(canonical.clone()) {
                        links.internal.push(canonical);
                    }
                }
            }
            LinkKind::External => {
                if links.external.len() < MAX_EXTERNAL_LINKS
                    && seen_external.insert(absolute.to_string())
                {
                    links.external.push(absolute.to_string());
                }
            }
        }
    }

    links
}

fn is_ignored_href(href: &str) -> bool {
    if href.is_empty() || href.starts_with('#') {
        return true;
    }
    let lower = href.to_ascii_lowercase();
    IGNORED_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}
