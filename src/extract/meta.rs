//! Head metadata extractors
//!
//! Each extractor scans the raw document independently and returns an
//! optional value, so a broken `<title>` never affects the description and
//! attribute order inside a tag does not matter.

use crate::extract::text::inline_text;
use crate::url::resolve_absolute;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use url::Url;

/// Maximum number of `<h1>`-`<h3>` texts kept per page
pub const MAX_HEADINGS: usize = 20;

static TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").unwrap());

static META_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<meta\b([^>]*)>").unwrap());

static LINK_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<link\b([^>]*)>").unwrap());

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h([1-3])\b[^>]*>(.*?)</h[1-3]\s*>").unwrap());

/// `name="value"`, `name='value'`, or `name=value`
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .unwrap()
});

/// Parses the attributes of a tag body into a lowercase-keyed map
///
/// The first occurrence of a repeated attribute wins, matching browsers.
pub fn parse_attributes(tag_body: &str) -> HashMap<String, String> {
    let mut attributes = HashMap::new();
    for caps in ATTRIBUTE.captures_iter(tag_body) {
        let name = caps[1].to_ascii_lowercase();
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str())
            .unwrap_or_default();
        attributes
            .entry(name)
            .or_insert_with(|| html_escape::decode_html_entities(value).into_owned());
    }
    attributes
}

/// Extracts the document title from the first `<title>` element
pub fn extract_title(html: &str) -> Option<String> {
    TITLE
        .captures(html)
        .map(|caps| inline_text(&caps[1]))
        .filter(|title| !title.is_empty())
}

/// Collects every `<meta>` tag's attributes
fn meta_tags(html: &str) -> Vec<HashMap<String, String>> {
    META_TAG
        .captures_iter(html)
        .map(|caps| parse_attributes(&caps[1]))
        .collect()
}

/// Finds the `content` of the first meta tag whose `name` or `property`
/// equals `key` (case-insensitive) and is non-empty
fn meta_content(tags: &[HashMap<String, String>], key: &str) -> Option<String> {
    tags.iter()
        .filter(|attrs| {
            ["name", "property"].iter().any(|field| {
                attrs
                    .get(*field)
                    .map(|v| v.trim().eq_ignore_ascii_case(key))
                    .unwrap_or(false)
            })
        })
        .filter_map(|attrs| attrs.get("content"))
        .map(|content| inline_text(content))
        .find(|content| !content.is_empty())
}

/// Head metadata pulled from `<meta>` tags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaTags {
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub og_image: Option<String>,
}

/// Extracts description, keywords, and Open Graph image in one pass over the
/// meta tags
///
/// The description falls back to `og:description` when the plain
/// `description` tag is absent.
pub fn extract_meta(html: &str, base_url: &Url) -> MetaTags {
    let tags = meta_tags(html);

    let description =
        meta_content(&tags, "description").or_else(|| meta_content(&tags, "og:description"));

    let keywords = meta_content(&tags, "keywords")
        .map(|raw| split_keywords(&raw))
        .unwrap_or_default();

    let og_image = meta_content(&tags, "og:image")
        .or_else(|| meta_content(&tags, "og:image:url"))
        .and_then(|src| resolve_absolute(&src, base_url))
        .map(|url| url.to_string());

    MetaTags {
        description,
        keywords,
        og_image,
    }
}

/// Splits a comma-separated keyword list, dropping blanks and duplicates
fn split_keywords(raw: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for keyword in raw.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        if !keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword)) {
            keywords.push(keyword.to_string());
        }
    }
    keywords
}

/// Extracts the favicon URL from `<link rel="icon">` variants
///
/// Prefers a plain `icon`/`shortcut icon` declaration over
/// `apple-touch-icon`. No `/favicon.ico` default is assumed.
pub fn extract_favicon(html: &str, base_url: &Url) -> Option<String> {
    let mut touch_icon = None;

    for caps in LINK_TAG.captures_iter(html) {
        let attrs = parse_attributes(&caps[1]);
        let Some(href) = attrs.get("href") else {
            continue;
        };
        let rel = attrs
            .get("rel")
            .map(|r| r.to_ascii_lowercase())
            .unwrap_or_default();

        let mut tokens = rel.split_whitespace();
        if tokens.clone().any(|t| t == "icon") {
            if let Some(url) = resolve_absolute(href, base_url) {
                return Some(url.to_string());
            }
        } else if touch_icon.is_none() && tokens.any(|t| t.starts_with("apple-touch-icon")) {
            touch_icon = resolve_absolute(href, base_url).map(|url| url.to_string());
        }
    }

    touch_icon
}

/// Extracts up to [`MAX_HEADINGS`] non-empty `<h1>`-`<h3>` texts in document
/// order
pub fn extract_headings(html: &str) -> Vec<String> {
    HEADING
        .captures_iter(html)
        .map(|caps| inline_text(&caps[2]))
        .filter(|text| !text.is_empty())
        .take(MAX_HEADINGS)
        .collect()
}
