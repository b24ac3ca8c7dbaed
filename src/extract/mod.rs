//! HTML extraction without a DOM
//!
//! Pages are read with a set of independent regex extractors rather than a
//! full HTML parser. Each field is pulled separately, so malformed or partial
//! markup degrades to missing fields instead of an error. The trade-off is
//! precision: nested or unusual markup (for example a `<nav>` inside a
//! `<nav>`) can leave stray text in the content.

mod links;
mod meta;
mod text;

pub use links::{
    extract_links, ClassifiedLink, LinkKind, PageLinks, MAX_ALL_LINKS, MAX_EXTERNAL_LINKS,
    MAX_INTERNAL_LINKS,
};
pub use meta::{extract_favicon, extract_headings, extract_meta, extract_title, MAX_HEADINGS};
pub use text::{extract_content, word_count, MAX_CONTENT_CHARS};

use serde::{Deserialize, Serialize};
use url::Url;

/// Structured metadata and content extracted from one HTML document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub favicon: Option<String>,
    pub og_image: Option<String>,
    pub headings: Vec<String>,
    pub all_links: Vec<ClassifiedLink>,
    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,
    pub content: String,
    pub word_count: usize,
}

/// Extracts metadata, links, and visible text from raw HTML
///
/// Never fails: an unparseable `base_url` only disables link, favicon, and
/// image resolution, and missing elements leave their fields empty.
///
/// # Example
///
/// ```
/// use site_seed::extract::extract;
///
/// let html = r#"<html><head><title>Acme</title></head>
///     <body><h1>Welcome</h1><a href="/about">About</a></body></html>"#;
/// let result = extract(html, "https://acme.test/");
///
/// assert_eq!(result.title.as_deref(), Some("Acme"));
/// assert_eq!(result.internal_links, vec!["https://acme.test/about"]);
/// assert_eq!(result.word_count, 2);
/// ```
pub fn extract(html: &str, base_url: &str) -> ExtractionResult {
    let content = extract_content(html);
    let word_count = word_count(&content);
    let title = extract_title(html);
    let headings = extract_headings(html);

    let Ok(base) = Url::parse(base_url) else {
        tracing::debug!("Unparseable base URL {:?}; skipping link resolution", base_url);
        let meta = extract_meta(html, &fallback_base());
        return ExtractionResult {
            title,
            description: meta.description,
            keywords: meta.keywords,
            headings,
            content,
            word_count,
            ..Default::default()
        };
    };

    let meta = extract_meta(html, &base);
    let links = extract_links(html, &base);

    ExtractionResult {
        title,
        description: meta.description,
        keywords: meta.keywords,
        favicon: extract_favicon(html, &base),
        og_image: meta.og_image,
        headings,
        all_links: links.all,
        internal_links: links.internal,
        external_links: links.external,
        content,
        word_count,
    }
}

/// Placeholder base for reading text-only meta fields when the real base is
/// unusable; anything it resolves is discarded
fn fallback_base() -> Url {
    Url::parse("http://invalid.localhost/").expect("static URL is valid")
}
