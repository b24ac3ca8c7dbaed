use crate::url::filter::is_skipped;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Matches an explicit scheme prefix such as `https://` or `ftp://`
static SCHEME_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("scheme pattern is valid")
});

/// Prefixes `https://` onto a user-submitted seed that has no scheme
///
/// Nothing else about the string is touched: validation of the result is the
/// caller's job. Empty input is passed through unchanged.
///
/// # Examples
///
/// ```
/// use site_seed::url::normalize_seed;
///
/// assert_eq!(normalize_seed("example.com"), "https://example.com");
/// assert_eq!(normalize_seed("http://example.com"), "http://example.com");
/// ```
pub fn normalize_seed(raw: &str) -> String {
    if raw.is_empty() || SCHEME_PREFIX.is_match(raw) {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    }
}

/// Resolves a link candidate against a base URL and returns its canonical form
/// when it is an internal, crawlable page
///
/// Returns `None` when:
/// - the base or the candidate cannot be resolved
/// - the result is not http(s)
/// - the host differs from the base host (cross-origin)
/// - the URL matches a skip pattern (assets, tracking parameters,
///   fragment-only links, account/admin areas)
///
/// On success the fragment and query are dropped and trailing slashes removed,
/// so `https://example.com/about/?x=1#team` becomes `https://example.com/about`.
///
/// # Examples
///
/// ```
/// use site_seed::url::resolve_internal;
///
/// let base = "https://example.com/blog/";
/// assert_eq!(
///     resolve_internal("../about/", base),
///     Some("https://example.com/about".to_string())
/// );
/// assert_eq!(resolve_internal("https://other.com/x", base), None);
/// ```
pub fn resolve_internal(candidate: &str, base: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    resolve_against(candidate, &base)
}

/// Same as [`resolve_internal`] for callers that already hold a parsed base
pub fn resolve_against(candidate: &str, base: &Url) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() || candidate.starts_with('#') {
        return None;
    }

    let resolved = base.join(candidate).ok()?;
    if !is_http(&resolved) {
        return None;
    }

    // Url lower-cases hosts on parse, so a plain comparison is case-insensitive
    if resolved.host_str() != base.host_str() {
        return None;
    }

    if is_skipped(&resolved) {
        return None;
    }

    Some(canonical_form(&resolved))
}

/// Resolves any http(s) reference (page, image, icon) to an absolute URL
///
/// Unlike [`resolve_against`] this keeps cross-origin targets and the query
/// string, dropping only the fragment. Used for favicons, Open Graph images,
/// and the unfiltered link list.
pub fn resolve_absolute(candidate: &str, base: &Url) -> Option<Url> {
    let candidate = candidate.trim();
    if candidate.is_empty() || candidate.starts_with('#') {
        return None;
    }

    let mut resolved = base.join(candidate).ok()?;
    if !is_http(&resolved) || resolved.host_str().is_none() {
        return None;
    }
    resolved.set_fragment(None);
    Some(resolved)
}

/// Canonicalizes an absolute URL string without applying skip patterns
///
/// Used for the seed itself, which must enter the visited set in the same
/// form its own links resolve to.
pub fn canonicalize(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    if !is_http(&url) || url.host_str().is_none() {
        return None;
    }
    Some(canonical_form(&url))
}

/// Builds `scheme://host[:port]/path` with every trailing slash removed
///
/// The explicit port is kept so two services on one host stay distinct.
pub(crate) fn canonical_form(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    let path = url.path().trim_end_matches('/');

    match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, path),
        None => format!("{}://{}{}", url.scheme(), host, path),
    }
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
