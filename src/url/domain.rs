use url::Url;

/// Extracts the lowercase hostname from a URL string
///
/// Returns an empty string instead of an error when the URL cannot be parsed
/// or has no host, so callers can compare domains without a failure branch.
///
/// # Examples
///
/// ```
/// use site_seed::url::domain_of;
///
/// assert_eq!(domain_of("https://EXAMPLE.COM/path"), "example.com");
/// assert_eq!(domain_of("https://example.com:8080/"), "example.com");
/// assert_eq!(domain_of("not a url"), "");
/// ```
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .unwrap_or_default()
}

/// Extracts the path component of a URL string
///
/// Defaults to `/` when the path is empty or the URL cannot be parsed.
pub fn path_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(u) if !u.path().is_empty() => u.path().to_string(),
        _ => "/".to_string(),
    }
}
