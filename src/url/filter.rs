use url::Url;

/// File extensions that never lead to an HTML page worth extracting
const SKIPPED_EXTENSIONS: &[&str] = &[
    // documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "rtf", "csv",
    // archives and binaries
    "zip", "rar", "7z", "tar", "gz", "tgz", "exe", "dmg", "apk", "msi", "iso",
    // images
    "jpg", "jpeg", "png", "gif", "svg", "webp", "ico", "bmp", "tiff", "avif",
    // audio and video
    "mp3", "mp4", "wav", "ogg", "webm", "avi", "mov", "mkv", "m4a",
    // site assets and feeds
    "css", "js", "json", "xml", "rss", "atom", "woff", "woff2", "ttf", "eot", "map",
];

/// Query parameters that mark a link as a tracking variant of another page
const TRACKING_PARAMS: &[&str] = &[
    "fbclid", "gclid", "dclid", "msclkid", "mc_eid", "mc_cid", "_ga", "_gl", "ref", "igshid",
];

/// Path segments of areas that hold no public profile content
const SKIPPED_SEGMENTS: &[&str] = &[
    "admin",
    "wp-admin",
    "wp-login.php",
    "login",
    "logout",
    "signin",
    "sign-in",
    "signout",
    "sign-out",
    "signup",
    "sign-up",
    "register",
    "cart",
    "checkout",
    "account",
    "my-account",
    "password-reset",
];

/// Checks whether a resolved URL matches any skip pattern
///
/// A URL is skipped when its last path segment has a non-HTML file extension,
/// its query carries a tracking parameter, or any path segment names an
/// admin, authentication, cart, or account area. Comparisons are
/// case-insensitive.
pub fn is_skipped(url: &Url) -> bool {
    has_skipped_extension(url) || has_tracking_params(url) || has_skipped_segment(url)
}

/// Checks the final path segment for a binary/document/asset extension
fn has_skipped_extension(url: &Url) -> bool {
    let last_segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();

    match last_segment.rsplit_once('.') {
        Some((_, extension)) => {
            let extension = extension.to_ascii_lowercase();
            SKIPPED_EXTENSIONS.contains(&extension.as_str())
        }
        None => false,
    }
}

/// Checks whether any query parameter is a tracking parameter
fn has_tracking_params(url: &Url) -> bool {
    url.query_pairs()
        .any(|(key, _)| is_tracking_param(&key.to_ascii_lowercase()))
}

/// Checks if a query parameter is a tracking parameter
fn is_tracking_param(key: &str) -> bool {
    // utm_* catches every campaign parameter variant
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key)
}

/// Checks whether any path segment names a non-content area
fn has_skipped_segment(url: &Url) -> bool {
    url.path_segments()
        .map(|segments| {
            segments
                .filter(|segment| !segment.is_empty())
                .any(|segment| {
                    let segment = segment.to_ascii_lowercase();
                    SKIPPED_SEGMENTS.contains(&segment.as_str())
                })
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skipped(url: &str) -> bool {
        is_skipped(&Url::parse(url).unwrap())
    }

    #[test]
    fn test_content_pages_pass() {
        assert!(!skipped("https://example.com/"));
        assert!(!skipped("https://example.com/about"));
        assert!(!skipped("https://example.com/blog/post-1"));
        assert!(!skipped("https://example.com/page.html"));
        assert!(!skipped("https://example.com/index.php"));
        assert!(!skipped("https://example.com/pricing?plan=pro"));
    }

    #[test]
    fn test_document_and_asset_extensions() {
        assert!(skipped("https://example.com/files/cv.pdf"));
        assert!(skipped("https://example.com/logo.PNG"));
        assert!(skipped("https://example.com/static/app.js"));
        assert!(skipped("https://example.com/archive.zip"));
        assert!(skipped("https://example.com/feed.xml"));
    }

    #[test]
    fn test_extension_only_checked_on_last_segment() {
        assert!(!skipped("https://example.com/v1.pdf/overview"));
    }

    #[test]
    fn test_tracking_params() {
        assert!(skipped("https://example.com/about?utm_source=x"));
        assert!(skipped("https://example.com/about?utm_custom=x"));
        assert!(skipped("https://example.com/about?fbclid=abc"));
        assert!(skipped("https://example.com/about?page=2&gclid=abc"));
        assert!(skipped("https://example.com/about?UTM_MEDIUM=email"));
    }

    #[test]
    fn test_non_content_paths() {
        assert!(skipped("https://example.com/admin"));
        assert!(skipped("https://example.com/wp-admin/options.php"));
        assert!(skipped("https://example.com/login"));
        assert!(skipped("https://example.com/Logout"));
        assert!(skipped("https://example.com/shop/cart"));
        assert!(skipped("https://example.com/checkout/step-1"));
        assert!(skipped("https://example.com/my-account/orders"));
    }

    #[test]
    fn test_segment_match_is_whole_segment() {
        assert!(!skipped("https://example.com/administration-services"));
        assert!(!skipped("https://example.com/accounting"));
        assert!(!skipped("https://example.com/blog/login-tips-for-users"));
    }
}
