//! Visible body text extraction
//!
//! Strips non-content blocks and markup from raw HTML, decodes entities, and
//! collapses whitespace. Works on arbitrary fragments: an unclosed `<script>`
//! swallows the rest of the document rather than leaking code into the text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of characters kept from a page's body text
pub const MAX_CONTENT_CHARS: usize = 10_000;

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?(?:-->|$)").unwrap());

static BODY_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<body\b[^>]*>").unwrap());

static BODY_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</body\s*>").unwrap());

static HEAD_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<head\b[^>]*>.*?(?:</head\s*>|$)").unwrap());

/// Raw-text elements; an unclosed one runs to the end of the input
static RAW_TEXT_BLOCKS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["script", "style", "noscript", "template"]
        .iter()
        .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?(?:</{tag}\s*>|$)")).unwrap())
        .collect()
});

/// Page chrome removed only when properly closed
static CHROME_BLOCKS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["nav", "header", "footer"]
        .iter()
        .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")).unwrap())
        .collect()
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Extracts the visible body text of a document, truncated to
/// [`MAX_CONTENT_CHARS`] characters
pub fn extract_content(html: &str) -> String {
    let without_comments = COMMENT.replace_all(html, " ");
    let body = body_section(&without_comments);

    let mut text = body.to_string();
    for block in RAW_TEXT_BLOCKS.iter().chain(CHROME_BLOCKS.iter()) {
        text = block.replace_all(&text, " ").into_owned();
    }

    let stripped = TAG.replace_all(&text, " ");
    let decoded = html_escape::decode_html_entities(&stripped);
    let collapsed = collapse_whitespace(&decoded);

    truncate_chars(&collapsed, MAX_CONTENT_CHARS)
}

/// Counts whitespace-delimited words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Converts an inline markup fragment (heading, title) to plain text
pub fn inline_text(fragment: &str) -> String {
    let stripped = TAG.replace_all(fragment, " ");
    let decoded = html_escape::decode_html_entities(&stripped);
    collapse_whitespace(&decoded)
}

/// Collapses runs of whitespace (including non-breaking spaces) to one space
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Returns the `<body>` contents, or the document minus `<head>` when there
/// is no body tag
fn body_section(html: &str) -> std::borrow::Cow<'_, str> {
    match BODY_OPEN.find(html) {
        Some(open) => {
            let rest = &html[open.end()..];
            let end = BODY_CLOSE.find(rest).map(|m| m.start()).unwrap_or(rest.len());
            std::borrow::Cow::Borrowed(&rest[..end])
        }
        None => HEAD_BLOCK.replace_all(html, " "),
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => text[..byte_index].trim_end().to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_collapses_whitespace() {
        let html = "<html><body><p>Hello   <b>world</b></p>\n\n<p>again</p></body></html>";
        assert_eq!(extract_content(html), "Hello world again");
    }

    #[test]
    fn test_removes_scripts_styles_and_chrome() {
        let html = r#"<body>
            <header><h1>Site</h1></header>
            <nav><a href="/">Home</a></nav>
            <script>var x = "<p>not text</p>";</script>
            <style>p { color: red; }</style>
            <main>Real content</main>
            <footer>Copyright</footer>
        </body>"#;
        assert_eq!(extract_content(html), "Real content");
    }

    #[test]
    fn test_head_is_not_content() {
        let html = "<html><head><title>Title</title></head><body>Body</body></html>";
        assert_eq!(extract_content(html), "Body");

        let no_body = "<head><title>Title</title></head><p>Loose text</p>";
        assert_eq!(extract_content(no_body), "Loose text");
    }

    #[test]
    fn test_decodes_entities_after_stripping() {
        let html = "<body>Fish &amp; Chips&nbsp;&nbsp;&lt;b&gt; &#169; &#x41;</body>";
        assert_eq!(extract_content(html), "Fish & Chips <b> © A");
    }

    #[test]
    fn test_unclosed_script_swallows_rest() {
        let html = "<body>Before<script>function() { broken";
        assert_eq!(extract_content(html), "Before");
    }

    #[test]
    fn test_comments_removed() {
        let html = "<body>A<!-- hidden <p>x</p> -->B</body>";
        assert_eq!(extract_content(html), "A B");
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let html = format!("<body>{}</body>", "é".repeat(MAX_CONTENT_CHARS + 50));
        let content = extract_content(&html);
        assert_eq!(content.chars().count(), MAX_CONTENT_CHARS);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("one two  three\nfour"), 4);
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert_eq!(extract_content(""), "");
        assert_eq!(extract_content("<<<>>>"), ">>");
        assert_eq!(extract_content("<p><div></span></body>"), "");
    }
}
