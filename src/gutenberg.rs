// WHY: single place for Project Gutenberg URL conventions shared by the fetcher,
// persistence and CLI

use regex_automata::meta::Regex;
use std::sync::LazyLock;

pub const GUTENBERG_HOST: &str = "www.gutenberg.org";

static EBOOK_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ebooks/(\d+)|/epub/(\d+)(?:/|$)").expect("ebook id pattern is valid")
});

/// Canonical plain-text download URL for an ebook id
///
/// # Example
/// ```
/// use gutenberg_anchor::gutenberg::plaintext_url;
/// assert_eq!(plaintext_url("11"), "https://www.gutenberg.org/cache/epub/11/pg11.txt");
/// ```
pub fn plaintext_url(ebook_id: &str) -> String {
    format!("https://{GUTENBERG_HOST}/cache/epub/{ebook_id}/pg{ebook_id}.txt")
}

/// Bibliographic page URL for an ebook id
pub fn ebook_page_url(ebook_id: &str) -> String {
    format!("https://{GUTENBERG_HOST}/ebooks/{ebook_id}")
}

/// Numeric ebook id from a page URL (`ebooks/11`) or a file URL (`/epub/11/`)
pub fn extract_ebook_id(url: &str) -> Option<&str> {
    let mut caps = EBOOK_ID_RE.create_captures();
    EBOOK_ID_RE.captures(url, &mut caps);
    if !caps.is_match() {
        return None;
    }
    caps.get_group(1)
        .or_else(|| caps.get_group(2))
        .map(|span| &url[span.range()])
}

/// Accept either a bare id or a URL and return the page URL to fetch
pub fn resolve_page_url(id_or_url: &str) -> String {
    if !id_or_url.is_empty() && id_or_url.chars().all(|c| c.is_ascii_digit()) {
        ebook_page_url(id_or_url)
    } else {
        id_or_url.to_string()
    }
}
