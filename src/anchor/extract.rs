// WHY: the usual reason to locate anchors is to cut the book body out of the
// licence boilerplate around it

use super::locator::{locate_anchor, AnchorKind};

/// Opening boilerplate marker of a Project Gutenberg plain-text ebook
pub const GUTENBERG_START_MARKER: &str = "*** START OF THE PROJECT GUTENBERG EBOOK";

/// Closing boilerplate marker of a Project Gutenberg plain-text ebook
pub const GUTENBERG_END_MARKER: &str = "*** END OF THE PROJECT GUTENBERG EBOOK";

/// Text strictly between the start anchor and the end anchor
///
/// Returns `None` when either anchor is missing, the end anchor precedes the
/// end of the start anchor, or the bounds do not fall on character boundaries.
pub fn extract_between<'a>(text: &'a str, start_marker: &str, end_marker: &str) -> Option<&'a str> {
    let start = locate_anchor(text, start_marker, AnchorKind::Start)?;
    let end = locate_anchor(text, end_marker, AnchorKind::End)?;

    if end.offset < start.end() {
        return None;
    }
    text.get(start.end()..end.offset)
}

/// Body of a Gutenberg ebook with the marker lines and surrounding blank lines removed
pub fn extract_gutenberg_body(text: &str) -> Option<&str> {
    let start = locate_anchor(text, GUTENBERG_START_MARKER, AnchorKind::Start)?;
    let end = locate_anchor(text, GUTENBERG_END_MARKER, AnchorKind::End)?;

    // The marker line carries the book title and closing asterisks
    let after_marker = text.get(start.end()..)?;
    let body_start = match after_marker.find('\n') {
        Some(newline) => start.end() + newline + 1,
        None => text.len(),
    };

    if end.offset < body_start {
        return None;
    }
    text.get(body_start..end.offset).map(str::trim)
}
