// WHY: matching runs on a canonical whitespace form so that \r\n files, reflowed
// paragraphs and doubled spaces still line up with the canonical anchor text

/// Normalise whitespace for anchor matching
///
/// - carriage returns become newlines
/// - runs of three or more newlines collapse to exactly two
/// - runs of non-newline whitespace collapse to a single space
/// - leading and trailing whitespace is removed
pub fn normalise(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalise_into(text, &mut result);
    result
}

/// Normalise into supplied buffer to avoid allocation
pub fn normalise_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    // Pending runs are flushed when the run ends, in source order, so a
    // newline run separated by spaces never merges with its neighbour.
    let mut pending_newlines = 0usize;
    let mut pending_space = false;

    for ch in text.chars() {
        match ch {
            '\r' | '\n' => {
                if pending_space {
                    buffer.push(' ');
                    pending_space = false;
                }
                pending_newlines += 1;
            }
            _ if is_space(ch) => {
                flush_newlines(buffer, &mut pending_newlines);
                pending_space = true;
            }
            _ => {
                flush_newlines(buffer, &mut pending_newlines);
                if pending_space {
                    buffer.push(' ');
                    pending_space = false;
                }
                buffer.push(ch);
            }
        }
    }

    // Trailing runs are trimmed below, nothing to flush.
    let trimmed = buffer.trim();
    if trimmed.len() != buffer.len() {
        let start = buffer.len() - buffer.trim_start().len();
        let end = start + trimmed.len();
        buffer.truncate(end);
        buffer.drain(..start);
    }
}

/// Whitespace as the normaliser sees it
///
/// Unicode whitespace plus the ASCII information separators U+001C..U+001F,
/// which line-oriented text tools also treat as separators.
pub fn is_space(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '\u{1c}'..='\u{1f}')
}

fn flush_newlines(buffer: &mut String, pending: &mut usize) {
    for _ in 0..(*pending).min(2) {
        buffer.push('\n');
    }
    *pending = 0;
}
