// WHY: a real heading is followed by a blank line, while the same phrase in a
// table of contents runs straight into more text

/// Pick the first match that is immediately followed by a blank line
///
/// `positions` are match offsets in the normalised `text`, `anchor_len` is the
/// byte length of the normalised anchor. Falls back to the first position when
/// none qualifies; returns `None` only for an empty slice.
pub fn pick_best_occurrence(positions: &[usize], text: &str, anchor_len: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    positions
        .iter()
        .copied()
        .find(|&idx| {
            let end = idx + anchor_len;
            bytes.get(end..end + 2) == Some(b"\n\n".as_slice())
        })
        .or_else(|| positions.first().copied())
}
