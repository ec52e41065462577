// WHY: matches are found in the normalised view but callers slice the original,
// so every non-whitespace character needs a way back to its source offset

use super::normalization::is_space;

/// Correspondence from normalised byte offsets to original byte offsets
///
/// Defined exactly at the non-whitespace characters of the normalised text.
/// Entries are stored in increasing normalised order and their original
/// offsets are strictly increasing as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionMap {
    entries: Vec<(usize, usize)>,
}

impl PositionMap {
    /// Build the map in one linear pass over both strings
    ///
    /// `original` and `normalised` must differ only in whitespace. A mismatch
    /// trips a debug assertion; release builds stop mapping where the
    /// original runs out of characters.
    pub fn build(original: &str, normalised: &str) -> Self {
        let mut entries = Vec::with_capacity(normalised.len());
        let mut cursor = original.char_indices();

        'walk: for (norm_idx, ch) in normalised.char_indices() {
            if is_space(ch) {
                continue;
            }
            loop {
                match cursor.next() {
                    Some((orig_idx, orig_ch)) if !is_space(orig_ch) => {
                        debug_assert_eq!(
                            orig_ch, ch,
                            "original and normalised text differ beyond whitespace at {orig_idx}"
                        );
                        entries.push((norm_idx, orig_idx));
                        break;
                    }
                    Some(_) => continue,
                    None => break 'walk,
                }
            }
        }

        Self { entries }
    }

    /// Original offset for the character at normalised offset `norm_idx`
    pub fn get(&self, norm_idx: usize) -> Option<usize> {
        self.entries
            .binary_search_by_key(&norm_idx, |&(norm, _)| norm)
            .ok()
            .map(|pos| self.entries[pos].1)
    }

    pub fn contains(&self, norm_idx: usize) -> bool {
        self.get(norm_idx).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(normalised, original)` pairs in increasing order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.entries.iter().copied()
    }
}
