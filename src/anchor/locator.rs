// WHY: normalise, search and translate stay separate steps so each can be tested
// on its own; the locator only sequences them

use tracing::debug;

use super::normalization::{is_space, normalise};
use super::occurrence::pick_best_occurrence;
use super::position_map::PositionMap;

/// Which boundary an anchor marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorKind {
    /// Start anchors skip table-of-contents duplicates
    #[default]
    Start,
    /// End anchors take the last occurrence
    End,
}

/// Location of a marker in the original text
///
/// `offset` and `len` are byte coordinates for slicing the `&str`;
/// `char_offset` and `char_len` count characters and are what reports and
/// the CLI print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorMatch {
    pub offset: usize,
    pub len: usize,
    pub char_offset: usize,
    pub char_len: usize,
}

impl AnchorMatch {
    /// Byte offset one past the matched marker
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Matched region of `text`, if it falls on character boundaries
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.offset..self.end())
    }

    /// Legacy `(offset, length)` pair in characters, `(-1, 0)` for a missing anchor
    pub fn as_pair(found: Option<Self>) -> (i64, usize) {
        match found {
            Some(m) => (m.char_offset as i64, m.char_len),
            None => (-1, 0),
        }
    }
}

/// Per-call search state: the normalised view and its map back to the original
pub struct SearchContext<'a> {
    pub original: &'a str,
    pub normalised: String,
    pub map: PositionMap,
}

impl<'a> SearchContext<'a> {
    pub fn new(original: &'a str) -> Self {
        let normalised = normalise(original);
        let map = PositionMap::build(original, &normalised);
        Self {
            original,
            normalised,
            map,
        }
    }

    /// Translate a normalised hit back to the original text
    ///
    /// `marker` is the string whose length the match reports.
    pub fn resolve(&self, norm_idx: usize, marker: &str) -> Option<AnchorMatch> {
        let offset = self.map.get(norm_idx)?;
        Some(AnchorMatch {
            offset,
            len: marker.len(),
            char_offset: self.original[..offset].chars().count(),
            char_len: marker.chars().count(),
        })
    }
}

/// One way of turning a marker into a match
pub trait MatchStrategy {
    fn name(&self) -> &'static str;

    fn find(&self, ctx: &SearchContext<'_>, marker: &str, kind: AnchorKind) -> Option<AnchorMatch>;
}

/// Match the whole normalised marker
pub struct FullMarker;

impl MatchStrategy for FullMarker {
    fn name(&self) -> &'static str {
        "full_marker"
    }

    fn find(&self, ctx: &SearchContext<'_>, marker: &str, kind: AnchorKind) -> Option<AnchorMatch> {
        let norm_marker = normalise(marker);
        if norm_marker.is_empty() {
            return None;
        }

        let norm_idx = match kind {
            AnchorKind::Start => {
                let positions = all_occurrences(&ctx.normalised, &norm_marker);
                pick_best_occurrence(&positions, &ctx.normalised, norm_marker.len())?
            }
            AnchorKind::End => ctx.normalised.rfind(&norm_marker)?,
        };

        // Length of the marker as the caller wrote it
        ctx.resolve(norm_idx, marker)
    }
}

/// Reduce the marker to its first (start) or last (end) non-blank line
pub struct SingleLine;

impl MatchStrategy for SingleLine {
    fn name(&self) -> &'static str {
        "single_line"
    }

    fn find(&self, ctx: &SearchContext<'_>, marker: &str, kind: AnchorKind) -> Option<AnchorMatch> {
        let mut lines = marker.split('\n').filter(|line| !line.chars().all(is_space));
        let line = match kind {
            AnchorKind::Start => lines.next()?,
            AnchorKind::End => lines.last()?,
        };

        let line_marker = normalise(line);
        let positions = all_occurrences(&ctx.normalised, &line_marker);
        let norm_idx = match kind {
            AnchorKind::Start => pick_best_occurrence(&positions, &ctx.normalised, line_marker.len())?,
            AnchorKind::End => *positions.last()?,
        };

        // Length of the reduced, normalised line
        ctx.resolve(norm_idx, &line_marker)
    }
}

/// Strategies in the order they are attempted
pub const DEFAULT_STRATEGIES: &[&dyn MatchStrategy] = &[&FullMarker, &SingleLine];

/// Locate `marker` inside `text`, tolerating whitespace differences
///
/// Returns the match in original-text coordinates, or `None` when no
/// strategy can place the marker.
pub fn locate_anchor(text: &str, marker: &str, kind: AnchorKind) -> Option<AnchorMatch> {
    locate_anchor_with(text, marker, kind, DEFAULT_STRATEGIES)
}

/// Locate with an explicit strategy list
pub fn locate_anchor_with(
    text: &str,
    marker: &str,
    kind: AnchorKind,
    strategies: &[&dyn MatchStrategy],
) -> Option<AnchorMatch> {
    let ctx = SearchContext::new(text);

    strategies.iter().find_map(|strategy| {
        let found = strategy.find(&ctx, marker, kind);
        if let Some(m) = found {
            debug!(strategy = strategy.name(), offset = m.char_offset, len = m.char_len, ?kind, "Anchor located");
        }
        found
    })
}

/// Non-overlapping match offsets, left to right
fn all_occurrences(haystack: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }
    haystack.match_indices(needle).map(|(idx, _)| idx).collect()
}
