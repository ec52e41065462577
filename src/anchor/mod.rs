// WHY: anchor location is pure string work, kept apart from the network and
// filesystem collaborators so it can be called from anywhere without setup

pub mod extract;
pub mod locator;
pub mod normalization;
pub mod occurrence;
pub mod position_map;

// Re-export core types
pub use extract::{extract_between, extract_gutenberg_body, GUTENBERG_END_MARKER, GUTENBERG_START_MARKER};
pub use locator::{
    locate_anchor, locate_anchor_with, AnchorKind, AnchorMatch, FullMarker, MatchStrategy,
    SearchContext, SingleLine, DEFAULT_STRATEGIES,
};
pub use normalization::{is_space, normalise, normalise_into};
pub use occurrence::pick_best_occurrence;
pub use position_map::PositionMap;
