// Property tests for the normaliser, position map and locator
// WHY: the whitespace rules interact in ways hand-picked examples miss

use gutenberg_anchor::anchor::{is_space, locate_anchor, normalise, AnchorKind, PositionMap};
use proptest::prelude::*;

/// Separator classes: every member of a class normalises to the same string
const SEPARATOR_CLASSES: &[&[&str]] = &[
    &[" ", "\t", "   ", " \t "],
    &["\n"],
    &["\n\n", "\n\n\n", "\r\n", "\r\r\n\n"],
];

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

/// Words with one separator class per gap
fn document() -> impl Strategy<Value = (Vec<String>, Vec<usize>)> {
    (2usize..24).prop_flat_map(|n| {
        (
            prop::collection::vec(word(), n),
            prop::collection::vec(0..SEPARATOR_CLASSES.len(), n - 1),
        )
    })
}

fn join(words: &[String], classes: &[usize], variant: usize) -> String {
    let mut out = String::new();
    for (i, w) in words.iter().enumerate() {
        if i > 0 {
            let class = SEPARATOR_CLASSES[classes[i - 1]];
            out.push_str(class[(variant + i) % class.len()]);
        }
        out.push_str(w);
    }
    out
}

proptest! {
    #[test]
    fn normalise_is_idempotent(s in any::<String>()) {
        let once = normalise(&s);
        let twice = normalise(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalise_only_changes_whitespace(s in any::<String>()) {
        let strip = |t: &str| t.chars().filter(|c| !is_space(*c)).collect::<String>();
        prop_assert_eq!(strip(&normalise(&s)), strip(&s));
    }

    #[test]
    fn position_map_points_at_identical_characters(s in any::<String>()) {
        let normalised = normalise(&s);
        let map = PositionMap::build(&s, &normalised);
        let non_ws = normalised.chars().filter(|c| !is_space(*c)).count();
        prop_assert_eq!(map.len(), non_ws);

        let mut previous = None;
        for (norm, orig) in map.iter() {
            prop_assert_eq!(normalised[norm..].chars().next(), s[orig..].chars().next());
            if let Some(prev) = previous {
                prop_assert!(orig > prev);
            }
            previous = Some(orig);
        }
    }

    #[test]
    fn located_offset_starts_a_whitespace_variant_of_the_marker(
        (words, classes) in document(),
        range in (0usize..100, 1usize..6),
        variant in 0usize..4,
    ) {
        let text = join(&words, &classes, 0);
        let start = range.0 % words.len();
        let end = (start + range.1).min(words.len());
        let marker = join(&words[start..end], &classes[start..end - 1], variant);

        let found = locate_anchor(&text, &marker, AnchorKind::Start);
        prop_assert!(found.is_some(), "marker {:?} not found in {:?}", marker, text);
        let found = found.unwrap();
        prop_assert!(normalise(&text[found.offset..]).starts_with(&normalise(&marker)));
        prop_assert_eq!(found.len, marker.len());
    }
}
