use proptest::prelude::*;
use tmxmaker::{escape, escape_segment};

// Only the four named entities are protected on a second pass, so the
// alphabet leaves out `'` and `\`, whose numeric references are escaped again.
proptest! {
    #[test]
    fn escape_is_idempotent(text in "[a-z &<>\"]{0,40}") {
        let once = escape(&text);
        prop_assert_eq!(escape(&once), once.clone());
        prop_assert!(!once.contains('<'));
        prop_assert!(!once.contains('"'));
    }

    #[test]
    fn escape_leaves_named_entities_alone(
        parts in prop::collection::vec(
            prop::sample::select(vec!["&amp;", "&lt;", "&gt;", "&quot;", "abc", " "]),
            0..12,
        )
    ) {
        let text = parts.concat();
        prop_assert_eq!(escape(&text), text);
    }

    #[test]
    fn escaped_segment_reads_back(text in "\\PC{0,40}") {
        let escaped = escape_segment(&text);
        let unescaped = quick_xml::escape::unescape(&escaped).unwrap();
        prop_assert_eq!(unescaped.as_ref(), text.as_str());
    }
}

#[test]
fn escape_twice_reescapes_numeric_references() {
    assert_eq!(escape("it's"), "it&#39;s");
    assert_eq!(escape(&escape("it's")), "it&amp;#39;s");
    assert_eq!(escape(&escape(r"a\b")), "a&amp;#92;b");
}
