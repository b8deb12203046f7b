//! XML escaping helpers.
//!
//! [`escape`] makes arbitrary text safe for any XML text node or attribute
//! without double-escaping entities that are already present.
//! [`escape_segment`] is the narrower escape applied to TMX `<seg>` content.

use std::borrow::Cow;

/// Named entities that [`escape`] leaves alone, paired with the private
/// placeholder they hide behind during the escaping pass.
const PROTECTED_ENTITIES: [(&str, &str); 4] = [
    ("&quot;", "\u{E000}quot;"),
    ("&amp;", "\u{E000}amp;"),
    ("&lt;", "\u{E000}lt;"),
    ("&gt;", "\u{E000}gt;"),
];

/// Escapes `& < > ' "` and backslash, keeping existing `&amp; &lt; &gt; &quot;`
/// entities intact.
///
/// # Example
/// ```rust
/// use tmxmaker::escape::escape;
/// assert_eq!(escape(r#"a < b & "c""#), "a &lt; b &amp; &quot;c&quot;");
/// assert_eq!(escape("already &amp; escaped"), "already &amp; escaped");
/// assert_eq!(escape(r"C:\dir"), "C:&#92;dir");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = text.to_string();
    for (entity, placeholder) in PROTECTED_ENTITIES {
        out = out.replace(entity, placeholder);
    }

    // `&` first, so the entities produced below are not escaped again
    out = out
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&#39;")
        .replace('"', "&quot;")
        .replace('\\', "&#92;");

    for (entity, placeholder) in PROTECTED_ENTITIES {
        out = out.replace(placeholder, entity);
    }
    out
}

/// Escapes only `&`, `<` and `>`, the characters that matter inside a text
/// node. Existing entities are escaped again: `&lt;` becomes `&amp;lt;`.
///
/// # Example
/// ```rust
/// use tmxmaker::escape::escape_segment;
/// assert_eq!(escape_segment("Hi &lt; all"), "Hi &amp;lt; all");
/// assert_eq!(escape_segment(r#"say "hi""#), r#"say "hi""#);
/// ```
pub fn escape_segment(text: &str) -> Cow<'_, str> {
    quick_xml::escape::partial_escape(text)
}
