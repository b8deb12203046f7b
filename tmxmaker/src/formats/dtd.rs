//! Support for XUL `.dtd` localization files.
//!
//! Only general entity declarations carry strings:
//!
//! ```xml
//! <!-- LOCALIZATION NOTE: shown in the tab strip -->
//! <!ENTITY newTab.label "New Tab">
//! <!ENTITY closeTab.label 'Close Tab'>
//! ```
//!
//! Parameter entities (`<!ENTITY % brandDTD SYSTEM "...">`), their
//! references and external entities (`<!ENTITY license SYSTEM "...">`) are
//! skipped.

use std::io::BufRead;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    traits::Parser,
    types::{Entity, EntityList},
};

lazy_static! {
    static ref ENTITY_DECL_REGEX: Regex = Regex::new(
        r#"(?s)\A<!ENTITY\s+(%\s+)?([^\s"'%>]+)\s+(?:(SYSTEM|PUBLIC\s+"[^"]*")\s+)?(?:"([^"]*)"|'([^']*)')\s*>"#
    )
    .unwrap();
}

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";
const ENTITY_OPEN: &str = "<!ENTITY";

/// Represents a parsed `.dtd` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    pub entities: Vec<Entity>,
}

impl Parser for Format {
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let mut entities = Vec::new();
        let mut pending_comment: Option<String> = None;
        let mut pos = 0;

        while let Some(offset) = next_markup(&content[pos..]) {
            let start = pos + offset;
            let rest = &content[start..];

            if rest.starts_with(COMMENT_OPEN) {
                let body = &rest[COMMENT_OPEN.len()..];
                let close = body.find(COMMENT_CLOSE).ok_or_else(|| {
                    Error::parse_error("", line_of(&content, start), "unterminated comment")
                })?;
                pending_comment = Some(body[..close].trim().to_string());
                pos = start + COMMENT_OPEN.len() + close + COMMENT_CLOSE.len();
                continue;
            }

            let captures = ENTITY_DECL_REGEX.captures(rest).ok_or_else(|| {
                Error::parse_error(
                    "",
                    line_of(&content, start),
                    "malformed entity declaration",
                )
            })?;
            pos = start + captures[0].len();

            if captures.get(1).is_some() || captures.get(3).is_some() {
                // parameter or external entity
                pending_comment = None;
                continue;
            }

            let value = captures
                .get(4)
                .or_else(|| captures.get(5))
                .map(|m| m.as_str())
                .unwrap_or_default();
            entities.push(Entity {
                id: captures[2].to_string(),
                value: value.to_string(),
                comment: pending_comment.take(),
            });
        }

        Ok(Format { entities })
    }
}

impl From<Format> for EntityList {
    fn from(value: Format) -> Self {
        EntityList::new(value.entities)
    }
}

/// Offset of the next comment or entity declaration, whichever comes first.
fn next_markup(s: &str) -> Option<usize> {
    match (s.find(COMMENT_OPEN), s.find(ENTITY_OPEN)) {
        (Some(c), Some(e)) => Some(c.min(e)),
        (c, e) => c.or(e),
    }
}

fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;

    #[test]
    fn test_parse_double_and_single_quoted_entities() {
        let content = r#"
<!ENTITY newTab.label "New Tab">
<!ENTITY closeTab.label 'Close "this" Tab'>
"#;
        let parsed = Format::from_str(content).unwrap();
        assert_eq!(parsed.entities.len(), 2);
        assert_eq!(parsed.entities[0].id, "newTab.label");
        assert_eq!(parsed.entities[0].value, "New Tab");
        assert_eq!(parsed.entities[1].id, "closeTab.label");
        assert_eq!(parsed.entities[1].value, r#"Close "this" Tab"#);
    }

    #[test]
    fn test_comment_attaches_to_following_entity() {
        let content = r#"
<!-- LOCALIZATION NOTE (tab.label): keep it short -->
<!ENTITY tab.label "Tab">
<!ENTITY other.label "Other">
"#;
        let parsed = Format::from_str(content).unwrap();
        assert_eq!(
            parsed.entities[0].comment.as_deref(),
            Some("LOCALIZATION NOTE (tab.label): keep it short")
        );
        assert_eq!(parsed.entities[1].comment, None);
    }

    #[test]
    fn test_commented_out_entity_is_ignored() {
        let content = r#"<!-- <!ENTITY old.label "Old"> -->
<!ENTITY new.label "New">"#;
        let parsed = Format::from_str(content).unwrap();
        assert_eq!(parsed.entities.len(), 1);
        assert_eq!(parsed.entities[0].id, "new.label");
    }

    #[test]
    fn test_multiline_value_is_kept_verbatim() {
        let content = "<!ENTITY help.text \"First line\n  second line\">";
        let parsed = Format::from_str(content).unwrap();
        assert_eq!(parsed.entities[0].value, "First line\n  second line");
    }

    #[test]
    fn test_parameter_entities_are_skipped() {
        let content = r#"
<!ENTITY % brandDTD SYSTEM "chrome://branding/locale/brand.dtd">
%brandDTD;
<!ENTITY about.label "About &brandShortName;">
"#;
        let parsed = Format::from_str(content).unwrap();
        assert_eq!(parsed.entities.len(), 1);
        assert_eq!(parsed.entities[0].value, "About &brandShortName;");
    }

    #[test]
    fn test_external_entities_are_skipped() {
        let content = r#"
<!ENTITY license SYSTEM "chrome://global/locale/license.dtd">
<!ENTITY legal PUBLIC "-//MOZ//LEGAL" "legal.dtd">
<!ENTITY kept.label "Kept">
"#;
        let parsed = Format::from_str(content).unwrap();
        assert_eq!(parsed.entities.len(), 1);
        assert_eq!(parsed.entities[0].id, "kept.label");
    }

    #[test]
    fn test_empty_value() {
        let parsed = Format::from_str(r#"<!ENTITY empty.label "">"#).unwrap();
        assert_eq!(parsed.entities[0].value, "");
    }

    #[test]
    fn test_unterminated_entity_reports_line() {
        let content = "<!ENTITY ok \"fine\">\n\n<!ENTITY broken \"never closed>\n";
        match Format::from_str(content) {
            Err(Error::Parse { line, message, .. }) => {
                assert_eq!(line, 3);
                assert!(message.contains("malformed"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_comment_is_an_error() {
        assert!(Format::from_str("<!-- dangling").is_err());
    }

    #[test]
    fn test_into_entity_list() {
        let parsed = Format::from_str(r#"<!ENTITY a "1"><!ENTITY b "2">"#).unwrap();
        let list: EntityList = parsed.into();
        assert_eq!(list.get("b"), Some("2"));
    }
}
