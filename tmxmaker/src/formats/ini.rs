//! Support for `.ini` localization files such as `crashreporter.ini`.
//!
//! ```ini
//! ; This file is in the UTF-8 encoding
//! [Strings]
//! CrashReporterTitle=Crash Reporter
//! ```
//!
//! Section headers only group keys; entity ids are the bare keys.

use std::io::BufRead;

use crate::{
    error::Error,
    traits::Parser,
    types::{Entity, EntityList},
};

/// Represents a parsed `.ini` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// Section names in file order.
    pub sections: Vec<String>,
    pub entities: Vec<Entity>,
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut sections = Vec::new();
        let mut entities = Vec::new();
        let mut pending_comment: Option<String> = None;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();

            if trimmed.is_empty() {
                continue;
            }
            if let Some(comment) = trimmed.strip_prefix(';').or_else(|| trimmed.strip_prefix('#')) {
                pending_comment = Some(comment.trim().to_string());
                continue;
            }
            if trimmed.starts_with('[') {
                let name = trimmed
                    .strip_suffix(']')
                    .map(|s| s[1..].trim())
                    .ok_or_else(|| {
                        Error::parse_error("", index + 1, "unterminated section header")
                    })?;
                sections.push(name.to_string());
                pending_comment = None;
                continue;
            }

            let (key, value) = trimmed.split_once('=').ok_or_else(|| {
                Error::parse_error("", index + 1, "expected `key=value` or `[section]`")
            })?;
            entities.push(Entity {
                id: key.trim().to_string(),
                value: value.trim().to_string(),
                comment: pending_comment.take(),
            });
        }

        Ok(Format { sections, entities })
    }
}

impl From<Format> for EntityList {
    fn from(value: Format) -> Self {
        EntityList::new(value.entities)
    }
}
