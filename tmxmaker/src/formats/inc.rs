//! Support for `.inc` preprocessor definition files such as `defines.inc`.
//!
//! ```text
//! #filter emptyLines
//! # LOCALIZATION NOTE: contributors, one per line
//! #define MOZ_LANGPACK_CREATOR mozilla.org
//! #unfilter emptyLines
//! ```
//!
//! Only `#define` lines carry strings; other directives are ignored.

use std::io::BufRead;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    traits::Parser,
    types::{Entity, EntityList},
};

lazy_static! {
    static ref DEFINE_REGEX: Regex = Regex::new(r"^#define\s+(\S+)(?:\s+(.*))?$").unwrap();
}

/// Represents a parsed `.inc` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    pub entities: Vec<Entity>,
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut entities = Vec::new();
        let mut pending_comment: Option<String> = None;

        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();

            if let Some(captures) = DEFINE_REGEX.captures(trimmed) {
                entities.push(Entity {
                    id: captures[1].to_string(),
                    value: captures
                        .get(2)
                        .map(|m| m.as_str().trim_end().to_string())
                        .unwrap_or_default(),
                    comment: pending_comment.take(),
                });
            } else if let Some(comment) = trimmed.strip_prefix("# ") {
                pending_comment = Some(comment.trim().to_string());
            } else if trimmed != "#" {
                pending_comment = None;
            }
        }

        Ok(Format { entities })
    }
}

impl From<Format> for EntityList {
    fn from(value: Format) -> Self {
        EntityList::new(value.entities)
    }
}
