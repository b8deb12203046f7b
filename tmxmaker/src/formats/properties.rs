//! Support for `.properties` localization files.
//!
//! Follows the Java properties grammar as used across the Mozilla tree:
//! `key = value` or `key: value`, `#`/`!` comments, backslash line
//! continuations, and `\uXXXX` escapes.

use std::io::BufRead;

use crate::{
    error::Error,
    traits::Parser,
    types::{Entity, EntityList},
};

/// Represents a parsed `.properties` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    pub entities: Vec<Entity>,
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;

        let mut entities = Vec::new();
        let mut pending_comment: Option<String> = None;
        let mut index = 0;

        while index < lines.len() {
            let first_line = index + 1;
            let trimmed = lines[index].trim_start();
            index += 1;

            if trimmed.is_empty() {
                pending_comment = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with('!') {
                pending_comment = Some(trimmed[1..].trim().to_string());
                continue;
            }

            let mut logical = trimmed.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.get(index) {
                    Some(next) => {
                        logical.push_str(next.trim_start());
                        index += 1;
                    }
                    None => break,
                }
            }

            let (raw_key, raw_value) = split_key_value(&logical);
            let key = unescape(raw_key, first_line)?;
            let value = unescape(raw_value, first_line)?;

            entities.push(Entity {
                id: key,
                value,
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

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Splits a logical line at the first unescaped `=`, `:` or whitespace.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..i], line[i + 1..].trim_start()),
            c if c.is_whitespace() => {
                let rest = line[i..].trim_start();
                let rest = rest
                    .strip_prefix('=')
                    .or_else(|| rest.strip_prefix(':'))
                    .unwrap_or(rest);
                return (&line[..i], rest.trim_start());
            }
            _ => {}
        }
    }
    (line, "")
}

fn unescape(raw: &str, line: usize) -> Result<String, Error> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        Error::parse_error("", line, format!("invalid unicode escape `\\u{hex}`"))
                    })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}
