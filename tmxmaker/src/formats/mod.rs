//! All supported localization file formats for tmxmaker.
//!
//! This module re-exports the main types for each format and provides
//! the [`FormatType`] enum for generic format handling across the crate.

pub mod dtd;
pub mod inc;
pub mod ini;
pub mod properties;

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

// Reexporting the formats for easier access
pub use dtd::Format as DtdFormat;
pub use inc::Format as IncFormat;
pub use ini::Format as IniFormat;
pub use properties::Format as PropertiesFormat;

use crate::{Error, traits::Parser, types::EntityList};

/// Represents all supported localization file formats for generic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormatType {
    /// XUL `.dtd` entity declarations.
    Dtd,
    /// Java-style `.properties` files.
    Properties,
    /// `.ini` files with `[section]` headers.
    Ini,
    /// `.inc` files made of `#define` lines.
    Inc,
}

impl FormatType {
    /// Every format, in registration order.
    pub const ALL: [FormatType; 4] = [
        FormatType::Dtd,
        FormatType::Properties,
        FormatType::Ini,
        FormatType::Inc,
    ];

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Dtd => "dtd",
            FormatType::Properties => "properties",
            FormatType::Ini => "ini",
            FormatType::Inc => "inc",
        }
    }

    /// Infers the format from a file extension, if it is one we know.
    ///
    /// # Example
    /// ```rust
    /// use tmxmaker::formats::FormatType;
    /// assert_eq!(FormatType::from_path("a/b/browser.dtd"), Some(FormatType::Dtd));
    /// assert_eq!(FormatType::from_path("icon.png"), None);
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<FormatType> {
        let extension = path.as_ref().extension()?.to_str()?;
        FormatType::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(extension))
    }

    /// Reads one file of this format into its entity list.
    pub fn read_entities<P: AsRef<Path>>(&self, path: P) -> Result<EntityList, Error> {
        let path = path.as_ref();
        Ok(match self {
            FormatType::Dtd => DtdFormat::read_from(path)?.into(),
            FormatType::Properties => PropertiesFormat::read_from(path)?.into(),
            FormatType::Ini => IniFormat::read_from(path)?.into(),
            FormatType::Inc => IncFormat::read_from(path)?.into(),
        })
    }
}

impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Accepts the extension names, case-insensitively and with an optional
/// leading dot.
impl FromStr for FormatType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('.').to_ascii_lowercase();
        FormatType::ALL
            .into_iter()
            .find(|format| format.extension() == normalized)
            .ok_or_else(|| Error::UnknownFormat(s.trim().to_string()))
    }
}

/// How much of each entity a package read keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectType {
    /// Ids and values only.
    #[default]
    EntityList,
    /// Ids, values and the comments preceding each entity.
    Entity,
}

impl FromStr for ObjectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entitylist" => Ok(ObjectType::EntityList),
            "entity" => Ok(ObjectType::Entity),
            other => Err(Error::UnsupportedFormat(format!(
                "unknown object type `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_type_display() {
        assert_eq!(FormatType::Dtd.to_string(), "dtd");
        assert_eq!(FormatType::Properties.to_string(), "properties");
        assert_eq!(FormatType::Ini.to_string(), "ini");
        assert_eq!(FormatType::Inc.to_string(), "inc");
    }

    #[test]
    fn test_format_type_from_str() {
        assert_eq!(FormatType::from_str("dtd").unwrap(), FormatType::Dtd);
        assert_eq!(FormatType::from_str("DTD").unwrap(), FormatType::Dtd);
        assert_eq!(
            FormatType::from_str(" .properties ").unwrap(),
            FormatType::Properties
        );
        assert_eq!(FormatType::from_str("ini").unwrap(), FormatType::Ini);
        assert_eq!(FormatType::from_str("inc").unwrap(), FormatType::Inc);
    }

    #[test]
    fn test_format_type_from_str_invalid() {
        assert!(FormatType::from_str("po").is_err());
        assert!(FormatType::from_str("").is_err());
    }

    #[test]
    fn test_format_type_from_path() {
        assert_eq!(
            FormatType::from_path("toolkit/chrome/global/intl.properties"),
            Some(FormatType::Properties)
        );
        assert_eq!(
            FormatType::from_path("browser/defines.inc"),
            Some(FormatType::Inc)
        );
        assert_eq!(
            FormatType::from_path("browser/README.INI"),
            Some(FormatType::Ini)
        );
        assert_eq!(FormatType::from_path("browser/Makefile"), None);
        assert_eq!(FormatType::from_path("browser/icon.png"), None);
    }

    #[test]
    fn test_object_type_from_str() {
        assert_eq!(
            ObjectType::from_str("entitylist").unwrap(),
            ObjectType::EntityList
        );
        assert_eq!(ObjectType::from_str("Entity").unwrap(), ObjectType::Entity);
        assert!(ObjectType::from_str("blob").is_err());
    }
}
