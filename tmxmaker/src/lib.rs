#![forbid(unsafe_code)]
//! Bilingual translation memories from Mozilla localization repositories.
//!
//! Reads a source-language (`en-US`) tree and a locale tree, pairs every
//! string that exists in both by file and id, and writes the pairs as a
//! TMX 1.1 document that OmegaT can load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::{fs::File, io::BufWriter, path::Path};
//! use tmxmaker::{Codec, DirectorySelection, RepositoryWalker, TmxWriter};
//!
//! let (locale, source) = (Path::new("l10n/fr"), Path::new("l10n/en-US"));
//! let codec = Codec::new();
//! let walker = RepositoryWalker::new(&codec, locale, source);
//!
//! let mut writer = TmxWriter::new(BufWriter::new(File::create("fr.tmx")?));
//! writer.write_header("en-US")?;
//! for directory in DirectorySelection::for_repository("gaia").resolve(locale, source)? {
//!     for unit in walker.walk(&directory)? {
//!         writer.write_unit(&unit, "en-US", "fr")?;
//!     }
//! }
//! writer.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Supported Formats
//!
//! - **`.dtd`**: XUL entity declarations
//! - **`.properties`**: Java-style key/value files
//! - **`.ini`**: sectioned key/value files
//! - **`.inc`**: `#define` preprocessor files

pub mod codec;
pub mod error;
pub mod escape;
pub mod flatten;
pub mod formats;
pub mod tmx;
pub mod traits;
pub mod types;
pub mod walker;

// Re-export most used types for easy consumption
pub use crate::{
    codec::Codec,
    error::Error,
    escape::{escape, escape_segment},
    flatten::flatten,
    formats::{FormatType, ObjectType},
    tmx::{TmxWriter, WriterState},
    types::{
        Blob, Entity, EntityList, FlatStringMap, Package, PackageItem, StringKey,
        TranslationUnit,
    },
    walker::{DirectorySelection, RepositoryKind, RepositoryWalker, pair_strings},
};
