//! This module provides the `Codec` struct, which knows which localization
//! formats are registered and reads whole directory trees into [`Package`]s.
//!
//! Files with a registered extension are parsed into entity lists, other
//! files become blobs, and sub-directories become nested packages.

use std::{collections::BTreeSet, fs, path::Path};

use tracing::debug;

use crate::{
    error::Error,
    formats::{FormatType, ObjectType},
    types::{Blob, Package, PackageItem},
};

/// Version-control metadata directories that never hold locale files.
const SKIPPED_DIRECTORIES: [&str; 3] = [".hg", ".git", ".svn"];

/// Reads localization trees using a set of registered formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    formats: BTreeSet<FormatType>,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec {
    /// Creates a codec with every supported format registered.
    pub fn new() -> Self {
        Self::with_formats(FormatType::ALL)
    }

    /// Creates a codec that only parses the given formats.
    ///
    /// Files of any other format are read as blobs.
    ///
    /// # Example
    /// ```rust
    /// use tmxmaker::{Codec, formats::FormatType};
    /// let codec = Codec::with_formats([FormatType::Dtd, FormatType::Properties]);
    /// assert!(codec.is_registered(FormatType::Dtd));
    /// assert!(!codec.is_registered(FormatType::Inc));
    /// ```
    pub fn with_formats(formats: impl IntoIterator<Item = FormatType>) -> Self {
        Codec {
            formats: formats.into_iter().collect(),
        }
    }

    /// Registers one more format.
    pub fn register(&mut self, format: FormatType) {
        self.formats.insert(format);
    }

    pub fn is_registered(&self, format: FormatType) -> bool {
        self.formats.contains(&format)
    }

    /// Registered formats in a stable order.
    pub fn formats(&self) -> impl Iterator<Item = FormatType> + '_ {
        self.formats.iter().copied()
    }

    /// Returns the registered format for `path`, if any.
    pub fn format_for<P: AsRef<Path>>(&self, path: P) -> Option<FormatType> {
        FormatType::from_path(path).filter(|format| self.is_registered(*format))
    }

    /// Reads the directory at `path` into a package named after its last
    /// path component.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `path` (or anything below it) cannot be read,
    /// and a parse error for the first malformed locale file.
    pub fn get_package<P: AsRef<Path>>(
        &self,
        path: P,
        object_type: ObjectType,
    ) -> Result<Package, Error> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        self.read_package(path, name, object_type)
    }

    fn read_package(
        &self,
        dir: &Path,
        name: String,
        object_type: ObjectType,
    ) -> Result<Package, Error> {
        let mut package = Package::new(name);

        let entries = fs::read_dir(dir).map_err(|e| Error::io_at(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::io_at(dir, e))?;
            let child_path = entry.path();
            let child_name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type().map_err(|e| Error::io_at(&child_path, e))?;

            let is_dir = if file_type.is_symlink() {
                child_path.is_dir()
            } else {
                file_type.is_dir()
            };

            if is_dir {
                if SKIPPED_DIRECTORIES.contains(&child_name.as_str()) {
                    continue;
                }
                let sub = self.read_package(&child_path, child_name.clone(), object_type)?;
                package.add_item(child_name, PackageItem::Package(sub));
                continue;
            }

            let item = match self.format_for(&child_path) {
                Some(format) => {
                    debug!(path = %child_path.display(), %format, "parsing locale file");
                    let mut entities = format.read_entities(&child_path)?;
                    if object_type == ObjectType::EntityList {
                        entities.strip_comments();
                    }
                    PackageItem::EntityList(entities)
                }
                None => PackageItem::Blob(Blob { path: child_path }),
            };
            package.add_item(child_name, item);
        }

        Ok(package)
    }
}
