//! Traits for format-agnostic parsing in tmxmaker.

use std::{
    fs::File,
    io::{BufRead, Cursor, Read},
    path::Path,
};

use crate::{error::Error, types::EntityList};

/// A trait for parsing one localization file into its entities.
///
/// # Example
///
/// ```rust,no_run
/// use tmxmaker::traits::Parser;
/// let format = tmxmaker::formats::dtd::Format::read_from("browser/chrome/browser.dtd")?;
/// println!("{} entities", format.entities.len());
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser: Into<EntityList> {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    ///
    /// Sniffs a byte order mark and decodes to UTF-8. Bytes that are not
    /// valid in the detected encoding are replaced rather than rejected, so a
    /// single bad string never stops the extraction of a whole repository.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io_at(path, e))?;
        // UTF-8 unless a BOM says otherwise; malformed sequences become U+FFFD
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding_rs::UTF_8))
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder
            .read_to_string(&mut decoded)
            .map_err(|e| Error::io_at(path, e))?;

        Self::from_str(&decoded).map_err(|e| e.with_path(path))
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}
