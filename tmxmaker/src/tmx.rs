//! Streaming writer for TMX 1.1 documents in the layout OmegaT expects.
//!
//! The writer is a small state machine: the header must be written first,
//! then any number of units, then the document is closed exactly once.
//!
//! ```rust
//! use tmxmaker::tmx::TmxWriter;
//! use tmxmaker::types::{StringKey, TranslationUnit};
//!
//! let mut writer = TmxWriter::new(Vec::new()).with_creation_date("2024-01-01 00:00:00.000000");
//! writer.write_header("en-US")?;
//! writer.write_unit(
//!     &TranslationUnit {
//!         key: StringKey::new("browser/a.dtd", "tab"),
//!         source: "Tab".to_string(),
//!         target: "Onglet".to_string(),
//!     },
//!     "en-US",
//!     "fr",
//! )?;
//! let bytes = writer.close()?;
//! assert!(String::from_utf8(bytes).unwrap().ends_with("</tmx>"));
//! # Ok::<(), tmxmaker::Error>(())
//! ```

use std::{
    fmt::{Display, Formatter},
    io::Write,
};

use indoc::formatdoc;

use crate::{error::Error, escape::escape_segment, types::TranslationUnit};

pub const CREATION_TOOL: &str = "tmxmakerOmT";
pub const CREATION_TOOL_VERSION: &str = "0.1";

/// Where a [`TmxWriter`] is in its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    Unopened,
    HeaderWritten,
    Closed,
}

impl Display for WriterState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl WriterState {
    fn name(&self) -> &'static str {
        match self {
            WriterState::Unopened => "unopened",
            WriterState::HeaderWritten => "open",
            WriterState::Closed => "closed",
        }
    }
}

/// Writes a TMX document to `W` incrementally.
#[derive(Debug)]
pub struct TmxWriter<W: Write> {
    writer: Option<W>,
    state: WriterState,
    creation_date: Option<String>,
    units_written: usize,
}

impl<W: Write> TmxWriter<W> {
    pub fn new(writer: W) -> Self {
        TmxWriter {
            writer: Some(writer),
            state: WriterState::Unopened,
            creation_date: None,
            units_written: 0,
        }
    }

    /// Uses a fixed `creationdate` instead of the current local time.
    pub fn with_creation_date(mut self, creation_date: impl Into<String>) -> Self {
        self.creation_date = Some(creation_date.into());
        self
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    pub fn units_written(&self) -> usize {
        self.units_written
    }

    /// Writes the XML prolog, the `<header>` and opens `<body>`.
    pub fn write_header(&mut self, source_lang: &str) -> Result<(), Error> {
        self.expect_state(WriterState::Unopened, "write the header")?;

        let creation_date = self
            .creation_date
            .clone()
            .unwrap_or_else(|| {
                chrono::Local::now()
                    .format("%Y-%m-%d %H:%M:%S%.6f")
                    .to_string()
            });

        let header = formatdoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <!DOCTYPE tmx SYSTEM "tmx11.dtd">
            <tmx version="1.1">
              <header creationtool="{tool}" o-tmf="OmegaT TMX" o-encoding="UTF8" adminlang="EN-US" datatype="plaintext" creationtoolversion="{version}" segtype="paragraph" creationdate="{creation_date}" srclang="{source_lang}">
              </header>
              <body>
            "#,
            tool = CREATION_TOOL,
            version = CREATION_TOOL_VERSION,
            creation_date = creation_date,
            source_lang = source_lang,
        };

        self.inner()?.write_all(header.as_bytes())?;
        self.state = WriterState::HeaderWritten;
        Ok(())
    }

    /// Writes one `<tu>`. Property and segment text is escaped with
    /// [`escape_segment`](crate::escape::escape_segment).
    pub fn write_unit(
        &mut self,
        unit: &TranslationUnit,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<(), Error> {
        self.expect_state(WriterState::HeaderWritten, "write a unit")?;

        let file_id = escape_segment(unit.file_id());
        let entity_id = escape_segment(unit.entity_id());
        let source = escape_segment(&unit.source);
        let target = escape_segment(&unit.target);
        let writer = self.inner()?;

        writeln!(writer, "    <tu>")?;
        writeln!(writer, r#"        <prop type="file">{file_id}</prop>"#)?;
        writeln!(writer, r#"        <prop type="id">{entity_id}</prop>"#)?;
        writeln!(writer, r#"        <tuv lang="{source_lang}">"#)?;
        writeln!(writer, "            <seg>{source}</seg>")?;
        writeln!(writer, "        </tuv>")?;
        writeln!(writer, r#"        <tuv lang="{target_lang}">"#)?;
        writeln!(writer, "            <seg>{target}</seg>")?;
        writeln!(writer, "        </tuv>")?;
        writeln!(writer, "    </tu>")?;

        self.units_written += 1;
        Ok(())
    }

    /// Closes `<body>` and `<tmx>`, flushes, and hands back the inner writer.
    pub fn close(&mut self) -> Result<W, Error> {
        self.expect_state(WriterState::HeaderWritten, "close the document")?;

        let mut writer = self.writer.take().ok_or(Error::WriterState {
            operation: "close the document",
            state: WriterState::Closed.name(),
        })?;
        writer.write_all(b"  </body>\n</tmx>")?;
        writer.flush()?;

        self.state = WriterState::Closed;
        Ok(writer)
    }

    fn expect_state(&self, expected: WriterState, operation: &'static str) -> Result<(), Error> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::WriterState {
                operation,
                state: self.state.name(),
            })
        }
    }

    fn inner(&mut self) -> Result<&mut W, Error> {
        let state = self.state.name();
        self.writer.as_mut().ok_or(Error::WriterState {
            operation: "write",
            state,
        })
    }
}
