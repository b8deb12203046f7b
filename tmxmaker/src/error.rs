//! All error types for the tmxmaker crate.
//!
//! These are returned from all fallible operations (reading locale trees,
//! parsing locale files, writing TMX output).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error at {}: {source}", path.display())]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("cannot {operation} while the TMX writer is {state}")]
    WriterState {
        operation: &'static str,
        state: &'static str,
    },
}

impl Error {
    /// Attaches a path to an I/O error.
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::IoAt {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse error located at `line` (1-based) of `path`.
    pub fn parse_error(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Rewrites the path of a parse error, leaving other variants untouched.
    ///
    /// Parsers that read from memory report an empty path; the package loader
    /// fills in the real file once it knows it.
    pub(crate) fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Error::Parse { line, message, .. } => Error::Parse {
                path: path.into(),
                line,
                message,
            },
            Error::Io(source) => Error::IoAt {
                path: path.into(),
                source,
            },
            other => other,
        }
    }
}
