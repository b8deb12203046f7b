use std::{io, path::PathBuf};

use thiserror::Error;

use crate::config::ConfigError;

/// Anything that can abort a run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tmx(#[from] tmxmaker::Error),

    #[error("cannot write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CliError {
    pub(crate) fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CliError::Output {
            path: path.into(),
            source,
        }
    }
}
