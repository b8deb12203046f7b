//! Driver for `tmxmaker`: reads the server configuration, picks the
//! component directories of a repository pair and writes the resulting
//! TMX file atomically.

pub mod config;
pub mod error;
pub mod run;

pub use crate::{
    config::{Config, ConfigError},
    error::CliError,
    run::{Args, RunSummary, output_path, run},
};
