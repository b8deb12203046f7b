//! Server configuration shared with the web front-end.
//!
//! ```toml
//! [config]
//! root = "/srv/transvision"
//! libraries = "/srv/libraries"
//! ```

use std::{
    collections::BTreeMap,
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

/// Config file used when [`CONFIG_ENV`] is not set, relative to the
/// working directory.
pub const DEFAULT_CONFIG_PATH: &str = "web/inc/config.toml";

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "TMXMAKER_CONFIG";

/// Section holding the server settings.
pub const CONFIG_SECTION: &str = "config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read configuration file: {0}")]
    ReadError(#[from] io::Error),

    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("configuration section `[{section}]` is missing")]
    MissingSection { section: String },

    #[error("configuration key `{key}` is missing from section `[{section}]`")]
    MissingKey { section: String, key: String },
}

/// Sections of string key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Config {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl Config {
    /// The config file location: `$TMXMAKER_CONFIG`, or
    /// [`DEFAULT_CONFIG_PATH`].
    pub fn locate() -> PathBuf {
        env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        tracing::debug!("Loading configuration from: {:?}", path);

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Looks up `key` in `[section]`.
    pub fn get(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        let values = self
            .sections
            .get(section)
            .ok_or_else(|| ConfigError::MissingSection {
                section: section.to_string(),
            })?;
        values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::MissingKey {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    /// The data root; TMX files are written below `<root>/TMX`.
    pub fn root(&self) -> Result<PathBuf, ConfigError> {
        self.get(CONFIG_SECTION, "root").map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_reads_section_key() {
        let config = Config::parse(
            r#"
[config]
root = "/srv/transvision"
libraries = "/srv/libraries"
"#,
        )
        .unwrap();
        assert_eq!(config.get("config", "libraries").unwrap(), "/srv/libraries");
        assert_eq!(config.root().unwrap(), PathBuf::from("/srv/transvision"));
    }

    #[test]
    fn test_missing_section() {
        let config = Config::parse("[other]\nroot = \"/x\"\n").unwrap();
        assert!(matches!(
            config.root(),
            Err(ConfigError::MissingSection { section }) if section == "config"
        ));
    }

    #[test]
    fn test_missing_key() {
        let config = Config::parse("[config]\nlibraries = \"/x\"\n").unwrap();
        let err = config.root().unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration key `root` is missing from section `[config]`"
        );
    }

    #[test]
    fn test_non_string_value_is_parse_error() {
        assert!(matches!(
            Config::parse("[config]\nroot = 42\n"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        assert!(matches!(Config::load(&path), Err(ConfigError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[config]\nroot = \"/data\"\n").unwrap();
        assert_eq!(
            Config::load(&path).unwrap().root().unwrap(),
            PathBuf::from("/data")
        );
    }
}
