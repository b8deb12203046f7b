//! Component directory selection and source/target pairing.
//!
//! A run first decides which top-level component directories to visit
//! ([`DirectorySelection`]), then for each of them reads both trees, flattens
//! them and keeps every string that has a non-empty translation.

use std::{collections::BTreeSet, fs, path::Path};

use tracing::debug;

use crate::{
    codec::Codec,
    error::Error,
    flatten::flatten,
    formats::ObjectType,
    types::{FlatStringMap, TranslationUnit},
};

/// Top-level entries that are version-control artifacts, never components.
pub const VCS_EXCLUSIONS: [&str; 4] = [".hgtags", ".hg", ".git", ".gitignore"];

/// Product modules of the desktop and mobile application repositories.
pub const PRODUCT_MODULES: [&str; 15] = [
    "browser",
    "calendar",
    "chat",
    "dom",
    "editor",
    "extensions",
    "mail",
    "mobile",
    "netwerk",
    "other-licenses",
    "security",
    "services",
    "suite",
    "toolkit",
    "webapprt",
];

/// How a repository is laid out at its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryKind {
    /// Every top-level directory is a component (Gaia and l20n test repos).
    Discovered,
    /// Components are the known product modules.
    Fixed,
}

impl RepositoryKind {
    /// Classifies a repository by name.
    ///
    /// # Example
    /// ```rust
    /// use tmxmaker::walker::RepositoryKind;
    /// assert_eq!(RepositoryKind::classify("gaia_2_0"), RepositoryKind::Discovered);
    /// assert_eq!(RepositoryKind::classify("l20n_test"), RepositoryKind::Discovered);
    /// assert_eq!(RepositoryKind::classify("release"), RepositoryKind::Fixed);
    /// ```
    pub fn classify(repository: &str) -> Self {
        if repository.starts_with("gaia") || repository == "l20n_test" {
            RepositoryKind::Discovered
        } else {
            RepositoryKind::Fixed
        }
    }

    /// The directory selection strategy for this kind of repository.
    pub fn selection(&self) -> DirectorySelection {
        match self {
            RepositoryKind::Discovered => DirectorySelection::DiscoverAll {
                exclusions: VCS_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
            },
            RepositoryKind::Fixed => DirectorySelection::FixedModuleList(
                PRODUCT_MODULES.iter().map(|s| s.to_string()).collect(),
            ),
        }
    }
}

/// Strategy for choosing the component directories of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorySelection {
    /// Every entry of the source tree root, minus `exclusions`.
    DiscoverAll { exclusions: Vec<String> },
    /// A fixed list of module names.
    FixedModuleList(Vec<String>),
}

impl DirectorySelection {
    pub fn for_repository(repository: &str) -> Self {
        RepositoryKind::classify(repository).selection()
    }

    /// Resolves the strategy against the two trees.
    ///
    /// Candidates keep their order (sorted by name for `DiscoverAll`) and only
    /// those that are directories under both roots survive. Missing
    /// components are skipped silently.
    pub fn resolve(&self, locale_root: &Path, source_root: &Path) -> Result<Vec<String>, Error> {
        let locale_dirs = list_directories(locale_root)?;
        let source_dirs = list_directories(source_root)?;

        let candidates: Vec<String> = match self {
            DirectorySelection::DiscoverAll { exclusions } => source_dirs
                .iter()
                .filter(|name| !exclusions.contains(name))
                .cloned()
                .collect(),
            DirectorySelection::FixedModuleList(modules) => modules.clone(),
        };

        Ok(candidates
            .into_iter()
            .filter(|name| {
                let present = locale_dirs.contains(name) && source_dirs.contains(name);
                if !present {
                    debug!(directory = %name, "skipping component missing from one tree");
                }
                present
            })
            .collect())
    }
}

/// Names of the directories directly under `root`.
fn list_directories(root: &Path) -> Result<BTreeSet<String>, Error> {
    let mut names = BTreeSet::new();
    for entry in fs::read_dir(root).map_err(|e| Error::io_at(root, e))? {
        let entry = entry.map_err(|e| Error::io_at(root, e))?;
        if entry.path().is_dir() {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Pairs two flat maps: one unit per source key whose target value is
/// non-empty, in source key order.
pub fn pair_strings(source: &FlatStringMap, target: &FlatStringMap) -> Vec<TranslationUnit> {
    source
        .iter()
        .filter_map(|(key, source_text)| {
            target
                .get(key)
                .filter(|target_text| !target_text.is_empty())
                .map(|target_text| TranslationUnit {
                    key: key.clone(),
                    source: source_text.clone(),
                    target: target_text.clone(),
                })
        })
        .collect()
}

/// Walks one component directory of a source/locale repository pair.
#[derive(Debug, Clone)]
pub struct RepositoryWalker<'a> {
    codec: &'a Codec,
    locale_root: &'a Path,
    source_root: &'a Path,
}

impl<'a> RepositoryWalker<'a> {
    pub fn new(codec: &'a Codec, locale_root: &'a Path, source_root: &'a Path) -> Self {
        RepositoryWalker {
            codec,
            locale_root,
            source_root,
        }
    }

    /// Reads `directory` from both trees and returns the matched units.
    pub fn walk(&self, directory: &str) -> Result<Vec<TranslationUnit>, Error> {
        let source_package = self
            .codec
            .get_package(self.source_root.join(directory), ObjectType::EntityList)?;
        let locale_package = self
            .codec
            .get_package(self.locale_root.join(directory), ObjectType::EntityList)?;

        let source = flatten(&source_package, directory);
        let target = flatten(&locale_package, directory);
        let units = pair_strings(&source, &target);

        debug!(
            directory,
            source_strings = source.len(),
            target_strings = target.len(),
            units = units.len(),
            "walked component"
        );
        Ok(units)
    }
}
