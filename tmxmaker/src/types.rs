//! Core, format-agnostic types for tmxmaker.
//! Parsers decode into entity lists; the codec assembles them into packages;
//! the flattener turns packages into flat string maps.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    path::PathBuf,
};

/// A single localizable string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Identifier of the string inside its file.
    pub id: String,

    /// The string value, already unescaped by the format parser.
    pub value: String,

    /// Comment immediately preceding the entity, if the parser kept it.
    pub comment: Option<String>,
}

impl Entity {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Entity {
            id: id.into(),
            value: value.into(),
            comment: None,
        }
    }
}

/// All entities of one localization file, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityList {
    pub entities: Vec<Entity>,
}

impl EntityList {
    pub fn new(entities: Vec<Entity>) -> Self {
        EntityList { entities }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns the value of the first entity with the given id.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entities
            .iter()
            .find(|entity| entity.id == id)
            .map(|entity| entity.value.as_str())
    }

    pub(crate) fn strip_comments(&mut self) {
        for entity in &mut self.entities {
            entity.comment = None;
        }
    }
}

impl FromIterator<Entity> for EntityList {
    fn from_iter<T: IntoIterator<Item = Entity>>(iter: T) -> Self {
        EntityList {
            entities: iter.into_iter().collect(),
        }
    }
}

/// A file found in a package tree whose format is not registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub path: PathBuf,
}

/// One named child of a [`Package`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageItem {
    /// A nested directory.
    Package(Package),
    /// A parsed localization file.
    EntityList(EntityList),
    /// An opaque file that carries no strings.
    Blob(Blob),
}

/// A directory of localization files, as a tree of named children.
///
/// Children are keyed by file or directory name and iterate in name order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Package {
    pub name: String,
    pub items: BTreeMap<String, PackageItem>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Package {
            name: name.into(),
            items: BTreeMap::new(),
        }
    }

    /// Adds a child, replacing any previous child with the same name.
    pub fn add_item(&mut self, name: impl Into<String>, item: PackageItem) {
        self.items.insert(name.into(), item);
    }

    /// Builder-style variant of [`Package::add_item`] for a sub-package.
    pub fn with_package(mut self, package: Package) -> Self {
        let name = package.name.clone();
        self.add_item(name, PackageItem::Package(package));
        self
    }

    /// Builder-style variant of [`Package::add_item`] for an entity list.
    pub fn with_entities(mut self, name: impl Into<String>, entities: EntityList) -> Self {
        self.add_item(name, PackageItem::EntityList(entities));
        self
    }

    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, String, PackageItem> {
        self.items.iter()
    }

    pub fn get(&self, name: &str) -> Option<&PackageItem> {
        self.items.get(name)
    }

    /// Total number of entities in this package and all sub-packages.
    pub fn entity_count(&self) -> usize {
        self.items
            .values()
            .map(|item| match item {
                PackageItem::Package(package) => package.entity_count(),
                PackageItem::EntityList(list) => list.len(),
                PackageItem::Blob(_) => 0,
            })
            .sum()
    }
}

impl<'a> IntoIterator for &'a Package {
    type Item = (&'a String, &'a PackageItem);
    type IntoIter = std::collections::btree_map::Iter<'a, String, PackageItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Identifies one string across a repository: the file it lives in,
/// relative to the repository root, and its id inside that file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringKey {
    pub path: String,
    pub entity_id: String,
}

impl StringKey {
    pub fn new(path: impl Into<String>, entity_id: impl Into<String>) -> Self {
        StringKey {
            path: path.into(),
            entity_id: entity_id.into(),
        }
    }

    /// Parses the composite `path:entity_id` form, splitting on the first `:`.
    ///
    /// # Example
    /// ```rust
    /// use tmxmaker::types::StringKey;
    /// let key = StringKey::parse("browser/chrome/a.dtd:tab.label").unwrap();
    /// assert_eq!(key.path, "browser/chrome/a.dtd");
    /// assert_eq!(key.entity_id, "tab.label");
    /// assert!(StringKey::parse("no-separator").is_none());
    /// ```
    pub fn parse(composite: &str) -> Option<Self> {
        composite
            .split_once(':')
            .map(|(path, entity_id)| StringKey::new(path, entity_id))
    }
}

impl Display for StringKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.path, self.entity_id)
    }
}

/// Every string of one side of one component directory, keyed by location.
pub type FlatStringMap = BTreeMap<StringKey, String>;

/// One aligned source/target pair ready to be written as a `<tu>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    pub key: StringKey,
    pub source: String,
    pub target: String,
}

impl TranslationUnit {
    /// The value of the `file` property.
    pub fn file_id(&self) -> &str {
        &self.key.path
    }

    /// The value of the `id` property.
    pub fn entity_id(&self) -> &str {
        &self.key.entity_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_key_display_is_composite() {
        let key = StringKey::new("a/b.properties", "greeting");
        assert_eq!(key.to_string(), "a/b.properties:greeting");
    }

    #[test]
    fn test_string_key_parse_splits_on_first_colon() {
        let key = StringKey::parse("toolkit/x.properties:ns:deep").unwrap();
        assert_eq!(key.path, "toolkit/x.properties");
        assert_eq!(key.entity_id, "ns:deep");
    }

    #[test]
    fn test_entity_list_get_returns_first_match() {
        let list: EntityList = vec![Entity::new("a", "1"), Entity::new("a", "2")]
            .into_iter()
            .collect();
        assert_eq!(list.get("a"), Some("1"));
        assert_eq!(list.get("b"), None);
    }

    #[test]
    fn test_package_entity_count_recurses() {
        let inner = Package::new("sub").with_entities(
            "b.properties",
            EntityList::new(vec![Entity::new("x", "1"), Entity::new("y", "2")]),
        );
        let mut root = Package::new("root")
            .with_entities("a.dtd", EntityList::new(vec![Entity::new("z", "3")]))
            .with_package(inner);
        root.add_item(
            "logo.png",
            PackageItem::Blob(Blob {
                path: PathBuf::from("root/logo.png"),
            }),
        );
        assert_eq!(root.entity_count(), 3);
    }

    #[test]
    fn test_package_iterates_in_name_order() {
        let root = Package::new("root")
            .with_entities("b.dtd", EntityList::default())
            .with_entities("a.dtd", EntityList::default());
        let names: Vec<&str> = root.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["a.dtd", "b.dtd"]);
    }
}
