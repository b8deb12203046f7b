//! Flattening of [`Package`] trees into [`FlatStringMap`]s.

use crate::types::{FlatStringMap, Package, PackageItem, StringKey};

/// Sub-package names that are dropped from string paths. Their children are
/// keyed as if they sat directly in the parent package.
pub const ELIDED_PACKAGES: [&str; 2] = ["en-US", "locales"];

/// Flattens `package` into a new map keyed by `<path_prefix>/<file>` and
/// entity id.
///
/// Sub-packages extend the path with their name, except those listed in
/// [`ELIDED_PACKAGES`]. Blobs contribute nothing.
///
/// # Example
/// ```rust
/// use tmxmaker::flatten::flatten;
/// use tmxmaker::types::{Entity, EntityList, Package, StringKey};
///
/// let strings = EntityList::new(vec![Entity::new("k", "v")]);
/// let package = Package::new("browser")
///     .with_package(Package::new("en-US").with_entities("a.properties", strings));
/// let map = flatten(&package, "browser");
/// assert_eq!(map[&StringKey::new("browser/a.properties", "k")], "v");
/// ```
pub fn flatten(package: &Package, path_prefix: &str) -> FlatStringMap {
    let mut strings = FlatStringMap::new();
    collect(package, path_prefix, &mut strings);
    strings
}

fn collect(package: &Package, path_prefix: &str, strings: &mut FlatStringMap) {
    for (name, item) in package {
        match item {
            PackageItem::EntityList(list) => {
                let path = format!("{path_prefix}/{name}");
                for entity in list.iter() {
                    strings.insert(
                        StringKey::new(path.clone(), entity.id.clone()),
                        entity.value.clone(),
                    );
                }
            }
            PackageItem::Package(sub) if ELIDED_PACKAGES.contains(&name.as_str()) => {
                collect(sub, path_prefix, strings);
            }
            PackageItem::Package(sub) => {
                collect(sub, &format!("{path_prefix}/{name}"), strings);
            }
            PackageItem::Blob(_) => {}
        }
    }
}
