//! Two-pass family name resolution (made by FontLab https://www.fontlab.com/)

use crate::catalog::Catalog;

/// Resolve a user query to a canonical family name.
///
/// Pass one returns the first entry whose name equals the query ignoring
/// case; pass two returns the first entry containing the query as a
/// case-insensitive substring. An exact match wins even when a substring
/// match appears earlier in catalog order. Returns `None` when neither pass
/// matches or the catalog is empty.
pub fn resolve<'a>(query: &str, catalog: &'a Catalog) -> Option<&'a str> {
    let needle = query.to_lowercase();

    for entry in catalog.entries() {
        if entry.family.to_lowercase() == needle {
            return Some(&entry.family);
        }
    }

    for entry in catalog.entries() {
        if entry.family.to_lowercase().contains(&needle) {
            return Some(&entry.family);
        }
    }

    None
}
