//! Catalog listing and substring filtering (made by FontLab https://www.fontlab.com/)

use crate::catalog::{Catalog, FamilyEntry};

/// The first `limit` catalog entries with a non-empty name, in catalog order.
pub fn list_families(catalog: &Catalog, limit: usize) -> Vec<FamilyEntry> {
    catalog
        .entries()
        .iter()
        .filter(|entry| !entry.family.is_empty())
        .take(limit)
        .cloned()
        .collect()
}

/// Case-insensitive substring filter, preserving input order.
///
/// An empty query keeps every non-empty-named entry. No display limit is
/// applied here; that is the caller's concern.
pub fn filter(entries: &[FamilyEntry], query: &str) -> Vec<FamilyEntry> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| !entry.family.is_empty() && entry.family.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
