//! Family metadata catalog (made by FontLab https://www.fontlab.com/)

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::remote::RemoteSource;

/// One row of the remote family catalog. `family` is the canonical,
/// case-preserving name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyEntry {
    pub family: String,
}

/// Immutable snapshot of one successful metadata fetch. A new search fetches
/// a new snapshot; snapshots are never merged or mutated.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<FamilyEntry>,
}

impl Catalog {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = FamilyEntry>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Entries in catalog order.
    pub fn entries(&self) -> &[FamilyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct MetadataPayload {
    #[serde(rename = "familyMetadataList", default)]
    family_metadata_list: Vec<RawFamily>,
}

#[derive(Debug, Deserialize)]
struct RawFamily {
    family: Option<String>,
}

/// Parse a raw metadata payload into a catalog, dropping entries that carry
/// no family name.
pub fn parse_catalog(json: &str) -> Result<Catalog> {
    let payload: MetadataPayload = serde_json::from_str(json)?;
    let entries = payload
        .family_metadata_list
        .into_iter()
        .filter_map(|raw| raw.family)
        .map(|family| FamilyEntry { family })
        .collect();
    Ok(Catalog { entries })
}

/// Fetch a fresh catalog snapshot. Every call re-fetches; callers own
/// throttling.
pub fn fetch_catalog(source: &dyn RemoteSource) -> Result<Catalog> {
    let body = source.catalog_json()?;
    parse_catalog(&body)
}
