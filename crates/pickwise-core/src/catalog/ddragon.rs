// Parsing for the Data Dragon static-data format: `versions.json` and
// `champion.json`. Network access lives in the app crate; this module only
// turns JSON text into raw catalog entries.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::catalog::CatalogError;

/// A catalog entry before capability resolution. `id` is optional because
/// the provider may hand us malformed records; the resolver skips those.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    pub id: Option<String>,
    pub name: Option<String>,
    pub tags: Vec<String>,
}

impl RawEntry {
    /// Convenience constructor for well-formed entries.
    pub fn new(id: &str, tags: &[&str]) -> Self {
        RawEntry {
            id: Some(id.to_string()),
            name: Some(id.to_string()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChampionFile {
    #[serde(default)]
    data: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawChampion {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

/// Parse a `champion.json` document into raw entries, in the document's key
/// order. Records that are not objects of the expected shape are skipped.
pub fn parse_champions(json: &str) -> Result<Vec<RawEntry>, CatalogError> {
    let file: ChampionFile = serde_json::from_str(json)?;
    let mut entries = Vec::with_capacity(file.data.len());
    for (key, value) in file.data {
        match serde_json::from_value::<RawChampion>(value) {
            Ok(raw) => entries.push(RawEntry {
                id: raw.id.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
                name: raw.name,
                tags: raw.tags,
            }),
            Err(e) => warn!("skipping malformed champion record '{}': {}", key, e),
        }
    }
    Ok(entries)
}

/// First (newest) version listed in `versions.json`, if any.
pub fn latest_version(json: &str) -> Result<Option<String>, CatalogError> {
    let versions: Vec<String> = serde_json::from_str(json)?;
    Ok(versions.into_iter().next())
}

/// Major.minor patch label for a full version string (`"14.3.1"` -> `"14.3"`).
pub fn patch_of(version: &str) -> String {
    version.split('.').take(2).collect::<Vec<_>>().join(".")
}
