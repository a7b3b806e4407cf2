// Curated capability/role baseline.
//
// The default table ships embedded in the crate (`data/curated.csv`); a
// replacement file with the same columns can be loaded from disk. Columns:
// `id,roles,<one column per attribute key>`, roles separated by `|`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::attribute::{AttrVec, Attribute};
use crate::catalog::{CatalogError, Role};

const BUILTIN_CSV: &str = include_str!("../../data/curated.csv");

/// One curated row: hand-assigned roles and capabilities for an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct CuratedEntry {
    pub id: String,
    /// May be empty, in which case roles are inferred from tags.
    pub roles: Vec<Role>,
    pub caps: AttrVec,
}

/// Raw CSV row. Attribute columns default to 0 when absent or blank so a
/// trimmed-down file stays valid.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawCuratedRow {
    id: String,
    #[serde(default)]
    roles: String,
    #[serde(default)]
    ENGAGE: Option<f64>,
    #[serde(default)]
    PEEL: Option<f64>,
    #[serde(default)]
    FRONTLINE: Option<f64>,
    #[serde(default)]
    BURST: Option<f64>,
    #[serde(default)]
    SUSTAIN_DPS: Option<f64>,
    #[serde(default)]
    POKE: Option<f64>,
    #[serde(default)]
    WAVECLEAR: Option<f64>,
    #[serde(default)]
    UTILITY: Option<f64>,
    #[serde(default)]
    ANTI_TANK: Option<f64>,
    #[serde(default)]
    MOBILITY: Option<f64>,
    #[serde(default)]
    MAGIC: Option<f64>,
    #[serde(default)]
    PHYS: Option<f64>,
    #[serde(default)]
    SAFE_BLIND: Option<f64>,
}

impl RawCuratedRow {
    fn caps(&self) -> AttrVec {
        let values = [
            (Attribute::Engage, self.ENGAGE),
            (Attribute::Peel, self.PEEL),
            (Attribute::Frontline, self.FRONTLINE),
            (Attribute::Burst, self.BURST),
            (Attribute::SustainDps, self.SUSTAIN_DPS),
            (Attribute::Poke, self.POKE),
            (Attribute::Waveclear, self.WAVECLEAR),
            (Attribute::Utility, self.UTILITY),
            (Attribute::AntiTank, self.ANTI_TANK),
            (Attribute::Mobility, self.MOBILITY),
            (Attribute::Magic, self.MAGIC),
            (Attribute::Phys, self.PHYS),
            (Attribute::SafeBlind, self.SAFE_BLIND),
        ];
        let mut caps = AttrVec::zero();
        for (attr, value) in values {
            caps[attr] = value.unwrap_or(0.0);
        }
        caps
    }
}

fn parse_roles(id: &str, raw: &str) -> Vec<Role> {
    let mut roles = Vec::new();
    for part in raw.split('|').map(str::trim).filter(|p| !p.is_empty()) {
        match Role::from_str_role(part) {
            Some(role) if !roles.contains(&role) => roles.push(role),
            Some(_) => {}
            None => warn!("ignoring unknown role '{}' for curated entry '{}'", part, id),
        }
    }
    roles
}

/// Parse curated rows from any reader. Malformed rows (bad numbers, missing
/// id, negative magnitudes) are skipped with a warning.
pub fn load_curated_from_reader<R: Read>(rdr: R) -> Result<Vec<CuratedEntry>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut entries = Vec::new();
    for result in reader.deserialize::<RawCuratedRow>() {
        match result {
            Ok(raw) => {
                let id = raw.id.trim().to_string();
                if id.is_empty() {
                    warn!("skipping curated row without an id");
                    continue;
                }
                let caps = raw.caps();
                if caps.iter().any(|(_, v)| !v.is_finite() || v < 0.0) {
                    warn!("skipping curated entry '{}': negative or non-finite capability", id);
                    continue;
                }
                let roles = parse_roles(&id, &raw.roles);
                entries.push(CuratedEntry { id, roles, caps });
            }
            Err(e) => {
                warn!("skipping malformed curated row: {}", e);
            }
        }
    }
    Ok(entries)
}

/// Load a curated table from a CSV file on disk.
pub fn load_curated(path: &Path) -> Result<Vec<CuratedEntry>, CatalogError> {
    let file = std::fs::File::open(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_curated_from_reader(file).map_err(|e| CatalogError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// The curated table embedded in the crate.
pub fn builtin() -> Vec<CuratedEntry> {
    match load_curated_from_reader(BUILTIN_CSV.as_bytes()) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("embedded curated table is unreadable: {}", e);
            Vec::new()
        }
    }
}
