// Entity catalog: resolved entities with roles and capability vectors.

pub mod curated;
pub mod ddragon;
pub mod resolver;
pub mod rules;

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attribute::AttrVec;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Draft role. `Any` is the sentinel for entities whose roles are unknown,
/// and the "no filter" value for candidate ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Any,
    Top,
    Jungle,
    Mid,
    Adc,
    Support,
}

impl Role {
    /// Concrete roles, excluding the `Any` sentinel, in display order.
    pub const CONCRETE: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Adc, Role::Support];

    /// Parse a role string (case-insensitive). Accepts a few common aliases.
    pub fn from_str_role(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ANY" | "ALL" | "" => Some(Role::Any),
            "TOP" => Some(Role::Top),
            "JUNGLE" | "JG" | "JUNG" => Some(Role::Jungle),
            "MID" | "MIDDLE" => Some(Role::Mid),
            "ADC" | "BOT" | "BOTTOM" => Some(Role::Adc),
            "SUPPORT" | "SUP" | "SUPP" | "UTILITY" => Some(Role::Support),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Role::Any => "ANY",
            Role::Top => "TOP",
            Role::Jungle => "JUNGLE",
            Role::Mid => "MID",
            Role::Adc => "ADC",
            Role::Support => "SUPPORT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A selectable entity after capability resolution. Immutable for the
/// lifetime of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: String,
    /// Eligible roles; never empty (`[Role::Any]` when unknown).
    pub roles: Vec<Role>,
    pub caps: AttrVec,
}

impl Entity {
    /// Whether this entity passes the given role filter. `Role::Any` admits
    /// every entity.
    pub fn plays(&self, filter: Role) -> bool {
        filter == Role::Any || self.roles.contains(&filter)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Ordered collection of resolved entities with id lookup.
///
/// Iteration order is insertion order; the ranker relies on it for
/// deterministic tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entities: Vec<Entity>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entity or replace the existing one with the same id in
    /// place (keeping its original position).
    pub fn upsert(&mut self, entity: Entity) {
        match self.index.get(&entity.id) {
            Some(&idx) => self.entities[idx] = entity,
            None => {
                self.index.insert(entity.id.clone(), self.entities.len());
                self.entities.push(entity);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.index.get(id).map(|&idx| &self.entities[idx])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Entity> {
        match self.index.get(id) {
            Some(&idx) => Some(&mut self.entities[idx]),
            None => None,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<Entity> for Catalog {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for entity in iter {
            catalog.upsert(entity);
        }
        catalog
    }
}
