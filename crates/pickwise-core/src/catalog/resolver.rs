// Capability resolution: merge the curated baseline with tag-inferred
// capabilities and roles to produce the final entity catalog.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::catalog::curated::CuratedEntry;
use crate::catalog::ddragon::RawEntry;
use crate::catalog::rules::{apply_defaults, infer_caps, infer_roles};
use crate::catalog::{Catalog, Entity, Role};

/// Weight applied to tag-inferred capabilities layered over curated data.
pub const INFERRED_NUDGE: f64 = 0.3;

/// Build the entity catalog.
///
/// Curated entries come first, in table order; catalog-only entities follow
/// in provider order. For every provider entry:
/// - no curated data: capabilities and roles are inferred from tags;
/// - curated data: curated capabilities plus 30% of the inferred ones, and
///   roles inferred only when the curated list is empty;
/// - then damage-share and blind-pick-safety defaults are filled in.
///
/// Provider entries without an id, and repeated ids, are skipped.
pub fn resolve(curated: &[CuratedEntry], raw: &[RawEntry]) -> Catalog {
    let mut catalog: Catalog = curated
        .iter()
        .map(|c| Entity {
            id: c.id.clone(),
            roles: c.roles.clone(),
            caps: c.caps,
        })
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut skipped = 0usize;

    for entry in raw {
        let Some(id) = entry.id.as_deref() else {
            warn!(
                "skipping catalog entry without an id (name={:?})",
                entry.name
            );
            skipped += 1;
            continue;
        };
        if !seen.insert(id) {
            warn!("skipping duplicate catalog entry '{}'", id);
            skipped += 1;
            continue;
        }

        let inferred = infer_caps(&entry.tags);
        let mut resolved = match catalog.get(id) {
            None => Entity {
                id: id.to_string(),
                roles: infer_roles(id, &entry.tags),
                caps: inferred,
            },
            Some(existing) => {
                let roles = if existing.roles.is_empty() {
                    infer_roles(id, &entry.tags)
                } else {
                    existing.roles.clone()
                };
                Entity {
                    id: id.to_string(),
                    roles,
                    caps: existing.caps + inferred.scaled(INFERRED_NUDGE),
                }
            }
        };
        apply_defaults(&mut resolved.caps, &entry.tags);
        catalog.upsert(resolved);
    }

    // Curated entries the provider never mentioned still need a role set.
    for entity in curated.iter().filter(|c| c.roles.is_empty()) {
        if let Some(e) = catalog.get_mut(&entity.id) {
            if e.roles.is_empty() {
                e.roles.push(Role::Any);
            }
        }
    }

    debug!(
        "resolved {} entities ({} curated, {} provider entries, {} skipped)",
        catalog.len(),
        curated.len(),
        raw.len(),
        skipped
    );

    catalog
}
