// Declarative inference tables: category tag -> capability floors,
// category tag -> role, per-id role overrides, and post-processing defaults.
//
// New rules go into the tables; the functions below evaluate them uniformly.

use crate::attribute::{AttrVec, Attribute};
use crate::catalog::Role;

// ---------------------------------------------------------------------------
// Capability floors by tag
// ---------------------------------------------------------------------------

/// Capability floors granted by a category tag.
#[derive(Debug, Clone, Copy)]
pub struct TagRule {
    pub tag: &'static str,
    pub floors: &'static [(Attribute, f64)],
}

pub const TAG_RULES: &[TagRule] = &[
    TagRule {
        tag: "Tank",
        floors: &[
            (Attribute::Frontline, 2.0),
            (Attribute::Engage, 1.0),
            (Attribute::SafeBlind, 2.0),
        ],
    },
    TagRule {
        tag: "Support",
        floors: &[
            (Attribute::Peel, 1.0),
            (Attribute::Utility, 2.0),
            (Attribute::SafeBlind, 2.0),
        ],
    },
    TagRule {
        tag: "Mage",
        floors: &[
            (Attribute::Magic, 2.0),
            (Attribute::Waveclear, 1.0),
            (Attribute::Poke, 1.0),
            (Attribute::Burst, 1.0),
            (Attribute::SafeBlind, 2.0),
        ],
    },
    TagRule {
        tag: "Assassin",
        floors: &[
            (Attribute::Burst, 2.0),
            (Attribute::Mobility, 2.0),
            (Attribute::Phys, 1.0),
        ],
    },
    TagRule {
        tag: "Marksman",
        floors: &[
            (Attribute::SustainDps, 2.0),
            (Attribute::Phys, 2.0),
            (Attribute::Waveclear, 1.0),
            (Attribute::SafeBlind, 2.0),
        ],
    },
    TagRule {
        tag: "Fighter",
        floors: &[
            (Attribute::SustainDps, 1.0),
            (Attribute::Phys, 1.0),
            (Attribute::Frontline, 1.0),
        ],
    },
];

/// Damage-type defaults applied when an entity ends up with neither magic
/// nor physical share. Every matching row applies.
pub const DAMAGE_DEFAULTS: &[(&str, Attribute, f64)] = &[
    ("Mage", Attribute::Magic, 2.0),
    ("Marksman", Attribute::Phys, 2.0),
    ("Fighter", Attribute::Phys, 2.0),
    ("Assassin", Attribute::Phys, 2.0),
];

/// Weights used to derive blind-pick safety when it is still unset.
pub const SAFE_BLIND_DERIVATION: &[(Attribute, f64)] = &[
    (Attribute::Mobility, 0.6),
    (Attribute::Waveclear, 0.7),
    (Attribute::Frontline, 0.3),
    (Attribute::Utility, 0.3),
    (Attribute::Poke, 0.5),
];

/// Upper bound for a derived blind-pick safety value.
pub const SAFE_BLIND_CAP: f64 = 3.0;

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

pub const TAG_ROLES: &[(&str, Role)] = &[
    ("Tank", Role::Top),
    ("Fighter", Role::Top),
    ("Assassin", Role::Mid),
    ("Mage", Role::Mid),
    ("Marksman", Role::Adc),
    ("Support", Role::Support),
];

/// Entities whose roles are known better than their tags suggest.
pub const ROLE_OVERRIDES: &[(&str, &[Role])] = &[
    ("Milio", &[Role::Support]),
    ("Leona", &[Role::Support]),
    ("Nautilus", &[Role::Support, Role::Jungle, Role::Top]),
    ("Rell", &[Role::Support, Role::Jungle]),
    ("Varus", &[Role::Adc, Role::Mid]),
    ("Ziggs", &[Role::Mid, Role::Adc]),
    ("Karma", &[Role::Support, Role::Mid]),
    ("Gragas", &[Role::Top, Role::Jungle, Role::Mid, Role::Support]),
];

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

fn has_tag(tags: &[String], tag: &str) -> bool {
    tags.iter().any(|t| t == tag)
}

/// Capabilities implied by category tags. Each matching rule raises floors;
/// overlapping rules take the maximum, never the sum.
pub fn infer_caps(tags: &[String]) -> AttrVec {
    let mut caps = AttrVec::zero();
    for rule in TAG_RULES {
        if !has_tag(tags, rule.tag) {
            continue;
        }
        for &(attr, floor) in rule.floors {
            caps.raise_to(attr, floor);
        }
    }
    caps
}

/// Roles for an entity without curated role data: override table first,
/// then tag mapping in tag order, then the `Any` sentinel.
pub fn infer_roles(id: &str, tags: &[String]) -> Vec<Role> {
    if let Some((_, roles)) = ROLE_OVERRIDES.iter().find(|(oid, _)| *oid == id) {
        return roles.to_vec();
    }

    let mut roles: Vec<Role> = Vec::new();
    for tag in tags {
        for &(rule_tag, role) in TAG_ROLES {
            if rule_tag == tag.as_str() && !roles.contains(&role) {
                roles.push(role);
            }
        }
    }

    if roles.is_empty() {
        roles.push(Role::Any);
    }
    roles
}

/// Fill in damage share and blind-pick safety defaults.
pub fn apply_defaults(caps: &mut AttrVec, tags: &[String]) {
    if caps[Attribute::Magic] == 0.0 && caps[Attribute::Phys] == 0.0 {
        for &(tag, attr, value) in DAMAGE_DEFAULTS {
            if has_tag(tags, tag) {
                caps[attr] = value;
            }
        }
    }

    if caps[Attribute::SafeBlind] == 0.0 {
        let derived: f64 = SAFE_BLIND_DERIVATION
            .iter()
            .map(|&(attr, weight)| caps[attr] * weight)
            .sum();
        caps[Attribute::SafeBlind] = derived.clamp(0.0, SAFE_BLIND_CAP);
    }
}
