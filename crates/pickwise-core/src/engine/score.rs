// Completeness score (0-100) and verdict tiers.

use serde::Serialize;

use crate::attribute::{AttrVec, Attribute, BASE_IMPORTANCE, IDEAL};
use crate::engine::synergy::team_bonus;
use crate::engine::EPS;

/// Share of the ideal damage value that counts as a full damage share when
/// measuring magic/physical imbalance.
const DAMAGE_SHARE_TARGET: f64 = 0.85;

/// Penalty per unit of magic/physical imbalance on the 0-1 scale.
const IMBALANCE_PENALTY: f64 = 0.07;

/// Achievement ratio for one attribute, capped at 1.
pub fn achievement(have: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        return 1.0;
    }
    ((have + EPS) / threshold).clamp(0.0, 1.0)
}

fn damage_ratio(have: f64, attr: Attribute) -> f64 {
    (have / (IDEAL[attr] * DAMAGE_SHARE_TARGET)).clamp(0.0, 1.0)
}

/// Weighted coverage of `ally` against `thresholds`, minus the damage
/// imbalance penalty, plus completed team synergies.
pub fn completeness<'a, I>(ally: &AttrVec, thresholds: &AttrVec, ally_ids: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    let mut weighted = 0.0;
    let mut total = 0.0;
    for attr in Attribute::ALL {
        let w = BASE_IMPORTANCE[attr];
        weighted += achievement(ally[attr], thresholds[attr]) * w;
        total += w;
    }
    let mut score01 = if total > 0.0 { weighted / total } else { 0.0 };

    let mag = damage_ratio(ally[Attribute::Magic], Attribute::Magic);
    let phy = damage_ratio(ally[Attribute::Phys], Attribute::Phys);
    score01 -= (mag - phy).abs() * IMBALANCE_PENALTY;

    score01 += team_bonus(ally_ids);

    (score01.clamp(0.0, 1.0) * 100.0).round() as u32
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Verdict {
    Disjointed,
    Weak,
    Balanced,
    Strong,
    Excellent,
    Godlike,
}

/// Inclusive lower bounds, highest tier first.
const VERDICT_TIERS: &[(u32, Verdict)] = &[
    (92, Verdict::Godlike),
    (85, Verdict::Excellent),
    (72, Verdict::Strong),
    (55, Verdict::Balanced),
    (40, Verdict::Weak),
];

impl Verdict {
    pub fn from_score(score: u32) -> Self {
        VERDICT_TIERS
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|&(_, v)| v)
            .unwrap_or(Verdict::Disjointed)
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Godlike => "Godlike",
            Verdict::Excellent => "Excellent",
            Verdict::Strong => "Strong",
            Verdict::Balanced => "Balanced",
            Verdict::Weak => "Weak",
            Verdict::Disjointed => "Disjointed",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Verdict::Godlike => "everything meshes",
            Verdict::Excellent => "very close to ideal",
            Verdict::Strong => "solid and practical",
            Verdict::Balanced => "well rounded",
            Verdict::Weak => "needs work",
            Verdict::Disjointed => "nothing meshes",
        }
    }
}
