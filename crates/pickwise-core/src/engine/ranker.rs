// Candidate ranking: general "best next pick" and targeted "fill this gap".
//
// The candidate universe is every catalog entity that is not picked or
// banned anywhere and passes the role filter. Ties keep catalog order.

use serde::Serialize;

use crate::attribute::{AttrVec, Attribute};
use crate::catalog::{Catalog, Entity, Role};
use crate::engine::synergy::pick_bonus;
use crate::engine::weights::enemy_cue;
use crate::engine::DraftPhase;
use crate::roster::{RosterState, Side};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const GENERAL_LIMIT: usize = 32;
pub const TARGETED_LIMIT: usize = 20;

const COUNTER_FACTOR: f64 = 1.2;
const NEED_REASON_MIN: f64 = 6.0;
const COUNTER_REASON_MIN: f64 = 3.0;
const MAX_GENERAL_REASONS: usize = 4;

const TARGET_NEED_OFFSET: f64 = 6.0;
const TARGET_SCALE: f64 = 8.0;
const SECONDARY_WEIGHT: f64 = 2.2;
const TARGETED_SYNERGY_SHARE: f64 = 0.7;
const ALSO_LIFTS_MIN_CAP: f64 = 1.0;
const MAX_ALSO_LIFTS: usize = 2;
const MAX_TARGETED_REASONS: usize = 3;

/// Early-phase score multiplier per point of blind-pick safety.
const EARLY_SAFE_BLIND_BONUS: f64 = 0.05;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub id: String,
    pub roles: Vec<Role>,
    pub score: f64,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    D,
    C,
    B,
    A,
    S,
    SS,
}

const GRADE_TIERS: &[(f64, Grade)] = &[
    (0.9, Grade::SS),
    (0.75, Grade::S),
    (0.6, Grade::A),
    (0.45, Grade::B),
    (0.3, Grade::C),
];

impl Grade {
    /// Grade from a candidate's share of the top score.
    pub fn from_ratio(ratio: f64) -> Self {
        GRADE_TIERS
            .iter()
            .find(|(min, _)| ratio >= *min)
            .map(|&(_, g)| g)
            .unwrap_or(Grade::D)
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::SS => "SS",
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }

    pub fn stars(self) -> u8 {
        match self {
            Grade::SS | Grade::S => 5,
            Grade::A => 4,
            Grade::B => 3,
            Grade::C => 2,
            Grade::D => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetedCandidate {
    pub id: String,
    pub roles: Vec<Role>,
    pub score: f64,
    pub grade: Grade,
    pub reasons: Vec<String>,
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Everything the ranker reads, borrowed from the advisor.
#[derive(Debug, Clone, Copy)]
pub struct RankContext<'a> {
    pub catalog: &'a Catalog,
    pub roster: &'a RosterState,
    pub role: Role,
    pub phase: DraftPhase,
    pub need: &'a AttrVec,
    pub counter: &'a AttrVec,
    pub lacking: &'a [Attribute],
}

impl<'a> RankContext<'a> {
    /// Unpicked, unbanned entities passing the role filter, in catalog order.
    pub fn universe(&self) -> impl Iterator<Item = &'a Entity> + 'a {
        let roster = self.roster;
        let role = self.role;
        self.catalog
            .iter()
            .filter(move |e| !roster.is_taken(&e.id) && e.plays(role))
    }

    fn early_multiplier(&self, caps: &AttrVec) -> f64 {
        if self.phase == DraftPhase::Early {
            1.0 + EARLY_SAFE_BLIND_BONUS * caps[Attribute::SafeBlind]
        } else {
            1.0
        }
    }
}

fn push_unique(reasons: &mut Vec<String>, reason: String) {
    if !reasons.contains(&reason) {
        reasons.push(reason);
    }
}

fn sort_desc<T>(items: &mut [T], score: impl Fn(&T) -> f64) {
    // Stable, so equal scores keep catalog order.
    items.sort_by(|a, b| score(b).total_cmp(&score(a)));
}

/// Best next picks overall: need-weighted gain, counter-weighted gain and
/// pick synergy.
pub fn general(ctx: &RankContext<'_>) -> Vec<Candidate> {
    let ally: Vec<&str> = ctx.roster.ids(Side::Ally).collect();
    let mut out: Vec<Candidate> = Vec::new();

    for entity in ctx.universe() {
        let caps = &entity.caps;
        let mut score = 0.0;
        let mut reasons = Vec::new();

        for attr in Attribute::ALL {
            let gain = caps[attr] * ctx.need[attr];
            score += gain;
            if gain >= NEED_REASON_MIN {
                push_unique(&mut reasons, format!("reinforces {}", attr.label()));
            }
        }
        for attr in Attribute::ALL {
            let gain = caps[attr] * ctx.counter[attr] * COUNTER_FACTOR;
            score += gain;
            if gain >= COUNTER_REASON_MIN {
                push_unique(&mut reasons, format!("counters {}", enemy_cue(attr)));
            }
        }

        let (bonus, synergy) = pick_bonus(&entity.id, ally.iter().copied());
        score += bonus;
        for description in synergy {
            push_unique(&mut reasons, description.to_string());
        }

        score *= ctx.early_multiplier(caps);
        reasons.truncate(MAX_GENERAL_REASONS);

        out.push(Candidate {
            id: entity.id.clone(),
            roles: entity.roles.clone(),
            score,
            reasons,
        });
    }

    sort_desc(&mut out, |c| c.score);
    out.truncate(GENERAL_LIMIT);
    out
}

/// Best picks for one attribute, with secondary credit for other lacking
/// attributes. Well-defined whether or not `target` is itself lacking.
pub fn targeted(ctx: &RankContext<'_>, target: Attribute) -> Vec<TargetedCandidate> {
    let ally: Vec<&str> = ctx.roster.ids(Side::Ally).collect();
    let mut scored: Vec<(f64, &Entity, Vec<String>)> = Vec::new();

    for entity in ctx.universe() {
        let caps = &entity.caps;
        let mut score = caps[target] * (ctx.need[target] + TARGET_NEED_OFFSET) * TARGET_SCALE;
        for &attr in ctx.lacking.iter().filter(|&&a| a != target) {
            score += caps[attr] * SECONDARY_WEIGHT;
        }

        let (bonus, synergy) = pick_bonus(&entity.id, ally.iter().copied());
        score += TARGETED_SYNERGY_SHARE * bonus;
        score *= ctx.early_multiplier(caps);

        let mut reasons = Vec::new();
        if caps[target] > 0.0 {
            push_unique(&mut reasons, format!("reinforces {}", target.label()));
        }
        for description in synergy {
            push_unique(&mut reasons, description.to_string());
        }
        let also: Vec<&str> = ctx
            .lacking
            .iter()
            .filter(|&&a| a != target && caps[a] > ALSO_LIFTS_MIN_CAP)
            .take(MAX_ALSO_LIFTS)
            .map(|a| a.label())
            .collect();
        if !also.is_empty() {
            push_unique(&mut reasons, format!("also lifts {}", also.join(", ")));
        }
        reasons.truncate(MAX_TARGETED_REASONS);

        scored.push((score, entity, reasons));
    }

    sort_desc(&mut scored, |(s, _, _)| *s);
    let top = scored.first().map(|(s, _, _)| *s).unwrap_or(0.0);

    scored
        .into_iter()
        .take(TARGETED_LIMIT)
        .map(|(score, entity, reasons)| TargetedCandidate {
            id: entity.id.clone(),
            roles: entity.roles.clone(),
            score,
            grade: if top > 0.0 {
                Grade::from_ratio(score / top)
            } else {
                Grade::D
            },
            reasons,
        })
        .collect()
}

/// The concrete role covered by the fewest ally picks, ties in role order.
pub fn open_role(catalog: &Catalog, roster: &RosterState) -> Role {
    let mut counts = [0usize; Role::CONCRETE.len()];
    for id in roster.ids(Side::Ally) {
        let Some(entity) = catalog.get(id) else { continue };
        for (i, role) in Role::CONCRETE.iter().enumerate() {
            if entity.roles.contains(role) {
                counts[i] += 1;
            }
        }
    }
    Role::CONCRETE
        .iter()
        .zip(counts)
        .min_by_key(|(_, count)| *count)
        .map(|(role, _)| *role)
        .unwrap_or(Role::Mid)
}
