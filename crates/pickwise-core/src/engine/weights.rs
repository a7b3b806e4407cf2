// Need and counter weighting for candidate ranking.
//
// Need weights say how much each attribute is still wanted given the ally
// profile and draft phase; counter weights say which attributes answer the
// enemy profile. Neither feeds the completeness score directly.

use crate::attribute::{AttrVec, Attribute, BASE_IMPORTANCE, IDEAL};
use crate::engine::DraftPhase;

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// Multiplier applied to a damage type's need when the team's share of it is
/// below half of the other type.
pub const DAMAGE_SKEW_BOOST: f64 = 1.8;

/// Per-phase need multipliers.
pub const PHASE_NEED: &[(DraftPhase, &[(Attribute, f64)])] = &[
    (
        DraftPhase::Early,
        &[(Attribute::SafeBlind, 2.0), (Attribute::Engage, 0.95)],
    ),
    (DraftPhase::Mid, &[(Attribute::SafeBlind, 1.2)]),
    (
        DraftPhase::Last,
        &[
            (Attribute::SafeBlind, 0.6),
            (Attribute::Engage, 1.05),
            (Attribute::Peel, 1.05),
            (Attribute::Burst, 1.05),
        ],
    ),
];

/// When the enemy profile exceeds `above` in `enemy_attr`, every effect adds
/// its weight to the counter vector.
#[derive(Debug, Clone, Copy)]
pub struct CounterTrigger {
    pub enemy_attr: Attribute,
    pub above: f64,
    pub effects: &'static [(Attribute, f64)],
}

pub const COUNTER_TRIGGERS: &[CounterTrigger] = &[
    CounterTrigger {
        enemy_attr: Attribute::Frontline,
        above: 5.0,
        effects: &[(Attribute::AntiTank, 3.0)],
    },
    CounterTrigger {
        enemy_attr: Attribute::Poke,
        above: 4.0,
        effects: &[(Attribute::Engage, 2.0), (Attribute::Waveclear, 1.0)],
    },
    CounterTrigger {
        enemy_attr: Attribute::Burst,
        above: 4.0,
        effects: &[(Attribute::Peel, 2.0)],
    },
    CounterTrigger {
        enemy_attr: Attribute::Mobility,
        above: 4.0,
        effects: &[(Attribute::Utility, 1.0)],
    },
];

/// Counter weights are scaled by this in the last pick phase.
pub const LAST_PHASE_COUNTER_SCALE: f64 = 1.25;

/// Short description of the enemy trait a counter attribute answers.
pub fn enemy_cue(attr: Attribute) -> &'static str {
    match attr {
        Attribute::AntiTank => "tank-heavy enemy",
        Attribute::Engage => "enemy poke",
        Attribute::Waveclear => "enemy push and poke",
        Attribute::Peel => "enemy dive and burst",
        Attribute::Utility => "highly mobile enemy",
        _ => "enemy composition",
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// `base * (1 + max(0, gap / 10))`, then damage-skew boost and phase
/// multipliers.
pub fn need_weights(ally: &AttrVec, phase: DraftPhase) -> AttrVec {
    let mut need = AttrVec::zero();
    for attr in Attribute::ALL {
        let gap = IDEAL[attr] - ally[attr];
        need[attr] = BASE_IMPORTANCE[attr] * (1.0 + (gap / 10.0).max(0.0));
    }

    let magic = ally[Attribute::Magic];
    let phys = ally[Attribute::Phys];
    if magic < phys * 0.5 {
        need[Attribute::Magic] *= DAMAGE_SKEW_BOOST;
    }
    if phys < magic * 0.5 {
        need[Attribute::Phys] *= DAMAGE_SKEW_BOOST;
    }

    for (p, multipliers) in PHASE_NEED {
        if *p != phase {
            continue;
        }
        for &(attr, factor) in *multipliers {
            need[attr] *= factor;
        }
    }
    need
}

pub fn counter_weights(enemy: &AttrVec, phase: DraftPhase) -> AttrVec {
    let mut counter = AttrVec::zero();
    for trigger in COUNTER_TRIGGERS {
        if enemy[trigger.enemy_attr] > trigger.above {
            for &(attr, weight) in trigger.effects {
                counter[attr] += weight;
            }
        }
    }
    if phase == DraftPhase::Last {
        counter = counter.scaled(LAST_PHASE_COUNTER_SCALE);
    }
    counter
}
