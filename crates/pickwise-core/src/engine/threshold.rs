// Adaptive per-attribute thresholds and the lacking/sufficient classifier.

use crate::attribute::{AttrVec, Attribute, BASE_IMPORTANCE, IDEAL};
use crate::engine::{DraftPhase, Strictness, EPS};

/// Slack is never allowed past this fraction of the ideal.
pub const MAX_SLACK: f64 = 0.7;

/// Minimum blind-pick-safety slack on the last pick.
pub const LAST_PHASE_SAFE_BLIND_SLACK: f64 = 0.55;

/// Score at and above which nothing is reported as lacking.
pub const RELAX_ALL_AT: u32 = 90;

/// Score at and above which low-importance attributes are never lacking.
pub const RELAX_MINOR_AT: u32 = 85;

/// Attributes with base importance at or below this are "minor".
pub const MINOR_IMPORTANCE: f64 = 3.0;

/// Minimum team value for `attr`. Attributes the team already needs less of
/// (need/base ratio below 0.9, then 0.75) get extra slack.
pub fn threshold(attr: Attribute, need: f64, strictness: Strictness, phase: DraftPhase) -> f64 {
    let ratio = need / BASE_IMPORTANCE[attr];
    let mut slack = strictness.base_slack();
    if ratio < 0.9 {
        slack += 0.10;
    }
    if ratio < 0.75 {
        slack += 0.20;
    }
    if attr == Attribute::SafeBlind && phase == DraftPhase::Last {
        slack = slack.max(LAST_PHASE_SAFE_BLIND_SLACK);
    }
    IDEAL[attr] * (1.0 - slack.clamp(0.0, MAX_SLACK))
}

pub fn thresholds(need: &AttrVec, strictness: Strictness, phase: DraftPhase) -> AttrVec {
    let mut out = AttrVec::zero();
    for attr in Attribute::ALL {
        out[attr] = threshold(attr, need[attr], strictness, phase);
    }
    out
}

/// Below threshold by more than the tolerance.
pub fn raw_lacking(have: f64, threshold: f64) -> bool {
    have + EPS < threshold
}

fn damage_lacking(attr: Attribute, ally: &AttrVec, thresholds: &AttrVec) -> bool {
    let (other, mine) = match attr {
        Attribute::Magic => (Attribute::Phys, Attribute::Magic),
        _ => (Attribute::Magic, Attribute::Phys),
    };
    let either_ok = !raw_lacking(ally[mine], thresholds[mine])
        || !raw_lacking(ally[other], thresholds[other]);
    if either_ok {
        return false;
    }
    if ally[mine] < ally[other] * 0.6 {
        return true;
    }
    if ally[other] < ally[mine] * 0.6 {
        return false;
    }
    // Neither side is lopsided; both are below threshold here.
    raw_lacking(ally[mine], thresholds[mine])
}

/// Whether `attr` is lacking after auto-relaxation for `score`.
pub fn is_lacking(attr: Attribute, ally: &AttrVec, thresholds: &AttrVec, score: u32) -> bool {
    if score >= RELAX_ALL_AT {
        return false;
    }
    if score >= RELAX_MINOR_AT && BASE_IMPORTANCE[attr] <= MINOR_IMPORTANCE {
        return false;
    }
    match attr {
        Attribute::Magic | Attribute::Phys => damage_lacking(attr, ally, thresholds),
        _ => raw_lacking(ally[attr], thresholds[attr]),
    }
}

/// Lacking attributes, largest `ideal - current` gap first, ties in
/// declaration order.
pub fn lacking(ally: &AttrVec, thresholds: &AttrVec, score: u32) -> Vec<Attribute> {
    let mut out: Vec<Attribute> = Attribute::ALL
        .into_iter()
        .filter(|&a| is_lacking(a, ally, thresholds, score))
        .collect();
    out.sort_by(|&a, &b| {
        let gap_a = IDEAL[a] - ally[a];
        let gap_b = IDEAL[b] - ally[b];
        gap_b.total_cmp(&gap_a)
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::weights::need_weights;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn base_slack_by_strictness() {
        // need/base ratio of 1.0 adds no extra slack.
        let t = |s| threshold(Attribute::Engage, 5.0, s, DraftPhase::Mid);
        assert!(approx(t(Strictness::Strict), 6.5 * 0.9));
        assert!(approx(t(Strictness::Normal), 6.5 * 0.8));
        assert!(approx(t(Strictness::Loose), 6.5 * 0.65));
    }

    #[test]
    fn low_need_ratio_adds_slack() {
        // ratio 0.8 -> +0.10
        assert!(approx(
            threshold(Attribute::Peel, 4.0, Strictness::Normal, DraftPhase::Mid),
            6.0 * 0.7
        ));
        // ratio 0.5 -> +0.30
        assert!(approx(
            threshold(Attribute::Peel, 2.5, Strictness::Normal, DraftPhase::Mid),
            6.0 * 0.5
        ));
        // loose + 0.30 = 0.65 stays under the cap
        assert!(approx(
            threshold(Attribute::Peel, 2.5, Strictness::Loose, DraftPhase::Mid),
            6.0 * 0.35
        ));
    }

    #[test]
    fn safe_blind_floor_on_last_pick() {
        let t = threshold(Attribute::SafeBlind, 2.0, Strictness::Strict, DraftPhase::Last);
        assert!(approx(t, 5.0 * 0.45));
        let t = threshold(Attribute::SafeBlind, 2.0, Strictness::Strict, DraftPhase::Mid);
        assert!(approx(t, 5.0 * 0.9));
    }

    #[test]
    fn threshold_monotone_in_strictness() {
        let profiles = [
            AttrVec::zero(),
            AttrVec::from_pairs(&[(Attribute::Engage, 6.0), (Attribute::SafeBlind, 4.0)]),
            AttrVec::from_pairs(&[(Attribute::Magic, 9.0), (Attribute::Peel, 2.0)]),
        ];
        for ally in profiles {
            for phase in [DraftPhase::Early, DraftPhase::Mid, DraftPhase::Last] {
                let need = need_weights(&ally, phase);
                let loose = thresholds(&need, Strictness::Loose, phase);
                let normal = thresholds(&need, Strictness::Normal, phase);
                let strict = thresholds(&need, Strictness::Strict, phase);
                for attr in Attribute::ALL {
                    assert!(loose[attr] <= normal[attr], "{attr} loose > normal");
                    assert!(normal[attr] <= strict[attr], "{attr} normal > strict");
                }
            }
        }
    }

    #[test]
    fn tolerance_hides_near_misses() {
        assert!(!raw_lacking(4.6, 4.8));
        assert!(raw_lacking(4.5, 4.8));
    }

    fn classify(ally: AttrVec, score: u32) -> Vec<Attribute> {
        let need = need_weights(&ally, DraftPhase::Mid);
        let thr = thresholds(&need, Strictness::Normal, DraftPhase::Mid);
        lacking(&ally, &thr, score)
    }

    #[test]
    fn magic_met_hides_physical() {
        let ally = AttrVec::from_pairs(&[(Attribute::Magic, 6.0)]);
        let out = classify(ally, 30);
        assert!(!out.contains(&Attribute::Magic));
        assert!(!out.contains(&Attribute::Phys));
    }

    #[test]
    fn lopsided_damage_flags_only_the_weaker_side() {
        let ally = AttrVec::from_pairs(&[(Attribute::Magic, 3.0), (Attribute::Phys, 1.0)]);
        let out = classify(ally, 30);
        assert!(out.contains(&Attribute::Phys));
        assert!(!out.contains(&Attribute::Magic));
    }

    #[test]
    fn even_damage_shortfall_flags_both() {
        let ally = AttrVec::from_pairs(&[(Attribute::Magic, 2.0), (Attribute::Phys, 2.0)]);
        let out = classify(ally, 30);
        assert!(out.contains(&Attribute::Phys));
        assert!(out.contains(&Attribute::Magic));
    }

    #[test]
    fn auto_relaxation() {
        let out = classify(AttrVec::zero(), 95);
        assert!(out.is_empty());

        let out = classify(AttrVec::zero(), 87);
        assert_eq!(
            out,
            vec![
                Attribute::SustainDps,
                Attribute::Engage,
                Attribute::Peel,
                Attribute::Frontline,
            ]
        );
    }

    #[test]
    fn ordered_by_gap_then_declaration() {
        let out = classify(AttrVec::zero(), 10);
        assert_eq!(out.len(), Attribute::ALL.len());
        // SUSTAIN_DPS has the largest ideal; PEEL/FRONTLINE/WAVECLEAR/MAGIC/PHYS
        // tie at 6 and keep declaration order.
        assert_eq!(
            out,
            vec![
                Attribute::SustainDps,
                Attribute::Engage,
                Attribute::Peel,
                Attribute::Frontline,
                Attribute::Waveclear,
                Attribute::Magic,
                Attribute::Phys,
                Attribute::Burst,
                Attribute::Utility,
                Attribute::SafeBlind,
                Attribute::Poke,
                Attribute::AntiTank,
                Attribute::Mobility,
            ]
        );
    }
}
