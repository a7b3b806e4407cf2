// Integration tests for the composition engine.
//
// These run the full pipeline (curated table -> resolver -> roster ->
// advisor) through the crate's public API.

use pickwise_core::attribute::{AttrVec, Attribute};
use pickwise_core::catalog::curated;
use pickwise_core::catalog::resolver::resolve;
use pickwise_core::catalog::{Catalog, Entity, Role};
use pickwise_core::engine::ranker::{Grade, GENERAL_LIMIT, TARGETED_LIMIT};
use pickwise_core::engine::score::Verdict;
use pickwise_core::engine::synergy::pick_bonus;
use pickwise_core::engine::{profile, Advisor, DraftPhase, PhaseMode, Settings, Strictness};
use pickwise_core::roster::{RosterState, Side, SlotRef};

// ===========================================================================
// Helpers
// ===========================================================================

fn builtin_catalog() -> Catalog {
    resolve(&curated::builtin(), &[])
}

fn entity(id: &str, roles: &[Role], pairs: &[(Attribute, f64)]) -> Entity {
    Entity {
        id: id.to_string(),
        roles: roles.to_vec(),
        caps: AttrVec::from_pairs(pairs),
    }
}

fn roster_with(ally: &[&str], enemy: &[&str]) -> RosterState {
    let mut roster = RosterState::new();
    for (i, id) in ally.iter().enumerate() {
        roster.assign(SlotRef::new(Side::Ally, i), id).unwrap();
    }
    for (i, id) in enemy.iter().enumerate() {
        roster.assign(SlotRef::new(Side::Enemy, i), id).unwrap();
    }
    roster
}

/// Three initiators plus two damage dealers that meet every ideal value.
fn complete_team_catalog() -> Catalog {
    let init = [
        (Attribute::Engage, 3.0),
        (Attribute::Peel, 2.0),
        (Attribute::Frontline, 2.0),
        (Attribute::Utility, 2.0),
        (Attribute::SafeBlind, 2.0),
        (Attribute::Magic, 2.0),
        (Attribute::Waveclear, 2.0),
        (Attribute::Poke, 2.0),
    ];
    let dmg = [
        (Attribute::Burst, 3.0),
        (Attribute::SustainDps, 4.0),
        (Attribute::AntiTank, 2.0),
        (Attribute::Mobility, 2.0),
        (Attribute::Phys, 3.0),
    ];
    vec![
        entity("InitA", &[Role::Top], &init),
        entity("InitB", &[Role::Jungle], &init),
        entity("InitC", &[Role::Support], &init),
        entity("DmgA", &[Role::Mid], &dmg),
        entity("DmgB", &[Role::Adc], &dmg),
        entity("Spare", &[Role::Mid], &dmg),
    ]
    .into_iter()
    .collect()
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn empty_roster_is_disjointed_and_lacks_everything() {
    let catalog = builtin_catalog();
    let roster = RosterState::new();
    let advisor = Advisor::new(&catalog, &roster, Settings::default());

    assert!(advisor.team_score() < 55);
    assert_eq!(advisor.verdict(), Verdict::Disjointed);
    assert_eq!(advisor.lacking().len(), Attribute::ALL.len());
    assert!(advisor.sufficient().is_empty());
    assert_eq!(advisor.phase(), DraftPhase::Early);
}

#[test]
fn fully_covered_roster_is_godlike() {
    let catalog = complete_team_catalog();
    let roster = roster_with(&["InitA", "InitB", "InitC", "DmgA", "DmgB"], &[]);
    let advisor = Advisor::new(&catalog, &roster, Settings::default());

    assert!(advisor.lacking().is_empty());
    assert!(advisor.team_score() >= 92);
    assert_eq!(advisor.verdict(), Verdict::Godlike);
    assert_eq!(advisor.sufficient().len(), Attribute::ALL.len());
    assert_eq!(advisor.phase(), DraftPhase::Last);
}

#[test]
fn targeted_ranking_for_sufficient_attribute_is_well_defined() {
    let catalog = builtin_catalog();
    let roster = roster_with(&["Leona", "Jinx"], &[]);
    let advisor = Advisor::new(&catalog, &roster, Settings::default());
    assert!(!advisor.lacking().contains(&Attribute::SafeBlind));

    let list = advisor.targeted_candidates(Attribute::SafeBlind);
    assert!(!list.is_empty());
    assert!(list.len() <= TARGETED_LIMIT);
    assert_eq!(list[0].grade, Grade::SS);
    assert!(list.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(list.iter().all(|c| c.id != "Leona" && c.id != "Jinx"));
    assert!(list.iter().all(|c| c.reasons.len() <= 3));
}

#[test]
fn picked_and_banned_ids_never_appear_as_candidates() {
    let catalog = builtin_catalog();
    let roster = RosterState::new();
    let top = Advisor::new(&catalog, &roster, Settings::default()).general_candidates()[0]
        .id
        .clone();

    let mut roster = RosterState::new();
    roster.assign(SlotRef::new(Side::Ally, 0), &top).unwrap();
    roster.assign(SlotRef::new(Side::BanBlue, 0), "Zed").unwrap();
    roster.assign(SlotRef::new(Side::BanRed, 0), "Ahri").unwrap();
    let advisor = Advisor::new(&catalog, &roster, Settings::default());

    let general = advisor.general_candidates();
    assert!(general.iter().all(|c| c.id != top && c.id != "Zed"));
    for attr in Attribute::ALL {
        let targeted = advisor.targeted_candidates(attr);
        assert!(targeted.iter().all(|c| c.id != top && c.id != "Zed"));
    }
}

#[test]
fn role_filter_narrows_the_universe() {
    let catalog = builtin_catalog();
    let roster = roster_with(&["Jinx"], &[]);
    let any = Advisor::new(&catalog, &roster, Settings::default()).general_candidates();

    let settings = Settings {
        role: Role::Support,
        ..Settings::default()
    };
    let support = Advisor::new(&catalog, &roster, settings).general_candidates();

    assert!(!support.is_empty());
    assert!(support.len() < any.len());
    for c in &support {
        assert!(c.roles.contains(&Role::Support));
        assert!(any.iter().any(|a| a.id == c.id));
    }
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn profile_is_order_independent() {
    let catalog = builtin_catalog();
    let a = profile(&catalog, ["Leona", "Jinx", "Orianna"]);
    let b = profile(&catalog, ["Orianna", "Leona", "Jinx"]);
    assert_eq!(a, b);
    assert_eq!(a[Attribute::Engage], 5.0);
}

#[test]
fn unknown_ids_contribute_nothing() {
    let catalog = builtin_catalog();
    let a = profile(&catalog, ["Leona", "NotARealEntity"]);
    let b = profile(&catalog, ["Leona"]);
    assert_eq!(a, b);
}

#[test]
fn assign_then_clear_restores_profile() {
    let catalog = builtin_catalog();
    let mut roster = roster_with(&["Leona", "Jinx"], &[]);
    let before = Advisor::new(&catalog, &roster, Settings::default()).profile(Side::Ally);

    let slot = SlotRef::new(Side::Ally, 3);
    roster.assign(slot, "Orianna").unwrap();
    assert_ne!(
        Advisor::new(&catalog, &roster, Settings::default()).profile(Side::Ally),
        before
    );
    roster.clear(slot).unwrap();
    let after = Advisor::new(&catalog, &roster, Settings::default()).profile(Side::Ally);
    assert_eq!(after, before);
}

#[test]
fn score_rises_as_a_realistic_team_fills() {
    let catalog = builtin_catalog();
    let picks = ["Leona", "Jinx", "Orianna", "JarvanIV", "Ornn"];
    let mut roster = RosterState::new();
    let mut last = Advisor::new(&catalog, &roster, Settings::default()).team_score();

    for (i, id) in picks.iter().enumerate() {
        roster.assign(SlotRef::new(Side::Ally, i), id).unwrap();
        let score = Advisor::new(&catalog, &roster, Settings::default()).team_score();
        assert!(score <= 100);
        assert!(score >= last, "score dropped from {last} to {score} after {id}");
        last = score;
    }
    assert!(last >= 72, "full sample team should be at least Strong, got {last}");
}

#[test]
fn lacking_and_sufficient_partition_attributes() {
    let catalog = builtin_catalog();
    let roster = roster_with(&["Leona", "Jinx", "Orianna"], &["Zed"]);
    let advisor = Advisor::new(&catalog, &roster, Settings::default());

    let mut all: Vec<Attribute> = advisor.lacking().to_vec();
    all.extend(advisor.sufficient());
    all.sort();
    assert_eq!(all, Attribute::ALL.to_vec());
}

#[test]
fn stricter_mode_never_scores_higher() {
    let catalog = builtin_catalog();
    let roster = roster_with(&["Leona", "Jinx", "Orianna", "JarvanIV", "Ornn"], &[]);
    let score = |strictness| {
        let settings = Settings {
            strictness,
            ..Settings::default()
        };
        Advisor::new(&catalog, &roster, settings).team_score()
    };
    assert!(score(Strictness::Strict) <= score(Strictness::Normal));
    assert!(score(Strictness::Normal) <= score(Strictness::Loose));
}

#[test]
fn fixed_phase_overrides_auto() {
    let catalog = builtin_catalog();
    let roster = RosterState::new();
    let settings = Settings {
        phase: PhaseMode::Fixed(DraftPhase::Last),
        ..Settings::default()
    };
    let advisor = Advisor::new(&catalog, &roster, settings);
    assert_eq!(advisor.phase(), DraftPhase::Last);
}

// ===========================================================================
// Ranking details
// ===========================================================================

#[test]
fn synergy_partner_tops_general_ranking() {
    let catalog = builtin_catalog();
    let roster = roster_with(&["Jinx"], &[]);
    let list = Advisor::new(&catalog, &roster, Settings::default()).general_candidates();

    assert_eq!(list[0].id, "Leona");
    assert!(list.len() <= GENERAL_LIMIT);
    assert!(list.iter().all(|c| c.reasons.len() <= 4));

    // Need reasons come first, so the pairing may be cut from the reason
    // list; its bonus still lands in the score.
    let (bonus, descriptions) = pick_bonus("Leona", ["Jinx"]);
    assert_eq!(bonus, 28.0);
    assert_eq!(descriptions, vec!["engage that lets Jinx's damage through"]);
    let (none, _) = pick_bonus("Leona", ["Ezreal"]);
    assert_eq!(none, 0.0);
}

#[test]
fn equal_scores_keep_catalog_order() {
    let catalog = builtin_catalog();
    let roster = roster_with(&["Jinx"], &[]);
    let list = Advisor::new(&catalog, &roster, Settings::default()).general_candidates();

    let pos = |id: &str| list.iter().position(|c| c.id == id).unwrap();
    let (nautilus, rell) = (pos("Nautilus"), pos("Rell"));
    assert_eq!(list[nautilus].score, list[rell].score);
    assert!(nautilus < rell);
}

#[test]
fn tank_heavy_enemy_surfaces_anti_tank_reason() {
    let catalog = builtin_catalog();
    let roster = roster_with(&[], &["Ornn", "Malphite", "Sejuani"]);
    // Mid phase keeps blind-pick safety from crowding the reason list.
    let settings = Settings {
        phase: PhaseMode::Fixed(DraftPhase::Mid),
        ..Settings::default()
    };
    let advisor = Advisor::new(&catalog, &roster, settings);
    assert_eq!(advisor.counter_weights()[Attribute::AntiTank], 3.0);

    let list = advisor.general_candidates();
    let vayne = list.iter().find(|c| c.id == "Vayne").unwrap();
    assert!(vayne.reasons.iter().any(|r| r == "counters tank-heavy enemy"));

    let last = Settings {
        phase: PhaseMode::Fixed(DraftPhase::Last),
        ..Settings::default()
    };
    let advisor = Advisor::new(&catalog, &roster, last);
    assert_eq!(advisor.counter_weights()[Attribute::AntiTank], 3.75);
}

#[test]
fn targeted_ranking_explains_secondary_coverage() {
    let catalog = builtin_catalog();
    let roster = roster_with(&["Leona", "Jinx"], &[]);
    let advisor = Advisor::new(&catalog, &roster, Settings::default());
    assert!(advisor.lacking().contains(&Attribute::Peel));

    let list = advisor.targeted_candidates(Attribute::Peel);
    let first = &list[0];
    assert_eq!(first.grade, Grade::SS);
    assert_eq!(first.grade.stars(), 5);
    assert_eq!(first.reasons[0], "reinforces Peel");
    assert!(first.reasons.iter().any(|r| r.starts_with("also lifts ")));
}

#[test]
fn zero_top_score_grades_everything_d() {
    let catalog: Catalog = vec![
        entity("Blank", &[Role::Top], &[]),
        entity("Empty", &[Role::Mid], &[]),
    ]
    .into_iter()
    .collect();
    let roster = RosterState::new();
    let advisor = Advisor::new(&catalog, &roster, Settings::default());

    let list = advisor.targeted_candidates(Attribute::Engage);
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|c| c.grade == Grade::D));
}

#[test]
fn empty_universe_yields_empty_lists() {
    let catalog = complete_team_catalog();
    let mut roster = roster_with(&["InitA", "InitB", "InitC", "DmgA", "DmgB"], &[]);
    roster.assign(SlotRef::new(Side::BanRed, 0), "Spare").unwrap();
    let advisor = Advisor::new(&catalog, &roster, Settings::default());

    assert!(advisor.general_candidates().is_empty());
    assert!(advisor.targeted_candidates(Attribute::Engage).is_empty());
}

#[test]
fn any_role_entity_only_matches_any_filter() {
    let catalog: Catalog = vec![
        entity("Mystery", &[Role::Any], &[(Attribute::Engage, 3.0)]),
        entity("Known", &[Role::Top], &[(Attribute::Engage, 1.0)]),
    ]
    .into_iter()
    .collect();
    let roster = RosterState::new();

    let any = Advisor::new(&catalog, &roster, Settings::default()).general_candidates();
    assert_eq!(any.len(), 2);

    let top = Settings {
        role: Role::Top,
        ..Settings::default()
    };
    let list = Advisor::new(&catalog, &roster, top).general_candidates();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, "Known");
}

#[test]
fn open_role_points_at_uncovered_role() {
    let catalog = builtin_catalog();
    let roster = roster_with(&["Leona", "JarvanIV"], &[]);
    // Leona covers SUPPORT; JarvanIV covers JUNGLE and TOP. MID is next in
    // role order with no coverage.
    assert_eq!(
        Advisor::new(&catalog, &roster, Settings::default()).open_role(),
        Role::Mid
    );
    assert_eq!(
        Advisor::new(&catalog, &RosterState::new(), Settings::default()).open_role(),
        Role::Top
    );
}

#[test]
fn report_mirrors_queries() {
    let catalog = builtin_catalog();
    let roster = roster_with(&["Leona", "Jinx"], &["Zed"]);
    let advisor = Advisor::new(&catalog, &roster, Settings::default());
    let report = advisor.report();

    assert_eq!(report.score, advisor.team_score());
    assert_eq!(report.verdict, advisor.verdict());
    assert_eq!(report.lacking, advisor.lacking());
    assert_eq!(report.candidates, advisor.general_candidates());
    assert_eq!(report.phase, DraftPhase::Mid);
    assert_eq!(report.phase_mode, "auto");

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["verdict_label"], advisor.verdict().label());
}
