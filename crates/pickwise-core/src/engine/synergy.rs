// Synergy rule tables.
//
// Two distinct tables: pick synergies reward a candidate when *any* listed
// partner is already on the ally team; team synergies add to the
// completeness score only when *all* listed members are present.

/// Candidate bonus: `target` earns `bonus` when any of `partners` is picked.
#[derive(Debug, Clone, Copy)]
pub struct PickSynergy {
    pub target: &'static str,
    pub partners: &'static [&'static str],
    pub bonus: f64,
    pub description: &'static str,
}

/// Completeness bonus (0-1 scale) when every member is on the ally team.
#[derive(Debug, Clone, Copy)]
pub struct TeamSynergy {
    pub members: &'static [&'static str],
    pub bonus: f64,
    pub description: &'static str,
}

pub const PICK_SYNERGIES: &[PickSynergy] = &[
    PickSynergy {
        target: "Leona",
        partners: &["Jinx"],
        bonus: 28.0,
        description: "engage that lets Jinx's damage through",
    },
    PickSynergy {
        target: "Jinx",
        partners: &["Leona", "Nautilus", "Rell", "Alistar"],
        bonus: 24.0,
        description: "hard engage into sustained damage",
    },
    PickSynergy {
        target: "JarvanIV",
        partners: &["Orianna"],
        bonus: 30.0,
        description: "Shockwave follow-up",
    },
    PickSynergy {
        target: "Orianna",
        partners: &["JarvanIV", "Wukong"],
        bonus: 26.0,
        description: "knock-up combo",
    },
    PickSynergy {
        target: "Lulu",
        partners: &["KogMaw"],
        bonus: 34.0,
        description: "hypercarry protection",
    },
    PickSynergy {
        target: "KogMaw",
        partners: &["Lulu", "Milio"],
        bonus: 28.0,
        description: "range and attack-speed buffs into damage",
    },
];

pub const TEAM_SYNERGIES: &[TeamSynergy] = &[
    TeamSynergy {
        members: &["Jinx", "Leona"],
        bonus: 0.03,
        description: "bot lane engage",
    },
    TeamSynergy {
        members: &["JarvanIV", "Orianna"],
        bonus: 0.035,
        description: "Jarvan IV + Orianna",
    },
    TeamSynergy {
        members: &["KogMaw", "Lulu"],
        bonus: 0.04,
        description: "hypercarry protection",
    },
    TeamSynergy {
        members: &["Xayah", "Rakan"],
        bonus: 0.03,
        description: "signature duo",
    },
];

/// Total pick-synergy bonus for `candidate` and the descriptions of the
/// rules that fired, in table order.
pub fn pick_bonus<'a, I>(candidate: &str, ally: I) -> (f64, Vec<&'static str>)
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    let mut bonus = 0.0;
    let mut reasons = Vec::new();
    for rule in PICK_SYNERGIES.iter().filter(|r| r.target == candidate) {
        if ally
            .clone()
            .into_iter()
            .any(|id| rule.partners.iter().any(|p| *p == id))
        {
            bonus += rule.bonus;
            reasons.push(rule.description);
        }
    }
    (bonus, reasons)
}

/// Completed team synergies for the given ally ids.
pub fn team_synergies<'a, I>(ally: I) -> Vec<&'static TeamSynergy>
where
    I: IntoIterator<Item = &'a str>,
{
    let ally: Vec<&str> = ally.into_iter().collect();
    TEAM_SYNERGIES
        .iter()
        .filter(|rule| rule.members.iter().all(|m| ally.contains(m)))
        .collect()
}

/// Sum of completed team-synergy bonuses.
pub fn team_bonus<'a, I>(ally: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    team_synergies(ally).iter().map(|r| r.bonus).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_synergy_triggers_on_any_partner() {
        let (bonus, reasons) = pick_bonus("Jinx", ["Rell"]);
        assert_eq!(bonus, 24.0);
        assert_eq!(reasons, vec!["hard engage into sustained damage"]);

        let (bonus, reasons) = pick_bonus("Jinx", ["Zed"]);
        assert_eq!(bonus, 0.0);
        assert!(reasons.is_empty());
    }

    #[test]
    fn pick_synergy_only_for_target() {
        let (bonus, _) = pick_bonus("Leona", ["Leona", "Rell"]);
        assert_eq!(bonus, 0.0);
        let (bonus, _) = pick_bonus("Leona", ["Jinx"]);
        assert_eq!(bonus, 28.0);
    }

    #[test]
    fn team_synergy_needs_all_members() {
        assert_eq!(team_bonus(["Jinx"]), 0.0);
        assert!((team_bonus(["Leona", "Zed", "Jinx"]) - 0.03).abs() < 1e-12);
        assert!(
            (team_bonus(["Jinx", "Leona", "JarvanIV", "Orianna"]) - 0.065).abs() < 1e-12
        );
    }

    #[test]
    fn partial_pair_rewards_ranking_but_not_score() {
        // Lulu alone makes KogMaw a better pick, but scores nothing yet.
        let (bonus, _) = pick_bonus("KogMaw", ["Lulu"]);
        assert!(bonus > 0.0);
        assert_eq!(team_bonus(["Lulu"]), 0.0);
    }
}
