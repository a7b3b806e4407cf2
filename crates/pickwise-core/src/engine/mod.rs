// Composition scoring and recommendation engine.
//
// `Advisor` is built from a catalog, a roster and the current settings. It
// computes profiles, weights, thresholds, the completeness score and the
// lacking set once, then answers queries against them. Nothing here mutates
// the roster.

pub mod ranker;
pub mod score;
pub mod synergy;
pub mod threshold;
pub mod weights;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::{AttrVec, Attribute};
use crate::catalog::{Catalog, Role};
use crate::roster::{RosterState, Side};

use self::ranker::{Candidate, RankContext, TargetedCandidate};
use self::score::Verdict;

/// Near-miss tolerance: a team within this of a threshold is not lacking.
pub const EPS: f64 = 0.25;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftPhase {
    /// Picks 1-2.
    Early,
    /// Picks 3-4.
    Mid,
    /// Pick 5.
    Last,
}

impl DraftPhase {
    /// Phase of the next pick given how many ally slots are filled.
    pub fn from_filled(filled: usize) -> Self {
        match filled + 1 {
            0..=2 => DraftPhase::Early,
            3..=4 => DraftPhase::Mid,
            _ => DraftPhase::Last,
        }
    }

    /// Accepts `early`/`mid`/`last` and the pick-range spellings `1-2`,
    /// `3-4`, `5`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "early" | "1-2" => Some(DraftPhase::Early),
            "mid" | "3-4" => Some(DraftPhase::Mid),
            "last" | "5" => Some(DraftPhase::Last),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftPhase::Early => "early",
            DraftPhase::Mid => "mid",
            DraftPhase::Last => "last",
        }
    }
}

impl fmt::Display for DraftPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Either a fixed phase or one derived from the ally pick count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseMode {
    #[default]
    Auto,
    Fixed(DraftPhase),
}

impl PhaseMode {
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Some(PhaseMode::Auto);
        }
        DraftPhase::parse(s).map(PhaseMode::Fixed)
    }

    pub fn resolve(self, filled_ally: usize) -> DraftPhase {
        match self {
            PhaseMode::Auto => DraftPhase::from_filled(filled_ally),
            PhaseMode::Fixed(phase) => phase,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PhaseMode::Auto => "auto",
            PhaseMode::Fixed(phase) => phase.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Strict,
    #[default]
    Normal,
    Loose,
}

impl Strictness {
    pub fn base_slack(self) -> f64 {
        match self {
            Strictness::Strict => 0.10,
            Strictness::Normal => 0.20,
            Strictness::Loose => 0.35,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Strictness::Strict),
            "normal" => Some(Strictness::Normal),
            "loose" => Some(Strictness::Loose),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strictness::Strict => "strict",
            Strictness::Normal => "normal",
            Strictness::Loose => "loose",
        }
    }
}

/// User-controlled engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub phase: PhaseMode,
    pub strictness: Strictness,
    pub role: Role,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            phase: PhaseMode::Auto,
            strictness: Strictness::Normal,
            role: Role::Any,
        }
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Sum of the capability vectors of `ids`. Unknown ids contribute nothing.
pub fn profile<'a, I>(catalog: &Catalog, ids: I) -> AttrVec
where
    I: IntoIterator<Item = &'a str>,
{
    let mut total = AttrVec::zero();
    for id in ids {
        if let Some(entity) = catalog.get(id) {
            total += entity.caps;
        }
    }
    total
}

// ---------------------------------------------------------------------------
// Advisor
// ---------------------------------------------------------------------------

pub struct Advisor<'a> {
    catalog: &'a Catalog,
    roster: &'a RosterState,
    settings: Settings,
    phase: DraftPhase,
    ally: AttrVec,
    enemy: AttrVec,
    need: AttrVec,
    counter: AttrVec,
    thresholds: AttrVec,
    score: u32,
    lacking: Vec<Attribute>,
}

impl<'a> Advisor<'a> {
    pub fn new(catalog: &'a Catalog, roster: &'a RosterState, settings: Settings) -> Self {
        let phase = settings.phase.resolve(roster.filled_count(Side::Ally));
        let ally = profile(catalog, roster.ids(Side::Ally));
        let enemy = profile(catalog, roster.ids(Side::Enemy));
        let need = weights::need_weights(&ally, phase);
        let counter = weights::counter_weights(&enemy, phase);
        let thresholds = threshold::thresholds(&need, settings.strictness, phase);
        let score = score::completeness(&ally, &thresholds, roster.ids(Side::Ally));
        let lacking = threshold::lacking(&ally, &thresholds, score);

        Advisor {
            catalog,
            roster,
            settings,
            phase,
            ally,
            enemy,
            need,
            counter,
            thresholds,
            score,
            lacking,
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Effective phase after resolving `PhaseMode::Auto`.
    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    pub fn profile(&self, side: Side) -> AttrVec {
        match side {
            Side::Ally => self.ally,
            Side::Enemy => self.enemy,
            other => profile(self.catalog, self.roster.ids(other)),
        }
    }

    pub fn need_weights(&self) -> &AttrVec {
        &self.need
    }

    pub fn counter_weights(&self) -> &AttrVec {
        &self.counter
    }

    pub fn thresholds(&self) -> &AttrVec {
        &self.thresholds
    }

    /// Lacking attributes, most under-covered first.
    pub fn lacking(&self) -> &[Attribute] {
        &self.lacking
    }

    /// Every attribute not lacking, in declaration order.
    pub fn sufficient(&self) -> Vec<Attribute> {
        Attribute::ALL
            .into_iter()
            .filter(|a| !self.lacking.contains(a))
            .collect()
    }

    pub fn team_score(&self) -> u32 {
        self.score
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_score(self.score)
    }

    fn rank_context(&self) -> RankContext<'_> {
        RankContext {
            catalog: self.catalog,
            roster: self.roster,
            role: self.settings.role,
            phase: self.phase,
            need: &self.need,
            counter: &self.counter,
            lacking: &self.lacking,
        }
    }

    pub fn general_candidates(&self) -> Vec<Candidate> {
        ranker::general(&self.rank_context())
    }

    pub fn targeted_candidates(&self, target: Attribute) -> Vec<TargetedCandidate> {
        ranker::targeted(&self.rank_context(), target)
    }

    pub fn open_role(&self) -> Role {
        ranker::open_role(self.catalog, self.roster)
    }

    /// Snapshot of every derived value the presentation layer shows.
    pub fn report(&self) -> Report {
        let verdict = self.verdict();
        Report {
            score: self.score,
            verdict,
            verdict_label: verdict.label(),
            verdict_description: verdict.description(),
            phase: self.phase,
            phase_mode: self.settings.phase.label(),
            strictness: self.settings.strictness,
            role: self.settings.role,
            open_role: self.open_role(),
            ally_profile: self.ally,
            thresholds: self.thresholds,
            lacking: self.lacking.clone(),
            sufficient: self.sufficient(),
            candidates: self.general_candidates(),
        }
    }
}

/// Derived view of the current draft, recomputed after every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub score: u32,
    pub verdict: Verdict,
    pub verdict_label: &'static str,
    pub verdict_description: &'static str,
    pub phase: DraftPhase,
    pub phase_mode: &'static str,
    pub strictness: Strictness,
    pub role: Role,
    pub open_role: Role,
    pub ally_profile: AttrVec,
    pub thresholds: AttrVec,
    pub lacking: Vec<Attribute>,
    pub sufficient: Vec<Attribute>,
    pub candidates: Vec<Candidate>,
}
