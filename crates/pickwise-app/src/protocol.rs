// Messages exchanged between the front end and the application event loop.

use chrono::{DateTime, Utc};
use pickwise_core::attribute::Attribute;
use pickwise_core::catalog::Role;
use pickwise_core::engine::ranker::TargetedCandidate;
use pickwise_core::engine::{PhaseMode, Report, Strictness};
use pickwise_core::roster::{RosterState, SlotRef};

/// Commands from the front end to the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Put an entity into a slot. The id is matched case-insensitively
    /// against the catalog.
    Assign { slot: SlotRef, id: String },
    Clear(SlotRef),
    /// Empty every slot on every side.
    ClearAll,
    SetPhase(PhaseMode),
    SetStrictness(Strictness),
    SetRole(Role),
    /// Ranked candidates for one attribute.
    Need(Attribute),
    /// Re-send the current report without changing anything.
    Refresh,
    Quit,
}

/// Availability of the external sources.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceStatus {
    pub session_available: bool,
    pub catalog_available: bool,
    pub patch: Option<String>,
    /// When the last session snapshot was received.
    pub last_snapshot: Option<DateTime<Utc>>,
}

/// Updates from the event loop to the front end.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// The draft changed (or a refresh was requested).
    Report {
        roster: Box<RosterState>,
        report: Box<Report>,
    },
    SourceStatus(SourceStatus),
    Targeted {
        attr: Attribute,
        candidates: Vec<TargetedCandidate>,
    },
    /// A command was rejected; the text says why.
    Notice(String),
}
