// Live session snapshots and their application to the roster.
//
// A snapshot is what the local bridge reports for the current champion
// select. Missing sections leave the corresponding roster rows untouched.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::roster::{RosterState, Side, SlotRef, TeamSide, SLOTS};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BanLists {
    #[serde(default)]
    pub blue: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub red: Option<Vec<Option<String>>>,
}

/// Bridge payload: `{ "ally": [..], "enemy": [..], "bans": { "blue": [..],
/// "red": [..] }, "side": "BLUE" }`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub ally: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub enemy: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub bans: Option<BanLists>,
    #[serde(default)]
    pub side: Option<TeamSide>,
}

impl SessionSnapshot {
    /// Rows present in this snapshot, each padded or truncated to five slots
    /// with blank ids treated as empty.
    fn rows(&self) -> Vec<(Side, [Option<String>; SLOTS])> {
        let bans = self.bans.as_ref();
        [
            (Side::Ally, self.ally.as_ref()),
            (Side::Enemy, self.enemy.as_ref()),
            (Side::BanBlue, bans.and_then(|b| b.blue.as_ref())),
            (Side::BanRed, bans.and_then(|b| b.red.as_ref())),
        ]
        .into_iter()
        .filter_map(|(side, row)| row.map(|r| (side, normalize(r))))
        .collect()
    }
}

fn normalize(row: &[Option<String>]) -> [Option<String>; SLOTS] {
    let mut out: [Option<String>; SLOTS] = Default::default();
    for (slot, id) in out.iter_mut().zip(row) {
        *slot = id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
    }
    out
}

/// Bring the roster in line with `snapshot` using the ordinary mutation
/// operations. Returns whether anything (slots or team side) changed.
///
/// Slots that differ are cleared first, then filled, so entities that moved
/// between slots are accepted. Ids repeated within the snapshot, or held by a
/// row the snapshot does not mention, are skipped with a warning and their
/// slot stays empty.
pub fn apply_snapshot(roster: &mut RosterState, snapshot: &SessionSnapshot) -> bool {
    let rows = snapshot.rows();
    let mut changed = false;

    for (side, target) in &rows {
        for (index, want) in target.iter().enumerate() {
            let slot = SlotRef::new(*side, index);
            if roster.get(slot) != want.as_deref() {
                changed |= matches!(roster.clear(slot), Ok(true));
            }
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for (side, target) in &rows {
        for (index, want) in target.iter().enumerate() {
            let Some(id) = want.as_deref() else { continue };
            if !seen.insert(id) {
                warn!("snapshot lists '{}' more than once; skipping duplicate", id);
                continue;
            }
            match roster.assign(SlotRef::new(*side, index), id) {
                Ok(assigned) => changed |= assigned,
                Err(e) => warn!("snapshot slot {} skipped: {}", SlotRef::new(*side, index), e),
            }
        }
    }

    if let Some(side) = snapshot.side {
        if roster.team_side != side {
            roster.team_side = side;
            changed = true;
        }
    }

    if changed {
        debug!("session snapshot applied");
    }
    changed
}
