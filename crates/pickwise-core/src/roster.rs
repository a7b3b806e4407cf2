// Roster state: ally/enemy picks and both ban rows for a single draft.
//
// The roster is the only mutable state the engine reads. All edits go
// through `assign`, `clear` and `clear_all`, which enforce that an id
// occupies at most one slot across every sequence.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Slots per sequence (five picks, five bans per side).
pub const SLOTS: usize = 5;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum RosterError {
    #[error("slot index {index} out of range")]
    SlotOutOfRange { index: usize },

    #[error("'{id}' is already placed at {existing}")]
    DuplicateEntity { id: String, existing: SlotRef },

    #[error("entity id must not be blank")]
    BlankId,
}

// ---------------------------------------------------------------------------
// Sides and slot references
// ---------------------------------------------------------------------------

/// The user's team side. Display only; it does not affect scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamSide {
    #[default]
    Blue,
    Red,
}

impl TeamSide {
    pub fn label(self) -> &'static str {
        match self {
            TeamSide::Blue => "BLUE",
            TeamSide::Red => "RED",
        }
    }
}

/// One of the four slot sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Ally,
    Enemy,
    BanBlue,
    BanRed,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Ally, Side::Enemy, Side::BanBlue, Side::BanRed];

    pub fn label(self) -> &'static str {
        match self {
            Side::Ally => "ally",
            Side::Enemy => "enemy",
            Side::BanBlue => "blue ban",
            Side::BanRed => "red ban",
        }
    }
}

/// Address of a single slot. `index` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    pub side: Side,
    pub index: usize,
}

impl SlotRef {
    pub fn new(side: Side, index: usize) -> Self {
        SlotRef { side, index }
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.side.label(), self.index + 1)
    }
}

// ---------------------------------------------------------------------------
// RosterState
// ---------------------------------------------------------------------------

type Row = [Option<String>; SLOTS];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RosterState {
    ally: Row,
    enemy: Row,
    ban_blue: Row,
    ban_red: Row,
    pub team_side: TeamSide,
}

impl RosterState {
    pub fn new() -> Self {
        Self::default()
    }

    fn row(&self, side: Side) -> &Row {
        match side {
            Side::Ally => &self.ally,
            Side::Enemy => &self.enemy,
            Side::BanBlue => &self.ban_blue,
            Side::BanRed => &self.ban_red,
        }
    }

    fn row_mut(&mut self, side: Side) -> &mut Row {
        match side {
            Side::Ally => &mut self.ally,
            Side::Enemy => &mut self.enemy,
            Side::BanBlue => &mut self.ban_blue,
            Side::BanRed => &mut self.ban_red,
        }
    }

    /// All five slots of a sequence, empty slots as `None`.
    pub fn slots(&self, side: Side) -> &[Option<String>] {
        self.row(side)
    }

    /// The id at `slot`, if the slot exists and is occupied.
    pub fn get(&self, slot: SlotRef) -> Option<&str> {
        self.row(slot.side).get(slot.index)?.as_deref()
    }

    /// Occupied ids of a sequence, in slot order.
    pub fn ids(&self, side: Side) -> impl Iterator<Item = &str> + '_ {
        self.row(side).iter().filter_map(|s| s.as_deref())
    }

    pub fn filled_count(&self, side: Side) -> usize {
        self.ids(side).count()
    }

    /// Where `id` currently sits, if anywhere.
    pub fn find(&self, id: &str) -> Option<SlotRef> {
        Side::ALL.into_iter().find_map(|side| {
            self.row(side)
                .iter()
                .position(|s| s.as_deref() == Some(id))
                .map(|index| SlotRef::new(side, index))
        })
    }

    /// Whether `id` is picked or banned anywhere.
    pub fn is_taken(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Place `id` at `slot`, replacing whatever was there.
    ///
    /// Returns `Ok(true)` when the roster changed and `Ok(false)` when the
    /// slot already held `id`. An id that sits in a different slot is
    /// rejected rather than moved.
    pub fn assign(&mut self, slot: SlotRef, id: &str) -> Result<bool, RosterError> {
        check_index(slot.index)?;
        let id = id.trim();
        if id.is_empty() {
            return Err(RosterError::BlankId);
        }
        match self.find(id) {
            Some(existing) if existing == slot => return Ok(false),
            Some(existing) => {
                return Err(RosterError::DuplicateEntity {
                    id: id.to_string(),
                    existing,
                })
            }
            None => {}
        }
        self.row_mut(slot.side)[slot.index] = Some(id.to_string());
        Ok(true)
    }

    /// Empty `slot`. Returns whether it held anything.
    pub fn clear(&mut self, slot: SlotRef) -> Result<bool, RosterError> {
        check_index(slot.index)?;
        Ok(self.row_mut(slot.side)[slot.index].take().is_some())
    }

    /// Empty every slot of every sequence. Team side is kept.
    pub fn clear_all(&mut self) -> bool {
        let mut changed = false;
        for side in Side::ALL {
            for slot in self.row_mut(side).iter_mut() {
                changed |= slot.take().is_some();
            }
        }
        changed
    }
}

fn check_index(index: usize) -> Result<(), RosterError> {
    if index >= SLOTS {
        return Err(RosterError::SlotOutOfRange { index });
    }
    Ok(())
}
