// Tactical attributes, the constant ideal/importance tables, and the
// fixed-size attribute vector used for capabilities and team profiles.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Number of attributes in the fixed set.
pub const ATTRIBUTE_COUNT: usize = 13;

// ---------------------------------------------------------------------------
// Attribute
// ---------------------------------------------------------------------------

/// One tactical dimension used to characterize what a team composition has
/// and what it still needs.
///
/// Declaration order matters: it is the display order and the tie-break
/// order for sorted attribute lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Attribute {
    /// Initiation capacity.
    Engage,
    /// Protection of allies.
    Peel,
    /// Frontline presence.
    Frontline,
    /// Burst damage.
    Burst,
    /// Sustained damage.
    SustainDps,
    /// Area denial / long-range harass.
    Poke,
    /// Wave control.
    Waveclear,
    Utility,
    /// Damage against high-durability targets.
    AntiTank,
    Mobility,
    /// Magic-damage share.
    Magic,
    /// Physical-damage share.
    Phys,
    /// Safety when picked with little information about the enemy.
    SafeBlind,
}

impl Attribute {
    /// Every attribute, in declaration order.
    pub const ALL: [Attribute; ATTRIBUTE_COUNT] = [
        Attribute::Engage,
        Attribute::Peel,
        Attribute::Frontline,
        Attribute::Burst,
        Attribute::SustainDps,
        Attribute::Poke,
        Attribute::Waveclear,
        Attribute::Utility,
        Attribute::AntiTank,
        Attribute::Mobility,
        Attribute::Magic,
        Attribute::Phys,
        Attribute::SafeBlind,
    ];

    /// Position of this attribute in [`Attribute::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable key (e.g. `SUSTAIN_DPS`).
    pub fn key(self) -> &'static str {
        match self {
            Attribute::Engage => "ENGAGE",
            Attribute::Peel => "PEEL",
            Attribute::Frontline => "FRONTLINE",
            Attribute::Burst => "BURST",
            Attribute::SustainDps => "SUSTAIN_DPS",
            Attribute::Poke => "POKE",
            Attribute::Waveclear => "WAVECLEAR",
            Attribute::Utility => "UTILITY",
            Attribute::AntiTank => "ANTI_TANK",
            Attribute::Mobility => "MOBILITY",
            Attribute::Magic => "MAGIC",
            Attribute::Phys => "PHYS",
            Attribute::SafeBlind => "SAFE_BLIND",
        }
    }

    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Engage => "Engage",
            Attribute::Peel => "Peel",
            Attribute::Frontline => "Frontline",
            Attribute::Burst => "Burst",
            Attribute::SustainDps => "Sustained DPS",
            Attribute::Poke => "Poke",
            Attribute::Waveclear => "Waveclear",
            Attribute::Utility => "Utility",
            Attribute::AntiTank => "Anti-tank",
            Attribute::Mobility => "Mobility",
            Attribute::Magic => "Magic damage",
            Attribute::Phys => "Physical damage",
            Attribute::SafeBlind => "Blind-pick safety",
        }
    }

    /// Parse a key case-insensitively. Dashes are accepted in place of
    /// underscores so `anti-tank` and `ANTI_TANK` both resolve.
    pub fn from_key(s: &str) -> Option<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Attribute::ALL
            .into_iter()
            .find(|a| a.key() == normalized)
    }

    /// Target magnitude for a balanced team of five.
    pub fn ideal(self) -> f64 {
        IDEAL[self]
    }

    /// Fixed importance weight (1-5) used by the completeness score.
    pub fn base_importance(self) -> f64 {
        BASE_IMPORTANCE[self]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Attribute vector
// ---------------------------------------------------------------------------

/// A dense mapping from [`Attribute`] to a magnitude. Attributes that were
/// never set read as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttrVec([f64; ATTRIBUTE_COUNT]);

impl AttrVec {
    /// All-zero vector.
    pub const fn zero() -> Self {
        AttrVec([0.0; ATTRIBUTE_COUNT])
    }

    /// Build a vector from sparse `(attribute, value)` pairs. Later pairs
    /// overwrite earlier ones.
    pub fn from_pairs(pairs: &[(Attribute, f64)]) -> Self {
        let mut v = AttrVec::zero();
        for &(attr, value) in pairs {
            v[attr] = value;
        }
        v
    }

    pub fn get(&self, attr: Attribute) -> f64 {
        self.0[attr.index()]
    }

    /// Raise `attr` to at least `floor`. Never lowers an existing value.
    pub fn raise_to(&mut self, attr: Attribute, floor: f64) {
        let slot = &mut self.0[attr.index()];
        if *slot < floor {
            *slot = floor;
        }
    }

    /// Multiply every component by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        AttrVec(self.0.map(|v| v * factor))
    }

    /// Iterate `(attribute, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        Attribute::ALL.into_iter().map(move |a| (a, self.get(a)))
    }

    /// True when every component is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }
}

impl Index<Attribute> for AttrVec {
    type Output = f64;

    fn index(&self, attr: Attribute) -> &f64 {
        &self.0[attr.index()]
    }
}

impl IndexMut<Attribute> for AttrVec {
    fn index_mut(&mut self, attr: Attribute) -> &mut f64 {
        &mut self.0[attr.index()]
    }
}

impl AddAssign for AttrVec {
    fn add_assign(&mut self, rhs: AttrVec) {
        for (lhs, r) in self.0.iter_mut().zip(rhs.0) {
            *lhs += r;
        }
    }
}

impl Add for AttrVec {
    type Output = AttrVec;

    fn add(mut self, rhs: AttrVec) -> AttrVec {
        self += rhs;
        self
    }
}

impl Serialize for AttrVec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ATTRIBUTE_COUNT))?;
        for (attr, value) in self.iter() {
            map.serialize_entry(attr.key(), &value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Constant tables
// ---------------------------------------------------------------------------

/// Team totals of a hypothetical perfectly balanced five-entity roster.
pub const IDEAL: AttrVec = AttrVec([
    6.5, // ENGAGE
    6.0, // PEEL
    6.0, // FRONTLINE
    5.0, // BURST
    7.0, // SUSTAIN_DPS
    4.5, // POKE
    6.0, // WAVECLEAR
    5.0, // UTILITY
    4.0, // ANTI_TANK
    4.0, // MOBILITY
    6.0, // MAGIC
    6.0, // PHYS
    5.0, // SAFE_BLIND
]);

/// Importance weights for the completeness score; also the seed of the
/// need weighting used by the ranker.
pub const BASE_IMPORTANCE: AttrVec = AttrVec([
    5.0, // ENGAGE
    5.0, // PEEL
    5.0, // FRONTLINE
    3.0, // BURST
    4.0, // SUSTAIN_DPS
    2.0, // POKE
    3.0, // WAVECLEAR
    3.0, // UTILITY
    3.0, // ANTI_TANK
    1.0, // MOBILITY
    2.0, // MAGIC
    2.0, // PHYS
    2.0, // SAFE_BLIND
]);
