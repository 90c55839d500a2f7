//! Items owned by actors: skills and weapons.
//!
//! Items carry authored numbers only. Their effective values combine those
//! numbers with the owner's derived bonuses and are computed on demand.
mod listing;
mod skill;
mod weapon;

use core::fmt;

pub use listing::{
    CreatureWeaponLine, SkillLine, creature_skill_lines, creature_weapon_lines, npc_skill_lines,
};
pub use skill::{SkillRecord, SummoningSubtype};
pub use weapon::{CreatureWeapon, WeaponRecord, WeaponScore, WeaponTotals};

/// Identifier of an item owned by an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
