//! Actor records as stored by the document store.
//!
//! Characters and NPCs share [`CharacterRecord`]; creatures use
//! [`CreatureRecord`]. [`ActorRecord`] is the single polymorphic entry point
//! the engine dispatches on.
mod craft;
mod record;
mod template;

use core::fmt;

pub use craft::{CraftSlotError, CraftSlots};
pub use record::{ActorRecord, CharacterRecord, CreatureRecord, Details};
pub use template::{ActorTemplate, ActorTemplates, fill_missing};

/// Identifier of an actor document.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ActorId(pub String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ActorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Actor document subtype.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ActorKind {
    Character,
    Npc,
    Creature,
}

impl ActorKind {
    /// Attributes the normalizer canonicalizes for this kind.
    pub const fn required_attributes(self) -> &'static [crate::stats::Attribute] {
        match self {
            ActorKind::Character | ActorKind::Npc => &crate::stats::Attribute::CHARACTER,
            ActorKind::Creature => &crate::stats::Attribute::CREATURE,
        }
    }
}
