//! Actor record types.

use crate::item::{CreatureWeapon, ItemId, SkillRecord, WeaponRecord};
use crate::stats::{
    AttributeInput, CharacterClass, CreatureHpMode, DerivedStats, HitPoints, RawValue,
};

use super::craft::{CraftSlotError, CraftSlots};
use super::{ActorId, ActorKind};

/// Biographical fields that feed derivation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Details {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::stats::attributes::deserialize_lenient_opt_i32")
    )]
    pub age: Option<i32>,
    pub class: Option<CharacterClass>,
}

/// A player character or NPC.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterRecord {
    pub id: ActorId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: AttributeInput,
    #[cfg_attr(feature = "serde", serde(default))]
    pub details: Details,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: HitPoints,
    /// Only meaningful for player characters.
    #[cfg_attr(feature = "serde", serde(default))]
    pub craft_slots: CraftSlots,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillRecord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapons: Vec<WeaponRecord>,
    /// Cached output of the last derivation pass.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub derived: Option<DerivedStats>,
}

impl CharacterRecord {
    pub fn new(id: impl Into<ActorId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn class(&self) -> CharacterClass {
        self.details.class.unwrap_or_default()
    }

    pub fn skill(&self, id: &ItemId) -> Option<&SkillRecord> {
        self.skills.iter().find(|skill| &skill.id == id)
    }

    pub fn weapon(&self, id: &ItemId) -> Option<&WeaponRecord> {
        self.weapons.iter().find(|weapon| &weapon.id == id)
    }

    /// Assigns an owned knowledge skill to a craft slot.
    pub fn assign_craft_slot(&mut self, slot: usize, skill: &ItemId) -> Result<(), CraftSlotError> {
        let skill = self
            .skills
            .iter()
            .find(|owned| &owned.id == skill)
            .ok_or_else(|| CraftSlotError::UnknownSkill(skill.clone()))?;
        self.craft_slots.assign(slot, skill)
    }
}

/// A non-human creature.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureRecord {
    pub id: ActorId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: AttributeInput,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: HitPoints,
    /// `None` until a template or the user picks one; derivation uses `auto`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp_mode: Option<CreatureHpMode>,
    /// Read only in `custom` mode.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub hp_override: Option<RawValue>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapons: Vec<CreatureWeapon>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillRecord>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub derived: Option<DerivedStats>,
}

impl CreatureRecord {
    pub fn new(id: impl Into<ActorId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn hp_mode(&self) -> CreatureHpMode {
        self.hp_mode.unwrap_or_default()
    }
}

/// Any actor document.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "lowercase")
)]
pub enum ActorRecord {
    Character(CharacterRecord),
    Npc(CharacterRecord),
    Creature(CreatureRecord),
}

impl ActorRecord {
    pub fn kind(&self) -> ActorKind {
        match self {
            ActorRecord::Character(_) => ActorKind::Character,
            ActorRecord::Npc(_) => ActorKind::Npc,
            ActorRecord::Creature(_) => ActorKind::Creature,
        }
    }

    pub fn id(&self) -> &ActorId {
        match self {
            ActorRecord::Character(record) | ActorRecord::Npc(record) => &record.id,
            ActorRecord::Creature(record) => &record.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ActorRecord::Character(record) | ActorRecord::Npc(record) => &record.name,
            ActorRecord::Creature(record) => &record.name,
        }
    }

    pub fn attributes(&self) -> &AttributeInput {
        match self {
            ActorRecord::Character(record) | ActorRecord::Npc(record) => &record.attributes,
            ActorRecord::Creature(record) => &record.attributes,
        }
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeInput {
        match self {
            ActorRecord::Character(record) | ActorRecord::Npc(record) => &mut record.attributes,
            ActorRecord::Creature(record) => &mut record.attributes,
        }
    }

    pub fn hp(&self) -> &HitPoints {
        match self {
            ActorRecord::Character(record) | ActorRecord::Npc(record) => &record.hp,
            ActorRecord::Creature(record) => &record.hp,
        }
    }

    pub fn derived(&self) -> Option<&DerivedStats> {
        match self {
            ActorRecord::Character(record) | ActorRecord::Npc(record) => record.derived.as_ref(),
            ActorRecord::Creature(record) => record.derived.as_ref(),
        }
    }

    pub fn skills(&self) -> &[SkillRecord] {
        match self {
            ActorRecord::Character(record) | ActorRecord::Npc(record) => &record.skills,
            ActorRecord::Creature(record) => &record.skills,
        }
    }

    pub fn skill(&self, id: &ItemId) -> Option<&SkillRecord> {
        self.skills().iter().find(|skill| &skill.id == id)
    }

    /// Replaces the derived subset (HP pool and cached snapshot) in one step.
    pub fn apply_derived(&mut self, stats: DerivedStats) {
        let (hp, derived) = match self {
            ActorRecord::Character(record) | ActorRecord::Npc(record) => {
                (&mut record.hp, &mut record.derived)
            }
            ActorRecord::Creature(record) => (&mut record.hp, &mut record.derived),
        };
        *hp = stats.hp;
        *derived = Some(stats);
    }

    /// Assigns a craft slot; only player characters have them.
    pub fn assign_craft_slot(&mut self, slot: usize, skill: &ItemId) -> Result<(), CraftSlotError> {
        match self {
            ActorRecord::Character(record) => record.assign_craft_slot(slot, skill),
            other => Err(CraftSlotError::Unsupported(other.kind())),
        }
    }
}

impl From<CreatureRecord> for ActorRecord {
    fn from(record: CreatureRecord) -> Self {
        ActorRecord::Creature(record)
    }
}
