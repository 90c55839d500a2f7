//! Craft slots: two knowledge skills a character specializes in.

use crate::error::{ErrorSeverity, GameError};
use crate::item::{ItemId, SkillRecord};

use super::ActorKind;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CraftSlotError {
    #[error("craft slot {slot} does not exist (only {count} slots)")]
    SlotOutOfRange { slot: usize, count: usize },

    #[error("skill '{0}' is not a knowledge skill")]
    NotKnowledgeSkill(ItemId),

    #[error("skill '{0}' is not owned by this actor")]
    UnknownSkill(ItemId),

    #[error("{0} actors have no craft slots")]
    Unsupported(ActorKind),
}

impl GameError for CraftSlotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            CraftSlotError::SlotOutOfRange { .. } => "CRAFT_SLOT_OUT_OF_RANGE",
            CraftSlotError::NotKnowledgeSkill(_) => "CRAFT_SLOT_NOT_KNOWLEDGE",
            CraftSlotError::UnknownSkill(_) => "CRAFT_SLOT_UNKNOWN_SKILL",
            CraftSlotError::Unsupported(_) => "CRAFT_SLOT_UNSUPPORTED",
        }
    }
}

/// Two nullable knowledge-skill references.
///
/// A skill occupies at most one slot: assigning it to a second slot clears
/// the first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct CraftSlots([Option<ItemId>; CraftSlots::COUNT]);

impl CraftSlots {
    pub const COUNT: usize = 2;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: usize) -> Option<&ItemId> {
        self.0.get(slot).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&ItemId>> {
        self.0.iter().map(Option::as_ref)
    }

    pub fn contains(&self, skill: &ItemId) -> bool {
        self.0.iter().flatten().any(|held| held == skill)
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// Puts `skill` into `slot`, evicting it from any other slot.
    pub fn assign(&mut self, slot: usize, skill: &SkillRecord) -> Result<(), CraftSlotError> {
        Self::check_slot(slot)?;
        if !skill.is_knowledge() {
            return Err(CraftSlotError::NotKnowledgeSkill(skill.id.clone()));
        }
        for (index, held) in self.0.iter_mut().enumerate() {
            if index != slot && held.as_ref() == Some(&skill.id) {
                *held = None;
            }
        }
        self.0[slot] = Some(skill.id.clone());
        Ok(())
    }

    /// Empties `slot`, returning what it held.
    pub fn clear(&mut self, slot: usize) -> Result<Option<ItemId>, CraftSlotError> {
        Self::check_slot(slot)?;
        Ok(self.0[slot].take())
    }

    /// Drops references to skills that are gone or no longer knowledge
    /// skills, and duplicate references left by hand-edited data.
    pub fn prune(&mut self, skills: &[SkillRecord]) {
        for slot in 0..Self::COUNT {
            let keep = match &self.0[slot] {
                Some(id) => {
                    let valid = skills
                        .iter()
                        .any(|skill| &skill.id == id && skill.is_knowledge());
                    let duplicate = self.0[..slot].iter().flatten().any(|held| held == id);
                    valid && !duplicate
                }
                None => true,
            };
            if !keep {
                self.0[slot] = None;
            }
        }
    }

    fn check_slot(slot: usize) -> Result<(), CraftSlotError> {
        if slot >= Self::COUNT {
            return Err(CraftSlotError::SlotOutOfRange {
                slot,
                count: Self::COUNT,
            });
        }
        Ok(())
    }
}
