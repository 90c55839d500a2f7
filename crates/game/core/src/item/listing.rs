//! Read-only stat lines for compact NPC and creature blocks.
//!
//! Lines are sorted by name, ignoring case.

use crate::stats::SkillBonuses;

use super::{CreatureWeapon, ItemId, SkillRecord};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SkillLine {
    pub id: ItemId,
    pub name: String,
    pub total: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreatureWeaponLine {
    /// Position in the creature's authored list.
    pub index: usize,
    pub name: String,
    pub attack: i32,
    pub damage: String,
    pub parry: i32,
}

fn sorted_by_name<'a>(skills: &'a [SkillRecord]) -> Vec<&'a SkillRecord> {
    let mut sorted: Vec<&SkillRecord> = skills.iter().collect();
    sorted.sort_by_cached_key(|skill| skill.name.to_lowercase());
    sorted
}

/// NPC skills: the effective chance, or `base + bonus` when that is zero.
pub fn npc_skill_lines(skills: &[SkillRecord], bonuses: Option<&SkillBonuses>) -> Vec<SkillLine> {
    sorted_by_name(skills)
        .into_iter()
        .map(|skill| {
            let effective = skill.effective(bonuses);
            SkillLine {
                id: skill.id.clone(),
                name: skill.name.clone(),
                total: if effective != 0 {
                    effective
                } else {
                    skill.base.saturating_add(skill.bonus)
                },
            }
        })
        .collect()
}

/// Creature skills: the authored base, no bonuses.
pub fn creature_skill_lines(skills: &[SkillRecord]) -> Vec<SkillLine> {
    sorted_by_name(skills)
        .into_iter()
        .map(|skill| SkillLine {
            id: skill.id.clone(),
            name: skill.name.clone(),
            total: skill.base,
        })
        .collect()
}

/// Creature weapons in authored order.
pub fn creature_weapon_lines(weapons: &[CreatureWeapon]) -> Vec<CreatureWeaponLine> {
    weapons
        .iter()
        .enumerate()
        .map(|(index, weapon)| CreatureWeaponLine {
            index,
            name: weapon.name.clone(),
            attack: weapon.attack,
            damage: weapon.damage.clone(),
            parry: weapon.parry,
        })
        .collect()
}
