//! Derived stats snapshot: the complete output of one derivation pass.

use crate::config::RulesConfig;

use super::attributes::{CharacterAttributes, CoreAttributes, RawValue};
use super::combat::{CombatBonuses, DamageModifiers};
use super::creature::{CreatureHpMode, creature_hp_max};
use super::resources::{HitPoints, Wounds, character_hp_max};
use super::skills::{CharacterClass, SkillBonuses};

/// Every derived statistic of one actor.
///
/// This is a reproducible projection of raw fields plus [`RulesConfig`];
/// it is never authoritative on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    pub hp: HitPoints,
    pub wounds: Wounds,
    /// `None` for creatures.
    pub skill_bonuses: Option<SkillBonuses>,
    pub combat: CombatBonuses,
    pub damage: DamageModifiers,
}

/// Derives a character or NPC.
///
/// `previous_hp` is the stored pool; its value is retained according to
/// [`HitPoints::with_max`].
pub fn derive_character(
    attributes: &CharacterAttributes,
    class: CharacterClass,
    previous_hp: &HitPoints,
    rules: &RulesConfig,
) -> DerivedStats {
    let hp = previous_hp.with_max(character_hp_max(&attributes.core, rules));
    let skill_bonuses = SkillBonuses::compute(attributes, class, rules);

    DerivedStats {
        hp,
        wounds: Wounds::from_max_hp(hp.max, &rules.hit_points),
        skill_bonuses: Some(skill_bonuses),
        combat: CombatBonuses::from_skills(&skill_bonuses),
        damage: DamageModifiers::compute(&attributes.core, &rules.damage),
    }
}

/// Derives a creature.
///
/// Creatures have no category bonuses and no derived attack/parry bonus, but
/// they do get damage modifiers.
pub fn derive_creature(
    core: &CoreAttributes,
    mode: CreatureHpMode,
    hp_override: Option<&RawValue>,
    previous_hp: &HitPoints,
    rules: &RulesConfig,
) -> DerivedStats {
    let hp = previous_hp.with_max(creature_hp_max(core, mode, hp_override, &rules.creature_hp));

    DerivedStats {
        hp,
        wounds: Wounds::from_max_hp(hp.max, &rules.hit_points),
        skill_bonuses: None,
        combat: CombatBonuses::NONE,
        damage: DamageModifiers::compute(core, &rules.damage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ceil_div;

    fn warrior() -> CharacterAttributes {
        CharacterAttributes {
            core: CoreAttributes::new(16, 14, 15, 11, 12, 13),
            cha: 9,
            lck: 12,
            age: 22,
        }
    }

    #[test]
    fn integrated_warrior_snapshot() {
        let rules = RulesConfig::default();
        let stats =
            derive_character(&warrior(), CharacterClass::Other, &HitPoints::default(), &rules);

        // HP: 14 + (15 - 12) = 17, starts full
        assert_eq!(stats.hp, HitPoints::full(17));
        assert_eq!(stats.wounds.major, 9);

        let skills = stats.skill_bonuses.expect("characters have skill bonuses");
        // STR 4 + POW 0 + DEX 1 + SIZ -3
        assert_eq!(skills.agility, 2);
        // STR 4 + INT 0 + POW 0 + DEX 1
        assert_eq!(skills.manip, 5);
        assert_eq!(stats.combat, CombatBonuses { attack: 5, parry: 2 });

        // STR + SIZ = 31
        assert_eq!(stats.damage.hand.to_string(), "+1d6");
        assert_eq!(stats.damage.projectile.to_string(), "+1d4");
    }

    #[test]
    fn derivation_is_idempotent() {
        let rules = RulesConfig::default();
        let first =
            derive_character(&warrior(), CharacterClass::Noble, &HitPoints::new(9, 14), &rules);
        let second = derive_character(&warrior(), CharacterClass::Noble, &first.hp, &rules);
        assert_eq!(first, second);
    }

    #[test]
    fn wound_threshold_tracks_hp_for_every_actor() {
        let rules = RulesConfig::default();
        for con in 1..=25 {
            for siz in 1..=25 {
                let core = CoreAttributes::new(10, con, siz, 10, 10, 10);
                let character = derive_character(
                    &CharacterAttributes {
                        core,
                        ..CharacterAttributes::default()
                    },
                    CharacterClass::Other,
                    &HitPoints::default(),
                    &rules,
                );
                assert_eq!(character.wounds.major, ceil_div(character.hp.max, 2));

                for mode in CreatureHpMode::ALL {
                    let creature =
                        derive_creature(&core, mode, None, &HitPoints::default(), &rules);
                    assert_eq!(creature.wounds.major, ceil_div(creature.hp.max, 2));
                }
            }
        }
    }

    #[test]
    fn creature_snapshot_has_no_character_mechanics() {
        let rules = RulesConfig::default();
        let core = CoreAttributes::new(30, 18, 30, 4, 12, 10);
        let stats =
            derive_creature(&core, CreatureHpMode::Auto, None, &HitPoints::new(20, 36), &rules);

        assert_eq!(stats.skill_bonuses, None);
        assert_eq!(stats.combat, CombatBonuses::NONE);
        // 18 + 30 - 12 = 36, damaged value kept
        assert_eq!(stats.hp, HitPoints::new(20, 36));
        assert_eq!(stats.wounds.major, 18);
        // STR + SIZ = 60
        assert_eq!(stats.damage.hand.to_string(), "+3d6");
    }

    #[test]
    fn creature_mode_change_follows_full_pool() {
        let rules = RulesConfig::default();
        let core = CoreAttributes::new(30, 18, 30, 4, 12, 10);
        let auto =
            derive_creature(&core, CreatureHpMode::Auto, None, &HitPoints::default(), &rules);
        let con = derive_creature(&core, CreatureHpMode::Con, None, &auto.hp, &rules);
        assert_eq!(con.hp, HitPoints::full(18));
    }
}
