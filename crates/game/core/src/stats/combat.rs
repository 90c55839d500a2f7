//! Combat bonuses and damage modifiers.
//!
//! Attack and parry bonuses reuse the manipulation and agility category
//! bonuses. Damage modifiers are extra dice added to weapon damage, looked
//! up from STR + SIZ in the configured [`DamageTable`].

use core::fmt;

use crate::config::DamageTable;

use super::attributes::CoreAttributes;
use super::skills::SkillBonuses;

/// Bonuses added to weapon attack and parry chances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatBonuses {
    pub attack: i32,
    pub parry: i32,
}

impl CombatBonuses {
    /// Creatures fight with authored numbers only.
    pub const NONE: Self = Self {
        attack: 0,
        parry: 0,
    };

    /// Attack uses the manipulation bonus, parry the agility bonus.
    pub const fn from_skills(skills: &SkillBonuses) -> Self {
        Self {
            attack: skills.manip,
            parry: skills.agility,
        }
    }
}

/// Which damage die a weapon uses for the modifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WeaponReach {
    #[default]
    Hand,
    Projectile,
}

/// Signed count of extra damage dice.
///
/// Renders as `+1d6`, `-1d4`, or the empty string when there are no steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageModifier {
    pub steps: i32,
    pub die: u32,
}

impl DamageModifier {
    pub const fn new(steps: i32, die: u32) -> Self {
        Self { steps, die }
    }

    pub const fn is_none(&self) -> bool {
        self.steps == 0
    }
}

impl fmt::Display for DamageModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps == 0 {
            return Ok(());
        }
        let sign = if self.steps > 0 { '+' } else { '-' };
        write!(f, "{}{}d{}", sign, self.steps.unsigned_abs(), self.die)
    }
}

/// Hand and projectile damage modifiers of one actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageModifiers {
    pub hand: DamageModifier,
    pub projectile: DamageModifier,
}

impl DamageModifiers {
    /// Looks up STR + SIZ in the damage table.
    ///
    /// Both weapon kinds share the step count and differ only in die size.
    pub fn compute(core: &CoreAttributes, table: &DamageTable) -> Self {
        let steps = table.steps_for(core.damage_total());
        Self {
            hand: DamageModifier::new(steps, table.hand_die),
            projectile: DamageModifier::new(steps, table.projectile_die),
        }
    }

    pub const fn for_reach(&self, reach: WeaponReach) -> DamageModifier {
        match reach {
            WeaponReach::Hand => self.hand,
            WeaponReach::Projectile => self.projectile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mods_for_total(total: i32) -> DamageModifiers {
        // Split the total across STR and SIZ; only the sum matters.
        let str = total / 2;
        let siz = total - str;
        DamageModifiers::compute(
            &CoreAttributes::new(str, 10, siz, 10, 10, 10),
            &DamageTable::default(),
        )
    }

    #[test]
    fn damage_modifier_table_boundaries() {
        let cases = [
            (16, "-1d6", "-1d4"),
            (17, "", ""),
            (24, "", ""),
            (25, "+1d6", "+1d4"),
            (40, "+1d6", "+1d4"),
            (41, "+2d6", "+2d4"),
            (50, "+2d6", "+2d4"),
            (51, "+3d6", "+3d4"),
        ];
        for (total, hand, projectile) in cases {
            let mods = mods_for_total(total);
            assert_eq!(mods.hand.to_string(), hand, "hand at {total}");
            assert_eq!(mods.projectile.to_string(), projectile, "projectile at {total}");
        }
    }

    #[test]
    fn die_sizes_are_configurable() {
        let table = DamageTable {
            hand_die: 8,
            projectile_die: 6,
            ..DamageTable::default()
        };
        let mods = DamageModifiers::compute(&CoreAttributes::new(15, 10, 15, 10, 10, 10), &table);
        assert_eq!(mods.hand.to_string(), "+1d8");
        assert_eq!(mods.for_reach(WeaponReach::Projectile).to_string(), "+1d6");
    }

    #[test]
    fn combat_bonuses_reuse_categories() {
        let skills = SkillBonuses {
            agility: 4,
            manip: 6,
            ..SkillBonuses::default()
        };
        let combat = CombatBonuses::from_skills(&skills);
        assert_eq!(combat.attack, 6);
        assert_eq!(combat.parry, 4);
    }
}
