//! Weapon items and authored creature weapons.

use crate::roll::{DiceFormula, FormulaError};
use crate::stats::{CombatBonuses, DamageModifiers, WeaponReach};

use super::ItemId;

/// Authored base and bonus of an attack or parry chance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct WeaponScore {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::stats::attributes::deserialize_lenient_i32")
    )]
    pub base: i32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::stats::attributes::deserialize_lenient_i32")
    )]
    pub bonus: i32,
}

impl WeaponScore {
    pub const fn new(base: i32, bonus: i32) -> Self {
        Self { base, bonus }
    }

    pub const fn authored(&self) -> i32 {
        self.base.saturating_add(self.bonus)
    }
}

/// Attack and parry chances including the owner's combat bonuses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponTotals {
    pub attack: i32,
    pub parry: i32,
}

/// A weapon item owned by a character or NPC.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponRecord {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack: WeaponScore,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parry: WeaponScore,
    /// Damage formula, e.g. `1d8+1`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reach: WeaponReach,
}

impl WeaponRecord {
    pub fn totals(&self, combat: &CombatBonuses) -> WeaponTotals {
        WeaponTotals {
            attack: self.attack.authored().saturating_add(combat.attack),
            parry: self.parry.authored().saturating_add(combat.parry),
        }
    }

    /// Weapon damage with the owner's modifier for this weapon's reach.
    pub fn damage_formula(&self, modifiers: &DamageModifiers) -> Result<DiceFormula, FormulaError> {
        DiceFormula::parse(&self.damage)?.with_modifier(&modifiers.for_reach(self.reach))
    }
}

/// A creature's authored weapon line. Nothing here is derived.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CreatureWeapon {
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::stats::attributes::deserialize_lenient_i32")
    )]
    pub attack: i32,
    pub damage: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::stats::attributes::deserialize_lenient_i32")
    )]
    pub parry: i32,
}

impl CreatureWeapon {
    pub fn new(
        name: impl Into<String>,
        attack: i32,
        damage: impl Into<String>,
        parry: i32,
    ) -> Self {
        Self {
            name: name.into(),
            attack,
            damage: damage.into(),
            parry,
        }
    }

    /// Creature damage is rolled as authored; no modifier is appended.
    pub fn damage_formula(&self) -> Result<DiceFormula, FormulaError> {
        DiceFormula::parse(&self.damage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::DamageModifier;

    fn broadsword() -> WeaponRecord {
        WeaponRecord {
            id: ItemId::from("broadsword"),
            name: "Broadsword".into(),
            attack: WeaponScore::new(40, 5),
            parry: WeaponScore::new(30, 0),
            damage: "1d8+1".into(),
            reach: WeaponReach::Hand,
        }
    }

    #[test]
    fn totals_include_combat_bonuses() {
        let combat = CombatBonuses { attack: 6, parry: 2 };
        assert_eq!(
            broadsword().totals(&combat),
            WeaponTotals { attack: 51, parry: 32 }
        );
        assert_eq!(
            broadsword().totals(&CombatBonuses::NONE),
            WeaponTotals { attack: 45, parry: 30 }
        );
    }

    #[test]
    fn damage_formula_appends_reach_modifier() {
        let modifiers = DamageModifiers {
            hand: DamageModifier::new(1, 6),
            projectile: DamageModifier::new(1, 4),
        };
        let formula = broadsword().damage_formula(&modifiers).expect("valid");
        assert_eq!(formula.to_string(), "1d8+1+1d6");

        let bow = WeaponRecord {
            damage: "1d10".into(),
            reach: WeaponReach::Projectile,
            ..broadsword()
        };
        assert_eq!(bow.damage_formula(&modifiers).expect("valid").to_string(), "1d10+1d4");
    }

    #[test]
    fn missing_damage_is_a_formula_error() {
        let blank = WeaponRecord {
            damage: String::new(),
            ..broadsword()
        };
        assert_eq!(
            blank.damage_formula(&DamageModifiers::default()),
            Err(FormulaError::Empty)
        );
    }
}
