//! Derivation engine: the single entry point over every actor kind.
//!
//! The [`DerivationEngine`] owns the immutable [`RulesConfig`] and default
//! [`ActorTemplates`] and dispatches each [`ActorRecord`] to the character
//! or creature pipeline. It never holds actor state between calls.

use crate::actor::{ActorKind, ActorRecord, ActorTemplates, fill_missing};
use crate::config::RulesConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::item::{ItemId, SkillLine, WeaponTotals, creature_skill_lines, npc_skill_lines};
use crate::roll::{Check, DiceFormula, FormulaError};
use crate::stats::{
    Attribute, CharacterAttributes, CoreAttributes, CreatureHpMode, DerivedStats, HpModeOption,
    derive_character, derive_creature, normalize,
};

/// Errors raised when an operation names something the actor does not own.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("actor has no skill '{0}'")]
    UnknownSkill(ItemId),

    #[error("actor has no weapon {0}")]
    UnknownWeapon(WeaponRef),

    #[error("invalid damage formula for weapon {weapon}: {source}")]
    Formula {
        weapon: WeaponRef,
        #[source]
        source: FormulaError,
    },
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            EngineError::UnknownSkill(_) => "ENGINE_UNKNOWN_SKILL",
            EngineError::UnknownWeapon(_) => "ENGINE_UNKNOWN_WEAPON",
            EngineError::Formula { .. } => "ENGINE_INVALID_FORMULA",
        }
    }
}

/// Reference to one of an actor's weapons.
///
/// Creature weapons have no item id and are addressed by position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponRef {
    Id(ItemId),
    Index(usize),
}

impl core::fmt::Display for WeaponRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WeaponRef::Id(id) => write!(f, "'{id}'"),
            WeaponRef::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// Which chance of a weapon a check rolls against.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WeaponUse {
    #[default]
    Attack,
    Parry,
}

/// Stateless rules engine configured once at start-up.
#[derive(Clone, Debug, Default)]
pub struct DerivationEngine {
    rules: RulesConfig,
    templates: ActorTemplates,
}

impl DerivationEngine {
    pub fn new(rules: RulesConfig) -> Self {
        Self {
            rules,
            templates: ActorTemplates::default(),
        }
    }

    pub fn with_templates(rules: RulesConfig, templates: ActorTemplates) -> Self {
        Self { rules, templates }
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn templates(&self) -> &ActorTemplates {
        &self.templates
    }

    /// Fills template defaults and canonicalizes attributes in place.
    ///
    /// Creatures lose any CHA or LCK they carry.
    pub fn prepare(&self, record: &mut ActorRecord) {
        let kind = record.kind();
        fill_missing(record, self.templates.for_kind(kind));

        let attributes = record.attributes_mut();
        if kind == ActorKind::Creature {
            attributes.remove(Attribute::Cha);
            attributes.remove(Attribute::Lck);
        }
        normalize(attributes, kind.required_attributes());
    }

    /// Computes every derived statistic of `record` without modifying it.
    ///
    /// Missing attributes resolve to the configured defaults; templates are
    /// not consulted (see [`Self::prepare`]).
    pub fn derive(&self, record: &ActorRecord) -> DerivedStats {
        let defaults = &self.rules.attributes;
        match record {
            ActorRecord::Character(character) | ActorRecord::Npc(character) => {
                let attributes = CharacterAttributes::from_input(
                    &character.attributes,
                    defaults,
                    character.details.age,
                );
                derive_character(&attributes, character.class(), &character.hp, &self.rules)
            }
            ActorRecord::Creature(creature) => derive_creature(
                &CoreAttributes::from_input(&creature.attributes, defaults),
                creature.hp_mode(),
                creature.hp_override.as_ref(),
                &creature.hp,
                &self.rules,
            ),
        }
    }

    /// Prepares, derives and writes the derived subset back.
    ///
    /// Also drops craft slot references to skills the character no longer
    /// owns; NPCs lose any craft slots they carry.
    pub fn refresh(&self, record: &mut ActorRecord) -> DerivedStats {
        self.prepare(record);
        let stats = self.derive(record);
        record.apply_derived(stats);
        match record {
            ActorRecord::Character(character) => {
                let skills = &character.skills;
                character.craft_slots.prune(skills);
            }
            ActorRecord::Npc(npc) => npc.craft_slots = Default::default(),
            ActorRecord::Creature(_) => {}
        }
        stats
    }

    /// Effective chance of an owned skill.
    pub fn skill_chance(&self, record: &ActorRecord, skill: &ItemId) -> Result<i32, EngineError> {
        let owned = record
            .skill(skill)
            .ok_or_else(|| EngineError::UnknownSkill(skill.clone()))?;
        let stats = self.derive(record);
        Ok(owned.effective(stats.skill_bonuses.as_ref()))
    }

    /// Attack and parry chances of one weapon.
    pub fn weapon_totals(
        &self,
        record: &ActorRecord,
        weapon: &WeaponRef,
    ) -> Result<WeaponTotals, EngineError> {
        match record {
            ActorRecord::Character(character) | ActorRecord::Npc(character) => {
                let owned = match weapon {
                    WeaponRef::Id(id) => character.weapon(id),
                    WeaponRef::Index(index) => character.weapons.get(*index),
                }
                .ok_or_else(|| EngineError::UnknownWeapon(weapon.clone()))?;
                Ok(owned.totals(&self.derive(record).combat))
            }
            ActorRecord::Creature(creature) => {
                let WeaponRef::Index(index) = weapon else {
                    return Err(EngineError::UnknownWeapon(weapon.clone()));
                };
                let owned = creature
                    .weapons
                    .get(*index)
                    .ok_or_else(|| EngineError::UnknownWeapon(weapon.clone()))?;
                Ok(WeaponTotals {
                    attack: owned.attack,
                    parry: owned.parry,
                })
            }
        }
    }

    /// Chance a weapon check rolls against.
    pub fn weapon_chance(
        &self,
        record: &ActorRecord,
        weapon: &WeaponRef,
        usage: WeaponUse,
    ) -> Result<i32, EngineError> {
        let totals = self.weapon_totals(record, weapon)?;
        Ok(match usage {
            WeaponUse::Attack => totals.attack,
            WeaponUse::Parry => totals.parry,
        })
    }

    /// Damage formula of one weapon.
    ///
    /// Character and NPC weapons get the damage modifier for their reach;
    /// creature damage is rolled as authored.
    pub fn damage_formula(
        &self,
        record: &ActorRecord,
        weapon: &WeaponRef,
    ) -> Result<DiceFormula, EngineError> {
        let formula = match record {
            ActorRecord::Character(character) | ActorRecord::Npc(character) => {
                let owned = match weapon {
                    WeaponRef::Id(id) => character.weapon(id),
                    WeaponRef::Index(index) => character.weapons.get(*index),
                }
                .ok_or_else(|| EngineError::UnknownWeapon(weapon.clone()))?;
                owned.damage_formula(&self.derive(record).damage)
            }
            ActorRecord::Creature(creature) => {
                let WeaponRef::Index(index) = weapon else {
                    return Err(EngineError::UnknownWeapon(weapon.clone()));
                };
                creature
                    .weapons
                    .get(*index)
                    .ok_or_else(|| EngineError::UnknownWeapon(weapon.clone()))?
                    .damage_formula()
            }
        };
        formula.map_err(|source| EngineError::Formula {
            weapon: weapon.clone(),
            source,
        })
    }

    /// Starts a percentile check for this actor.
    pub fn start_check(&self, record: &ActorRecord, target: i32) -> Check {
        Check::new(record.kind(), target, &self.rules.checks)
    }

    /// Compact skill block: creatures list base chances, everyone else the
    /// effective ones.
    pub fn skill_lines(&self, record: &ActorRecord) -> Vec<SkillLine> {
        match record {
            ActorRecord::Creature(creature) => creature_skill_lines(&creature.skills),
            ActorRecord::Character(character) | ActorRecord::Npc(character) => {
                let stats = self.derive(record);
                npc_skill_lines(&character.skills, stats.skill_bonuses.as_ref())
            }
        }
    }

    /// HP mode picker entries; `None` for non-creatures.
    pub fn hp_mode_options(&self, record: &ActorRecord) -> Option<Vec<HpModeOption>> {
        match record {
            ActorRecord::Creature(creature) => Some(CreatureHpMode::options(
                creature.hp_mode(),
                &self.rules.creature_hp,
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorTemplate, CharacterRecord, CreatureRecord, Details};
    use crate::item::{CreatureWeapon, SkillRecord, WeaponRecord, WeaponScore};
    use crate::stats::{
        AttributeInput, CharacterClass, HitPoints, RawValue, SkillCategory, WeaponReach,
    };

    fn priest() -> ActorRecord {
        let mut record = CharacterRecord::new("tanelorn", "Priest of Law");
        record.attributes = AttributeInput::from_pairs([
            ("str", RawValue::from(16)),
            ("con", RawValue::from("15")),
            ("SIZ", RawValue::from(15)),
            ("int", RawValue::from(14)),
            ("pow", RawValue::from(12)),
            ("dex", RawValue::from(13)),
            ("cha", RawValue::from(11)),
        ]);
        record.details = Details {
            age: Some(30),
            class: Some(CharacterClass::Priest),
        };
        record.skills = vec![
            SkillRecord::new("lore", "Memorize", SkillCategory::Know, 25),
            SkillRecord::new("climb", "Climb", SkillCategory::Agility, 40),
        ];
        record.weapons = priest_weapons();
        ActorRecord::Character(record)
    }

    fn priest_weapons() -> Vec<WeaponRecord> {
        vec![WeaponRecord {
            id: ItemId::from("mace"),
            name: "Mace".into(),
            attack: WeaponScore::new(30, 0),
            parry: WeaponScore::new(20, 5),
            damage: "1d8".into(),
            reach: WeaponReach::Hand,
        }]
    }

    fn hound() -> ActorRecord {
        let mut record = CreatureRecord::new("hound", "Hell Hound");
        record.attributes = AttributeInput::from_pairs([
            ("STR", RawValue::from(20)),
            ("CON", RawValue::from(16)),
            ("SIZ", RawValue::from(14)),
            ("CHA", RawValue::from(3)),
        ]);
        record.weapons = vec![CreatureWeapon::new("Bite", 65, "1d10", 0)];
        ActorRecord::Creature(record)
    }

    #[test]
    fn refresh_character() {
        let engine = DerivationEngine::default();
        let mut record = priest();
        let stats = engine.refresh(&mut record);

        // CON 15 + (SIZ 15 - 12)
        assert_eq!(stats.hp, HitPoints::full(18));
        assert_eq!(stats.wounds.major, 9);
        assert_eq!(record.hp(), &HitPoints::full(18));
        assert_eq!(record.attributes().raw("CON"), Some(&RawValue::Int(15)));

        let skills = stats.skill_bonuses.expect("character bonuses");
        assert_eq!(skills.know, 19);
        assert_eq!(engine.skill_chance(&record, &ItemId::from("lore")), Ok(44));
    }

    #[test]
    fn refresh_is_idempotent() {
        let engine = DerivationEngine::default();
        let mut record = priest();
        let first = engine.refresh(&mut record);
        let snapshot = record.clone();
        let second = engine.refresh(&mut record);
        assert_eq!(first, second);
        assert_eq!(snapshot, record);
    }

    #[test]
    fn creature_refresh_strips_charisma() {
        let engine = DerivationEngine::default();
        let mut record = hound();
        let stats = engine.refresh(&mut record);

        assert!(!record.attributes().contains(Attribute::Cha));
        // 16 + 14 - 12
        assert_eq!(stats.hp.max, 18);
        assert_eq!(stats.skill_bonuses, None);
        assert_eq!(
            engine.weapon_chance(&record, &WeaponRef::Index(0), WeaponUse::Attack),
            Ok(65)
        );
        assert!(engine.hp_mode_options(&record).is_some());
    }

    #[test]
    fn templates_fill_before_derivation() {
        let templates = ActorTemplates {
            creature: ActorTemplate {
                hp_mode: Some(CreatureHpMode::Con),
                ..ActorTemplate::default()
            },
            ..ActorTemplates::default()
        };
        let engine = DerivationEngine::with_templates(RulesConfig::default(), templates);
        let mut record = hound();
        let stats = engine.refresh(&mut record);
        assert_eq!(stats.hp.max, 16);
    }

    #[test]
    fn weapon_totals_and_damage() {
        let engine = DerivationEngine::default();
        let record = priest();
        let mace = WeaponRef::Id(ItemId::from("mace"));

        let stats = engine.derive(&record);
        let totals = engine.weapon_totals(&record, &mace).expect("owned weapon");
        assert_eq!(totals.attack, 30 + stats.combat.attack);
        assert_eq!(totals.parry, 25 + stats.combat.parry);

        // STR 16 + SIZ 15 = 31
        let formula = engine.damage_formula(&record, &mace).expect("valid");
        assert_eq!(formula.to_string(), "1d8+1d6");

        let creature = hound();
        let bite = engine
            .damage_formula(&creature, &WeaponRef::Index(0))
            .expect("valid");
        assert_eq!(bite.to_string(), "1d10");
    }

    #[test]
    fn unknown_references_are_errors() {
        let engine = DerivationEngine::default();
        let record = priest();
        assert_eq!(
            engine.skill_chance(&record, &ItemId::from("sail")),
            Err(EngineError::UnknownSkill(ItemId::from("sail")))
        );
        assert!(matches!(
            engine.weapon_totals(&hound(), &WeaponRef::Id(ItemId::from("bite"))),
            Err(EngineError::UnknownWeapon(_))
        ));
        assert!(matches!(
            engine.weapon_totals(&record, &WeaponRef::Index(3)),
            Err(EngineError::UnknownWeapon(_))
        ));
    }

    #[test]
    fn refresh_prunes_stale_craft_slots() {
        let engine = DerivationEngine::default();
        let mut record = priest();
        record
            .assign_craft_slot(0, &ItemId::from("lore"))
            .expect("knowledge skill");
        if let ActorRecord::Character(character) = &mut record {
            character.skills.retain(|skill| skill.id.as_str() != "lore");
        }
        engine.refresh(&mut record);
        let ActorRecord::Character(character) = &record else {
            panic!("kind changed");
        };
        assert!(character.craft_slots.is_empty());
    }

    #[test]
    fn oversized_attributes_saturate() {
        let engine = DerivationEngine::default();
        let huge = RawValue::from("99999999999");

        let mut giant = CharacterRecord::new("giant", "Giant");
        giant.attributes = AttributeInput::from_pairs(
            ["STR", "CON", "SIZ", "INT", "POW", "DEX", "CHA"].map(|key| (key, huge.clone())),
        );
        giant.details.age = Some(i32::MAX);
        giant.weapons = priest_weapons();
        let mut giant = ActorRecord::Character(giant);
        let stats = engine.refresh(&mut giant);
        assert_eq!(stats.hp.max, i32::MAX);
        assert!(stats.wounds.major > 0);
        let bonuses = stats.skill_bonuses.expect("character bonuses");
        assert_eq!(bonuses.know, i32::MAX);
        let mace = WeaponRef::Id(ItemId::from("mace"));
        assert!(engine.weapon_totals(&giant, &mace).is_ok());
        assert!(engine.damage_formula(&giant, &mace).is_ok());

        let mut behemoth = CreatureRecord::new("behemoth", "Behemoth");
        behemoth.attributes = AttributeInput::from_pairs([
            ("CON", RawValue::from("2147483647")),
            ("SIZ", RawValue::from(20)),
        ]);
        for mode in CreatureHpMode::ALL {
            behemoth.hp_mode = Some(mode);
            let stats = engine.derive(&ActorRecord::Creature(behemoth.clone()));
            assert_eq!(stats.hp.max, i32::MAX, "{mode}");
        }
    }

    #[test]
    fn checks_carry_actor_kind() {
        let engine = DerivationEngine::default();
        let check = engine.start_check(&hound(), 150);
        assert_eq!(check.actor_kind(), ActorKind::Creature);
        assert_eq!(check.target(), 100);
    }
}
