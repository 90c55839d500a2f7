//! Skill category bonuses - Layer 2 of the stat system.
//!
//! Each skill belongs to a category, and each category adds a bonus derived
//! from attributes to every skill in it. These bonuses are recomputed in full
//! on every derivation pass.

use crate::config::{KnowledgeRules, RulesConfig};

use super::attributes::CharacterAttributes;
use super::bonus::{
    age_knowledge_bonus, attribute_bonus, intelligence_knowledge_bonus, saturating_sum, size_bonus,
};

/// Skill category key.
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
pub enum SkillCategory {
    Agility,
    #[strum(to_string = "percept", serialize = "perception")]
    #[cfg_attr(feature = "serde", serde(alias = "perception"))]
    Percept,
    Stealth,
    #[strum(to_string = "know", serialize = "knowledge")]
    #[cfg_attr(feature = "serde", serde(alias = "knowledge"))]
    Know,
    Summoning,
    #[strum(to_string = "manip", serialize = "manipulation")]
    #[cfg_attr(feature = "serde", serde(alias = "manipulation"))]
    Manip,
    #[strum(to_string = "commun", serialize = "communication")]
    #[cfg_attr(feature = "serde", serde(alias = "communication"))]
    Commun,
    /// Uncategorized skills.
    Type,
}

/// Character background class; drives knowledge experience per year.
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
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CharacterClass {
    Priest,
    Noble,
    #[default]
    Other,
}

impl CharacterClass {
    /// Parses a class label; anything unrecognized is `Other`.
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or_default()
    }

    pub const fn knowledge_per_year(self, rules: &KnowledgeRules) -> i32 {
        match self {
            CharacterClass::Priest => rules.priest_per_year,
            CharacterClass::Noble => rules.noble_per_year,
            CharacterClass::Other => rules.other_per_year,
        }
    }
}

impl From<String> for CharacterClass {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<CharacterClass> for String {
    fn from(class: CharacterClass) -> Self {
        class.to_string()
    }
}

/// Per-category bonuses of a character or NPC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillBonuses {
    pub agility: i32,
    pub percept: i32,
    pub stealth: i32,
    pub know: i32,
    pub manip: i32,
    pub commun: i32,
}

impl SkillBonuses {
    /// Computes every category bonus.
    ///
    /// Formulas (A = attribute bonus, S = size bonus):
    /// - agility: A(STR) + A(POW) + A(DEX) + S(SIZ)
    /// - percept: A(INT) + A(POW)
    /// - stealth: A(INT) + A(DEX) + S(SIZ)
    /// - know:    INT knowledge band + age experience
    /// - manip:   A(STR) + A(INT) + A(POW) + A(DEX)
    /// - commun:  A(CHA) + A(INT) + A(POW)
    pub fn compute(
        attributes: &CharacterAttributes,
        class: CharacterClass,
        rules: &RulesConfig,
    ) -> Self {
        let band = &rules.band;
        let core = &attributes.core;
        let a = |value| attribute_bonus(value, band);

        Self {
            agility: saturating_sum(&[
                a(core.str),
                a(core.pow),
                a(core.dex),
                size_bonus(core.siz, band),
            ]),
            percept: saturating_sum(&[a(core.int), a(core.pow)]),
            stealth: saturating_sum(&[a(core.int), a(core.dex), size_bonus(core.siz, band)]),
            know: saturating_sum(&[
                intelligence_knowledge_bonus(core.int, band, &rules.knowledge),
                age_knowledge_bonus(attributes.age, class, &rules.knowledge),
            ]),
            manip: saturating_sum(&[a(core.str), a(core.int), a(core.pow), a(core.dex)]),
            commun: saturating_sum(&[a(attributes.cha), a(core.int), a(core.pow)]),
        }
    }

    /// Bonus applied to skills of `category`.
    ///
    /// Summoning and uncategorized skills carry no attribute bonus.
    pub const fn for_category(&self, category: SkillCategory) -> i32 {
        match category {
            SkillCategory::Agility => self.agility,
            SkillCategory::Percept => self.percept,
            SkillCategory::Stealth => self.stealth,
            SkillCategory::Know => self.know,
            SkillCategory::Manip => self.manip,
            SkillCategory::Commun => self.commun,
            SkillCategory::Summoning | SkillCategory::Type => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::attributes::CoreAttributes;

    fn character(core: CoreAttributes, cha: i32, age: i32) -> CharacterAttributes {
        CharacterAttributes {
            core,
            cha,
            lck: 10,
            age,
        }
    }

    #[test]
    fn average_character_has_no_bonuses() {
        let attributes = character(CoreAttributes::default(), 10, 20);
        let bonuses =
            SkillBonuses::compute(&attributes, CharacterClass::Other, &RulesConfig::default());
        assert_eq!(bonuses, SkillBonuses::default());
    }

    #[test]
    fn strong_small_agile_character() {
        // STR 15, CON 10, SIZ 7, INT 13, POW 8, DEX 16
        let attributes = character(CoreAttributes::new(15, 10, 7, 13, 8, 16), 14, 20);
        let bonuses =
            SkillBonuses::compute(&attributes, CharacterClass::Other, &RulesConfig::default());

        // 3 + (-1) + 4 + 2
        assert_eq!(bonuses.agility, 8);
        // 1 + (-1)
        assert_eq!(bonuses.percept, 0);
        // 1 + 4 + 2
        assert_eq!(bonuses.stealth, 7);
        // 2 * (13 - 12)
        assert_eq!(bonuses.know, 2);
        // 3 + 1 + (-1) + 4
        assert_eq!(bonuses.manip, 7);
        // 2 + 1 + (-1)
        assert_eq!(bonuses.commun, 2);
    }

    #[test]
    fn priest_knowledge_with_age() {
        let attributes = character(CoreAttributes::new(10, 10, 10, 14, 10, 10), 10, 30);
        let bonuses =
            SkillBonuses::compute(&attributes, CharacterClass::Priest, &RulesConfig::default());
        assert_eq!(bonuses.know, 19);
    }

    #[test]
    fn dull_young_noble_knowledge() {
        let attributes = character(CoreAttributes::new(10, 10, 10, 6, 10, 10), 10, 27);
        let bonuses =
            SkillBonuses::compute(&attributes, CharacterClass::Noble, &RulesConfig::default());
        // -2 * (9 - 6) + (27 - 25) * 2
        assert_eq!(bonuses.know, -2);
    }

    #[test]
    fn summoning_has_no_category_bonus() {
        let bonuses = SkillBonuses {
            agility: 1,
            percept: 2,
            stealth: 3,
            know: 4,
            manip: 5,
            commun: 6,
        };
        assert_eq!(bonuses.for_category(SkillCategory::Summoning), 0);
        assert_eq!(bonuses.for_category(SkillCategory::Type), 0);
        assert_eq!(bonuses.for_category(SkillCategory::Commun), 6);
    }

    #[test]
    fn category_keys_accept_long_names() {
        assert_eq!("perception".parse::<SkillCategory>(), Ok(SkillCategory::Percept));
        assert_eq!("KNOW".parse::<SkillCategory>(), Ok(SkillCategory::Know));
        assert_eq!(SkillCategory::Manip.to_string(), "manip");
    }

    #[test]
    fn unknown_class_is_other() {
        assert_eq!(CharacterClass::from_label("Priest"), CharacterClass::Priest);
        assert_eq!(CharacterClass::from_label("warrior"), CharacterClass::Other);
        assert_eq!(CharacterClass::from_label(""), CharacterClass::Other);
    }
}
