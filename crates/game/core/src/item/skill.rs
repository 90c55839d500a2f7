//! Skill items.

use crate::stats::{SkillBonuses, SkillCategory};

use super::ItemId;

/// Subtype of a summoning skill.
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
pub enum SummoningSubtype {
    Elemental,
    Demon,
    Other,
}

impl SummoningSubtype {
    pub const ALL: [SummoningSubtype; 3] = [
        SummoningSubtype::Elemental,
        SummoningSubtype::Demon,
        SummoningSubtype::Other,
    ];

    /// Group heading for skills of this subtype.
    pub const fn label(self) -> &'static str {
        match self {
            SummoningSubtype::Elemental => "Elementals",
            SummoningSubtype::Demon => "Demons",
            SummoningSubtype::Other => "Others",
        }
    }
}

/// A skill owned by an actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillRecord {
    pub id: ItemId,
    pub name: String,
    pub category: SkillCategory,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub subtype: Option<SummoningSubtype>,
    /// Authored base percentage.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::stats::attributes::deserialize_lenient_i32")
    )]
    pub base: i32,
    /// Flat authored adjustment shown on NPC stat lines.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::stats::attributes::deserialize_lenient_i32")
    )]
    pub bonus: i32,
}

impl SkillRecord {
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        category: SkillCategory,
        base: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            subtype: None,
            base,
            bonus: 0,
        }
    }

    pub fn with_subtype(mut self, subtype: SummoningSubtype) -> Self {
        self.subtype = Some(subtype);
        self
    }

    /// Subtype, reported only for summoning skills.
    pub fn summoning_subtype(&self) -> Option<SummoningSubtype> {
        match self.category {
            SkillCategory::Summoning => self.subtype,
            _ => None,
        }
    }

    pub fn is_knowledge(&self) -> bool {
        self.category == SkillCategory::Know
    }

    /// Base chance plus the owner's category bonus.
    ///
    /// Creatures pass `None` and use the base alone.
    pub fn effective(&self, bonuses: Option<&SkillBonuses>) -> i32 {
        self.base
            .saturating_add(bonuses.map_or(0, |bonuses| bonuses.for_category(self.category)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bonuses() -> SkillBonuses {
        SkillBonuses {
            agility: 3,
            percept: -1,
            stealth: 2,
            know: 19,
            manip: 4,
            commun: 1,
        }
    }

    #[test]
    fn effective_adds_category_bonus() {
        let climb = SkillRecord::new("climb", "Climb", SkillCategory::Agility, 40);
        assert_eq!(climb.effective(Some(&bonuses())), 43);
        assert_eq!(climb.effective(None), 40);

        let lore = SkillRecord::new("lore", "Memorize", SkillCategory::Know, 30);
        assert_eq!(lore.effective(Some(&bonuses())), 49);
    }

    #[test]
    fn summoning_and_uncategorized_skills_get_no_bonus() {
        let summon = SkillRecord::new("summon", "Summon Elemental", SkillCategory::Summoning, 25)
            .with_subtype(SummoningSubtype::Elemental);
        assert_eq!(summon.effective(Some(&bonuses())), 25);
        assert_eq!(summon.summoning_subtype(), Some(SummoningSubtype::Elemental));

        let odd = SkillRecord::new("odd", "Juggling", SkillCategory::Type, 15)
            .with_subtype(SummoningSubtype::Demon);
        assert_eq!(odd.effective(Some(&bonuses())), 15);
        assert_eq!(odd.summoning_subtype(), None);
    }

    #[test]
    fn subtype_labels() {
        let labels: Vec<_> = SummoningSubtype::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["Elementals", "Demons", "Others"]);
        assert_eq!("DEMON".parse::<SummoningSubtype>(), Ok(SummoningSubtype::Demon));
    }
}
