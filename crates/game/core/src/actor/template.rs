//! Default actor templates and the fill-missing merge.
//!
//! Templates are loaded once at start-up and never change afterwards.

use crate::stats::{Attribute, AttributeInput, CreatureHpMode};

use super::ActorKind;
use super::record::{ActorRecord, Details};

/// Defaults for one actor kind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ActorTemplate {
    pub attributes: AttributeInput,
    pub details: Details,
    /// Creature templates only.
    pub hp_mode: Option<CreatureHpMode>,
}

/// Templates for every actor kind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ActorTemplates {
    pub character: ActorTemplate,
    pub npc: ActorTemplate,
    pub creature: ActorTemplate,
}

impl ActorTemplates {
    pub fn for_kind(&self, kind: ActorKind) -> &ActorTemplate {
        match kind {
            ActorKind::Character => &self.character,
            ActorKind::Npc => &self.npc,
            ActorKind::Creature => &self.creature,
        }
    }
}

/// Copies template values into fields the record lacks.
///
/// Existing values are never overwritten. Creature records never receive
/// CHA or LCK.
pub fn fill_missing(record: &mut ActorRecord, template: &ActorTemplate) {
    match record {
        ActorRecord::Character(character) | ActorRecord::Npc(character) => {
            character.attributes.fill_missing(&template.attributes);
            let details = &mut character.details;
            if details.age.is_none() {
                details.age = template.details.age;
            }
            if details.class.is_none() {
                details.class = template.details.class;
            }
        }
        ActorRecord::Creature(creature) => {
            let mut attributes = template.attributes.clone();
            attributes.remove(Attribute::Cha);
            attributes.remove(Attribute::Lck);
            creature.attributes.fill_missing(&attributes);
            if creature.hp_mode.is_none() {
                creature.hp_mode = template.hp_mode;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{CharacterRecord, CreatureRecord};
    use crate::stats::{CharacterClass, RawValue};

    fn template() -> ActorTemplate {
        ActorTemplate {
            attributes: AttributeInput::from_pairs(
                Attribute::CHARACTER.map(|attribute| (attribute.code(), RawValue::from(10))),
            ),
            details: Details {
                age: Some(18),
                class: Some(CharacterClass::Other),
            },
            hp_mode: Some(CreatureHpMode::ConPlusSix),
        }
    }

    #[test]
    fn fill_never_overwrites() {
        let mut character = CharacterRecord::new("hero", "Hero");
        character.attributes = AttributeInput::from_pairs([("str", RawValue::from(17))]);
        character.details.class = Some(CharacterClass::Priest);
        let mut record = ActorRecord::Character(character);

        fill_missing(&mut record, &template());

        let ActorRecord::Character(character) = record else {
            panic!("kind changed");
        };
        assert_eq!(character.attributes.get(Attribute::Str), Some(17));
        assert_eq!(character.attributes.raw("STR"), None);
        assert_eq!(character.attributes.get(Attribute::Con), Some(10));
        assert_eq!(character.details.age, Some(18));
        assert_eq!(character.details.class, Some(CharacterClass::Priest));
    }

    #[test]
    fn creatures_skip_charisma_and_luck() {
        let mut record = ActorRecord::Creature(CreatureRecord::new("wolf", "Wolf"));
        fill_missing(&mut record, &template());

        let ActorRecord::Creature(creature) = record else {
            panic!("kind changed");
        };
        assert!(!creature.attributes.contains(Attribute::Cha));
        assert!(!creature.attributes.contains(Attribute::Lck));
        assert_eq!(creature.attributes.get(Attribute::Siz), Some(10));
        assert_eq!(creature.hp_mode, Some(CreatureHpMode::ConPlusSix));
    }

    #[test]
    fn templates_by_kind() {
        let templates = ActorTemplates {
            creature: template(),
            ..ActorTemplates::default()
        };
        assert_eq!(
            templates.for_kind(ActorKind::Creature).hp_mode,
            Some(CreatureHpMode::ConPlusSix)
        );
        assert_eq!(templates.for_kind(ActorKind::Npc).hp_mode, None);
    }
}
