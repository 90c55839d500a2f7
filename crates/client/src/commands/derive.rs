//! Derived statistics of one actor, the way a character sheet shows them.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use serde_json::json;

use storm_core::item::creature_weapon_lines;
use storm_core::{ActorId, ActorRecord, DerivationEngine, DerivedStats, WeaponRef};
use storm_runtime::Runtime;

use super::print_json;
use crate::config::OutputFormat;

/// Show an actor's derived statistics
#[derive(Parser)]
pub struct Derive {
    /// Actor id
    #[arg(value_name = "ACTOR")]
    actor: String,

    /// Write the refreshed HP back before printing
    #[arg(long)]
    refresh: bool,
}

impl Derive {
    pub fn execute(self, runtime: &Runtime, format: OutputFormat) -> Result<()> {
        let id = ActorId::from(self.actor.as_str());
        let stats = if self.refresh {
            runtime.actor_changed(&id)?
        } else {
            runtime.derived(&id)?
        };
        let record = runtime.actor(&id)?;
        let skills = runtime.skill_lines(&id)?;
        let engine = runtime.engine();
        let weapons = weapon_rows(engine, &record)?;

        match format {
            OutputFormat::Json => {
                print_json(&json!({
                    "id": id,
                    "kind": record.kind(),
                    "name": record.name(),
                    "derived": stats,
                    "skills": skills,
                    "weapons": weapons,
                    "hp_modes": engine.hp_mode_options(&record),
                }))
            }
            OutputFormat::Summary => {
                println!("{} ({})", record.name(), record.kind());
                print_stats(&stats);
                if !skills.is_empty() {
                    println!("Skills:");
                    for line in &skills {
                        println!("  {:<24} {:>3}%", line.name, line.total);
                    }
                }
                if !weapons.is_empty() {
                    println!("Weapons:");
                    for row in &weapons {
                        println!(
                            "  {:<24} atk {:>3}%  parry {:>3}%  {}",
                            row.name, row.attack, row.parry, row.damage
                        );
                    }
                }
                Ok(())
            }
        }
    }
}

fn print_stats(stats: &DerivedStats) {
    println!("HP {}/{}  major wound {}", stats.hp.value, stats.hp.max, stats.wounds.major);
    println!(
        "Attack {:+}  Parry {:+}  Damage {} / {}",
        stats.combat.attack,
        stats.combat.parry,
        display_modifier(&stats.damage.hand.to_string()),
        display_modifier(&stats.damage.projectile.to_string())
    );
    if let Some(bonuses) = &stats.skill_bonuses {
        println!(
            "Agility {:+}  Percept {:+}  Stealth {:+}  Know {:+}  Manip {:+}  Commun {:+}",
            bonuses.agility,
            bonuses.percept,
            bonuses.stealth,
            bonuses.know,
            bonuses.manip,
            bonuses.commun
        );
    }
}

fn display_modifier(modifier: &str) -> &str {
    if modifier.is_empty() { "none" } else { modifier }
}

/// One weapon with its effective chances and damage formula.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct WeaponRow {
    weapon: WeaponRef,
    name: String,
    attack: i32,
    parry: i32,
    damage: String,
}

fn weapon_rows(engine: &DerivationEngine, record: &ActorRecord) -> Result<Vec<WeaponRow>> {
    match record {
        ActorRecord::Creature(creature) => Ok(creature_weapon_lines(&creature.weapons)
            .into_iter()
            .map(|line| WeaponRow {
                weapon: WeaponRef::Index(line.index),
                name: line.name,
                attack: line.attack,
                parry: line.parry,
                damage: line.damage,
            })
            .collect()),
        ActorRecord::Character(character) | ActorRecord::Npc(character) => character
            .weapons
            .iter()
            .map(|weapon| -> Result<WeaponRow> {
                let reference = WeaponRef::Id(weapon.id.clone());
                let totals = engine.weapon_totals(record, &reference)?;
                let damage = engine.damage_formula(record, &reference)?;
                Ok(WeaponRow {
                    weapon: reference,
                    name: weapon.name.clone(),
                    attack: totals.attack,
                    parry: totals.parry,
                    damage: damage.to_string(),
                })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storm_core::item::WeaponScore;
    use storm_core::{CharacterRecord, CreatureRecord, CreatureWeapon, ItemId, WeaponRecord};

    #[test]
    fn creature_rows_are_addressed_by_position() {
        let mut creature = CreatureRecord::new("hound", "Hell Hound");
        creature.weapons = vec![CreatureWeapon::new("Bite", 65, "1d10", 0)];
        let record = ActorRecord::Creature(creature);

        let rows = weapon_rows(&DerivationEngine::default(), &record).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].weapon, WeaponRef::Index(0));
        assert_eq!(rows[0].name, "Bite");
        assert_eq!(rows[0].attack, 65);
    }

    #[test]
    fn character_rows_serialize_for_json_output() {
        let mut character = CharacterRecord::new("elric", "Elric");
        character.weapons = vec![WeaponRecord {
            id: ItemId::from("mace"),
            name: "Mace".into(),
            attack: WeaponScore::new(30, 0),
            parry: WeaponScore::new(20, 5),
            damage: "1d8".into(),
            ..WeaponRecord::default()
        }];
        let record = ActorRecord::Character(character);
        let engine = DerivationEngine::default();

        let rows = weapon_rows(&engine, &record).unwrap();
        let reference = WeaponRef::Id(ItemId::from("mace"));
        let totals = engine.weapon_totals(&record, &reference).unwrap();
        assert_eq!(rows[0].weapon, reference);
        assert_eq!((rows[0].attack, rows[0].parry), (totals.attack, totals.parry));

        let value = serde_json::to_value(&rows).unwrap();
        assert_eq!(value[0]["name"], "Mace");
        assert_eq!(value[0]["attack"], totals.attack);
        assert!(value[0]["damage"].as_str().unwrap().starts_with("1d8"));
    }
}
