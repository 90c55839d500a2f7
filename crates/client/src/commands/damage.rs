use anyhow::Result;
use clap::Parser;

use storm_core::ActorId;
use storm_runtime::Runtime;

use super::{parse_weapon_ref, print_json};
use crate::config::OutputFormat;

/// Roll a weapon's damage
#[derive(Parser)]
pub struct Damage {
    /// Actor id
    #[arg(value_name = "ACTOR")]
    actor: String,

    /// Weapon id, or position for creature weapons
    #[arg(value_name = "WEAPON")]
    weapon: String,
}

impl Damage {
    pub async fn execute(self, runtime: &Runtime, format: OutputFormat) -> Result<()> {
        let id = ActorId::from(self.actor.as_str());
        let report = runtime.damage(&id, &parse_weapon_ref(&self.weapon)).await?;

        match format {
            OutputFormat::Json => print_json(&serde_json::to_value(&report)?),
            OutputFormat::Summary => {
                let faces: Vec<String> = report
                    .roll
                    .dice
                    .iter()
                    .flat_map(|term| {
                        term.results
                            .iter()
                            .filter(|face| face.active)
                            .map(move |face| format!("d{}:{}", term.faces, face.value))
                    })
                    .collect();
                println!(
                    "{} {} = {} [{}]",
                    report.actor,
                    report.roll.formula,
                    report.roll.total,
                    faces.join(" ")
                );
                Ok(())
            }
        }
    }
}
