use anyhow::{Result, bail};
use clap::Parser;
use serde_json::json;

use storm_core::{ActorId, ItemId, WeaponUse};
use storm_runtime::{CheckReport, Runtime};

use super::{parse_weapon_ref, print_json};
use crate::config::OutputFormat;

/// Roll a skill, weapon or plain percentile check
#[derive(Parser)]
pub struct Check {
    /// Actor id
    #[arg(value_name = "ACTOR")]
    actor: String,

    /// Skill id to check
    #[arg(long, value_name = "SKILL", conflicts_with_all = ["weapon", "target"])]
    skill: Option<String>,

    /// Weapon id, or position for creature weapons
    #[arg(long, value_name = "WEAPON", conflicts_with = "target")]
    weapon: Option<String>,

    /// Roll the weapon's parry instead of its attack
    #[arg(long, requires = "weapon")]
    parry: bool,

    /// Explicit target percentage
    #[arg(long, value_name = "PERCENT")]
    target: Option<i32>,

    /// Push the roll once if it fails and pushing is allowed
    #[arg(long)]
    push: bool,
}

impl Check {
    pub async fn execute(self, runtime: &Runtime, format: OutputFormat) -> Result<()> {
        let id = ActorId::from(self.actor.as_str());
        let mut report = match (&self.skill, &self.weapon, self.target) {
            (Some(skill), _, _) => runtime.skill_check(&id, &ItemId::from(skill.as_str())).await?,
            (None, Some(weapon), _) => {
                let usage = if self.parry {
                    WeaponUse::Parry
                } else {
                    WeaponUse::Attack
                };
                runtime
                    .weapon_check(&id, &parse_weapon_ref(weapon), usage)
                    .await?
            }
            (None, None, Some(target)) => {
                let mut check = runtime.start_check(&id, target)?;
                runtime.roll(&mut check).await?;
                CheckReport {
                    actor: id.clone(),
                    label: format!("target {target}"),
                    check,
                }
            }
            (None, None, None) => bail!("check needs --skill, --weapon or --target"),
        };

        let first = report.outcome();
        if self.push && report.check.can_push() {
            runtime.push(&mut report.check).await?;
        }

        match format {
            OutputFormat::Json => print_json(&json!({
                "actor": report.actor,
                "label": report.label,
                "first": first,
                "state": report.check.state(),
                "can_push": report.check.can_push(),
            })),
            OutputFormat::Summary => {
                println!("{} rolls {}", report.actor, report.label);
                if let Some(outcome) = first {
                    println!("  {}", describe(&outcome));
                }
                if report.check.is_push() {
                    if let Some(outcome) = report.outcome() {
                        println!("  pushed: {}", describe(&outcome));
                    }
                } else if report.check.can_push() {
                    println!("  (may push)");
                }
                Ok(())
            }
        }
    }
}

fn describe(outcome: &storm_core::RollOutcome) -> String {
    let verdict = match (outcome.success, outcome.is_critical) {
        (true, true) => "critical success",
        (true, false) => "success",
        (false, _) => "failure",
    };
    format!(
        "{} vs {}% (critical <= {}): {}",
        outcome.roll, outcome.target, outcome.critical_threshold, verdict
    )
}
