//! Runtime facade over the rules engine, actor store and dice roller.
//!
//! Derivation stays synchronous; only rolls await the [`DiceRoller`]. A push
//! operates on the [`Check`] its original roll produced, so it can never run
//! ahead of that roll.

use std::sync::Arc;

use serde::Serialize;

use storm_content::ContentFactory;
use storm_core::item::SkillLine;
use storm_core::{
    ActorId, ActorRecord, ActorTemplates, Check, CheckError, DerivationEngine, DerivedStats,
    DiceFormula, DiceRoll, ItemId, RollOutcome, RulesConfig, SeededDice, WeaponRef, WeaponUse,
};

use crate::api::{Result, RuntimeError};
use crate::oracle::{DiceRoller, OracleRoller};
use crate::repository::{ActorRepository, InMemoryActorRepo, RepositoryError};

/// Runtime configuration: the immutable rules content plus the dice seed
/// used when no roller is injected.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub rules: RulesConfig,
    pub templates: ActorTemplates,
    pub dice_seed: u64,
}

impl RuntimeConfig {
    /// Loads rules and templates from a content directory.
    pub fn from_content(factory: &ContentFactory) -> Result<Self> {
        let rules = factory
            .load_rules()
            .map_err(|err| RuntimeError::Content(format!("{err:#}")))?;
        let templates = factory
            .load_templates()
            .map_err(|err| RuntimeError::Content(format!("{err:#}")))?;
        Ok(Self {
            rules,
            templates,
            dice_seed: 0,
        })
    }
}

/// A resolved (or pushed) check and what it was rolled for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub actor: ActorId,
    pub label: String,
    pub check: Check,
}

impl CheckReport {
    pub fn outcome(&self) -> Option<RollOutcome> {
        self.check.outcome()
    }
}

/// A damage roll for one weapon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DamageReport {
    pub actor: ActorId,
    pub weapon: WeaponRef,
    pub roll: DiceRoll,
}

/// Cloneable facade clients drive.
#[derive(Clone)]
pub struct Runtime {
    engine: Arc<DerivationEngine>,
    repository: Arc<dyn ActorRepository>,
    dice: Arc<dyn DiceRoller>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn engine(&self) -> &DerivationEngine {
        &self.engine
    }

    pub fn repository(&self) -> Arc<dyn ActorRepository> {
        Arc::clone(&self.repository)
    }

    /// Refreshes and stores a new actor.
    pub fn add_actor(&self, mut record: ActorRecord) -> Result<DerivedStats> {
        let stats = self.engine.refresh(&mut record);
        tracing::debug!("Derived new actor {}: HP {}", record.id(), stats.hp.max);
        self.repository.insert(record)?;
        Ok(stats)
    }

    pub fn actor(&self, id: &ActorId) -> Result<ActorRecord> {
        self.repository
            .get(id)?
            .ok_or_else(|| RuntimeError::ActorNotFound(id.clone()))
    }

    pub fn actor_ids(&self) -> Result<Vec<ActorId>> {
        Ok(self.repository.ids()?)
    }

    /// Re-derives a stored actor after its raw fields changed and writes
    /// the derived subset back in one replace.
    pub fn actor_changed(&self, id: &ActorId) -> Result<DerivedStats> {
        let engine = &self.engine;
        let mut stats = DerivedStats::default();
        self.repository
            .update(id, &mut |record| stats = engine.refresh(record))
            .map_err(not_found)?;
        tracing::debug!(
            "Re-derived actor {}: HP {}/{}, wounds {}",
            id,
            stats.hp.value,
            stats.hp.max,
            stats.wounds.major
        );
        Ok(stats)
    }

    /// Derived statistics of a stored actor, computed without writing.
    pub fn derived(&self, id: &ActorId) -> Result<DerivedStats> {
        Ok(self.engine.derive(&self.actor(id)?))
    }

    pub fn skill_lines(&self, id: &ActorId) -> Result<Vec<SkillLine>> {
        Ok(self.engine.skill_lines(&self.actor(id)?))
    }

    pub fn assign_craft_slot(&self, id: &ActorId, slot: usize, skill: &ItemId) -> Result<()> {
        let mut assigned = Ok(());
        self.repository
            .update(id, &mut |record| {
                assigned = record.assign_craft_slot(slot, skill);
            })
            .map_err(not_found)?;
        assigned?;
        tracing::info!("Actor {} craft slot {} now holds {}", id, slot, skill);
        Ok(())
    }

    /// Starts a check against an explicit target.
    pub fn start_check(&self, id: &ActorId, target: i32) -> Result<Check> {
        Ok(self.engine.start_check(&self.actor(id)?, target))
    }

    /// Rolls `1d100` for a check that is waiting for one.
    ///
    /// An oracle failure leaves the check where it was.
    pub async fn roll(&self, check: &mut Check) -> Result<RollOutcome> {
        check.ensure_awaiting_roll()?;
        let roll = match self.dice.roll(&DiceFormula::d100()).await {
            Ok(roll) => roll,
            Err(err) => {
                tracing::warn!("Dice oracle failed for check at {}: {}", check.target(), err);
                return Err(CheckError::MissingOracleResult(err).into());
            }
        };
        tracing::debug!("Rolled {} against {}", roll.total, check.target());

        let outcome = check.record_roll(roll.total, &self.engine.rules().checks)?;
        tracing::info!(
            "Check {}: rolled {} vs {} -> {}",
            if outcome.is_push { "push" } else { "roll" },
            outcome.roll,
            outcome.target,
            describe(&outcome)
        );
        Ok(outcome)
    }

    /// Rerolls a failed check once, against the same target.
    pub async fn push(&self, check: &mut Check) -> Result<RollOutcome> {
        check.begin_push()?;
        tracing::info!("Pushing check at {}", check.target());
        self.roll(check).await
    }

    /// Starts and rolls a check against an owned skill.
    pub async fn skill_check(&self, id: &ActorId, skill: &ItemId) -> Result<CheckReport> {
        let record = self.actor(id)?;
        let chance = self.engine.skill_chance(&record, skill)?;
        let label = record
            .skill(skill)
            .map(|owned| owned.name.clone())
            .unwrap_or_else(|| skill.to_string());

        let mut check = self.engine.start_check(&record, chance);
        self.roll(&mut check).await?;
        Ok(CheckReport {
            actor: id.clone(),
            label,
            check,
        })
    }

    /// Starts and rolls an attack or parry check.
    pub async fn weapon_check(
        &self,
        id: &ActorId,
        weapon: &WeaponRef,
        usage: WeaponUse,
    ) -> Result<CheckReport> {
        let record = self.actor(id)?;
        let chance = self.engine.weapon_chance(&record, weapon, usage)?;

        let mut check = self.engine.start_check(&record, chance);
        self.roll(&mut check).await?;
        Ok(CheckReport {
            actor: id.clone(),
            label: format!("{usage} {weapon}"),
            check,
        })
    }

    /// Rolls a weapon's damage, including the reach-based modifier.
    pub async fn damage(&self, id: &ActorId, weapon: &WeaponRef) -> Result<DamageReport> {
        let record = self.actor(id)?;
        let formula = self.engine.damage_formula(&record, weapon)?;
        let roll = self.dice.roll(&formula).await.inspect_err(|err| {
            tracing::warn!("Dice oracle failed for damage {}: {}", formula, err);
        })?;
        tracing::info!("Actor {} damage {} = {}", id, roll.formula, roll.total);
        Ok(DamageReport {
            actor: id.clone(),
            weapon: weapon.clone(),
            roll,
        })
    }

    /// Rolls an author-supplied formula, e.g. armor protection.
    pub async fn roll_formula(&self, formula: &str) -> Result<DiceRoll> {
        let formula = DiceFormula::parse(formula).map_err(storm_core::OracleError::from)?;
        Ok(self.dice.roll(&formula).await?)
    }
}

fn not_found(err: RepositoryError) -> RuntimeError {
    match err {
        RepositoryError::NotFound(id) => RuntimeError::ActorNotFound(id),
        other => other.into(),
    }
}

fn describe(outcome: &RollOutcome) -> &'static str {
    match (outcome.success, outcome.is_critical) {
        (true, true) => "critical",
        (true, false) => "success",
        (false, _) => "failure",
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    repository: Option<Arc<dyn ActorRepository>>,
    dice: Option<Arc<dyn DiceRoller>>,
    actors: Vec<ActorRecord>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            repository: None,
            dice: None,
            actors: Vec::new(),
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn dice_seed(mut self, seed: u64) -> Self {
        self.config.dice_seed = seed;
        self
    }

    pub fn repository(mut self, repository: impl ActorRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Overrides the seeded roller built from `dice_seed`.
    pub fn dice(mut self, dice: impl DiceRoller + 'static) -> Self {
        self.dice = Some(Arc::new(dice));
        self
    }

    /// Actors refreshed and stored during `build`.
    pub fn actors(mut self, actors: impl IntoIterator<Item = ActorRecord>) -> Self {
        self.actors.extend(actors);
        self
    }

    pub fn build(self) -> Result<Runtime> {
        let RuntimeConfig {
            rules,
            templates,
            dice_seed,
        } = self.config;

        let dice = self
            .dice
            .unwrap_or_else(|| Arc::new(OracleRoller::new(SeededDice::new(dice_seed))));
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryActorRepo::new()));

        let runtime = Runtime {
            engine: Arc::new(DerivationEngine::with_templates(rules, templates)),
            repository,
            dice,
        };
        for actor in self.actors {
            runtime.add_actor(actor)?;
        }
        tracing::info!(
            "Runtime ready with {} actors",
            runtime.repository.ids()?.len()
        );
        Ok(runtime)
    }
}
