//! Deterministic Stormbringer rules shared by the runtime and offline tools.
//!
//! `storm-core` defines the canonical rules (attribute normalization, derived
//! statistics, percentile checks) as pure functions of an actor record and a
//! [`RulesConfig`]. [`DerivationEngine`] is the single entry point over every
//! actor kind; randomness enters only through [`env::DiceOracle`].
pub mod actor;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod item;
pub mod roll;
pub mod stats;

pub use actor::{
    ActorId, ActorKind, ActorRecord, ActorTemplate, ActorTemplates, CharacterRecord,
    CraftSlotError, CraftSlots, CreatureRecord, Details,
};
pub use config::RulesConfig;
pub use engine::{DerivationEngine, EngineError, WeaponRef, WeaponUse};
pub use env::{DiceOracle, DiceRoll, OracleError, SeededDice};
pub use error::{ErrorSeverity, GameError};
pub use item::{CreatureWeapon, ItemId, SkillRecord, SummoningSubtype, WeaponRecord};
pub use roll::{Check, CheckError, CheckState, DiceFormula, FormulaError, RollOutcome};
pub use stats::{
    Attribute, AttributeInput, CharacterClass, CreatureHpMode, DerivedStats, HitPoints, RawValue,
    SkillCategory,
};
