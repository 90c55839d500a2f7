//! Stat system - layered derivation.
//!
//! # Architecture
//!
//! ```text
//! [ Raw attribute input ]
//!      ↓  normalize (case, type)
//! [ Attributes (Layer 1) ]      CoreAttributes / CharacterAttributes
//!      ↓
//! [ Category bonuses (Layer 2) ] SkillBonuses, CombatBonuses
//!      ↓
//! [ Resources (Layer 3) ]       HitPoints, Wounds, DamageModifiers
//!      ↓
//! [ DerivedStats snapshot ]
//! ```
//!
//! ## Principles
//!
//! 1. **SSOT**: raw attributes, details, and current HP only
//! 2. **Unidirectional Flow**: upper layers never depend on lower layers
//! 3. **Deterministic**: pure functions of input plus [`crate::RulesConfig`]
//! 4. **Idempotent**: every pass recomputes everything; nothing drifts

pub mod attributes;
pub mod bonus;
pub mod combat;
pub mod creature;
pub mod resources;
pub mod skills;
pub mod snapshot;

pub use attributes::{
    Attribute, AttributeInput, CharacterAttributes, CoreAttributes, RawValue, normalize,
};
pub use bonus::{age_knowledge_bonus, attribute_bonus, intelligence_knowledge_bonus, size_bonus};
pub use combat::{CombatBonuses, DamageModifier, DamageModifiers, WeaponReach};
pub use creature::{CreatureHpMode, HpModeOption, creature_hp_max};
pub use resources::{HitPoints, Wounds, character_hp_max};
pub use skills::{CharacterClass, SkillBonuses, SkillCategory};
pub use snapshot::{DerivedStats, derive_character, derive_creature};
