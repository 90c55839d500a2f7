//! Ruleset constants and tunable parameters.
//!
//! Every number the derivation engine uses lives here so hosts can override
//! them from a TOML file instead of patching code. [`RulesConfig::default`]
//! reproduces the published ruleset.

/// Complete ruleset configuration passed into every derivation call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RulesConfig {
    pub attributes: AttributeDefaults,
    pub band: AttributeBand,
    pub hit_points: HitPointRules,
    pub damage: DamageTable,
    pub knowledge: KnowledgeRules,
    pub creature_hp: CreatureHpRules,
    pub checks: CheckRules,
}

impl RulesConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Values substituted for attributes missing from a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AttributeDefaults {
    /// Default for STR, CON, SIZ, INT, POW, DEX, CHA and LCK.
    pub core: i32,
    /// Default for AGE.
    pub age: i32,
}

impl AttributeDefaults {
    pub const DEFAULT_CORE: i32 = 10;
    pub const DEFAULT_AGE: i32 = 0;
}

impl Default for AttributeDefaults {
    fn default() -> Self {
        Self {
            core: Self::DEFAULT_CORE,
            age: Self::DEFAULT_AGE,
        }
    }
}

/// The asymmetric 12/9 band used by every attribute bonus.
///
/// Values strictly above `high` or strictly below `low` produce a bonus;
/// values inside the band produce none.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AttributeBand {
    pub high: i32,
    pub low: i32,
}

impl AttributeBand {
    pub const DEFAULT_HIGH: i32 = 12;
    pub const DEFAULT_LOW: i32 = 9;
}

impl Default for AttributeBand {
    fn default() -> Self {
        Self {
            high: Self::DEFAULT_HIGH,
            low: Self::DEFAULT_LOW,
        }
    }
}

/// Hit point floor and wound threshold divisors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HitPointRules {
    /// Character HP never drops below `ceil(CON / floor_divisor)`.
    pub floor_divisor: i32,
    /// Major wound threshold is `ceil(max HP / wound_divisor)`.
    pub wound_divisor: i32,
}

impl HitPointRules {
    pub const DEFAULT_FLOOR_DIVISOR: i32 = 2;
    pub const DEFAULT_WOUND_DIVISOR: i32 = 2;
}

impl Default for HitPointRules {
    fn default() -> Self {
        Self {
            floor_divisor: Self::DEFAULT_FLOOR_DIVISOR,
            wound_divisor: Self::DEFAULT_WOUND_DIVISOR,
        }
    }
}

/// One row of the damage modifier table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageStep {
    /// Inclusive upper bound on STR + SIZ for this row.
    pub max_total: i32,
    /// Number of extra dice (negative means subtract).
    pub steps: i32,
}

impl DamageStep {
    pub const fn new(max_total: i32, steps: i32) -> Self {
        Self { max_total, steps }
    }
}

/// STR + SIZ thresholds mapped to damage dice steps.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DamageTable {
    /// Rows checked in ascending `max_total` order.
    pub steps: Vec<DamageStep>,
    /// Steps applied when STR + SIZ exceeds every row.
    pub overflow_steps: i32,
    /// Die size for hand (melee) weapons.
    pub hand_die: u32,
    /// Die size for projectile weapons.
    pub projectile_die: u32,
}

impl DamageTable {
    pub const DEFAULT_STEPS: [DamageStep; 4] = [
        DamageStep::new(16, -1),
        DamageStep::new(24, 0),
        DamageStep::new(40, 1),
        DamageStep::new(50, 2),
    ];
    pub const DEFAULT_OVERFLOW_STEPS: i32 = 3;
    pub const DEFAULT_HAND_DIE: u32 = 6;
    pub const DEFAULT_PROJECTILE_DIE: u32 = 4;

    /// Looks up the step count for a STR + SIZ total.
    pub fn steps_for(&self, total: i32) -> i32 {
        let mut rows: Vec<&DamageStep> = self.steps.iter().collect();
        rows.sort_by_key(|row| row.max_total);
        rows.into_iter()
            .find(|row| total <= row.max_total)
            .map_or(self.overflow_steps, |row| row.steps)
    }
}

impl Default for DamageTable {
    fn default() -> Self {
        Self {
            steps: Self::DEFAULT_STEPS.to_vec(),
            overflow_steps: Self::DEFAULT_OVERFLOW_STEPS,
            hand_die: Self::DEFAULT_HAND_DIE,
            projectile_die: Self::DEFAULT_PROJECTILE_DIE,
        }
    }
}

/// Knowledge category scaling: INT band multiplier and age experience.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct KnowledgeRules {
    /// Multiplier applied to the INT band distance.
    pub int_multiplier: i32,
    /// Years above this age grant experience.
    pub age_cutoff: i32,
    pub priest_per_year: i32,
    pub noble_per_year: i32,
    pub other_per_year: i32,
}

impl KnowledgeRules {
    pub const DEFAULT_INT_MULTIPLIER: i32 = 2;
    pub const DEFAULT_AGE_CUTOFF: i32 = 25;
    pub const DEFAULT_PRIEST_PER_YEAR: i32 = 3;
    pub const DEFAULT_NOBLE_PER_YEAR: i32 = 2;
    pub const DEFAULT_OTHER_PER_YEAR: i32 = 1;
}

impl Default for KnowledgeRules {
    fn default() -> Self {
        Self {
            int_multiplier: Self::DEFAULT_INT_MULTIPLIER,
            age_cutoff: Self::DEFAULT_AGE_CUTOFF,
            priest_per_year: Self::DEFAULT_PRIEST_PER_YEAR,
            noble_per_year: Self::DEFAULT_NOBLE_PER_YEAR,
            other_per_year: Self::DEFAULT_OTHER_PER_YEAR,
        }
    }
}

/// Offsets for the creature HP formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CreatureHpRules {
    /// `auto` mode computes `CON + SIZ - auto_offset`.
    pub auto_offset: i32,
    /// `conPlusSix` mode computes `CON + con_bonus`.
    pub con_bonus: i32,
    /// No creature ever has fewer hit points than this.
    pub minimum: i32,
}

impl CreatureHpRules {
    pub const DEFAULT_AUTO_OFFSET: i32 = 12;
    pub const DEFAULT_CON_BONUS: i32 = 6;
    pub const DEFAULT_MINIMUM: i32 = 1;
}

impl Default for CreatureHpRules {
    fn default() -> Self {
        Self {
            auto_offset: Self::DEFAULT_AUTO_OFFSET,
            con_bonus: Self::DEFAULT_CON_BONUS,
            minimum: Self::DEFAULT_MINIMUM,
        }
    }
}

/// Percentile check parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CheckRules {
    /// Critical threshold is `target / critical_divisor`.
    pub critical_divisor: i32,
    /// Critical threshold never drops below this.
    pub minimum_critical: i32,
    /// Highest target a check accepts.
    pub max_target: i32,
}

impl CheckRules {
    pub const DEFAULT_CRITICAL_DIVISOR: i32 = 10;
    pub const DEFAULT_MINIMUM_CRITICAL: i32 = 1;
    pub const DEFAULT_MAX_TARGET: i32 = 100;
}

impl Default for CheckRules {
    fn default() -> Self {
        Self {
            critical_divisor: Self::DEFAULT_CRITICAL_DIVISOR,
            minimum_critical: Self::DEFAULT_MINIMUM_CRITICAL,
            max_target: Self::DEFAULT_MAX_TARGET,
        }
    }
}

/// Ceiling division that tolerates negative numerators and treats a
/// non-positive divisor as 1.
pub(crate) fn ceil_div(numerator: i32, divisor: i32) -> i32 {
    let divisor = divisor.max(1);
    let quotient = numerator / divisor;
    if numerator % divisor > 0 {
        quotient + 1
    } else {
        quotient
    }
}
