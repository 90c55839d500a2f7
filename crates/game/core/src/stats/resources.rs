//! Resources - hit points and wound thresholds.
//!
//! Resource pools are partially stored:
//! - Maximum: computed from attributes (NOT authoritative when stored)
//! - Current value: game state, edited by players
//!
//! When the maximum changes, the current value follows it if it was full and
//! is otherwise only clamped.

use crate::config::{HitPointRules, RulesConfig, ceil_div};

use super::attributes::CoreAttributes;

/// Current and maximum hit points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HitPoints {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "super::attributes::deserialize_lenient_i32")
    )]
    pub value: i32,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "super::attributes::deserialize_lenient_i32")
    )]
    pub max: i32,
}

impl HitPoints {
    pub const fn new(value: i32, max: i32) -> Self {
        Self { value, max }
    }

    /// A full pool.
    pub const fn full(max: i32) -> Self {
        Self { value: max, max }
    }

    pub const fn is_full(&self) -> bool {
        self.value == self.max
    }

    /// Applies a freshly computed maximum.
    ///
    /// A value equal to the previous maximum follows the new maximum;
    /// any other value is kept and clamped to the new maximum.
    pub fn with_max(&self, new_max: i32) -> Self {
        let value = if self.is_full() {
            new_max
        } else {
            self.value.min(new_max)
        };
        Self {
            value,
            max: new_max,
        }
    }
}

/// Wound thresholds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wounds {
    /// A single hit of at least this much damage is a major wound.
    pub major: i32,
}

impl Wounds {
    /// `major = ceil(max_hp / wound_divisor)`
    pub fn from_max_hp(max_hp: i32, rules: &HitPointRules) -> Self {
        Self {
            major: ceil_div(max_hp, rules.wound_divisor),
        }
    }
}

/// Character and NPC hit point maximum.
///
/// Formula: `CON + SIZ band adjustment`, never below `ceil(CON / floor_divisor)`.
/// The SIZ adjustment adds `SIZ - high` above the band and subtracts
/// `low - SIZ` below it.
pub fn character_hp_max(core: &CoreAttributes, rules: &RulesConfig) -> i32 {
    let band = &rules.band;
    let adjustment = if core.siz > band.high {
        core.siz.saturating_sub(band.high)
    } else if core.siz < band.low {
        core.siz.saturating_sub(band.low)
    } else {
        0
    };
    let floor = ceil_div(core.con, rules.hit_points.floor_divisor);
    core.con.saturating_add(adjustment).max(floor)
}
