//! Attribute bonus functions built on the 12/9 band.
//!
//! Every category bonus in the ruleset is a sum of these band functions:
//!
//! ```text
//! attribute_bonus(v) =  v - high        if v > high
//!                      -(low - v)       if v < low
//!                       0               otherwise
//!
//! size_bonus(v)      =  low - v         if v < low
//!                      -(v - high)      if v > high
//!                       0               otherwise
//! ```
//!
//! `size_bonus` rewards small actors and is only used by the physical
//! categories (agility, stealth).

use crate::config::{AttributeBand, KnowledgeRules};

use super::skills::CharacterClass;

/// Bonus from a single attribute.
///
/// # Example
/// ```
/// # use storm_core::config::AttributeBand;
/// # use storm_core::stats::attribute_bonus;
/// let band = AttributeBand::default();
/// assert_eq!(attribute_bonus(15, &band), 3);
/// assert_eq!(attribute_bonus(10, &band), 0);
/// assert_eq!(attribute_bonus(6, &band), -3);
/// ```
pub const fn attribute_bonus(value: i32, band: &AttributeBand) -> i32 {
    if value > band.high {
        value.saturating_sub(band.high)
    } else if value < band.low {
        value.saturating_sub(band.low)
    } else {
        0
    }
}

/// Bonus from SIZ for agility-type categories.
pub const fn size_bonus(value: i32, band: &AttributeBand) -> i32 {
    if value < band.low {
        band.low.saturating_sub(value)
    } else if value > band.high {
        band.high.saturating_sub(value)
    } else {
        0
    }
}

/// INT component of the knowledge bonus, scaled by the knowledge multiplier.
pub const fn intelligence_knowledge_bonus(
    int: i32,
    band: &AttributeBand,
    rules: &KnowledgeRules,
) -> i32 {
    if int > band.high {
        rules.int_multiplier.saturating_mul(int.saturating_sub(band.high))
    } else if int < band.low {
        rules.int_multiplier.saturating_mul(int.saturating_sub(band.low))
    } else {
        0
    }
}

/// Experience component of the knowledge bonus.
///
/// Each year above the age cutoff grants a class-dependent amount.
pub fn age_knowledge_bonus(age: i32, class: CharacterClass, rules: &KnowledgeRules) -> i32 {
    let years = age.saturating_sub(rules.age_cutoff).max(0);
    years.saturating_mul(class.knowledge_per_year(rules))
}

/// Sums bonus components, saturating at the `i32` bounds.
pub(crate) fn saturating_sum(components: &[i32]) -> i32 {
    components
        .iter()
        .fold(0, |total, component| total.saturating_add(*component))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_bonus_band_edges() {
        let band = AttributeBand::default();
        assert_eq!(attribute_bonus(12, &band), 0);
        assert_eq!(attribute_bonus(13, &band), 1);
        assert_eq!(attribute_bonus(9, &band), 0);
        assert_eq!(attribute_bonus(8, &band), -1);
        assert_eq!(attribute_bonus(3, &band), -6);
        assert_eq!(attribute_bonus(21, &band), 9);
    }

    #[test]
    fn size_bonus_rewards_small() {
        let band = AttributeBand::default();
        assert_eq!(size_bonus(8, &band), 1);
        assert_eq!(size_bonus(9, &band), 0);
        assert_eq!(size_bonus(12, &band), 0);
        assert_eq!(size_bonus(13, &band), -1);
        assert_eq!(size_bonus(18, &band), -6);
    }

    #[test]
    fn band_is_configurable() {
        let band = AttributeBand { high: 14, low: 7 };
        assert_eq!(attribute_bonus(13, &band), 0);
        assert_eq!(attribute_bonus(15, &band), 1);
        assert_eq!(attribute_bonus(6, &band), -1);
        assert_eq!(size_bonus(6, &band), 1);
    }

    #[test]
    fn knowledge_components() {
        let band = AttributeBand::default();
        let rules = KnowledgeRules::default();

        assert_eq!(intelligence_knowledge_bonus(14, &band, &rules), 4);
        assert_eq!(intelligence_knowledge_bonus(7, &band, &rules), -4);
        assert_eq!(intelligence_knowledge_bonus(10, &band, &rules), 0);

        assert_eq!(age_knowledge_bonus(30, CharacterClass::Priest, &rules), 15);
        assert_eq!(age_knowledge_bonus(30, CharacterClass::Noble, &rules), 10);
        assert_eq!(age_knowledge_bonus(30, CharacterClass::Other, &rules), 5);
        assert_eq!(age_knowledge_bonus(25, CharacterClass::Priest, &rules), 0);
        assert_eq!(age_knowledge_bonus(18, CharacterClass::Priest, &rules), 0);
    }

    #[test]
    fn extreme_values_saturate() {
        let band = AttributeBand::default();
        let rules = KnowledgeRules::default();

        assert_eq!(attribute_bonus(i32::MAX, &band), i32::MAX - 12);
        assert_eq!(attribute_bonus(i32::MIN, &band), i32::MIN);
        assert_eq!(size_bonus(i32::MIN, &band), i32::MAX);
        assert_eq!(intelligence_knowledge_bonus(i32::MAX, &band, &rules), i32::MAX);
        assert_eq!(intelligence_knowledge_bonus(i32::MIN, &band, &rules), i32::MIN);
        assert_eq!(age_knowledge_bonus(i32::MAX, CharacterClass::Priest, &rules), i32::MAX);
        assert_eq!(saturating_sum(&[i32::MAX, 1, 1]), i32::MAX);
        assert_eq!(saturating_sum(&[3, -1]), 2);
    }
}
