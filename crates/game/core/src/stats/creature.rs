//! Creature hit point formulas.
//!
//! Creatures choose how their maximum HP is computed. Every mode is floored
//! at [`CreatureHpRules::minimum`]; unknown modes behave as `auto`.

use crate::config::CreatureHpRules;

use super::attributes::{CoreAttributes, RawValue};

/// Selectable creature HP formula.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum CreatureHpMode {
    /// CON + SIZ - auto offset (12 by default)
    #[default]
    Auto,
    /// CON
    Con,
    /// CON + CON bonus (6 by default)
    ConPlusSix,
    /// CON + SIZ
    ConPlusSiz,
    /// Authored override, falling back to `Auto`
    Custom,
}

impl CreatureHpMode {
    pub const ALL: [CreatureHpMode; 5] = [
        CreatureHpMode::Auto,
        CreatureHpMode::Con,
        CreatureHpMode::ConPlusSix,
        CreatureHpMode::ConPlusSiz,
        CreatureHpMode::Custom,
    ];

    /// Parses a mode key; unknown keys fall back to `Auto`.
    pub fn from_key(key: &str) -> Self {
        key.trim().parse().unwrap_or_default()
    }

    /// Formula label shown in the host's mode picker.
    pub fn label(self, rules: &CreatureHpRules) -> String {
        match self {
            CreatureHpMode::Auto => with_offset("CON + SIZ", rules.auto_offset.saturating_neg()),
            CreatureHpMode::Con => "CON".to_owned(),
            CreatureHpMode::ConPlusSix => with_offset("CON", rules.con_bonus),
            CreatureHpMode::ConPlusSiz => "CON + SIZ".to_owned(),
            CreatureHpMode::Custom => "Custom".to_owned(),
        }
    }

    /// Picker entries with the current mode marked.
    pub fn options(selected: CreatureHpMode, rules: &CreatureHpRules) -> Vec<HpModeOption> {
        Self::ALL
            .iter()
            .map(|&mode| HpModeOption {
                value: mode,
                label: mode.label(rules),
                selected: mode == selected,
            })
            .collect()
    }
}

fn with_offset(base: &str, offset: i32) -> String {
    match offset {
        0 => base.to_owned(),
        offset if offset > 0 => format!("{base} + {offset}"),
        offset => format!("{base} - {}", offset.unsigned_abs()),
    }
}

impl From<String> for CreatureHpMode {
    fn from(key: String) -> Self {
        Self::from_key(&key)
    }
}

impl From<CreatureHpMode> for String {
    fn from(mode: CreatureHpMode) -> Self {
        mode.to_string()
    }
}

/// One entry of the HP mode picker.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HpModeOption {
    pub value: CreatureHpMode,
    pub label: String,
    pub selected: bool,
}

/// Computes a creature's maximum HP.
///
/// `hp_override` is only read in `Custom` mode; it must parse to a finite
/// number above zero, otherwise the `Auto` value is used.
pub fn creature_hp_max(
    core: &CoreAttributes,
    mode: CreatureHpMode,
    hp_override: Option<&RawValue>,
    rules: &CreatureHpRules,
) -> i32 {
    let minimum = rules.minimum;
    let auto = core
        .con
        .saturating_add(core.siz)
        .saturating_sub(rules.auto_offset)
        .max(minimum);

    match mode {
        CreatureHpMode::Auto => auto,
        CreatureHpMode::Con => core.con.max(minimum),
        CreatureHpMode::ConPlusSix => core.con.saturating_add(rules.con_bonus).max(minimum),
        CreatureHpMode::ConPlusSiz => core.con.saturating_add(core.siz).max(minimum),
        CreatureHpMode::Custom => hp_override
            .and_then(RawValue::to_number)
            .filter(|value| *value > 0.0)
            .map_or(auto, |value| (value.floor() as i32).max(minimum)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beast(con: i32, siz: i32) -> CoreAttributes {
        CoreAttributes::new(20, con, siz, 3, 10, 12)
    }

    #[test]
    fn modes_compute_their_formulas() {
        let rules = CreatureHpRules::default();
        let core = beast(14, 20);

        assert_eq!(creature_hp_max(&core, CreatureHpMode::Auto, None, &rules), 22);
        assert_eq!(creature_hp_max(&core, CreatureHpMode::Con, None, &rules), 14);
        assert_eq!(creature_hp_max(&core, CreatureHpMode::ConPlusSix, None, &rules), 20);
        assert_eq!(creature_hp_max(&core, CreatureHpMode::ConPlusSiz, None, &rules), 34);
    }

    #[test]
    fn tiny_creature_has_at_least_one_hp() {
        let rules = CreatureHpRules::default();
        let core = beast(2, 1);
        for mode in CreatureHpMode::ALL {
            assert!(creature_hp_max(&core, mode, None, &rules) >= 1, "{mode}");
        }
        assert_eq!(creature_hp_max(&core, CreatureHpMode::Auto, None, &rules), 1);
    }

    #[test]
    fn custom_override() {
        let rules = CreatureHpRules::default();
        let core = beast(14, 20);
        let custom =
            |raw: RawValue| creature_hp_max(&core, CreatureHpMode::Custom, Some(&raw), &rules);

        assert_eq!(custom(RawValue::from("25")), 25);
        assert_eq!(custom(RawValue::from(40)), 40);
        assert_eq!(custom(RawValue::Float(7.9)), 7);
        assert_eq!(custom(RawValue::Float(0.4)), 1);
        assert_eq!(custom(RawValue::from("0")), 22);
        assert_eq!(custom(RawValue::from("abc")), 22);
        assert_eq!(custom(RawValue::from(-5)), 22);
        assert_eq!(custom(RawValue::Null), 22);
        assert_eq!(
            creature_hp_max(&core, CreatureHpMode::Custom, None, &rules),
            22
        );
    }

    #[test]
    fn unknown_mode_is_auto() {
        assert_eq!(CreatureHpMode::from_key("conPlusSix"), CreatureHpMode::ConPlusSix);
        assert_eq!(CreatureHpMode::from_key("CONPLUSSIZ"), CreatureHpMode::ConPlusSiz);
        assert_eq!(CreatureHpMode::from_key("double"), CreatureHpMode::Auto);
        assert_eq!(CreatureHpMode::from_key(""), CreatureHpMode::Auto);
        assert_eq!(CreatureHpMode::ConPlusSiz.to_string(), "conPlusSiz");
    }

    #[test]
    fn picker_marks_selected_mode() {
        let options = CreatureHpMode::options(CreatureHpMode::Custom, &CreatureHpRules::default());
        assert_eq!(options.len(), 5);
        assert_eq!(options.iter().filter(|option| option.selected).count(), 1);
        assert_eq!(options[0].label, "CON + SIZ - 12");
        assert_eq!(options[2].label, "CON + 6");
        assert!(options[4].selected);
    }

    #[test]
    fn labels_follow_configured_rules() {
        let rules = CreatureHpRules {
            auto_offset: 10,
            con_bonus: 4,
            ..CreatureHpRules::default()
        };
        let core = beast(14, 20);
        assert_eq!(CreatureHpMode::Auto.label(&rules), "CON + SIZ - 10");
        assert_eq!(creature_hp_max(&core, CreatureHpMode::Auto, None, &rules), 24);
        assert_eq!(CreatureHpMode::ConPlusSix.label(&rules), "CON + 4");
        assert_eq!(creature_hp_max(&core, CreatureHpMode::ConPlusSix, None, &rules), 18);

        let flat = CreatureHpRules {
            auto_offset: 0,
            con_bonus: -2,
            ..CreatureHpRules::default()
        };
        assert_eq!(CreatureHpMode::Auto.label(&flat), "CON + SIZ");
        assert_eq!(CreatureHpMode::ConPlusSix.label(&flat), "CON - 2");
    }
}
