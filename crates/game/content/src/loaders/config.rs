//! Rules configuration loader.

use std::path::Path;

use storm_core::{DiceFormula, RulesConfig};

use crate::loaders::{LoadResult, read_file};

/// Loader for ruleset constants from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load rules from a TOML file.
    ///
    /// Every table and key is optional; anything omitted keeps the published
    /// ruleset value.
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let rules: RulesConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;
        validate(&rules)?;
        Ok(rules)
    }
}

/// Rejects divisors, floors and die sizes that would make derivation
/// meaningless.
fn validate(rules: &RulesConfig) -> LoadResult<()> {
    let positive = [
        ("hit_points.floor_divisor", i64::from(rules.hit_points.floor_divisor)),
        ("hit_points.wound_divisor", i64::from(rules.hit_points.wound_divisor)),
        ("checks.critical_divisor", i64::from(rules.checks.critical_divisor)),
        ("checks.minimum_critical", i64::from(rules.checks.minimum_critical)),
        ("checks.max_target", i64::from(rules.checks.max_target)),
        ("creature_hp.minimum", i64::from(rules.creature_hp.minimum)),
        ("damage.hand_die", i64::from(rules.damage.hand_die)),
        ("damage.projectile_die", i64::from(rules.damage.projectile_die)),
    ];
    for (key, value) in positive {
        if value < 1 {
            anyhow::bail!("Invalid rules: {} must be at least 1, got {}", key, value);
        }
    }
    let steps = rules
        .damage
        .steps
        .iter()
        .map(|row| row.steps)
        .chain([rules.damage.overflow_steps]);
    for value in steps {
        if value.unsigned_abs() > DiceFormula::MAX_DICE {
            anyhow::bail!(
                "Invalid rules: damage step {} exceeds the {} dice limit",
                value,
                DiceFormula::MAX_DICE
            );
        }
    }
    if rules.band.low > rules.band.high {
        anyhow::bail!(
            "Invalid rules: band.low ({}) is above band.high ({})",
            rules.band.low,
            rules.band.high
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let rules = ConfigLoader::parse(
            r#"
            [damage]
            hand_die = 8

            [knowledge]
            priest_per_year = 4
            "#,
        )
        .expect("valid rules");

        assert_eq!(rules.damage.hand_die, 8);
        assert_eq!(rules.damage.projectile_die, 4);
        assert_eq!(rules.knowledge.priest_per_year, 4);
        assert_eq!(rules.knowledge.age_cutoff, 25);
        assert_eq!(rules.band, RulesConfig::default().band);
    }

    #[test]
    fn empty_file_is_the_published_ruleset() {
        assert_eq!(ConfigLoader::parse("").expect("valid"), RulesConfig::default());
    }

    #[test]
    fn zero_divisor_is_rejected() {
        let err = ConfigLoader::parse("[hit_points]\nwound_divisor = 0\n").unwrap_err();
        assert!(err.to_string().contains("wound_divisor"));
    }

    #[test]
    fn floors_must_be_positive() {
        for (table, key) in [
            ("creature_hp", "minimum"),
            ("checks", "minimum_critical"),
            ("checks", "max_target"),
        ] {
            for value in [0, -3] {
                let err = ConfigLoader::parse(&format!("[{table}]\n{key} = {value}\n"))
                    .unwrap_err();
                assert!(err.to_string().contains(&format!("{table}.{key}")), "{err}");
            }
        }
        let rules = ConfigLoader::parse("[creature_hp]\nminimum = 2\n").expect("valid");
        assert_eq!(rules.creature_hp.minimum, 2);
    }

    #[test]
    fn damage_steps_stay_within_dice_limit() {
        let err = ConfigLoader::parse("[damage]\noverflow_steps = 5000\n").unwrap_err();
        assert!(err.to_string().contains("5000"));
        assert!(ConfigLoader::parse("[damage]\noverflow_steps = -4\n").is_ok());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[checks]\ncritical_divisor = 5").expect("write");

        let rules = ConfigLoader::load(file.path()).expect("valid rules");
        assert_eq!(rules.checks.critical_divisor, 5);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/rules.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rules.toml"));
    }
}
