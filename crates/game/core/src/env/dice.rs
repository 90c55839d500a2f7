//! Dice oracle: evaluates dice formulas.
//!
//! Randomness is external to the rules. Hosts plug their own dice roller in
//! through [`DiceOracle`]; [`SeededDice`] is the deterministic default used
//! by tests, replays and the CLI.

use core::sync::atomic::{AtomicU64, Ordering};

use crate::roll::{DiceFormula, FormulaTerm};

use super::error::OracleError;
use super::rng::{PcgRng, RngOracle, compute_seed};

/// Source of dice results.
pub trait DiceOracle: Send + Sync {
    /// Evaluates a parsed formula.
    fn roll(&self, formula: &DiceFormula) -> Result<DiceRoll, OracleError>;

    /// Parses and evaluates a formula string.
    fn roll_str(&self, formula: &str) -> Result<DiceRoll, OracleError> {
        let parsed = DiceFormula::parse(formula)?;
        self.roll(&parsed)
    }
}

/// Result of one oracle call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceRoll {
    /// Canonical form of the evaluated formula.
    pub formula: String,
    pub total: i32,
    /// One entry per dice term, in formula order. Constants are not listed.
    pub dice: Vec<DieTerm>,
}

impl DiceRoll {
    /// A single-die roll, e.g. the result of `1d100`.
    pub fn single(faces: u32, value: u32) -> Self {
        Self {
            formula: format!("1d{faces}"),
            total: value as i32,
            dice: vec![DieTerm {
                faces,
                results: vec![DieFace {
                    value,
                    active: true,
                }],
            }],
        }
    }
}

/// Results of one `NdM` term.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieTerm {
    pub faces: u32,
    pub results: Vec<DieFace>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieFace {
    pub value: u32,
    /// Whether the die counts towards the total.
    pub active: bool,
}

/// Deterministic oracle backed by [`PcgRng`].
///
/// Each call consumes one nonce, so two calls with the same formula produce
/// independent results while the whole sequence replays from the seed.
#[derive(Debug, Default)]
pub struct SeededDice {
    seed: u64,
    nonce: AtomicU64,
    rng: PcgRng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            nonce: AtomicU64::new(0),
            rng: PcgRng,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of rolls made so far.
    pub fn nonce(&self) -> u64 {
        self.nonce.load(Ordering::Relaxed)
    }
}

impl DiceOracle for SeededDice {
    fn roll(&self, formula: &DiceFormula) -> Result<DiceRoll, OracleError> {
        let nonce = self.nonce.fetch_add(1, Ordering::Relaxed);
        let mut total: i64 = 0;
        let mut dice = Vec::new();

        for (term_index, term) in formula.terms().iter().enumerate() {
            match *term {
                FormulaTerm::Dice {
                    negative,
                    count,
                    faces,
                } => {
                    let results: Vec<DieFace> = (0..count)
                        .map(|die| {
                            let seed = compute_seed(self.seed, nonce, term_index as u32, die);
                            DieFace {
                                value: self.rng.roll_die(seed, faces),
                                active: true,
                            }
                        })
                        .collect();
                    let sum: i64 = results.iter().map(|face| i64::from(face.value)).sum();
                    total += if negative { -sum } else { sum };
                    dice.push(DieTerm { faces, results });
                }
                FormulaTerm::Constant { negative, value } => {
                    let value = i64::from(value);
                    total += if negative { -value } else { value };
                }
            }
        }

        Ok(DiceRoll {
            formula: formula.to_string(),
            total: total.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            dice,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_replays_the_same_sequence() {
        let first = SeededDice::new(99);
        let second = SeededDice::new(99);
        for _ in 0..10 {
            assert_eq!(
                first.roll_str("2d6+1d4").expect("valid"),
                second.roll_str("2d6+1d4").expect("valid")
            );
        }
        assert_eq!(first.nonce(), 10);
    }

    #[test]
    fn totals_match_breakdown_and_bounds() {
        let dice = SeededDice::new(3);
        let formula = DiceFormula::parse("2d6-1d4+1").expect("valid");
        let (low, high) = formula.bounds();
        for _ in 0..200 {
            let roll = dice.roll(&formula).expect("seeded dice never fail");
            assert_eq!(roll.dice.len(), 2);
            assert_eq!(roll.dice[0].results.len(), 2);
            let positive: u32 = roll.dice[0].results.iter().map(|f| f.value).sum();
            let negative: u32 = roll.dice[1].results.iter().map(|f| f.value).sum();
            assert_eq!(roll.total, positive as i32 - negative as i32 + 1);
            assert!((low..=high).contains(&i64::from(roll.total)));
        }
    }

    #[test]
    fn d100_stays_in_percentile_range() {
        let dice = SeededDice::new(12345);
        for _ in 0..500 {
            let roll = dice.roll(&DiceFormula::d100()).expect("valid");
            assert!((1..=100).contains(&roll.total));
        }
    }

    #[test]
    fn invalid_formula_is_an_oracle_error() {
        let dice = SeededDice::new(0);
        assert!(matches!(dice.roll_str("1d"), Err(OracleError::Formula(_))));
        assert_eq!(dice.nonce(), 0);
    }
}
