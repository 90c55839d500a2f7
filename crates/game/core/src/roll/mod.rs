//! Dice formulas and percentile check resolution.
mod check;
mod formula;

pub use check::{
    Check, CheckError, CheckState, PushDenial, RollOutcome, critical_threshold, evaluate_roll,
    push_allowed,
};
pub use formula::{DiceFormula, FormulaError, FormulaTerm};
