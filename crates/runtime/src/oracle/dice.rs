use async_trait::async_trait;

use storm_core::{DiceFormula, DiceOracle, DiceRoll, OracleError};

/// Asynchronous source of dice results.
#[async_trait]
pub trait DiceRoller: Send + Sync {
    async fn roll(&self, formula: &DiceFormula) -> Result<DiceRoll, OracleError>;
}

/// Adapts a synchronous [`DiceOracle`] to [`DiceRoller`].
#[derive(Debug)]
pub struct OracleRoller<O> {
    oracle: O,
}

impl<O: DiceOracle> OracleRoller<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}

#[async_trait]
impl<O: DiceOracle> DiceRoller for OracleRoller<O> {
    async fn roll(&self, formula: &DiceFormula) -> Result<DiceRoll, OracleError> {
        self.oracle.roll(formula)
    }
}
