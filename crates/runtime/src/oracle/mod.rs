//! Async dice boundary.
//!
//! Checks suspend on a [`DiceRoller`] until the host answers. Synchronous
//! [`storm_core::DiceOracle`] implementations (such as
//! [`storm_core::SeededDice`]) plug in through [`OracleRoller`].
mod dice;

pub use dice::{DiceRoller, OracleRoller};
