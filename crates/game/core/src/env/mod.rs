//! External collaborators the rules consult but do not own.
//!
//! The only one the core needs is the dice oracle; the document store lives
//! in the runtime crate.
mod dice;
mod error;
mod rng;

pub use dice::{DiceOracle, DiceRoll, DieFace, DieTerm, SeededDice};
pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, compute_seed};
