//! Percentile checks and pushes.
//!
//! A check rolls `1d100` against a target. A failed check made by a
//! character or NPC may be pushed once: the same target is rolled again and
//! the second result is final.
//!
//! ```text
//! Pending ──roll──▶ Rolled ──begin_push──▶ PushPending ──roll──▶ PushRolled
//! ```
//!
//! An oracle failure leaves the check where it was.

use crate::actor::ActorKind;
use crate::config::CheckRules;
use crate::env::{DiceOracle, OracleError};
use crate::error::{ErrorSeverity, GameError};

use super::formula::DiceFormula;

/// Classified result of one d100 roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollOutcome {
    pub target: i32,
    pub roll: i32,
    pub success: bool,
    pub is_critical: bool,
    pub critical_threshold: i32,
    /// True for the reroll of a pushed check.
    pub is_push: bool,
}

/// `max(minimum_critical, floor(target / critical_divisor))`.
pub fn critical_threshold(target: i32, rules: &CheckRules) -> i32 {
    (target.max(0) / rules.critical_divisor.max(1)).max(rules.minimum_critical)
}

/// Classifies a rolled total against a target.
///
/// ```
/// use storm_core::config::CheckRules;
/// use storm_core::roll::evaluate_roll;
///
/// let outcome = evaluate_roll(50, 5, &CheckRules::default());
/// assert!(outcome.success && outcome.is_critical);
/// ```
pub fn evaluate_roll(target: i32, roll: i32, rules: &CheckRules) -> RollOutcome {
    let critical_threshold = critical_threshold(target, rules);
    let success = roll <= target;
    RollOutcome {
        target,
        roll,
        success,
        is_critical: success && roll <= critical_threshold,
        critical_threshold,
        is_push: false,
    }
}

/// Why a push was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PushDenial {
    #[error("a pushed roll cannot be pushed again")]
    AlreadyPushed,

    #[error("creatures cannot push rolls")]
    Creature,

    #[error("only failed rolls can be pushed")]
    Succeeded,

    #[error("the check has not been rolled yet")]
    NotRolled,
}

/// Push eligibility of a resolved roll.
pub fn push_allowed(kind: ActorKind, outcome: &RollOutcome) -> Result<(), PushDenial> {
    if outcome.is_push {
        return Err(PushDenial::AlreadyPushed);
    }
    if kind == ActorKind::Creature {
        return Err(PushDenial::Creature);
    }
    if outcome.success {
        return Err(PushDenial::Succeeded);
    }
    Ok(())
}

/// Errors raised while resolving a check.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// The dice oracle failed; no outcome was fabricated.
    #[error("dice oracle returned no result")]
    MissingOracleResult(#[source] OracleError),

    #[error("d100 total {roll} is outside 1..=100")]
    RollOutOfRange { roll: i32 },

    #[error("check is already resolved")]
    AlreadyResolved,

    #[error("check is not waiting for a roll")]
    NotAwaitingRoll,

    #[error("push not allowed: {0}")]
    PushNotAllowed(PushDenial),
}

impl GameError for CheckError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CheckError::MissingOracleResult(source) => source.severity(),
            CheckError::RollOutOfRange { .. } => ErrorSeverity::Internal,
            CheckError::AlreadyResolved
            | CheckError::NotAwaitingRoll
            | CheckError::PushNotAllowed(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CheckError::MissingOracleResult(_) => "CHECK_MISSING_ORACLE_RESULT",
            CheckError::RollOutOfRange { .. } => "CHECK_ROLL_OUT_OF_RANGE",
            CheckError::AlreadyResolved => "CHECK_ALREADY_RESOLVED",
            CheckError::NotAwaitingRoll => "CHECK_NOT_AWAITING_ROLL",
            CheckError::PushNotAllowed(_) => "CHECK_PUSH_NOT_ALLOWED",
        }
    }
}

/// Where a check is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CheckState {
    Pending,
    Rolled(RollOutcome),
    PushPending { original: RollOutcome },
    PushRolled { original: RollOutcome, pushed: RollOutcome },
}

/// One percentile check against a fixed target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Check {
    actor_kind: ActorKind,
    target: i32,
    state: CheckState,
}

impl Check {
    /// Starts a check; the target is clamped to `0..=max_target`.
    pub fn new(actor_kind: ActorKind, target: i32, rules: &CheckRules) -> Self {
        Self {
            actor_kind,
            target: target.clamp(0, rules.max_target.max(0)),
            state: CheckState::Pending,
        }
    }

    pub fn actor_kind(&self) -> ActorKind {
        self.actor_kind
    }

    pub fn target(&self) -> i32 {
        self.target
    }

    pub fn state(&self) -> &CheckState {
        &self.state
    }

    /// Latest resolved outcome, the pushed one when present.
    pub fn outcome(&self) -> Option<RollOutcome> {
        match self.state {
            CheckState::Pending => None,
            CheckState::Rolled(outcome) | CheckState::PushPending { original: outcome } => {
                Some(outcome)
            }
            CheckState::PushRolled { pushed, .. } => Some(pushed),
        }
    }

    pub fn is_push(&self) -> bool {
        matches!(
            self.state,
            CheckState::PushPending { .. } | CheckState::PushRolled { .. }
        )
    }

    pub fn is_awaiting_roll(&self) -> bool {
        matches!(
            self.state,
            CheckState::Pending | CheckState::PushPending { .. }
        )
    }

    /// True once no further transition is possible.
    pub fn is_final(&self) -> bool {
        match self.state {
            CheckState::PushRolled { .. } => true,
            CheckState::Rolled(_) => !self.can_push(),
            _ => false,
        }
    }

    pub fn push_eligibility(&self) -> Result<(), PushDenial> {
        match self.state {
            CheckState::Pending => Err(PushDenial::NotRolled),
            CheckState::Rolled(outcome) => push_allowed(self.actor_kind, &outcome),
            CheckState::PushPending { .. } | CheckState::PushRolled { .. } => {
                Err(PushDenial::AlreadyPushed)
            }
        }
    }

    pub fn can_push(&self) -> bool {
        self.push_eligibility().is_ok()
    }

    /// `Rolled → PushPending`.
    pub fn begin_push(&mut self) -> Result<(), CheckError> {
        self.push_eligibility().map_err(CheckError::PushNotAllowed)?;
        if let CheckState::Rolled(original) = self.state {
            self.state = CheckState::PushPending { original };
        }
        Ok(())
    }

    /// Records a d100 total produced outside the check.
    pub fn record_roll(
        &mut self,
        roll: i32,
        rules: &CheckRules,
    ) -> Result<RollOutcome, CheckError> {
        if !(1..=100).contains(&roll) {
            return Err(CheckError::RollOutOfRange { roll });
        }
        match self.state {
            CheckState::Pending => {
                let outcome = evaluate_roll(self.target, roll, rules);
                self.state = CheckState::Rolled(outcome);
                Ok(outcome)
            }
            CheckState::PushPending { original } => {
                let pushed = RollOutcome {
                    is_push: true,
                    ..evaluate_roll(self.target, roll, rules)
                };
                self.state = CheckState::PushRolled { original, pushed };
                Ok(pushed)
            }
            CheckState::Rolled(_) => Err(CheckError::NotAwaitingRoll),
            CheckState::PushRolled { .. } => Err(CheckError::AlreadyResolved),
        }
    }

    /// Asks the oracle for `1d100` and records it.
    pub fn roll_with(
        &mut self,
        oracle: &dyn DiceOracle,
        rules: &CheckRules,
    ) -> Result<RollOutcome, CheckError> {
        self.ensure_awaiting_roll()?;
        let roll = oracle
            .roll(&DiceFormula::d100())
            .map_err(CheckError::MissingOracleResult)?;
        self.record_roll(roll.total, rules)
    }

    /// `begin_push` followed by `roll_with`.
    ///
    /// When the oracle fails the check stays in `PushPending`.
    pub fn push_with(
        &mut self,
        oracle: &dyn DiceOracle,
        rules: &CheckRules,
    ) -> Result<RollOutcome, CheckError> {
        self.begin_push()?;
        self.roll_with(oracle, rules)
    }

    /// Fails unless the check is `Pending` or `PushPending`.
    pub fn ensure_awaiting_roll(&self) -> Result<(), CheckError> {
        match self.state {
            CheckState::Pending | CheckState::PushPending { .. } => Ok(()),
            CheckState::Rolled(_) => Err(CheckError::NotAwaitingRoll),
            CheckState::PushRolled { .. } => Err(CheckError::AlreadyResolved),
        }
    }
}
