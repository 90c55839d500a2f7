//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the repository, the rules engine and the dice roller
//! so clients can bubble them up with consistent context.
use thiserror::Error;

use storm_core::{
    ActorId, CheckError, CraftSlotError, EngineError, ErrorSeverity, GameError, OracleError,
};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("actor '{0}' not found")]
    ActorNotFound(ActorId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Check(#[from] CheckError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    CraftSlot(#[from] CraftSlotError),

    #[error("failed to load content: {0}")]
    Content(String),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::ActorNotFound(_) => ErrorSeverity::Validation,
            RuntimeError::Repository(RepositoryError::LockPoisoned) => ErrorSeverity::Fatal,
            RuntimeError::Repository(_) => ErrorSeverity::Validation,
            RuntimeError::Engine(err) => err.severity(),
            RuntimeError::Check(err) => err.severity(),
            RuntimeError::Oracle(err) => err.severity(),
            RuntimeError::CraftSlot(err) => err.severity(),
            RuntimeError::Content(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::ActorNotFound(_) => "RUNTIME_ACTOR_NOT_FOUND",
            RuntimeError::Repository(err) => err.error_code(),
            RuntimeError::Engine(err) => err.error_code(),
            RuntimeError::Check(err) => err.error_code(),
            RuntimeError::Oracle(err) => err.error_code(),
            RuntimeError::CraftSlot(err) => err.error_code(),
            RuntimeError::Content(_) => "RUNTIME_CONTENT",
        }
    }
}
