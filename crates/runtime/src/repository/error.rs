//! Error types raised by repository implementations.

use thiserror::Error;

use storm_core::ActorId;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("actor repository lock was poisoned")]
    LockPoisoned,

    #[error("actor '{0}' is not stored")]
    NotFound(ActorId),

    #[error("actor '{0}' is already stored")]
    AlreadyExists(ActorId),

    #[error("update changed actor id from '{from}' to '{to}'")]
    IdChanged { from: ActorId, to: ActorId },
}

impl RepositoryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RepositoryError::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            RepositoryError::NotFound(_) => "REPOSITORY_NOT_FOUND",
            RepositoryError::AlreadyExists(_) => "REPOSITORY_ALREADY_EXISTS",
            RepositoryError::IdChanged { .. } => "REPOSITORY_ID_CHANGED",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
