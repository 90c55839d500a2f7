//! Async orchestration around the Stormbringer rules.
//!
//! `storm-core` is pure and synchronous; this crate adds the pieces that
//! touch the outside world: the actor document store, the dice roller that
//! checks wait on, and a [`Runtime`] facade that keeps stored records and
//! their derived statistics in step.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the facade and its builder
//! - [`api`] exposes the error types clients handle
//! - [`oracle`] adapts dice sources to the async [`DiceRoller`] boundary
//! - [`repository`] stores actor records
pub mod api;
pub mod oracle;
pub mod repository;
pub mod runtime;

pub use api::{Result, RuntimeError};
pub use oracle::{DiceRoller, OracleRoller};
pub use repository::{ActorRepository, InMemoryActorRepo, RepositoryError};
pub use runtime::{CheckReport, DamageReport, Runtime, RuntimeBuilder, RuntimeConfig};
