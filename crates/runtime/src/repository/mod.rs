//! Repository layer for actor documents.
//!
//! The store owns raw records; the runtime only writes back what a
//! derivation pass produces. Static rules content comes from
//! `storm-content`, not from here.

mod error;
mod memory;
mod traits;

pub use error::RepositoryError;
pub use memory::InMemoryActorRepo;
pub use traits::ActorRepository;
