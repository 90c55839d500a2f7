//! Repository contract for actor records.

use storm_core::{ActorId, ActorRecord};

use super::error::Result;

/// Store of actor documents keyed by id.
pub trait ActorRepository: Send + Sync {
    /// Load a copy of one record.
    fn get(&self, id: &ActorId) -> Result<Option<ActorRecord>>;

    /// Store a new record; fails if the id is taken.
    fn insert(&self, record: ActorRecord) -> Result<()>;

    /// Read-modify-write one record as a single atomic replace.
    ///
    /// `apply` must not change the record's id.
    fn update(&self, id: &ActorId, apply: &mut dyn FnMut(&mut ActorRecord)) -> Result<()>;

    /// Remove a record, returning it.
    fn remove(&self, id: &ActorId) -> Result<Option<ActorRecord>>;

    /// Ids of every stored record, sorted.
    fn ids(&self) -> Result<Vec<ActorId>>;

    fn contains(&self, id: &ActorId) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }
}
