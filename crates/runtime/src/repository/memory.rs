//! In-memory repository for tests, the CLI and embedding hosts.

use std::collections::BTreeMap;
use std::sync::RwLock;

use storm_core::{ActorId, ActorRecord};

use super::ActorRepository;
use super::error::{RepositoryError, Result};

/// In-memory implementation of [`ActorRepository`].
#[derive(Debug, Default)]
pub struct InMemoryActorRepo {
    records: RwLock<BTreeMap<ActorId, ActorRecord>>,
}

impl InMemoryActorRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = ActorRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.id().clone(), record))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }
}

impl ActorRepository for InMemoryActorRepo {
    fn get(&self, id: &ActorId) -> Result<Option<ActorRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(id).cloned())
    }

    fn insert(&self, record: ActorRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if records.contains_key(record.id()) {
            return Err(RepositoryError::AlreadyExists(record.id().clone()));
        }
        records.insert(record.id().clone(), record);
        Ok(())
    }

    fn update(&self, id: &ActorId, apply: &mut dyn FnMut(&mut ActorRecord)) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let stored = records
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;

        let mut draft = stored.clone();
        apply(&mut draft);
        if draft.id() != id {
            return Err(RepositoryError::IdChanged {
                from: id.clone(),
                to: draft.id().clone(),
            });
        }
        *stored = draft;
        Ok(())
    }

    fn remove(&self, id: &ActorId) -> Result<Option<ActorRecord>> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.remove(id))
    }

    fn ids(&self) -> Result<Vec<ActorId>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.keys().cloned().collect())
    }
}
