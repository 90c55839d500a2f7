//! Actor fixture loader.
//!
//! Loads actor records (characters, NPCs, creatures) from JSON files.

use std::collections::HashSet;
use std::path::Path;

use storm_core::ActorRecord;

use crate::loaders::{LoadResult, read_file};

/// Loader for actor records from JSON files.
pub struct ActorLoader;

impl ActorLoader {
    /// Load actors from a JSON file.
    ///
    /// JSON format: an array of records tagged by `"kind"`
    /// (`character`, `npc` or `creature`). Actor ids must be unique.
    pub fn load(path: &Path) -> LoadResult<Vec<ActorRecord>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ActorRecord>> {
        let actors: Vec<ActorRecord> = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actors JSON: {}", e))?;

        let mut seen = HashSet::new();
        for actor in &actors {
            if actor.id().as_str().is_empty() {
                anyhow::bail!("Actor '{}' has an empty id", actor.name());
            }
            if !seen.insert(actor.id().clone()) {
                anyhow::bail!("Duplicate actor id '{}'", actor.id());
            }
        }
        Ok(actors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storm_core::ActorKind;

    #[test]
    fn parses_mixed_kinds() {
        let actors = ActorLoader::parse(
            r#"[
                { "kind": "character", "id": "elric", "name": "Elric",
                  "attributes": { "STR": 8, "CON": 6 } },
                { "kind": "npc", "id": "guard", "name": "Guard" },
                { "kind": "creature", "id": "wolf", "name": "Wolf",
                  "weapons": [{ "name": "Bite", "attack": 50, "damage": "1d8" }] }
            ]"#,
        )
        .expect("valid actors");

        let kinds: Vec<_> = actors.iter().map(ActorRecord::kind).collect();
        assert_eq!(kinds, [ActorKind::Character, ActorKind::Npc, ActorKind::Creature]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = ActorLoader::parse(
            r#"[
                { "kind": "npc", "id": "guard" },
                { "kind": "creature", "id": "guard" }
            ]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate actor id 'guard'"));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(ActorLoader::parse(r#"[{ "kind": "vehicle", "id": "cart" }]"#).is_err());
    }
}
