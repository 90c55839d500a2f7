//! Content factory for loading every data file from one directory.

use std::path::{Path, PathBuf};

use storm_core::{ActorRecord, ActorTemplates, DerivationEngine, RulesConfig};

use crate::loaders::{ActorLoader, ConfigLoader, LoadResult, TemplateLoader};

/// Content factory that loads all rules content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml       (optional, published ruleset when absent)
/// ├── templates.json   (optional, empty templates when absent)
/// └── actors.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load rules from `rules.toml`, or the defaults when it is absent.
    pub fn load_rules(&self) -> LoadResult<RulesConfig> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            return Ok(RulesConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load templates from `templates.json`, or empty ones when it is absent.
    pub fn load_templates(&self) -> LoadResult<ActorTemplates> {
        let path = self.data_dir.join("templates.json");
        if !path.exists() {
            return Ok(ActorTemplates::default());
        }
        TemplateLoader::load(&path)
    }

    /// Load actor records from `actors.json`.
    pub fn load_actors(&self) -> LoadResult<Vec<ActorRecord>> {
        ActorLoader::load(&self.data_dir.join("actors.json"))
    }

    /// Build an engine from `rules.toml` and `templates.json`.
    pub fn engine(&self) -> LoadResult<DerivationEngine> {
        Ok(DerivationEngine::with_templates(
            self.load_rules()?,
            self.load_templates()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled() -> ContentFactory {
        ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    #[test]
    fn bundled_data_loads() {
        let factory = bundled();
        assert_eq!(factory.load_rules().expect("rules"), RulesConfig::default());
        let actors = factory.load_actors().expect("actors");
        assert!(!actors.is_empty());
        factory.engine().expect("engine");
    }

    #[test]
    fn bundled_actors_refresh_cleanly() {
        let factory = bundled();
        let engine = factory.engine().expect("engine");
        for mut actor in factory.load_actors().expect("actors") {
            let stats = engine.refresh(&mut actor);
            assert!(stats.hp.max >= 1, "{} has no hit points", actor.name());
            assert_eq!(actor.hp().max, stats.hp.max);
        }
    }

    #[test]
    fn empty_directory_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_rules().expect("rules"), RulesConfig::default());
        assert_eq!(factory.load_templates().expect("templates"), ActorTemplates::default());
        assert!(factory.load_actors().is_err());
    }
}
