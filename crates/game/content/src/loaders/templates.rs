//! Default actor template loader.

use std::path::Path;

use storm_core::ActorTemplates;
use storm_core::stats::{Attribute, normalize};

use crate::loaders::{LoadResult, read_file};

/// Loader for per-kind actor templates from JSON files.
pub struct TemplateLoader;

impl TemplateLoader {
    /// Load templates from a JSON file.
    ///
    /// JSON format: `{ "character": {..}, "npc": {..}, "creature": {..} }`;
    /// each kind is optional and defaults to an empty template.
    pub fn load(path: &Path) -> LoadResult<ActorTemplates> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ActorTemplates> {
        let mut templates: ActorTemplates = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor templates JSON: {}", e))?;

        // Canonical keys keep the fill-missing merge case-insensitive in one
        // direction only.
        normalize(&mut templates.character.attributes, &Attribute::CHARACTER);
        normalize(&mut templates.npc.attributes, &Attribute::CHARACTER);
        normalize(&mut templates.creature.attributes, &Attribute::CREATURE);
        for forbidden in [Attribute::Cha, Attribute::Lck] {
            if templates.creature.attributes.remove(forbidden).is_some() {
                anyhow::bail!(
                    "Invalid creature template: creatures cannot have {}",
                    forbidden
                );
            }
        }
        Ok(templates)
    }
}
