//! Data-driven rules content and loaders.
//!
//! This crate reads the static data a host ships with the ruleset:
//! - Rules constants (TOML), deserialized into [`storm_core::RulesConfig`]
//! - Default actor templates (JSON), merged into records with fill-missing
//!   semantics
//! - Actor fixtures (JSON) for the CLI and tests
//!
//! Content is loaded once at start-up and treated as immutable.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ActorLoader, ConfigLoader, ContentFactory, LoadResult, TemplateLoader};
