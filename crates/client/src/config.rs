//! Client configuration: command line flags over environment variables.
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use storm_content::ContentFactory;
use storm_runtime::{Runtime, RuntimeConfig};

const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/data");

/// Flags shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Directory holding rules.toml, templates.json and actors.json
    #[arg(short, long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Seed for the dice roller
    #[arg(short, long, global = true, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log at DEBUG unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Summary,
    /// Pretty-printed JSON
    Json,
}

/// Resolved client settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub dice_seed: u64,
    pub format: OutputFormat,
}

impl ClientConfig {
    /// Flags first, then the environment, then defaults.
    ///
    /// Environment variables:
    /// - `STORM_DATA_DIR` - Content directory (default: bundled data)
    /// - `STORM_DICE_SEED` - Dice seed (default: 0)
    pub fn resolve(args: &GlobalArgs) -> Self {
        let data_dir = args
            .data_dir
            .clone()
            .or_else(|| env::var("STORM_DATA_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(BUNDLED_DATA_DIR));
        let dice_seed = args
            .seed
            .or_else(|| read_env::<u64>("STORM_DICE_SEED"))
            .unwrap_or_default();

        Self {
            data_dir,
            dice_seed,
            format: args.format.unwrap_or_default(),
        }
    }

    pub fn build_runtime(&self) -> Result<Runtime> {
        let factory = ContentFactory::new(&self.data_dir);
        let config = RuntimeConfig::from_content(&factory).with_context(|| {
            format!("Failed to load rules content from {}", self.data_dir.display())
        })?;
        let actors = factory.load_actors()?;

        Runtime::builder()
            .config(RuntimeConfig {
                dice_seed: self.dice_seed,
                ..config
            })
            .actors(actors)
            .build()
            .context("Failed to build runtime")
    }
}

fn read_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_take_precedence() {
        let args = GlobalArgs {
            data_dir: Some(PathBuf::from("/srv/storm")),
            seed: Some(9),
            format: Some(OutputFormat::Json),
            verbose: false,
        };
        let config = ClientConfig::resolve(&args);
        assert_eq!(config.data_dir, PathBuf::from("/srv/storm"));
        assert_eq!(config.dice_seed, 9);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn bundled_data_builds_a_runtime() {
        let config = ClientConfig {
            data_dir: PathBuf::from(BUNDLED_DATA_DIR),
            dice_seed: 1,
            format: OutputFormat::Summary,
        };
        let runtime = config.build_runtime().expect("bundled content");
        assert!(!runtime.actor_ids().expect("ids").is_empty());
    }

    #[test]
    fn missing_actor_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = ClientConfig {
            data_dir: dir.path().to_path_buf(),
            dice_seed: 0,
            format: OutputFormat::Summary,
        };
        assert!(config.build_runtime().is_err());
    }
}
