//! `storm` command line client.
//!
//! Loads rules, templates and actor fixtures from a data directory, then
//! derives statistics or resolves checks through the runtime.
//!
//! ```bash
//! storm derive elric
//! storm check elric --skill sorcery --push
//! storm damage elric stormbringer --seed 7
//! ```

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::Parser;

use commands::{Check, Damage, Derive, List, Roll};
use config::{ClientConfig, GlobalArgs};

/// Stormbringer rules engine
#[derive(Parser)]
#[command(name = "storm")]
#[command(about = "Derive Stormbringer statistics and roll checks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List the actors in the data directory
    List(List),

    /// Show an actor's derived statistics
    Derive(Derive),

    /// Roll a skill, weapon or plain percentile check
    Check(Check),

    /// Roll a weapon's damage
    Damage(Damage),

    /// Roll an arbitrary dice formula
    Roll(Roll),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::setup_logging(cli.global.verbose);

    let config = ClientConfig::resolve(&cli.global);
    tracing::debug!("Data directory: {}", config.data_dir.display());
    let runtime = config.build_runtime()?;

    match cli.command {
        Command::List(cmd) => cmd.execute(&runtime, config.format),
        Command::Derive(cmd) => cmd.execute(&runtime, config.format),
        Command::Check(cmd) => cmd.execute(&runtime, config.format).await,
        Command::Damage(cmd) => cmd.execute(&runtime, config.format).await,
        Command::Roll(cmd) => cmd.execute(&runtime, config.format).await,
    }
}
