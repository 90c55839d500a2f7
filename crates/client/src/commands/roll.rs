use anyhow::Result;
use clap::Parser;

use storm_runtime::Runtime;

use super::print_json;
use crate::config::OutputFormat;

/// Roll an arbitrary dice formula, e.g. armor protection
#[derive(Parser)]
pub struct Roll {
    /// Formula such as 1d100, 2d6+1 or 1d6-1d4
    #[arg(value_name = "FORMULA")]
    formula: String,
}

impl Roll {
    pub async fn execute(self, runtime: &Runtime, format: OutputFormat) -> Result<()> {
        let roll = runtime.roll_formula(&self.formula).await?;
        match format {
            OutputFormat::Json => print_json(&serde_json::to_value(&roll)?),
            OutputFormat::Summary => {
                println!("{} = {}", roll.formula, roll.total);
                Ok(())
            }
        }
    }
}
