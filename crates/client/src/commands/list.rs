use anyhow::Result;
use clap::Parser;
use serde_json::json;

use storm_runtime::Runtime;

use super::print_json;
use crate::config::OutputFormat;

/// List the actors in the data directory
#[derive(Parser)]
pub struct List {}

impl List {
    pub fn execute(self, runtime: &Runtime, format: OutputFormat) -> Result<()> {
        let mut rows = Vec::new();
        for id in runtime.actor_ids()? {
            let record = runtime.actor(&id)?;
            rows.push((id, record.kind(), record.name().to_owned()));
        }

        match format {
            OutputFormat::Json => print_json(&json!(
                rows.iter()
                    .map(|(id, kind, name)| json!({ "id": id, "kind": kind, "name": name }))
                    .collect::<Vec<_>>()
            )),
            OutputFormat::Summary => {
                for (id, kind, name) in rows {
                    println!("{:<20} {:<10} {}", id.to_string(), kind.as_ref(), name);
                }
                Ok(())
            }
        }
    }
}
