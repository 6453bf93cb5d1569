//! The `manifest` subcommand: emit the jar manifest attribute block.

use crate::cli::OutputFormat;
use crate::packaging::{manifest_attributes, to_manifest_block};
use crate::settings::ProjectSettings;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;

/// Arguments for `modmeta manifest`.
#[derive(Debug, Args)]
pub struct ManifestCommand {
    /// Archive classifier of the jar being stamped (e.g. `sources`).
    #[arg(long)]
    classifier: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write to a file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl ManifestCommand {
    /// Compute and emit the attribute set.
    pub fn execute(&self, settings: &ProjectSettings) -> Result<()> {
        let attributes =
            manifest_attributes(settings, self.classifier.as_deref(), Utc::now())?;

        let rendered = match self.format {
            OutputFormat::Text => to_manifest_block(&attributes),
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = attributes
                    .iter()
                    .map(|(key, value)| (key.clone(), serde_json::Value::String(value.clone())))
                    .collect();
                let mut json = serde_json::to_string_pretty(&map)?;
                json.push('\n');
                json
            }
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, rendered)
                    .with_context(|| format!("Failed to write manifest {}", path.display()))?;
                println!("Wrote {}", path.display());
            }
            None => print!("{rendered}"),
        }
        Ok(())
    }
}
