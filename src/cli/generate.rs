//! The `generate` subcommand: write the mod metadata descriptor.

use crate::constants::DEFAULT_OUTPUT_DIR;
use crate::descriptor::{descriptor_file_name, generate, serialize};
use crate::settings::ProjectSettings;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for `modmeta generate`.
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Directory the descriptor is written into.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Print the descriptor to stdout instead of writing a file.
    #[arg(long)]
    stdout: bool,
}

impl GenerateCommand {
    /// Generate, serialize and write the descriptor.
    ///
    /// The file name follows the targeted Minecraft version: versions newer
    /// than 1.20.5 use `neoforge.mods.toml`, older ones `mods.toml`.
    pub fn execute(&self, settings: &ProjectSettings) -> Result<()> {
        let descriptor = generate(settings)?;
        let text = serialize(&descriptor);

        if self.stdout {
            print!("{text}");
            return Ok(());
        }

        let file_name = descriptor_file_name(&settings.minecraft_version.require()?)?;
        let path = self.output_dir.join(file_name);
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory {}", self.output_dir.display())
        })?;
        std::fs::write(&path, text)
            .with_context(|| format!("Failed to write descriptor {}", path.display()))?;

        tracing::debug!(path = %path.display(), "descriptor written");
        println!("Wrote {}", path.display());
        Ok(())
    }
}
