//! Command-line interface for modmeta.
//!
//! Each subcommand is implemented in its own module with its own argument
//! struct and execution logic:
//!
//! - `generate` - write the mod metadata descriptor
//! - `manifest` - emit the jar manifest attribute block
//! - `actions` - append step outputs for GitHub Actions
//! - `validate` - resolve the whole model and report problems
//!
//! All subcommands share the global options: `--properties` selects the
//! property file (default `gradle.properties`) and repeated `-P key=value`
//! arguments override individual properties, mirroring how the build system
//! passes project properties.
//!
//! ```bash
//! modmeta generate
//! modmeta generate -P mod_version=2.1 --output-dir build/meta
//! modmeta manifest --classifier sources
//! modmeta validate --format json
//! ```

mod actions;
mod generate;
mod manifest;
mod validate;

use crate::constants::DEFAULT_PROPERTIES_FILE;
use crate::properties::{Environment, PropertyStore};
use crate::settings::ProjectSettings;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Metadata generator for NeoForge mod projects.
#[derive(Debug, Parser)]
#[command(name = "modmeta", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Property file backing the configuration model.
    #[arg(long, global = true, default_value = DEFAULT_PROPERTIES_FILE)]
    properties: PathBuf,

    /// Override a single property (repeatable).
    #[arg(
        short = 'P',
        long = "property",
        global = true,
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        action = ArgAction::Append
    )]
    overrides: Vec<(String, String)>,

    /// Enable debug output.
    #[arg(long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors.
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate the mods.toml / neoforge.mods.toml descriptor.
    Generate(generate::GenerateCommand),
    /// Print or write the jar manifest attributes.
    Manifest(manifest::ManifestCommand),
    /// Append modid/version outputs to the GitHub Actions output file.
    Actions(actions::ActionsCommand),
    /// Resolve the full configuration model and report problems.
    Validate(validate::ValidateCommand),
}

/// Output format for commands that print structured data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is not set.
    #[must_use]
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }

    /// Execute the selected subcommand.
    pub fn execute(self) -> Result<()> {
        let settings = build_settings(&self.properties, &self.overrides)?;
        match self.command {
            Commands::Generate(command) => command.execute(&settings),
            Commands::Manifest(command) => command.execute(&settings),
            Commands::Actions(command) => command.execute(&settings),
            Commands::Validate(command) => command.execute(&settings),
        }
    }
}

/// Load the property store and wire the settings graph.
///
/// A missing property file is not an error by itself: the pass starts from
/// an empty store and individual settings fail later if they end up without
/// a value. Overrides are applied after the file so they win.
fn build_settings(properties: &Path, overrides: &[(String, String)]) -> Result<ProjectSettings> {
    let mut store = if properties.exists() {
        PropertyStore::load(properties)
            .with_context(|| format!("Failed to load property file {}", properties.display()))?
    } else {
        tracing::warn!(file = %properties.display(), "property file not found, starting empty");
        PropertyStore::new()
    };
    for (key, value) in overrides {
        store.set(key.clone(), value.clone());
    }
    let settings = ProjectSettings::new(store, Environment::from_process())?;
    Ok(settings)
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.trim().to_string(), value.trim().to_string()))
}
