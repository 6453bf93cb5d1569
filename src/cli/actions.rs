//! The `actions` subcommand: publish step outputs for GitHub Actions.

use crate::actions::{github_outputs, write_outputs};
use crate::constants::ENV_GITHUB_OUTPUT;
use crate::core::ModmetaError;
use crate::settings::ProjectSettings;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for `modmeta actions`.
#[derive(Debug, Args)]
pub struct ActionsCommand {}

impl ActionsCommand {
    /// Append the `modid`, `version` and `minecraft_version` outputs to the
    /// file named by `GITHUB_OUTPUT`.
    pub fn execute(&self, settings: &ProjectSettings) -> Result<()> {
        let output_file = std::env::var_os(ENV_GITHUB_OUTPUT)
            .map(PathBuf::from)
            .ok_or(ModmetaError::GithubOutputNotSet)?;

        let outputs = github_outputs(settings)?;
        write_outputs(&output_file, &outputs)?;

        for (key, value) in &outputs {
            tracing::debug!(key = %key, value = %value, "step output written");
        }
        println!(
            "Wrote {} outputs to {}",
            outputs.len(),
            output_file.display()
        );
        Ok(())
    }
}
