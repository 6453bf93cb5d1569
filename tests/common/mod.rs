//! Common test utilities and fixtures for modmeta integration tests.

// Allow dead code because these utilities are shared across test files and
// not every test file uses every helper.
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// A complete MOD project configuration used by the happy-path tests.
pub const COMPLETE_MOD_PROPERTIES: &str = "\
mod_group = com.example
mod_id = examplemod
mod_version = 2.0
mod_name = Example Mod
mod_vendor = Example Inc
mod_authors = Alice, Bob
mod_description = The example mod.
mc_version = 1.21
mc_version_range = [1.21,)
neo_version = 21.0.42
neo_version_range = [21.0,)
loader_version = [1,)
license_name = MIT
java_version = 21
github_owner = example
github_repo = examplemod
";

/// Temporary project directory with a property file.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Create an empty project directory (no property file).
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("Failed to create temp project dir")?;
        Ok(Self { dir })
    }

    /// Create a project directory containing the given `gradle.properties`.
    pub fn with_properties(content: &str) -> Result<Self> {
        let project = Self::new()?;
        project.write_properties(content)?;
        Ok(project)
    }

    /// Write (or replace) the project's `gradle.properties`.
    pub fn write_properties(&self, content: &str) -> Result<()> {
        std::fs::write(self.path().join("gradle.properties"), content)
            .context("Failed to write gradle.properties")
    }

    /// Project root path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Read a file relative to the project root.
    pub fn read(&self, relative: &str) -> Result<String> {
        std::fs::read_to_string(self.path().join(relative))
            .with_context(|| format!("Failed to read {relative}"))
    }

    /// A `modmeta` command running in the project directory with a scrubbed
    /// environment, so host CI variables cannot leak into assertions.
    pub fn modmeta_command(&self) -> Command {
        let mut cmd = Command::cargo_bin("modmeta").expect("modmeta binary");
        cmd.current_dir(self.path())
            .env_remove("RELEASE_TYPE")
            .env_remove("CI")
            .env_remove("MAVEN_URL")
            .env_remove("MAVEN_USER")
            .env_remove("MAVEN_PASSWORD")
            .env_remove("GITHUB_OUTPUT")
            .env_remove("RUST_LOG");
        cmd
    }
}
