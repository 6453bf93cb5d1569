//! modmeta - Metadata generator for NeoForge mod projects
//!
//! A build-tooling companion that derives project metadata (ids, versions,
//! URLs) from `gradle.properties`-style configuration and environment
//! variables, and generates the artifacts the surrounding build consumes:
//! the mod metadata descriptor read by the loader at runtime, the jar
//! manifest attribute block, and GitHub Actions step outputs.
//!
//! # Architecture Overview
//!
//! The pipeline is a single deterministic pass:
//!
//! ```text
//! property store + environment
//!         -> settings (lazy derivation graph, resolved once, memoized)
//!         -> descriptor generator (builds the document tree)
//!         -> serializer (emits TOML text)
//!         -> file system
//! ```
//!
//! Settings form a directed acyclic derivation graph: `full_version` is
//! derived from `mc_version`, the project version and the release type;
//! `artifact_locator` chains the group, the id and `full_version`; the
//! GitHub URL family hangs off `github_owner`/`github_repo`. Every setting
//! resolves lazily, at most once, and an absent upstream propagates as
//! absence instead of an empty string. A required setting without a value
//! fails at the point of use, naming the setting.
//!
//! # Core Modules
//!
//! - [`properties`] - property store (file + `-P` overrides) and the
//!   environment snapshot
//! - [`settings`] - the memoized derivation graph and the project model
//! - [`dependencies`] - declared mod dependencies and their defaults
//! - [`descriptor`] - descriptor schema, generator and serializer
//! - [`packaging`] - jar manifest attribute set
//! - [`actions`] - GitHub Actions step-output file
//! - [`cli`] - the `modmeta` command line interface
//! - [`core`] - error taxonomy and user-facing error display
//!
//! # Property File
//!
//! ```text
//! mod_group = com.example
//! mod_id = examplemod
//! mod_version = 2.0
//! mod_name = Example Mod
//! mc_version = 1.21
//! mc_version_range = [1.21,)
//! neo_version = 21.0.42
//! neo_version_range = [21.0,)
//! loader_version = [1,)
//! license_name = MIT
//!
//! dependencies = jei
//! dependency_jei_type = optional
//! dependency_jei_version_range = [19,)
//! ```
//!
//! Library projects set `project_type = LIBRARY` and use the `lib_*`
//! property family instead of `mod_*`.
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Write build/generated/modsToml/neoforge.mods.toml
//! modmeta generate
//!
//! # Stamp a sources jar
//! modmeta manifest --classifier sources
//!
//! # Publish step outputs on CI
//! modmeta actions
//!
//! # Show everything that is still missing
//! modmeta validate
//! ```

pub mod actions;
pub mod cli;
pub mod constants;
pub mod core;
pub mod dependencies;
pub mod descriptor;
pub mod packaging;
pub mod properties;
pub mod settings;
