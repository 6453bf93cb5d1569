//! Global constants used throughout the modmeta codebase.
//!
//! This module contains environment variable names, default file locations
//! and the descriptor schema cutoff. Defining them centrally keeps the
//! property and environment contract discoverable in one place.

/// Environment variable selecting the release type (`release`, `beta`, `snapshot`, ...).
pub const ENV_RELEASE_TYPE: &str = "RELEASE_TYPE";

/// Environment variable set by CI providers; parsed as a boolean.
pub const ENV_CI: &str = "CI";

/// Environment variable carrying the Maven repository URL for publishing.
pub const ENV_MAVEN_URL: &str = "MAVEN_URL";

/// Environment variable carrying the Maven repository username.
pub const ENV_MAVEN_USER: &str = "MAVEN_USER";

/// Environment variable carrying the Maven repository password.
pub const ENV_MAVEN_PASSWORD: &str = "MAVEN_PASSWORD";

/// Environment variable naming the GitHub Actions step-output file.
pub const ENV_GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Default property file read when `--properties` is not given.
pub const DEFAULT_PROPERTIES_FILE: &str = "gradle.properties";

/// Default directory the generated descriptor is written into.
pub const DEFAULT_OUTPUT_DIR: &str = "build/generated/modsToml";

/// Descriptor file name for Minecraft versions up to and including 1.20.5.
pub const MODS_TOML: &str = "mods.toml";

/// Descriptor file name for Minecraft versions newer than 1.20.5.
pub const NEOFORGE_MODS_TOML: &str = "neoforge.mods.toml";

/// The descriptor file name switches at minecraft minor/patch above this pair.
pub const DESCRIPTOR_CUTOFF: (u32, u32) = (20, 5);

/// Default mod loader name when `loader_name` is not configured.
pub const DEFAULT_LOADER_NAME: &str = "javafml";

/// Release type assumed when `RELEASE_TYPE` is absent.
pub const DEFAULT_RELEASE_TYPE: &str = "SNAPSHOT";

/// Default license file packaged into the jar when `license_file` is not set.
pub const DEFAULT_LICENSE_FILE: &str = "LICENSE";

/// Mod id of the loader platform dependency synthesized for MOD projects.
pub const LOADER_DEPENDENCY_ID: &str = "neoforge";

/// Mod id of the base game dependency synthesized for MOD projects.
pub const GAME_DEPENDENCY_ID: &str = "minecraft";
