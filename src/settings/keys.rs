//! Project type variants and the property-key lookup table.
//!
//! Several identity settings are backed by different property names
//! depending on whether the project is a mod or a game library. The mapping
//! lives in one table, [`property_key`], keyed by [`ProjectType`] and
//! [`LogicalField`], so renaming a property never touches derivation logic.
//!
//! The display name is the one identity field without a LIBRARY column: a
//! library's display name falls back to its resolved project id instead of a
//! property of its own.

use crate::core::ModmetaError;
use std::fmt;
use std::str::FromStr;

/// Packaging variant of the project.
///
/// Selects the property-name family backing the identity settings and the
/// type tag embedded in the jar manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    /// A playable mod; the descriptor generator synthesizes loader and game
    /// dependencies for it.
    Mod,
    /// A code-only game library; no descriptor dependencies are synthesized.
    Library,
}

impl ProjectType {
    /// The `FMLModType` manifest tag for this variant.
    #[must_use]
    pub const fn packaging_tag(self) -> &'static str {
        match self {
            Self::Mod => "MOD",
            Self::Library => "GAMELIBRARY",
        }
    }
}

impl FromStr for ProjectType {
    type Err = ModmetaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "MOD" => Ok(Self::Mod),
            "LIBRARY" => Ok(Self::Library),
            _ => Err(ModmetaError::InvalidEnumValue {
                field: "project_type".to_string(),
                value: value.to_string(),
                expected: "MOD, LIBRARY",
            }),
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mod => "MOD",
            Self::Library => "LIBRARY",
        })
    }
}

/// Identity fields whose backing property name switches with [`ProjectType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalField {
    /// Maven group of the project.
    Group,
    /// Mod id respectively library name.
    Id,
    /// Project version (without the minecraft prefix).
    Version,
    /// Vendor embedded into the jar manifest.
    Vendor,
    /// Project homepage.
    Url,
}

/// Property key backing `field` for a project of type `project_type`.
#[must_use]
pub const fn property_key(project_type: ProjectType, field: LogicalField) -> &'static str {
    match (project_type, field) {
        (ProjectType::Mod, LogicalField::Group) => "mod_group",
        (ProjectType::Mod, LogicalField::Id) => "mod_id",
        (ProjectType::Mod, LogicalField::Version) => "mod_version",
        (ProjectType::Mod, LogicalField::Vendor) => "mod_vendor",
        (ProjectType::Mod, LogicalField::Url) => "mod_url",
        (ProjectType::Library, LogicalField::Group) => "lib_group",
        (ProjectType::Library, LogicalField::Id) => "lib_name",
        (ProjectType::Library, LogicalField::Version) => "lib_version",
        (ProjectType::Library, LogicalField::Vendor) => "lib_vendor",
        (ProjectType::Library, LogicalField::Url) => "lib_url",
    }
}

/// Java toolchain vendor selected for the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JavaVendor {
    /// Eclipse Temurin builds, used on CI.
    Adoptium,
    /// JetBrains Runtime, used for local development runs.
    Jetbrains,
}

impl fmt::Display for JavaVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Adoptium => "adoptium",
            Self::Jetbrains => "jetbrains",
        })
    }
}
