//! The mod metadata descriptor: schema, generation and serialization.
//!
//! The descriptor is the structured document the mod loader reads at
//! runtime. [`generator::generate`] maps a fully resolved
//! [`crate::settings::ProjectSettings`] onto the [`ModsToml`] tree, and
//! [`serializer::serialize`] emits it as TOML text with a fixed layout.
//!
//! The schema has grown fields over time (issue tracker URL, logo, credits,
//! per-dependency cross-references); the serializer is table-driven so a
//! schema change touches the structs here and the field tables in
//! [`serializer`], nothing else.
//!
//! Optional data is modeled as `Option` and omitted from output entirely -
//! the descriptor never contains null-valued keys or empty collections. The
//! `dependencies` and `modproperties` maps are dropped as a whole when
//! empty.

pub mod generator;
pub mod serializer;

pub use generator::{descriptor_file_name, generate};
pub use serializer::serialize;

use crate::core::{ModmetaError, Result};
use crate::dependencies::{DependencyKind, Ordering, Side};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of the descriptor document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModsToml {
    /// Loader language provider, e.g. `javafml`.
    #[serde(rename = "modLoader")]
    pub mod_loader: String,
    /// Version range of the loader language provider.
    #[serde(rename = "loaderVersion")]
    pub loader_version: String,
    /// License name displayed by the loader.
    pub license: String,
    /// Issue tracker link, omitted when the project has none configured.
    #[serde(rename = "issueTrackerURL", skip_serializing_if = "Option::is_none")]
    pub issue_tracker_url: Option<String>,
    /// Mod entries, in order; always exactly one for generated descriptors.
    pub mods: Vec<Mod>,
    /// Publishing cross-references for the project itself.
    #[serde(rename = "mc-publish", skip_serializing_if = "Option::is_none")]
    pub mc_publish: Option<McPublish>,
    /// Dependency lists keyed by consuming mod id; omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, Vec<Dependency>>>,
    /// Free-form properties keyed by mod id; omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modproperties: Option<BTreeMap<String, BTreeMap<String, String>>>,
}

impl ModsToml {
    /// Parse a serialized descriptor.
    ///
    /// Together with [`serialize`] this forms the round-trip contract:
    /// parsing emitted text and serializing again reproduces the bytes.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ModmetaError::DescriptorParseError {
            reason: e.to_string(),
        })
    }
}

/// One mod entry of the descriptor.
///
/// Id and version are mandatory; every other field is dropped from the
/// output when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mod {
    /// Mod id, unique within the loader.
    #[serde(rename = "modId")]
    pub mod_id: String,
    /// Project version (without the minecraft prefix).
    pub version: String,
    /// Human-readable display name.
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Homepage shown by the loader.
    #[serde(rename = "displayURL", skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
    /// Logo file within the jar.
    #[serde(rename = "logoFile", skip_serializing_if = "Option::is_none")]
    pub logo_file: Option<String>,
    /// Credits line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<String>,
    /// Authors line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    /// Long-form description; serialized as a literal multi-line block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Publishing cross-references of the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct McPublish {
    /// Modrinth project id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modrinth: Option<String>,
    /// CurseForge numeric project id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curseforge: Option<i64>,
}

impl McPublish {
    /// Whether neither reference is set, in which case the block is omitted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.modrinth.is_none() && self.curseforge.is_none()
    }
}

/// One dependency entry under a consuming mod id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dependency {
    /// Mod id of the dependency.
    #[serde(rename = "modId")]
    pub mod_id: String,
    /// Maven-style version range.
    #[serde(rename = "versionRange")]
    pub version_range: String,
    /// Requirement strength, serialized lower-case.
    #[serde(rename = "type")]
    pub kind: DependencyKind,
    /// Load-ordering hint, serialized upper-case.
    pub ordering: Ordering,
    /// Side applicability, serialized upper-case.
    pub side: Side,
    /// Cross-references of the dependency itself, omitted when empty.
    #[serde(rename = "mc-publish", skip_serializing_if = "Option::is_none")]
    pub mc_publish: Option<DependencyMcPublish>,
}

/// Publishing cross-references of a dependency entry.
///
/// Unlike the project-level [`McPublish`] block, both platforms key
/// dependencies by slug, so the CurseForge reference is a string here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyMcPublish {
    /// Modrinth project slug.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modrinth: Option<String>,
    /// CurseForge project slug.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curseforge: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_descriptor() {
        let text = concat!(
            "modLoader = \"javafml\"\n",
            "loaderVersion = \"[1,)\"\n",
            "license = \"MIT\"\n",
            "\n",
            "[[mods]]\n",
            "modId = \"examplemod\"\n",
            "version = \"2.0\"\n",
            "displayName = \"Example Mod\"\n",
        );
        let descriptor = ModsToml::parse(text).unwrap();
        assert_eq!(descriptor.mod_loader, "javafml");
        assert_eq!(descriptor.mods.len(), 1);
        assert!(descriptor.dependencies.is_none());
        assert!(descriptor.mc_publish.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let text = concat!(
            "modLoader = \"javafml\"\n",
            "loaderVersion = \"[1,)\"\n",
            "license = \"MIT\"\n",
            "surprise = true\n",
            "mods = []\n",
        );
        assert!(ModsToml::parse(text).is_err());
    }

    #[test]
    fn test_dependency_enum_spelling() {
        let text = concat!(
            "modLoader = \"javafml\"\n",
            "loaderVersion = \"[1,)\"\n",
            "license = \"MIT\"\n",
            "\n",
            "[[mods]]\n",
            "modId = \"examplemod\"\n",
            "version = \"2.0\"\n",
            "displayName = \"Example Mod\"\n",
            "\n",
            "[[dependencies.examplemod]]\n",
            "modId = \"neoforge\"\n",
            "versionRange = \"[21.0,)\"\n",
            "type = \"required\"\n",
            "ordering = \"NONE\"\n",
            "side = \"BOTH\"\n",
        );
        let descriptor = ModsToml::parse(text).unwrap();
        let dependencies = descriptor.dependencies.unwrap();
        let deps = &dependencies["examplemod"];
        assert_eq!(deps[0].kind, DependencyKind::Required);
        assert_eq!(deps[0].ordering, Ordering::None);
        assert_eq!(deps[0].side, Side::Both);
    }
}
