//! Declared relationships to other mods and libraries.
//!
//! A [`ModDependency`] describes one entry of the descriptor's dependency
//! list: which mod, which version range, how strongly it is required
//! ([`DependencyKind`]), load ordering, side applicability and optional
//! cross-references to the two distribution platforms.
//!
//! Dependencies are collected in a [`DependencyContainer`] in declaration
//! order. They can be declared programmatically through the builder
//! constructors, or purely from the property store: the `dependencies`
//! property holds a comma-separated id list, and per-id properties override
//! the defaults:
//!
//! ```text
//! dependencies = jei, jade
//! dependency_jei_type = optional
//! dependency_jei_version_range = [19,)
//! dependency_jade_side = client
//! ```
//!
//! Version and version range are looked up lazily from
//! `dependency_<id>_version` / `dependency_<id>_version_range` when the
//! container is resolved, so a missing range only fails a pass that
//! actually generates a descriptor.

use crate::core::{ModmetaError, Result};
use crate::properties::PropertyStore;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;

/// Requirement strength of a dependency entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// The game refuses to load without the dependency.
    Required,
    /// Loaded when present, ignored otherwise.
    Optional,
    /// The game refuses to load when the dependency is present.
    Incompatible,
    /// Loading proceeds but the combination is warned about.
    Discouraged,
}

impl DependencyKind {
    const EXPECTED: &'static str = "required, optional, incompatible, discouraged";

    /// Lower-case serialized form, as embedded in the descriptor.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Incompatible => "incompatible",
            Self::Discouraged => "discouraged",
        }
    }

    fn parse(value: &str, field: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "required" => Ok(Self::Required),
            "optional" => Ok(Self::Optional),
            "incompatible" => Ok(Self::Incompatible),
            "discouraged" => Ok(Self::Discouraged),
            _ => Err(ModmetaError::InvalidEnumValue {
                field: field.to_string(),
                value: value.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl FromStr for DependencyKind {
    type Err = ModmetaError;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value, "dependency type")
    }
}

/// Load-ordering hint relative to the depending mod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Ordering {
    /// The dependency loads before the depending mod.
    Before,
    /// The dependency loads after the depending mod.
    After,
    /// No ordering constraint.
    #[default]
    None,
}

impl Ordering {
    const EXPECTED: &'static str = "before, after, none";

    /// Upper-case serialized form, as embedded in the descriptor.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::None => "NONE",
        }
    }

    fn parse(value: &str, field: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            "none" => Ok(Self::None),
            _ => Err(ModmetaError::InvalidEnumValue {
                field: field.to_string(),
                value: value.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl FromStr for Ordering {
    type Err = ModmetaError;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value, "dependency ordering")
    }
}

/// Physical side a dependency entry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Only relevant on the client.
    Client,
    /// Only relevant on the dedicated server.
    Server,
    /// Relevant on both sides.
    #[default]
    Both,
}

impl Side {
    const EXPECTED: &'static str = "client, server, both";

    /// Upper-case serialized form, as embedded in the descriptor.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "CLIENT",
            Self::Server => "SERVER",
            Self::Both => "BOTH",
        }
    }

    fn parse(value: &str, field: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "server" => Ok(Self::Server),
            "both" => Ok(Self::Both),
            _ => Err(ModmetaError::InvalidEnumValue {
                field: field.to_string(),
                value: value.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl FromStr for Side {
    type Err = ModmetaError;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value, "dependency side")
    }
}

/// One declared relationship to another mod or library.
///
/// Constructed with defaults (`ordering` [`Ordering::None`], `side`
/// [`Side::Both`]) and refined through the `with_*` builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModDependency {
    /// Mod id of the dependency.
    pub mod_id: String,
    /// Plain version, used for tooling output; not part of the descriptor.
    pub version: Option<String>,
    /// Maven-style version range embedded into the descriptor.
    pub version_range: Option<String>,
    /// Requirement strength.
    pub kind: DependencyKind,
    /// Load-ordering hint.
    pub ordering: Ordering,
    /// Side applicability.
    pub side: Side,
    /// Modrinth project id, for publishing cross-references.
    pub modrinth_id: Option<String>,
    /// CurseForge project slug, for publishing cross-references.
    pub curseforge_id: Option<String>,
}

impl ModDependency {
    /// Create a dependency with the given requirement strength and defaults
    /// for everything else.
    #[must_use]
    pub fn new(mod_id: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            mod_id: mod_id.into(),
            version: None,
            version_range: None,
            kind,
            ordering: Ordering::None,
            side: Side::Both,
            modrinth_id: None,
            curseforge_id: None,
        }
    }

    /// A required dependency.
    #[must_use]
    pub fn required(mod_id: impl Into<String>) -> Self {
        Self::new(mod_id, DependencyKind::Required)
    }

    /// An optional dependency.
    #[must_use]
    pub fn optional(mod_id: impl Into<String>) -> Self {
        Self::new(mod_id, DependencyKind::Optional)
    }

    /// Set the plain version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the version range.
    #[must_use]
    pub fn with_version_range(mut self, range: impl Into<String>) -> Self {
        self.version_range = Some(range.into());
        self
    }

    /// Set the load-ordering hint.
    #[must_use]
    pub const fn with_ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Set the side applicability.
    #[must_use]
    pub const fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Set the Modrinth cross-reference id.
    #[must_use]
    pub fn with_modrinth_id(mut self, id: impl Into<String>) -> Self {
        self.modrinth_id = Some(id.into());
        self
    }

    /// Set the CurseForge cross-reference id.
    #[must_use]
    pub fn with_curseforge_id(mut self, id: impl Into<String>) -> Self {
        self.curseforge_id = Some(id.into());
        self
    }

    fn property(id: &str, suffix: &str) -> String {
        format!("dependency_{id}_{suffix}")
    }
}

impl fmt::Display for ModDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.mod_id, self.kind.as_str())
    }
}

/// Insertion-ordered collection of declared dependencies.
///
/// The container is configured up front and read once by the descriptor
/// generator; interior mutability keeps the declaration API usable from a
/// shared [`crate::settings::ProjectSettings`].
#[derive(Debug, Default)]
pub struct DependencyContainer {
    entries: RefCell<Vec<ModDependency>>,
}

impl DependencyContainer {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a dependency, preserving declaration order.
    pub fn add(&self, dependency: ModDependency) {
        self.entries.borrow_mut().push(dependency);
    }

    /// Declare a required dependency by id.
    pub fn required(&self, mod_id: impl Into<String>) {
        self.add(ModDependency::required(mod_id));
    }

    /// Declare an optional dependency by id.
    pub fn optional(&self, mod_id: impl Into<String>) {
        self.add(ModDependency::optional(mod_id));
    }

    /// Declare the JEI item and recipe viewer as optional.
    pub fn jei(&self) {
        self.optional("jei");
    }

    /// Declare the Jade tooltip overlay as optional.
    pub fn jade(&self) {
        self.optional("jade");
    }

    /// Declare The One Probe as optional, cross-referenced under its
    /// `the-one-probe` listing on both platforms.
    pub fn theoneprobe(&self) {
        self.add(
            ModDependency::optional("theoneprobe")
                .with_modrinth_id("the-one-probe")
                .with_curseforge_id("the-one-probe"),
        );
    }

    /// Declare the Curios inventory API as optional on both sides.
    pub fn curios(&self) {
        self.add(ModDependency::optional("curios").with_side(Side::Both));
    }

    /// Declare the Configured config-screen mod as optional.
    pub fn configured(&self) {
        self.optional("configured");
    }

    /// Declare the Catalogue mod-list mod as optional.
    pub fn catalogue(&self) {
        self.optional("catalogue");
    }

    /// Number of declared dependencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether no dependencies are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Declare every dependency listed in the store's `dependencies`
    /// property, applying the per-id override properties.
    ///
    /// Enum-valued overrides fail immediately when parsed; version lookups
    /// are deferred to [`resolve`].
    ///
    /// [`resolve`]: DependencyContainer::resolve
    pub fn declare_from(&self, store: &PropertyStore) -> Result<()> {
        let Some(list) = store.resolve("dependencies") else {
            return Ok(());
        };
        for id in list.split(',').map(str::trim) {
            if id.is_empty() {
                return Err(ModmetaError::EmptyDependencyId);
            }
            let mut dependency = ModDependency::new(id, DependencyKind::Required);
            if let Some(value) = store.resolve(&ModDependency::property(id, "type")) {
                dependency.kind = DependencyKind::parse(value, &ModDependency::property(id, "type"))?;
            }
            if let Some(value) = store.resolve(&ModDependency::property(id, "ordering")) {
                dependency.ordering =
                    Ordering::parse(value, &ModDependency::property(id, "ordering"))?;
            }
            if let Some(value) = store.resolve(&ModDependency::property(id, "side")) {
                dependency.side = Side::parse(value, &ModDependency::property(id, "side"))?;
            }
            if let Some(value) = store.resolve(&ModDependency::property(id, "modrinth")) {
                dependency.modrinth_id = Some(value.to_string());
            }
            if let Some(value) = store.resolve(&ModDependency::property(id, "curseforge")) {
                dependency.curseforge_id = Some(value.to_string());
            }
            self.add(dependency);
        }
        Ok(())
    }

    /// Resolve the declared dependencies against the property store.
    ///
    /// Fills unset versions from `dependency_<id>_version` and unset ranges
    /// from `dependency_<id>_version_range`. A dependency still lacking a
    /// version range fails with a missing-configuration error naming that
    /// property.
    pub fn resolve(&self, store: &PropertyStore) -> Result<Vec<ModDependency>> {
        let mut resolved = Vec::with_capacity(self.len());
        for entry in self.entries.borrow().iter() {
            let mut dependency = entry.clone();
            if dependency.mod_id.is_empty() {
                return Err(ModmetaError::EmptyDependencyId);
            }
            if dependency.version.is_none() {
                dependency.version = store
                    .resolve(&ModDependency::property(&dependency.mod_id, "version"))
                    .map(str::to_string);
            }
            if dependency.version_range.is_none() {
                dependency.version_range = store
                    .resolve(&ModDependency::property(&dependency.mod_id, "version_range"))
                    .map(str::to_string);
            }
            if dependency.version_range.is_none() {
                return Err(ModmetaError::MissingConfiguration {
                    setting: ModDependency::property(&dependency.mod_id, "version_range"),
                });
            }
            resolved.push(dependency);
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(pairs: &[(&str, &str)]) -> PropertyStore {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_builder_defaults() {
        let dependency = ModDependency::required("neoforge");
        assert_eq!(dependency.kind, DependencyKind::Required);
        assert_eq!(dependency.ordering, Ordering::None);
        assert_eq!(dependency.side, Side::Both);
        assert!(dependency.version_range.is_none());
    }

    #[test]
    fn test_declare_from_store_with_overrides() {
        let container = DependencyContainer::new();
        container
            .declare_from(&store(&[
                ("dependencies", "jei, jade"),
                ("dependency_jei_type", "optional"),
                ("dependency_jei_ordering", "after"),
                ("dependency_jade_side", "client"),
            ]))
            .unwrap();
        assert_eq!(container.len(), 2);
        let resolved = container
            .resolve(&store(&[
                ("dependency_jei_version_range", "[19,)"),
                ("dependency_jade_version_range", "[15,)"),
            ]))
            .unwrap();
        assert_eq!(resolved[0].mod_id, "jei");
        assert_eq!(resolved[0].kind, DependencyKind::Optional);
        assert_eq!(resolved[0].ordering, Ordering::After);
        assert_eq!(resolved[0].version_range.as_deref(), Some("[19,)"));
        assert_eq!(resolved[1].side, Side::Client);
        // Undeclared strength defaults to required.
        assert_eq!(resolved[1].kind, DependencyKind::Required);
    }

    #[test]
    fn test_declare_from_rejects_bad_enum() {
        let container = DependencyContainer::new();
        let err = container
            .declare_from(&store(&[
                ("dependencies", "jei"),
                ("dependency_jei_type", "mandatory"),
            ]))
            .unwrap_err();
        assert!(err.to_string().contains("dependency_jei_type"));
    }

    #[test]
    fn test_resolve_requires_version_range() {
        let container = DependencyContainer::new();
        container.jei();
        let err = container.resolve(&store(&[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required configuration: 'dependency_jei_version_range'"
        );
    }

    #[test]
    fn test_explicit_range_wins_over_store() {
        let container = DependencyContainer::new();
        container.add(ModDependency::optional("jade").with_version_range("[42,)"));
        let resolved = container
            .resolve(&store(&[("dependency_jade_version_range", "[1,)")]))
            .unwrap();
        assert_eq!(resolved[0].version_range.as_deref(), Some("[42,)"));
    }

    #[test]
    fn test_theoneprobe_cross_references() {
        let container = DependencyContainer::new();
        container.theoneprobe();
        let resolved = container
            .resolve(&store(&[("dependency_theoneprobe_version_range", "[1,)")]))
            .unwrap();
        assert_eq!(resolved[0].modrinth_id.as_deref(), Some("the-one-probe"));
        assert_eq!(resolved[0].curseforge_id.as_deref(), Some("the-one-probe"));
    }

    #[test]
    fn test_empty_id_in_list_is_rejected() {
        let container = DependencyContainer::new();
        let err = container
            .declare_from(&store(&[("dependencies", "jei,,jade")]))
            .unwrap_err();
        assert!(matches!(err, ModmetaError::EmptyDependencyId));
    }
}
