//! The lazily derived project configuration model.
//!
//! [`ProjectSettings`] assembles every setting of a build pass into one
//! memoized derivation graph: identity (group, id, version, name, vendor),
//! release and full version strings, the GitHub-derived URL family, license,
//! Java toolchain, Maven publishing target, loader coordinates, publishing
//! cross-references, declared mod dependencies and free-form mod properties.
//!
//! Construction wires the graph from a [`crate::properties::PropertyStore`]
//! and an [`crate::properties::Environment`] snapshot; nothing is resolved
//! until first access, and everything resolves at most once. See
//! [`graph::Setting`] for the resolution semantics and [`keys`] for the
//! property-name table.

pub mod graph;
pub mod keys;
mod project;


pub use graph::{Setting, SettingRegistry};
pub use keys::{JavaVendor, LogicalField, ProjectType, property_key};
pub use project::{
    GitHubSettings, JavaSettings, LicenseSettings, LoaderSettings, MavenSettings,
    McPublishSettings, ProjectSettings,
};
