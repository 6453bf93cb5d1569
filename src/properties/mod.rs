//! External configuration inputs: property store and environment snapshot.
//!
//! A build invocation reads two kinds of external input:
//!
//! - a key/value **property store**, loaded from a `gradle.properties`-style
//!   file plus `-P key=value` command line overrides ([`PropertyStore`])
//! - the process **environment**, captured once as an immutable snapshot
//!   ([`Environment`])
//!
//! Both are read-only for the duration of the pass. Lookups are pure: a
//! missing key returns absence, not an error - it is the derivation graph in
//! [`crate::settings`] that decides whether absence is acceptable. Settings
//! memoize their resolved values, so mutation of a store after the first read
//! is never observed; [`PropertyStore::set`] exists for configuring the pass
//! up front, not for steering it midway.
//!
//! # Property file format
//!
//! The accepted subset of the Java properties format:
//!
//! ```text
//! # comment
//! ! also a comment
//! mod_id = examplemod
//! mod_name: Example Mod
//! ```
//!
//! Keys and values are trimmed; the first `=` or `:` separates them. Escape
//! sequences and line continuations are not processed.

mod env;

pub use env::Environment;

use crate::core::{ModmetaError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Read-only string-to-string property store.
///
/// Later insertions win, which gives `-P` overrides precedence over file
/// contents when they are applied after [`load`].
///
/// [`load`]: PropertyStore::load
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    values: BTreeMap<String, String>,
}

impl PropertyStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a property file from disk.
    ///
    /// A missing file is an IO error for the caller to classify, since an
    /// absent `gradle.properties` may or may not be acceptable depending on
    /// the command.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse property file content.
    ///
    /// `file` is only used to label parse errors.
    pub fn parse(content: &str, file: &str) -> Result<Self> {
        let mut store = Self::new();
        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let separator = line
                .find(['=', ':'])
                .ok_or_else(|| ModmetaError::PropertiesParseError {
                    file: file.to_string(),
                    line: index + 1,
                    reason: "expected 'key=value' or 'key: value'".to_string(),
                })?;
            let key = line[..separator].trim();
            let value = line[separator + 1..].trim();
            if key.is_empty() {
                return Err(ModmetaError::PropertiesParseError {
                    file: file.to_string(),
                    line: index + 1,
                    reason: "empty property key".to_string(),
                });
            }
            store.values.insert(key.to_string(), value.to_string());
        }
        Ok(store)
    }

    /// Set a property, replacing any previous value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a property by name.
    ///
    /// Absence is not an error; callers supply their own defaults through
    /// the derivation graph.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Iterate over properties whose key starts with `prefix`, yielding the
    /// key with the prefix stripped.
    pub fn with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.values.iter().filter_map(move |(key, value)| {
            key.strip_prefix(prefix).map(|rest| (rest, value.as_str()))
        })
    }

    /// Number of properties in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store holds no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (key, value) in iter {
            store.set(key, value);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_properties() {
        let store = PropertyStore::parse("mod_id=examplemod\nmod_name = Example Mod\n", "test")
            .unwrap();
        assert_eq!(store.resolve("mod_id"), Some("examplemod"));
        assert_eq!(store.resolve("mod_name"), Some("Example Mod"));
        assert_eq!(store.resolve("missing"), None);
    }

    #[test]
    fn test_parse_colon_separator_and_comments() {
        let content = "# a comment\n! another\n\nmc_version: 1.21\n";
        let store = PropertyStore::parse(content, "test").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.resolve("mc_version"), Some("1.21"));
    }

    #[test]
    fn test_parse_rejects_line_without_separator() {
        let err = PropertyStore::parse("mod_id=x\nnot a property\n", "gradle.properties")
            .unwrap_err();
        assert!(
            err.to_string().contains("line 2"),
            "error should name the line: {err}"
        );
    }

    #[test]
    fn test_parse_rejects_empty_key() {
        assert!(PropertyStore::parse("=value\n", "test").is_err());
    }

    #[test]
    fn test_later_set_wins() {
        let mut store = PropertyStore::parse("mod_id=from_file\n", "test").unwrap();
        store.set("mod_id", "from_cli");
        assert_eq!(store.resolve("mod_id"), Some("from_cli"));
    }

    #[test]
    fn test_with_prefix_strips_prefix() {
        let store: PropertyStore = [
            ("modproperty_catalogImageIcon", "icon.png"),
            ("modproperty_theme", "dark"),
            ("mod_id", "examplemod"),
        ]
        .into_iter()
        .collect();
        let pairs: Vec<_> = store.with_prefix("modproperty_").collect();
        assert_eq!(
            pairs,
            vec![("catalogImageIcon", "icon.png"), ("theme", "dark")]
        );
    }
}
