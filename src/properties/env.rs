//! Immutable snapshot of the process environment.

use std::collections::BTreeMap;

/// Environment variables captured once at construction.
///
/// Settings derive from this snapshot instead of calling
/// [`std::env::var`] directly, which keeps derivations pure and lets tests
/// build an environment without touching global process state.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Snapshot the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// An environment with no variables set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a variable, consuming and returning the environment.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Look up a variable by name.
    #[must_use]
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Read a variable as a boolean flag.
    ///
    /// Mirrors the lenient parsing CI providers rely on: any
    /// case-insensitive `"true"` is true, everything else (including
    /// absence) is false.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.var(name).is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_lookup() {
        let env = Environment::empty().with_var("RELEASE_TYPE", "Beta");
        assert_eq!(env.var("RELEASE_TYPE"), Some("Beta"));
        assert_eq!(env.var("CI"), None);
    }

    #[test]
    fn test_flag_parsing() {
        let env = Environment::empty()
            .with_var("CI", "TRUE")
            .with_var("OTHER", "1");
        assert!(env.flag("CI"));
        assert!(!env.flag("OTHER"));
        assert!(!env.flag("UNSET"));
    }
}
