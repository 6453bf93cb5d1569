//! Memoizing derived-setting graph.
//!
//! A [`Setting`] is a named configuration value with resolve-once semantics:
//! an optional override, a derivation closure producing the default, and a
//! cache filled on first access. Derivations reference upstream settings by
//! capturing them, which makes the settings form a directed acyclic graph.
//!
//! The [`SettingRegistry`] records every setting together with its declared
//! upstream edges. Cycles in that graph are a programming error: they are
//! detected with a depth-first search when the model is constructed and
//! reported as [`ModmetaError::SettingCycle`] naming the cycle path, never
//! resolved silently.
//!
//! Resolution is single-threaded and single-pass. Once a setting has been
//! read, later overrides are not observed - the value a build pass sees is
//! frozen at first access. Configure everything before resolving anything.

use crate::core::{ModmetaError, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

type Derivation<T> = Box<dyn Fn() -> Result<Option<T>>>;

enum Source<T> {
    Value(T),
    Derived(Derivation<T>),
}

struct SettingInner<T> {
    name: String,
    cache: OnceCell<Option<T>>,
    source: RefCell<Source<T>>,
}

/// A named, lazily resolved, memoized configuration value.
///
/// Cloning a `Setting` clones a handle to the same node; derivations capture
/// clones of their upstream settings.
pub struct Setting<T> {
    inner: Rc<SettingInner<T>>,
}

impl<T> Clone for Setting<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Setting<T> {
    /// The setting's name, as used in error messages and cycle reports.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Register an override, replacing the derivation as value source.
    ///
    /// Overrides registered after the first read are not observed; the
    /// resolved value is frozen for the rest of the pass.
    pub fn set(&self, value: T) {
        if self.inner.cache.get().is_some() {
            tracing::debug!(
                setting = %self.inner.name,
                "override ignored, setting already resolved"
            );
            return;
        }
        *self.inner.source.borrow_mut() = Source::Value(value);
    }

    /// Resolve the setting, memoizing the outcome.
    ///
    /// `Ok(None)` means the setting is absent: no override and the
    /// derivation produced nothing. Absence propagates - dependents that
    /// need the value become absent themselves rather than substituting an
    /// empty value.
    pub fn get(&self) -> Result<Option<T>> {
        if let Some(cached) = self.inner.cache.get() {
            return Ok(cached.clone());
        }
        let resolved = match &*self.inner.source.borrow() {
            Source::Value(value) => Some(value.clone()),
            Source::Derived(derive) => derive()?,
        };
        // Errors are not cached: derivations are pure, so a failure repeats
        // identically on the next attempt.
        let _ = self.inner.cache.set(resolved.clone());
        Ok(resolved)
    }

    /// Resolve the setting, failing if it is absent.
    pub fn require(&self) -> Result<T> {
        self.get()?.ok_or_else(|| ModmetaError::MissingConfiguration {
            setting: self.inner.name.clone(),
        })
    }

    /// Whether the setting has been resolved already.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.inner.cache.get().is_some()
    }
}

/// Registry tracking settings and their declared upstream edges.
///
/// Every setting is created through the registry so the derivation graph can
/// be checked for cycles once the model is fully constructed. Upstreams are
/// declared by name; a name that has not been registered yet is recorded as
/// a placeholder node, which lets a later registration close a cycle and be
/// caught by [`ensure_acyclic`].
///
/// [`ensure_acyclic`]: SettingRegistry::ensure_acyclic
#[derive(Default)]
pub struct SettingRegistry {
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
}

impl SettingRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.nodes.get(name) {
            index
        } else {
            let index = self.graph.add_node(name.to_string());
            self.nodes.insert(name.to_string(), index);
            index
        }
    }

    /// Create a setting holding a fixed value.
    pub fn value<T: Clone>(&mut self, name: &str, value: T) -> Setting<T> {
        self.node(name);
        Setting {
            inner: Rc::new(SettingInner {
                name: name.to_string(),
                cache: OnceCell::new(),
                source: RefCell::new(Source::Value(value)),
            }),
        }
    }

    /// Create a derived setting.
    ///
    /// `upstream` names the settings the derivation reads; the edges feed
    /// the cycle check. The closure returns `Ok(None)` when an input it
    /// needs is absent.
    pub fn derived<T: Clone>(
        &mut self,
        name: &str,
        upstream: &[&str],
        derive: impl Fn() -> Result<Option<T>> + 'static,
    ) -> Setting<T> {
        let from = self.node(name);
        for dependency in upstream {
            let to = self.node(dependency);
            if !self.graph.contains_edge(from, to) {
                self.graph.add_edge(from, to, ());
            }
        }
        Setting {
            inner: Rc::new(SettingInner {
                name: name.to_string(),
                cache: OnceCell::new(),
                source: RefCell::new(Source::Derived(Box::new(derive))),
            }),
        }
    }

    /// Reject derivation cycles.
    ///
    /// Runs a depth-first search over the declared edges and returns
    /// [`ModmetaError::SettingCycle`] naming the cycle path when one exists.
    pub fn ensure_acyclic(&self) -> Result<()> {
        let mut colors: HashMap<NodeIndex, Color> = self
            .graph
            .node_indices()
            .map(|index| (index, Color::White))
            .collect();
        let mut path: Vec<NodeIndex> = Vec::new();

        for node in self.graph.node_indices() {
            if colors[&node] == Color::White
                && let Some(cycle) = self.dfs_visit(node, &mut colors, &mut path)
            {
                let cycle_str = cycle
                    .iter()
                    .map(|index| self.graph[*index].as_str())
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(ModmetaError::SettingCycle { cycle: cycle_str });
            }
        }

        Ok(())
    }

    fn dfs_visit(
        &self,
        node: NodeIndex,
        colors: &mut HashMap<NodeIndex, Color>,
        path: &mut Vec<NodeIndex>,
    ) -> Option<Vec<NodeIndex>> {
        colors.insert(node, Color::Gray);
        path.push(node);

        for neighbor in self.graph.neighbors(node) {
            match colors.get(&neighbor) {
                Some(Color::Gray) => {
                    // Close the loop in the reported path.
                    let start = path.iter().position(|n| *n == neighbor).unwrap_or(0);
                    let mut cycle = path[start..].to_vec();
                    cycle.push(neighbor);
                    return Some(cycle);
                }
                Some(Color::White) => {
                    if let Some(cycle) = self.dfs_visit(neighbor, colors, path) {
                        return Some(cycle);
                    }
                }
                _ => {}
            }
        }

        path.pop();
        colors.insert(node, Color::Black);
        None
    }

    /// Number of registered settings (including placeholder upstreams).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}
