//! Ordered, deduplicated name registry with O(1) lookup
//!
//! Columns and rows are both named through a [`NameRegistry`]. Names are
//! append-only: once registered a name is never removed or reordered.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

/// Ordered set of names mapped to positions
///
/// For columns a name's position is its index in [`names`](Self::names).
/// Rows may be named out of order when only some of them carry names, so
/// [`bind`](Self::bind) lets the caller choose the position explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameRegistry {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl NameRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry binding `names[i]` to position `i`
    ///
    /// Returns the first repeated name if `names` is not a true set.
    pub fn from_names<I, S>(names: I) -> core::result::Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for name in names {
            let name = name.into();
            if registry.index.contains_key(&name) {
                return Err(name);
            }
            registry.index.insert(name.clone(), registry.names.len());
            registry.names.push(name);
        }
        Ok(registry)
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check whether no name is registered
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Registered names in registration order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Look up the position bound to `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Check whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Name at `idx` in registration order
    pub fn name(&self, idx: usize) -> Option<&str> {
        self.names.get(idx).map(String::as_str)
    }

    /// Register `name` at the next position
    ///
    /// Returns `true` if the name was new.
    pub fn register(&mut self, name: &str) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.index.insert(String::from(name), self.names.len());
        self.names.push(String::from(name));
        true
    }

    /// Register every name not yet present, in iteration order
    ///
    /// Returns how many names were added.
    pub fn register_all<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter(|name| self.register(name.as_ref()))
            .count()
    }

    /// Bind `name` to an explicit `position`
    ///
    /// An already registered name keeps its position, which is returned.
    pub fn bind(&mut self, name: &str, position: usize) -> Option<usize> {
        if let Some(&existing) = self.index.get(name) {
            return Some(existing);
        }
        self.index.insert(String::from(name), position);
        self.names.push(String::from(name));
        None
    }
}
