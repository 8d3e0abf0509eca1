//! Cache of loaded translation groups.

use std::collections::HashMap;

use crate::line::Lines;

/// Lines already loaded, keyed namespace → group → locale.
///
/// Entries are never evicted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedTable {
    entries: HashMap<String, HashMap<String, HashMap<String, Lines>>>,
}

impl LoadedTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, namespace: &str, group: &str, locale: &str) -> Option<&Lines> {
        self.entries.get(namespace)?.get(group)?.get(locale)
    }

    #[must_use]
    pub fn contains(&self, namespace: &str, group: &str, locale: &str) -> bool {
        self.get(namespace, group, locale).is_some()
    }

    /// Stores the lines of a triple, replacing what was there.
    pub fn insert(&mut self, namespace: &str, group: &str, locale: &str, lines: Lines) {
        *self.entry(namespace, group, locale) = lines;
    }

    /// Returns the lines of a triple, creating an empty table if absent.
    pub fn entry(&mut self, namespace: &str, group: &str, locale: &str) -> &mut Lines {
        self.entries
            .entry(namespace.to_string())
            .or_default()
            .entry(group.to_string())
            .or_default()
            .entry(locale.to_string())
            .or_default()
    }

    /// Number of cached triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().flat_map(HashMap::values).map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
