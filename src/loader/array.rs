//! In-memory loader.

use std::collections::HashMap;
use std::path::PathBuf;

use super::{
    LoadError,
    Loader,
};
use crate::key::WILDCARD;
use crate::line::Lines;

/// Serves lines registered at runtime.
///
/// Namespace hints and JSON paths are recorded but have no effect on lookups.
#[derive(Debug, Clone, Default)]
pub struct ArrayLoader {
    /// namespace → locale → group → lines
    messages: HashMap<String, HashMap<String, HashMap<String, Lines>>>,
    hints: HashMap<String, PathBuf>,
    json_paths: Vec<PathBuf>,
}

impl ArrayLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the lines of a group, replacing any previous lines.
    pub fn add_messages(
        &mut self,
        locale: &str,
        group: &str,
        lines: Lines,
        namespace: Option<&str>,
    ) -> &mut Self {
        self.messages
            .entry(namespace.unwrap_or(WILDCARD).to_string())
            .or_default()
            .entry(locale.to_string())
            .or_default()
            .insert(group.to_string(), lines);
        self
    }
}

impl Loader for ArrayLoader {
    fn load(
        &self,
        locale: &str,
        group: &str,
        namespace: Option<&str>,
    ) -> Result<Lines, LoadError> {
        Ok(self
            .messages
            .get(namespace.unwrap_or(WILDCARD))
            .and_then(|locales| locales.get(locale))
            .and_then(|groups| groups.get(group))
            .cloned()
            .unwrap_or_default())
    }

    fn add_namespace(&mut self, namespace: &str, hint: PathBuf) {
        self.hints.insert(namespace.to_string(), hint);
    }

    fn add_json_path(&mut self, path: PathBuf) {
        self.json_paths.push(path);
    }

    fn namespaces(&self) -> &HashMap<String, PathBuf> {
        &self.hints
    }

    fn json_paths(&self) -> &[PathBuf] {
        &self.json_paths
    }
}
