//! Shared helpers for unit tests.
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::fs;
use std::path::{
    Path,
    PathBuf,
};
use std::rc::Rc;

use serde_json::Value;

use crate::line::{
    Lines,
    lines_from_json,
};
use crate::loader::{
    ArrayLoader,
    LoadError,
    Loader,
};

/// Writes `value` as JSON to `path`, creating parent directories.
pub(crate) fn write_json(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Builds a table from a JSON object literal.
pub(crate) fn lines(value: Value) -> Lines {
    lines_from_json(value).unwrap()
}

/// A (locale, group, namespace) request seen by a [`CountingLoader`].
pub(crate) type LoadCall = (String, String, Option<String>);

/// An [`ArrayLoader`] that records every `load` call.
#[derive(Debug, Default)]
pub(crate) struct CountingLoader {
    pub(crate) inner: ArrayLoader,
    calls: Rc<RefCell<Vec<LoadCall>>>,
}

impl CountingLoader {
    pub(crate) fn new(inner: ArrayLoader) -> Self {
        Self { inner, calls: Rc::default() }
    }

    /// Handle to the recorded calls that stays valid after the loader is moved.
    pub(crate) fn calls(&self) -> Rc<RefCell<Vec<LoadCall>>> {
        Rc::clone(&self.calls)
    }
}

impl Loader for CountingLoader {
    fn load(
        &self,
        locale: &str,
        group: &str,
        namespace: Option<&str>,
    ) -> Result<Lines, LoadError> {
        self.calls.borrow_mut().push((
            locale.to_string(),
            group.to_string(),
            namespace.map(str::to_string),
        ));
        self.inner.load(locale, group, namespace)
    }

    fn add_namespace(&mut self, namespace: &str, hint: PathBuf) {
        self.inner.add_namespace(namespace, hint);
    }

    fn add_json_path(&mut self, path: PathBuf) {
        self.inner.add_json_path(path);
    }

    fn namespaces(&self) -> &std::collections::HashMap<String, PathBuf> {
        self.inner.namespaces()
    }

    fn json_paths(&self) -> &[PathBuf] {
        self.inner.json_paths()
    }
}
