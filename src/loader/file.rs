//! Loader reading JSON translation files from disk.
//!
//! Layout under the base path:
//!
//! ```text
//! {path}/{locale}/{group}.json                       application groups
//! {hint}/{locale}/{group}.json                       namespace groups
//! {path}/vendor/{namespace}/{locale}/{group}.json    application overrides of a namespace
//! {path}/{locale}.json, {json_path}/{locale}.json    flat JSON catalogs
//! ```

use std::collections::HashMap;
use std::path::{
    Component,
    Path,
    PathBuf,
};

use super::{
    Filesystem,
    LoadError,
    LocalFilesystem,
    Loader,
};
use crate::key::WILDCARD;
use crate::line::{
    Lines,
    replace_recursive,
};

/// Extension of group files and JSON catalogs.
const FILE_EXTENSION: &str = "json";

/// Directory under the base path holding namespace overrides.
const VENDOR_DIR: &str = "vendor";

/// Returns true if `segment` names exactly one plain path component.
///
/// Rejects empty, absolute and `..` segments as well as anything containing a
/// separator, so joined resource paths stay under their base directory.
fn is_plain_segment(segment: &str) -> bool {
    if segment.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(segment).components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}

/// Loads translations from the file layout described in the module docs.
#[derive(Debug)]
pub struct FileLoader {
    files: Box<dyn Filesystem>,
    /// Base path of the application's translations.
    path: PathBuf,
    hints: HashMap<String, PathBuf>,
    json_paths: Vec<PathBuf>,
}

impl FileLoader {
    /// Creates a loader reading from the local disk.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_filesystem(LocalFilesystem, path)
    }

    #[must_use]
    pub fn with_filesystem(files: impl Filesystem + 'static, path: impl Into<PathBuf>) -> Self {
        Self {
            files: Box::new(files),
            path: path.into(),
            hints: HashMap::new(),
            json_paths: Vec::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads `{base}/{locale}/{group}.json`, or nothing if it does not exist.
    fn load_path(&self, base: &Path, locale: &str, group: &str) -> Result<Lines, LoadError> {
        let full = base.join(locale).join(format!("{group}.{FILE_EXTENSION}"));
        if !self.files.exists(&full) {
            tracing::trace!(path = %full.display(), "Translation group not found");
            return Ok(Lines::new());
        }

        tracing::debug!(path = %full.display(), "Loading translation group");
        self.files.read_data(&full)
    }

    fn load_namespaced(
        &self,
        locale: &str,
        group: &str,
        namespace: &str,
    ) -> Result<Lines, LoadError> {
        let Some(hint) = self.hints.get(namespace) else {
            tracing::trace!(namespace, "Namespace is not registered");
            return Ok(Lines::new());
        };

        let lines = self.load_path(hint, locale, group)?;
        self.load_namespace_overrides(lines, locale, group, namespace)
    }

    /// Merges the application's vendor override over a namespace's lines.
    fn load_namespace_overrides(
        &self,
        lines: Lines,
        locale: &str,
        group: &str,
        namespace: &str,
    ) -> Result<Lines, LoadError> {
        let file = self
            .path
            .join(VENDOR_DIR)
            .join(namespace)
            .join(locale)
            .join(format!("{group}.{FILE_EXTENSION}"));
        if !self.files.exists(&file) {
            return Ok(lines);
        }

        tracing::debug!(path = %file.display(), namespace, "Applying vendor override");
        let overrides = self.files.read_data(&file)?;
        Ok(replace_recursive(lines, overrides))
    }

    /// Merges every `{locale}.json` catalog, later directories winning per key.
    ///
    /// The base path is searched after all registered JSON paths.
    fn load_json_paths(&self, locale: &str) -> Result<Lines, LoadError> {
        let mut output = Lines::new();
        for dir in self.json_paths.iter().chain(std::iter::once(&self.path)) {
            let full = dir.join(format!("{locale}.{FILE_EXTENSION}"));
            if !self.files.exists(&full) {
                continue;
            }

            tracing::debug!(path = %full.display(), "Loading JSON catalog");
            output.extend(self.files.read_data(&full)?);
        }
        Ok(output)
    }
}

impl Loader for FileLoader {
    fn load(
        &self,
        locale: &str,
        group: &str,
        namespace: Option<&str>,
    ) -> Result<Lines, LoadError> {
        let namespace_is_plain =
            namespace.is_none_or(|namespace| namespace == WILDCARD || is_plain_segment(namespace));
        let group_is_plain = group == WILDCARD || is_plain_segment(group);
        if !(is_plain_segment(locale) && group_is_plain && namespace_is_plain) {
            tracing::trace!(locale, group, ?namespace, "Resource path escapes its base directory");
            return Ok(Lines::new());
        }

        match namespace {
            Some(WILDCARD) if group == WILDCARD => self.load_json_paths(locale),
            None | Some(WILDCARD) => self.load_path(&self.path, locale, group),
            Some(namespace) => self.load_namespaced(locale, group, namespace),
        }
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
