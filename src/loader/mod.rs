//! Translation sources.
//!
//! A [`Loader`] returns the lines of one (locale, group, namespace) triple. The
//! [`Translator`](crate::Translator) decides when to call it and caches the result.

mod array;
mod error;
mod file;
mod filesystem;

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

pub use array::ArrayLoader;
pub use error::LoadError;
pub use file::FileLoader;
pub use filesystem::{
    Filesystem,
    LocalFilesystem,
    parse_lines,
};

use crate::line::Lines;

/// A source of translation lines.
pub trait Loader: fmt::Debug {
    /// Loads the lines of `group` for `locale`.
    ///
    /// `namespace` is `None` or `"*"` for the application's own translations. A group
    /// and namespace of `"*"` together address the flat JSON catalogs.
    fn load(&self, locale: &str, group: &str, namespace: Option<&str>)
    -> Result<Lines, LoadError>;

    /// Registers the directory holding a namespace's translations.
    fn add_namespace(&mut self, namespace: &str, hint: PathBuf);

    /// Registers a directory holding `{locale}.json` catalogs.
    fn add_json_path(&mut self, path: PathBuf);

    /// Registered namespace directories.
    fn namespaces(&self) -> &HashMap<String, PathBuf>;

    /// Registered JSON catalog directories, in registration order.
    fn json_paths(&self) -> &[PathBuf];
}
