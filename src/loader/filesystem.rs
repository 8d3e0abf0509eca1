//! File access used by [`FileLoader`](super::FileLoader).

use std::fmt;
use std::path::Path;

use serde_json::Value;

use super::LoadError;
use crate::line::{
    Lines,
    lines_from_json,
};

/// Read access to translation resources.
pub trait Filesystem: fmt::Debug {
    fn exists(&self, path: &Path) -> bool;

    fn read_text(&self, path: &Path) -> std::io::Result<String>;

    /// Reads a structured resource into a table of lines.
    fn read_data(&self, path: &Path) -> Result<Lines, LoadError> {
        let content = self
            .read_text(path)
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        parse_lines(path, &content)
    }
}

/// Parses JSON text into a table, naming `path` in any error.
pub fn parse_lines(path: &Path, content: &str) -> Result<Lines, LoadError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|source| LoadError::InvalidJson { path: path.to_path_buf(), source })?;
    lines_from_json(value).ok_or_else(|| LoadError::NotAnObject { path: path.to_path_buf() })
}

/// The local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_text(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}
