use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading translation resources.
///
/// A resource that does not exist is never an error; it contributes no lines.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The resource exists but is not valid JSON
    #[error("Translation file [{}] contains an invalid JSON structure: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The resource is valid JSON but not an object or array
    #[error("Translation file [{}] must contain a JSON object", path.display())]
    NotAnObject { path: PathBuf },
    /// The resource exists but could not be read
    #[error("Failed to read translation file [{}]: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Path of the resource that failed.
    #[must_use]
    pub const fn path(&self) -> &PathBuf {
        match self {
            Self::InvalidJson { path, .. } | Self::NotAnObject { path } | Self::Io { path, .. } => {
                path
            }
        }
    }
}
