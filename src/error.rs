use thiserror::Error;

use crate::loader::LoadError;

/// Errors raised by the [`Translator`](crate::Translator).
///
/// A missing translation is not an error: lookups return the key instead.
#[derive(Error, Debug)]
pub enum TranslatorError {
    /// Locale contains path separators
    #[error("Invalid characters present in locale '{0}'")]
    InvalidLocale(String),
    /// A translation resource could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),
}
