//! lang-translator
//!
//! Namespaced translation lookup: `namespace::group.item` keys, lazily loaded
//! per-locale JSON groups, locale fallback, `:placeholder` substitution and
//! pluralization.

pub mod config;
pub mod error;
pub mod key;
pub mod line;
pub mod loaded;
pub mod loader;
pub mod plural;
pub mod replace;
pub mod translator;

#[cfg(test)]
mod test_utils;

pub use config::{
    ConfigManager,
    TranslatorSettings,
};
pub use error::TranslatorError;
pub use key::TranslationKey;
pub use line::{
    Line,
    Lines,
};
pub use loaded::LoadedTable;
pub use loader::{
    ArrayLoader,
    FileLoader,
    LoadError,
    Loader,
};
pub use plural::Count;
pub use replace::Replacements;
pub use translator::Translator;
