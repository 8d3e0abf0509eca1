//! Translator configuration: settings, validation and the project config file.
mod loader;
mod manager;
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    TranslatorSettings,
    ValidationError,
};
