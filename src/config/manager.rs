//! Holds the active settings and builds translators from them.

use std::path::PathBuf;

use super::{
    ConfigError,
    TranslatorSettings,
    loader,
};
use crate::error::TranslatorError;
use crate::translator::Translator;

#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    current_settings: TranslatorSettings,

    /// Root the relative settings paths were resolved against
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: TranslatorSettings::default(), workspace_root: None }
    }

    /// Loads `.translator.json` from `workspace_root`, falling back to defaults when absent.
    ///
    /// Relative paths in the loaded settings are resolved against the root.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation errors
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!(root = ?workspace_root, "Loading settings");

        let settings = if let Some(root) = &workspace_root {
            loader::load_from_workspace(root)?
                .map_or_else(TranslatorSettings::default, |ws| {
                    tracing::debug!(settings = ?ws, "Loaded workspace settings");
                    ws
                })
                .resolve_paths(root)
        } else {
            TranslatorSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.workspace_root = workspace_root;
        tracing::debug!(settings = ?self.current_settings, "Settings loaded");

        Ok(())
    }

    /// Replaces the current settings after validating them. Paths are used as given.
    ///
    /// # Errors
    /// - Validation errors
    pub fn update_settings(&mut self, new_settings: TranslatorSettings) -> Result<(), ConfigError> {
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated");

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &TranslatorSettings {
        &self.current_settings
    }

    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }

    /// Creates a file-backed [`Translator`] from the current settings.
    ///
    /// # Errors
    /// Returns [`TranslatorError::InvalidLocale`] for a locale with path separators.
    pub fn build_translator(&self) -> Result<Translator, TranslatorError> {
        Translator::from_settings(&self.current_settings)
    }
}
