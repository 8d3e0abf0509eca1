use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::key::{
    NAMESPACE_SEPARATOR,
    WILDCARD,
};
use crate::translator::is_valid_locale;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "namespaces.courier")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslatorSettings {
    /// Base directory of the application's translations.
    pub lang_path: PathBuf,

    pub locale: String,

    /// Locale consulted when the current locale lacks a key.
    /// `None` disables fallback.
    pub fallback_locale: Option<String>,

    /// Extra directories holding `{locale}.json` catalogs.
    /// Searched in order, before `lang_path`.
    pub json_paths: Vec<PathBuf>,

    /// Namespace name → directory holding its `{locale}/{group}.json` files.
    pub namespaces: BTreeMap<String, PathBuf>,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            lang_path: PathBuf::from("lang"),
            locale: "en".to_string(),
            fallback_locale: Some("en".to_string()),
            json_paths: Vec::new(),
            namespaces: BTreeMap::new(),
        }
    }
}

impl TranslatorSettings {
    /// # Errors
    /// - Required field is empty
    /// - Locale contains path separators
    /// - Invalid namespace name
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.lang_path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "langPath",
                "The path cannot be empty. Example: \"lang\"",
            ));
        }

        if self.locale.is_empty() {
            errors.push(ValidationError::new(
                "locale",
                "The locale cannot be empty. Example: \"en\"",
            ));
        } else if !is_valid_locale(&self.locale) {
            errors.push(ValidationError::new(
                "locale",
                format!("Invalid characters present in locale '{}'", self.locale),
            ));
        }

        if let Some(fallback) = &self.fallback_locale
            && !is_valid_locale(fallback)
        {
            errors.push(ValidationError::new(
                "fallbackLocale",
                format!("Invalid characters present in locale '{fallback}'"),
            ));
        }

        for (index, path) in self.json_paths.iter().enumerate() {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::new(
                    format!("jsonPaths[{index}]"),
                    "The path cannot be empty",
                ));
            }
        }

        for (namespace, hint) in &self.namespaces {
            if namespace.is_empty() || namespace == WILDCARD || namespace.contains(NAMESPACE_SEPARATOR)
            {
                errors.push(ValidationError::new(
                    format!("namespaces.{namespace}"),
                    format!(
                        "Invalid namespace name '{namespace}'. Names cannot be empty, \"{WILDCARD}\" or contain \"{NAMESPACE_SEPARATOR}\""
                    ),
                ));
            }
            if hint.as_os_str().is_empty() {
                errors.push(ValidationError::new(
                    format!("namespaces.{namespace}"),
                    "The path cannot be empty",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Resolves relative paths against `root`.
    #[must_use]
    pub fn resolve_paths(mut self, root: &Path) -> Self {
        let resolve = |path: PathBuf| if path.is_relative() { root.join(path) } else { path };

        self.lang_path = resolve(self.lang_path);
        self.json_paths = self.json_paths.into_iter().map(resolve).collect();
        self.namespaces =
            self.namespaces.into_iter().map(|(namespace, hint)| (namespace, resolve(hint))).collect();
        self
    }
}
