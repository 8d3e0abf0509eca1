//! Key resolution, locale fallback and placeholder substitution.

use std::collections::HashMap;
use std::fmt;

use crate::config::TranslatorSettings;
use crate::error::TranslatorError;
use crate::key::{
    self,
    GROUP_SEPARATOR,
    TranslationKey,
    WILDCARD,
};
use crate::line::{
    Line,
    get_path,
    set_path,
};
use crate::loaded::LoadedTable;
use crate::loader::{
    FileLoader,
    Loader,
};
use crate::plural::{
    self,
    Count,
};
use crate::replace::{
    Replacements,
    make_replacements,
};

/// Hook rewriting the list of locales tried by a lookup.
type LocalesHook = dyn Fn(Vec<String>) -> Vec<String>;

/// Resolves translation keys against a [`Loader`].
///
/// Groups are loaded on first use and kept for the translator's lifetime. A key that
/// cannot be resolved in any candidate locale is returned unchanged.
///
/// # Examples
/// ```
/// use lang_translator::{ArrayLoader, Replacements, Translator};
/// use lang_translator::line::{Line, Lines};
///
/// let mut lines = Lines::new();
/// lines.insert("welcome".to_string(), Line::from("Welcome, :name"));
/// let mut loader = ArrayLoader::new();
/// loader.add_messages("en", "messages", lines, None);
///
/// let mut translator = Translator::new(loader, "en").unwrap();
/// let line = translator
///     .get("messages.welcome", &Replacements::from([("name", "Dayle")]), None, true)
///     .unwrap();
/// assert_eq!(line.as_str(), Some("Welcome, Dayle"));
/// ```
pub struct Translator {
    loader: Box<dyn Loader>,
    locale: String,
    fallback: Option<String>,
    loaded: LoadedTable,
    /// Memo of parsed keys.
    parsed: HashMap<String, TranslationKey>,
    determine_locales: Option<Box<LocalesHook>>,
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("loader", &self.loader)
            .field("locale", &self.locale)
            .field("fallback", &self.fallback)
            .field("loaded", &self.loaded)
            .field("parsed", &self.parsed.len())
            .field("determine_locales", &self.determine_locales.as_ref().map(|_| "<hook>"))
            .finish()
    }
}

/// Returns true if `locale` is usable as a path segment.
#[must_use]
pub fn is_valid_locale(locale: &str) -> bool {
    !locale.contains(['/', '\\'])
}

impl Translator {
    pub fn new(
        loader: impl Loader + 'static,
        locale: impl Into<String>,
    ) -> Result<Self, TranslatorError> {
        let mut translator = Self {
            loader: Box::new(loader),
            locale: String::new(),
            fallback: None,
            loaded: LoadedTable::new(),
            parsed: HashMap::new(),
            determine_locales: None,
        };
        translator.set_locale(locale)?;
        Ok(translator)
    }

    /// Builds a translator reading files as described by `settings`.
    pub fn from_settings(settings: &TranslatorSettings) -> Result<Self, TranslatorError> {
        let mut loader = FileLoader::new(settings.lang_path.clone());
        for (namespace, hint) in &settings.namespaces {
            loader.add_namespace(namespace, hint.clone());
        }
        for path in &settings.json_paths {
            loader.add_json_path(path.clone());
        }

        let mut translator = Self::new(loader, settings.locale.clone())?;
        if let Some(fallback) = &settings.fallback_locale {
            translator.set_fallback(fallback.clone());
        }
        tracing::debug!(
            locale = %translator.locale,
            fallback = ?translator.fallback,
            "Translator created from settings"
        );
        Ok(translator)
    }

    /// Returns true if `key` resolves to something other than itself.
    pub fn has(
        &mut self,
        key: &str,
        locale: Option<&str>,
        use_fallback: bool,
    ) -> Result<bool, TranslatorError> {
        let line = self.get(key, &Replacements::new(), locale, use_fallback)?;
        Ok(line.as_str() != Some(key))
    }

    /// Like [`Translator::has`] without falling back to other locales.
    pub fn has_for_locale(&mut self, key: &str, locale: &str) -> Result<bool, TranslatorError> {
        self.has(key, Some(locale), false)
    }

    /// Translates `key`.
    ///
    /// The JSON catalog of the requested locale is consulted first with the key as
    /// written. Otherwise the key is parsed and each candidate locale is tried in order.
    /// Returns the key itself when nothing is found. Blank messages count as missing.
    pub fn get(
        &mut self,
        key: &str,
        replacements: &Replacements,
        locale: Option<&str>,
        use_fallback: bool,
    ) -> Result<Line, TranslatorError> {
        let locale =
            locale.filter(|locale| !locale.is_empty()).unwrap_or(self.locale.as_str()).to_string();
        if !is_valid_locale(&locale) {
            return Err(TranslatorError::InvalidLocale(locale));
        }

        self.load(WILDCARD, WILDCARD, &locale)?;
        if let Some(text) = self
            .loaded
            .get(WILDCARD, WILDCARD, &locale)
            .and_then(|lines| lines.get(key))
            .and_then(Line::as_str)
            .filter(|text| !text.is_empty())
        {
            return Ok(Line::Scalar(make_replacements(text, replacements)));
        }

        let parsed = self.parse_key(key);
        let locales = if use_fallback { self.locale_array(&locale) } else { vec![locale] };
        for candidate in &locales {
            if let Some(line) = self.get_line(
                parsed.namespace_or_wildcard(),
                &parsed.group,
                candidate,
                parsed.item.as_deref(),
                replacements,
            )? {
                return Ok(line);
            }
        }

        tracing::debug!(key, ?locales, "Translation missing");
        Ok(Line::Scalar(key.to_string()))
    }

    /// Translates `key` and picks the plural form for `number`.
    ///
    /// `:count` is available as a placeholder in every form.
    pub fn choice(
        &mut self,
        key: &str,
        number: impl Into<Count>,
        replacements: &Replacements,
        locale: Option<&str>,
    ) -> Result<String, TranslatorError> {
        let number = number.into();
        let locale = self.locale_for_choice(locale);
        if !is_valid_locale(&locale) {
            return Err(TranslatorError::InvalidLocale(locale));
        }

        let line = match self.get(key, replacements, Some(&locale), true)? {
            Line::Scalar(text) => text,
            Line::Group(_) => {
                tracing::debug!(key, "Plural line resolved to a group");
                key.to_string()
            }
        };

        let mut replacements = replacements.clone();
        replacements.insert("count", number.to_string());

        Ok(make_replacements(&plural::choose(&line, number, &locale), &replacements))
    }

    /// Resolves a single line in one locale, or `None` if it is missing or blank.
    ///
    /// `item` of `None` returns the whole group. Placeholders are substituted in every
    /// message of the result.
    pub fn get_line(
        &mut self,
        namespace: &str,
        group: &str,
        locale: &str,
        item: Option<&str>,
        replacements: &Replacements,
    ) -> Result<Option<Line>, TranslatorError> {
        self.load(namespace, group, locale)?;

        let Some(lines) = self.loaded.get(namespace, group, locale) else {
            return Ok(None);
        };
        let line = match item {
            Some(item) => get_path(lines, item).cloned(),
            None => Some(Line::Group(lines.clone())),
        };

        Ok(line.and_then(|line| match line {
            Line::Scalar(text) if text.is_empty() => None,
            Line::Scalar(text) => Some(Line::Scalar(make_replacements(&text, replacements))),
            Line::Group(lines) if lines.is_empty() => None,
            group @ Line::Group(_) => {
                Some(group.map_scalars(&|text| make_replacements(text, replacements)))
            }
        }))
    }

    /// Loads a group into the cache unless it is already there.
    pub fn load(
        &mut self,
        namespace: &str,
        group: &str,
        locale: &str,
    ) -> Result<(), TranslatorError> {
        if self.is_loaded(namespace, group, locale) {
            tracing::trace!(namespace, group, locale, "Translation group cached");
            return Ok(());
        }

        tracing::debug!(namespace, group, locale, "Loading translation group");
        let lines = self.loader.load(locale, group, Some(namespace))?;
        self.loaded.insert(namespace, group, locale, lines);
        Ok(())
    }

    #[must_use]
    pub fn is_loaded(&self, namespace: &str, group: &str, locale: &str) -> bool {
        self.loaded.contains(namespace, group, locale)
    }

    /// Adds `group.item` lines directly to the cache.
    ///
    /// The item may contain further dots to build nested groups. Once a group has
    /// lines added this way the loader is no longer consulted for it.
    pub fn add_lines<I, K, V>(&mut self, lines: I, locale: &str, namespace: Option<&str>)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Line>,
    {
        let namespace = namespace.unwrap_or(WILDCARD);
        for (key, value) in lines {
            let key = key.as_ref();
            let Some((group, item)) = key.split_once(GROUP_SEPARATOR) else {
                tracing::warn!(key, "Ignoring translation line without a group");
                continue;
            };
            set_path(self.loaded.entry(namespace, group, locale), item, value.into());
        }
    }

    /// Parses `key`, defaulting the namespace to `"*"`.
    pub fn parse_key(&mut self, key: &str) -> TranslationKey {
        if let Some(parsed) = self.parsed.get(key) {
            return parsed.clone();
        }

        let parsed = key::parse_key(key).with_default_namespace();
        self.parsed.insert(key.to_string(), parsed.clone());
        parsed
    }

    /// Overrides how `key` is parsed.
    pub fn set_parsed_key(&mut self, key: impl Into<String>, parsed: TranslationKey) {
        self.parsed.insert(key.into(), parsed);
    }

    /// Registers a hook that rewrites the locales tried when falling back.
    pub fn determine_locales_using(
        &mut self,
        hook: impl Fn(Vec<String>) -> Vec<String> + 'static,
    ) {
        self.determine_locales = Some(Box::new(hook));
    }

    /// Requested locale followed by the fallback, without blanks or repeats.
    fn locale_array(&self, locale: &str) -> Vec<String> {
        let primary = if locale.is_empty() { self.locale.as_str() } else { locale };

        let mut locales: Vec<String> = Vec::new();
        for candidate in [Some(primary), self.fallback.as_deref()].into_iter().flatten() {
            if !candidate.is_empty() && !locales.iter().any(|existing| existing == candidate) {
                locales.push(candidate.to_string());
            }
        }

        match &self.determine_locales {
            Some(hook) => hook(locales),
            None => locales,
        }
    }

    fn locale_for_choice(&self, locale: Option<&str>) -> String {
        locale
            .filter(|locale| !locale.is_empty())
            .or_else(|| Some(self.locale.as_str()).filter(|locale| !locale.is_empty()))
            .or(self.fallback.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) -> Result<(), TranslatorError> {
        let locale = locale.into();
        if !is_valid_locale(&locale) {
            return Err(TranslatorError::InvalidLocale(locale));
        }
        self.locale = locale;
        Ok(())
    }

    #[must_use]
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Sets the fallback locale; an empty string disables fallback.
    pub fn set_fallback(&mut self, fallback: impl Into<String>) {
        let fallback = fallback.into();
        self.fallback = (!fallback.is_empty()).then_some(fallback);
    }

    #[must_use]
    pub fn loader(&self) -> &dyn Loader {
        self.loader.as_ref()
    }

    pub fn loader_mut(&mut self) -> &mut dyn Loader {
        self.loader.as_mut()
    }

    #[must_use]
    pub const fn loaded(&self) -> &LoadedTable {
        &self.loaded
    }

    /// Replaces the whole cache.
    pub fn set_loaded(&mut self, loaded: LoadedTable) {
        self.loaded = loaded;
    }

    pub fn add_namespace(&mut self, namespace: &str, hint: impl Into<std::path::PathBuf>) {
        self.loader.add_namespace(namespace, hint.into());
    }

    pub fn add_json_path(&mut self, path: impl Into<std::path::PathBuf>) {
        self.loader.add_json_path(path.into());
    }
}
