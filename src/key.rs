//! Translation key parsing.
//!
//! Keys take the form `group.item` or `namespace::group.item`. The item part may
//! itself contain further dots, which address nested groups inside a translation file.

/// Namespace used when a key does not name one explicitly.
pub const WILDCARD: &str = "*";

/// Separator between a namespace and the rest of the key.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Separator between a group and its item.
pub const GROUP_SEPARATOR: char = '.';

/// A key split into its namespace, group and item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationKey {
    /// `None` when the key has no `namespace::` prefix.
    pub namespace: Option<String>,
    pub group: String,
    /// `None` when the key addresses the whole group.
    pub item: Option<String>,
}

impl TranslationKey {
    #[must_use]
    pub fn new(namespace: Option<&str>, group: &str, item: Option<&str>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            group: group.to_string(),
            item: item.map(str::to_string),
        }
    }

    /// Returns the namespace, or [`WILDCARD`] if none was given.
    #[must_use]
    pub fn namespace_or_wildcard(&self) -> &str {
        self.namespace.as_deref().unwrap_or(WILDCARD)
    }

    /// Fills an absent namespace with [`WILDCARD`].
    #[must_use]
    pub fn with_default_namespace(mut self) -> Self {
        if self.namespace.is_none() {
            self.namespace = Some(WILDCARD.to_string());
        }
        self
    }
}

/// Splits a key into namespace, group and item.
///
/// Never fails: a key without a `.` yields a whole-group request, and a key without
/// `::` yields no namespace.
///
/// # Examples
/// ```
/// use lang_translator::key::parse_key;
///
/// let key = parse_key("courier::mail.subject");
/// assert_eq!(key.namespace.as_deref(), Some("courier"));
/// assert_eq!(key.group, "mail");
/// assert_eq!(key.item.as_deref(), Some("subject"));
/// ```
#[must_use]
pub fn parse_key(key: &str) -> TranslationKey {
    let (namespace, rest) = key
        .split_once(NAMESPACE_SEPARATOR)
        .map_or((None, key), |(namespace, rest)| (Some(namespace), rest));

    let (group, item) = rest
        .split_once(GROUP_SEPARATOR)
        .map_or((rest, None), |(group, item)| (group, Some(item)));

    TranslationKey::new(namespace, group, item)
}
