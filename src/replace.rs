//! Placeholder substitution.
//!
//! Placeholders are written `:name` and are replaced in three casings: `:name` with the
//! value as given, `:NAME` with the value upper-cased, `:Name` with the value's first
//! character upper-cased.

/// An ordered set of placeholder values.
///
/// Setting a name that is already present overwrites its value in place, so the
/// original insertion order decides ties between equally long names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    pairs: Vec<(String, String)>,
}

impl Replacements {
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Builder form of [`Replacements::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(pair) = self.pairs.iter_mut().find(|(existing, _)| *existing == name) {
            pair.1 = value;
        } else {
            self.pairs.push((name, value));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs.iter().find(|(existing, _)| existing == name).map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Replacements
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut replacements = Self::new();
        for (name, value) in iter {
            replacements.insert(name, value);
        }
        replacements
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Replacements
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Upper-cases the first character of `text`.
#[must_use]
pub fn ucfirst(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}

/// Substitutes every placeholder of `replacements` in `line`.
///
/// Longer names are replaced first so that `:name` cannot eat the front of `:names`.
/// Substitution is literal and replaces all occurrences.
#[must_use]
pub fn make_replacements(line: &str, replacements: &Replacements) -> String {
    if replacements.is_empty() {
        return line.to_string();
    }

    let mut sorted: Vec<(&str, &str)> = replacements.iter().collect();
    // `sort_by` is stable, equal lengths keep insertion order.
    sorted.sort_by(|(a, _), (b, _)| b.chars().count().cmp(&a.chars().count()));

    let mut line = line.to_string();
    for (name, value) in sorted {
        line = line
            .replace(&format!(":{name}"), value)
            .replace(&format!(":{}", name.to_uppercase()), &value.to_uppercase())
            .replace(&format!(":{}", ucfirst(name)), &ucfirst(value));
    }
    line
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    /// `make_replacements`: no replacements
    #[rstest]
    fn test_empty_replacements_leave_line_alone() {
        assert_that!(make_replacements(":name stays", &Replacements::new()), eq(":name stays"));
    }

    /// `make_replacements`: `:key`, `:KEY` and `:Key`
    #[rstest]
    fn test_case_variants_are_expanded() {
        let replacements = Replacements::from([("foo", "bar")]);

        assert_that!(make_replacements(":foo :FOO :Foo", &replacements), eq("bar BAR Bar"));
    }

    /// `make_replacements`: longer names first
    #[rstest]
    fn test_longer_names_are_replaced_first() {
        let replacements = Replacements::from([("name", "X"), ("names", "Xs")]);

        assert_that!(make_replacements(":names :name", &replacements), eq("Xs X"));
    }

    /// `make_replacements`: every occurrence
    #[rstest]
    fn test_all_occurrences_are_replaced() {
        let replacements = Replacements::new().with("n", "1");

        assert_that!(make_replacements(":n + :n = 2", &replacements), eq("1 + 1 = 2"));
    }

    /// `make_replacements`: unknown placeholders stay
    #[rstest]
    fn test_unknown_placeholders_are_kept() {
        let replacements = Replacements::new().with("name", "Taylor");

        assert_that!(make_replacements("Hi :name, :other", &replacements), eq("Hi Taylor, :other"));
    }

    /// `ucfirst`
    #[rstest]
    #[case::ascii("hello", "Hello")]
    #[case::empty("", "")]
    #[case::already("Hello", "Hello")]
    #[case::multibyte("élan", "Élan")]
    fn test_ucfirst_cases(#[case] input: &str, #[case] expected: &str) {
        assert_that!(ucfirst(input), eq(expected));
    }

    /// `insert`: overwrites keep insertion order
    #[rstest]
    fn test_insert_overwrites_in_place() {
        let mut replacements = Replacements::from([("a", "1"), ("b", "2")]);
        replacements.insert("a", "3");

        let pairs: Vec<(&str, &str)> = replacements.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
        assert_that!(replacements.get("a"), some(eq("3")));
        assert_that!(replacements.len(), eq(2));
    }
}
