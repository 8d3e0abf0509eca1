//! Translation values.
//!
//! A translation file is a tree: leaves are messages and inner nodes are groups of
//! further lines (sub-groups, plural tables, lists). [`Line`] makes that shape explicit.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::key::GROUP_SEPARATOR;

/// A table of lines keyed by item name.
pub type Lines = BTreeMap<String, Line>;

/// A single translation value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A message.
    Scalar(String),
    /// A nested table of messages.
    Group(Lines),
}

impl Line {
    /// Returns the message if this line is a scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text),
            Self::Group(_) => None,
        }
    }

    /// Returns the nested table if this line is a group.
    #[must_use]
    pub const fn as_group(&self) -> Option<&Lines> {
        match self {
            Self::Scalar(_) => None,
            Self::Group(lines) => Some(lines),
        }
    }

    /// Applies `f` to every message in the tree.
    #[must_use]
    pub fn map_scalars<F>(self, f: &F) -> Self
    where
        F: Fn(&str) -> String,
    {
        match self {
            Self::Scalar(text) => Self::Scalar(f(&text)),
            Self::Group(lines) => Self::Group(
                lines.into_iter().map(|(key, line)| (key, line.map_scalars(f))).collect(),
            ),
        }
    }

    /// Converts a JSON value into a line.
    ///
    /// Strings become scalars, objects and arrays become groups (arrays are keyed by
    /// index), numbers and booleans become their JSON text. `null` has no line.
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(Self::Scalar(text)),
            Value::Object(map) => Some(Self::Group(
                map.into_iter()
                    .filter_map(|(key, value)| Self::from_json(value).map(|line| (key, line)))
                    .collect(),
            )),
            Value::Array(items) => Some(Self::Group(
                items
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, value)| {
                        Self::from_json(value).map(|line| (index.to_string(), line))
                    })
                    .collect(),
            )),
            other @ (Value::Bool(_) | Value::Number(_)) => Some(Self::Scalar(other.to_string())),
        }
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Self::Scalar(text.to_string())
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Self::Scalar(text)
    }
}

impl From<Lines> for Line {
    fn from(lines: Lines) -> Self {
        Self::Group(lines)
    }
}

/// Converts a JSON document into a table, or `None` if the document is not an object
/// or an array.
#[must_use]
pub fn lines_from_json(value: Value) -> Option<Lines> {
    match value {
        Value::Object(_) | Value::Array(_) => match Line::from_json(value) {
            Some(Line::Group(lines)) => Some(lines),
            _ => None,
        },
        _ => None,
    }
}

/// Looks up a dotted path in a table.
///
/// A key that literally contains dots wins over walking nested groups.
#[must_use]
pub fn get_path<'a>(lines: &'a Lines, path: &str) -> Option<&'a Line> {
    if let Some(line) = lines.get(path) {
        return Some(line);
    }
    if !path.contains(GROUP_SEPARATOR) {
        return None;
    }

    let mut segments = path.split(GROUP_SEPARATOR);
    let mut current = lines.get(segments.next()?)?;
    for segment in segments {
        current = current.as_group()?.get(segment)?;
    }
    Some(current)
}

/// Stores `line` under a dotted path, creating intermediate groups.
///
/// A scalar standing where a group is needed is replaced by an empty group.
pub fn set_path(lines: &mut Lines, path: &str, line: Line) {
    let mut segments: Vec<&str> = path.split(GROUP_SEPARATOR).collect();
    let Some(last) = segments.pop() else {
        return;
    };

    let mut current = lines;
    for segment in segments {
        let entry = current.entry(segment.to_string()).or_insert_with(|| Line::Group(Lines::new()));
        if let Line::Scalar(_) = entry {
            *entry = Line::Group(Lines::new());
        }
        let Line::Group(next) = entry else {
            return;
        };
        current = next;
    }
    current.insert(last.to_string(), line);
}

/// Merges `overrides` over `base` recursively.
///
/// Groups present on both sides are merged key by key; any other collision is won by
/// the override.
#[must_use]
pub fn replace_recursive(mut base: Lines, overrides: Lines) -> Lines {
    for (key, line) in overrides {
        let merged = match (base.remove(&key), line) {
            (Some(Line::Group(base_group)), Line::Group(override_group)) => {
                Line::Group(replace_recursive(base_group, override_group))
            }
            (_, line) => line,
        };
        base.insert(key, merged);
    }
    base
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;

    fn table(value: Value) -> Lines {
        lines_from_json(value).unwrap()
    }

    /// `Line::from_json`: objects, arrays and scalars
    #[rstest]
    fn test_from_json_keeps_shape() {
        let lines = table(json!({
            "title": "Title",
            "nested": { "deep": "Deep" },
            "list": ["first", "second"],
            "count": 3,
            "flag": true,
            "nothing": null
        }));

        assert_that!(lines.get("title").and_then(Line::as_str), some(eq("Title")));
        assert_that!(get_path(&lines, "nested.deep").and_then(Line::as_str), some(eq("Deep")));
        assert_that!(get_path(&lines, "list.1").and_then(Line::as_str), some(eq("second")));
        assert_that!(lines.get("count").and_then(Line::as_str), some(eq("3")));
        assert_that!(lines.get("flag").and_then(Line::as_str), some(eq("true")));
        assert_that!(lines.contains_key("nothing"), eq(false));
    }

    /// `lines_from_json`: documents that are not tables
    #[rstest]
    #[case::string(json!("text"))]
    #[case::number(json!(1))]
    #[case::null(json!(null))]
    fn test_lines_from_json_rejects_non_tables(#[case] value: Value) {
        assert_that!(lines_from_json(value), none());
    }

    /// `get_path`: literal dotted key wins
    #[rstest]
    fn test_get_path_prefers_literal_dotted_key() {
        let lines = table(json!({
            "a.b": "literal",
            "a": { "b": "nested" }
        }));

        assert_that!(get_path(&lines, "a.b").and_then(Line::as_str), some(eq("literal")));
    }

    /// `get_path`: missing paths
    #[rstest]
    #[case::missing_root("missing.key")]
    #[case::through_scalar("title.more")]
    #[case::missing_leaf("nested.other")]
    #[case::plain_missing("missing")]
    fn test_get_path_missing(#[case] path: &str) {
        let lines = table(json!({
            "title": "Title",
            "nested": { "deep": "Deep" }
        }));

        assert_that!(get_path(&lines, path), none());
    }

    /// `set_path`: intermediate groups are created
    #[rstest]
    fn test_set_path_creates_groups() {
        let mut lines = Lines::new();
        set_path(&mut lines, "a.b.c", Line::from("value"));
        set_path(&mut lines, "a.d", Line::from("other"));

        assert_that!(get_path(&lines, "a.b.c").and_then(Line::as_str), some(eq("value")));
        assert_that!(get_path(&lines, "a.d").and_then(Line::as_str), some(eq("other")));
    }

    /// `set_path`: a scalar in the way becomes a group
    #[rstest]
    fn test_set_path_replaces_scalar_with_group() {
        let mut lines = table(json!({ "a": "scalar" }));
        set_path(&mut lines, "a.b", Line::from("value"));

        assert_that!(get_path(&lines, "a.b").and_then(Line::as_str), some(eq("value")));
    }

    /// `replace_recursive`: override wins on collisions
    #[rstest]
    fn test_replace_recursive_override_wins() {
        let base = table(json!({ "a": "1", "b": "2" }));
        let overrides = table(json!({ "b": "3", "c": "4" }));

        let merged = replace_recursive(base, overrides);

        assert_eq!(merged, table(json!({ "a": "1", "b": "3", "c": "4" })));
    }

    /// `replace_recursive`: nested groups merge key by key
    #[rstest]
    fn test_replace_recursive_merges_nested_groups() {
        let base = table(json!({ "nested": { "keep": "base", "swap": "base" }, "flat": "base" }));
        let overrides = table(json!({ "nested": { "swap": "vendor" }, "flat": { "now": "group" } }));

        let merged = replace_recursive(base, overrides);

        assert_eq!(
            merged,
            table(json!({
                "nested": { "keep": "base", "swap": "vendor" },
                "flat": { "now": "group" }
            }))
        );
    }

    /// `map_scalars`: every leaf is mapped
    #[rstest]
    fn test_map_scalars_visits_every_leaf() {
        let line = Line::Group(table(json!({ "a": "x", "b": { "c": "y" } })));

        let mapped = line.map_scalars(&str::to_uppercase);

        assert_eq!(mapped, Line::Group(table(json!({ "a": "X", "b": { "c": "Y" } }))));
    }
}
