//! Plural form selection.
//!
//! A plural line lists its forms separated by `|`:
//!
//! ```text
//! apple|apples
//! {0} none|[1,19] some|[20,*] many
//! ```
//!
//! Explicit range conditions win. Otherwise the form is picked by index with the
//! language's cardinal rule.

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::fmt;

/// Separator between plural forms.
pub const FORM_SEPARATOR: char = '|';

/// The number a plural form is chosen for.
///
/// Collections count as their length.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Count(f64);

impl Count {
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Count {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<f32> for Count {
    fn from(value: f32) -> Self {
        Self(f64::from(value))
    }
}

impl From<i32> for Count {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

impl From<u32> for Count {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

impl From<i64> for Count {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}

impl From<u64> for Count {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: u64) -> Self {
        Self(value as f64)
    }
}

impl From<usize> for Count {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: usize) -> Self {
        Self(value as f64)
    }
}

impl<T> From<&[T]> for Count {
    fn from(items: &[T]) -> Self {
        Self::from(items.len())
    }
}

impl<T> From<&Vec<T>> for Count {
    fn from(items: &Vec<T>) -> Self {
        Self::from(items.len())
    }
}

impl<K, V, S> From<&HashMap<K, V, S>> for Count {
    fn from(items: &HashMap<K, V, S>) -> Self {
        Self::from(items.len())
    }
}

impl<K, V> From<&BTreeMap<K, V>> for Count {
    fn from(items: &BTreeMap<K, V>) -> Self {
        Self::from(items.len())
    }
}

/// Chooses the plural form of `line` for `number` in `locale`.
///
/// Returns the first form when nothing else applies.
#[must_use]
pub fn choose(line: &str, number: Count, locale: &str) -> String {
    let segments: Vec<&str> = line.split(FORM_SEPARATOR).collect();

    if let Some(value) = segments.iter().find_map(|segment| extract(segment, number.value())) {
        return value.trim().to_string();
    }

    let segments: Vec<&str> = segments.into_iter().map(strip_condition).collect();
    let index = plural_index(locale, number.value());

    let first = segments.first().copied().unwrap_or_default();
    if segments.len() == 1 {
        return first.to_string();
    }
    segments.get(index).copied().unwrap_or(first).to_string()
}

/// Splits `{cond}text` or `[cond]text` into the condition and the text.
fn split_condition(segment: &str) -> Option<(&str, &str)> {
    let rest = segment.strip_prefix(['{', '['])?;
    let end = rest.find(['}', ']', '{', '['])?;
    let (condition, text) = rest.split_at(end);
    let text = text.strip_prefix(['}', ']'])?;
    Some((condition, text))
}

fn strip_condition(segment: &str) -> &str {
    split_condition(segment).map_or(segment, |(_, text)| text)
}

/// Returns the text of `segment` if its condition holds for `number`.
fn extract(segment: &str, number: f64) -> Option<&str> {
    let (condition, text) = split_condition(segment)?;

    if let Some((from, to)) = condition.split_once(',') {
        let (from, to) = (from.trim(), to.trim());
        let matched = match (from, to) {
            ("*", "*") => true,
            (from, "*") => bound(from).is_some_and(|from| number >= from),
            ("*", to) => bound(to).is_some_and(|to| number <= to),
            (from, to) => {
                bound(from).is_some_and(|from| number >= from)
                    && bound(to).is_some_and(|to| number <= to)
            }
        };
        return matched.then_some(text);
    }

    #[allow(clippy::float_cmp)]
    let matched = bound(condition).is_some_and(|exact| exact == number);
    matched.then_some(text)
}

fn bound(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

/// Normalizes a locale tag to the language code used by the rule table.
fn rule_locale(locale: &str) -> String {
    let locale = locale.replace('-', "_");
    if locale == "pt_BR" {
        // Brazilian Portuguese treats 0 as singular.
        return "xbr".to_string();
    }
    if locale.chars().count() > 3
        && let Some((language, _)) = locale.rsplit_once('_')
    {
        return language.to_string();
    }
    locale
}

/// Returns the index of the plural form for `number` in `locale`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn plural_index(locale: &str, number: f64) -> usize {
    let n = number.abs();
    let integral = n.fract() == 0.0;
    // Modulo rules operate on the integer part.
    let i = n.trunc() as u64;
    let is = |value: u64| integral && i == value;
    let in_range = |value: u64, from: u64, to: u64| (from..=to).contains(&value);

    match rule_locale(locale).as_str() {
        "az" | "bo" | "dz" | "id" | "ja" | "jv" | "ka" | "km" | "kn" | "ko" | "ms" | "th"
        | "tr" | "vi" | "zh" => 0,
        "am" | "bh" | "fil" | "fr" | "gun" | "hi" | "hy" | "ln" | "mg" | "nso" | "ti" | "wa"
        | "xbr" => usize::from(!(is(0) || is(1))),
        "be" | "bs" | "hr" | "ru" | "sh" | "sr" | "uk" => {
            if i % 10 == 1 && i % 100 != 11 {
                0
            } else if in_range(i % 10, 2, 4) && (i % 100 < 10 || i % 100 >= 20) {
                1
            } else {
                2
            }
        }
        "cs" | "sk" => {
            if is(1) {
                0
            } else if (2.0..=4.0).contains(&n) {
                1
            } else {
                2
            }
        }
        "ga" => {
            if is(1) {
                0
            } else if is(2) {
                1
            } else {
                2
            }
        }
        "lt" => {
            if i % 10 == 1 && i % 100 != 11 {
                0
            } else if i % 10 >= 2 && (i % 100 < 10 || i % 100 >= 20) {
                1
            } else {
                2
            }
        }
        "sl" => match i % 100 {
            1 => 0,
            2 => 1,
            3 | 4 => 2,
            _ => 3,
        },
        "mk" => usize::from(i % 10 != 1),
        "mt" => {
            if is(1) {
                0
            } else if is(0) || in_range(i % 100, 2, 10) {
                1
            } else if in_range(i % 100, 11, 19) {
                2
            } else {
                3
            }
        }
        "lv" => {
            if is(0) {
                0
            } else if i % 10 == 1 && i % 100 != 11 {
                1
            } else {
                2
            }
        }
        "pl" => {
            if is(1) {
                0
            } else if in_range(i % 10, 2, 4) && (i % 100 < 12 || i % 100 > 14) {
                1
            } else {
                2
            }
        }
        "cy" => {
            if is(1) {
                0
            } else if is(2) {
                1
            } else if is(8) || is(11) {
                2
            } else {
                3
            }
        }
        "ro" => {
            if is(1) {
                0
            } else if is(0) || in_range(i % 100, 1, 19) {
                1
            } else {
                2
            }
        }
        "ar" => {
            if is(0) {
                0
            } else if is(1) {
                1
            } else if is(2) {
                2
            } else if in_range(i % 100, 3, 10) {
                3
            } else if in_range(i % 100, 11, 99) {
                4
            } else {
                5
            }
        }
        _ => usize::from(!is(1)),
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    /// `choose`: two-form English line
    #[rstest]
    #[case::singular(1.0, "one apple")]
    #[case::plural(5.0, ":count apples")]
    #[case::zero(0.0, ":count apples")]
    #[case::negative_one(-1.0, "one apple")]
    #[case::fraction(1.5, ":count apples")]
    fn test_binary_rule(#[case] number: f64, #[case] expected: &str) {
        let chosen = choose("one apple|:count apples", Count::new(number), "en");

        assert_that!(chosen, eq(expected));
    }

    /// `choose`: explicit ranges
    #[rstest]
    #[case::exact_zero(0, "none")]
    #[case::closed_range(7, "some")]
    #[case::open_upper(25, "many")]
    fn test_explicit_ranges(#[case] number: i32, #[case] expected: &str) {
        let line = "{0} none|[1,19] some|[20,*] many";

        assert_that!(choose(line, Count::from(number), "en"), eq(expected));
    }

    /// `choose`: open lower bound
    #[rstest]
    fn test_open_lower_range() {
        assert_that!(choose("[*,0] nothing|[1,*] plenty", Count::from(-3), "en"), eq("nothing"));
    }

    /// `choose`: ranges win over language rules
    #[rstest]
    fn test_explicit_ranges_beat_language_rules() {
        // Japanese always picks the first form, the range still wins.
        assert_that!(choose("{0} 空|[1,*] あり", Count::from(3), "ja"), eq("あり"));
    }

    /// `choose`: unmatched conditions use the plural index
    #[rstest]
    fn test_unmatched_conditions_fall_back_to_index() {
        let line = "{0} none|{1} one|many";

        assert_that!(choose(line, Count::from(1), "en"), eq("one"));
        assert_that!(choose(line, Count::from(4), "en"), eq(" one"));
    }

    /// `choose`: single form
    #[rstest]
    fn test_single_segment_is_returned_as_is() {
        assert_that!(choose("apples", Count::from(3), "en"), eq("apples"));
    }

    /// `choose`: index past the last form
    #[rstest]
    fn test_out_of_range_index_returns_first() {
        // Russian asks for the third form, only two are given.
        assert_that!(choose("яблоко|яблока", Count::from(5), "ru"), eq("яблоко"));
    }

    /// `plural_index`: Russian
    #[rstest]
    #[case::one(1, 0)]
    #[case::few(3, 1)]
    #[case::many(5, 2)]
    #[case::eleven(11, 2)]
    #[case::twenty_one(21, 0)]
    #[case::twenty_two(22, 1)]
    #[case::hundred_twelve(112, 2)]
    fn test_russian_rule(#[case] number: u32, #[case] expected: usize) {
        assert_that!(plural_index("ru_RU", f64::from(number)), eq(expected));
    }

    /// `plural_index`: Polish
    #[rstest]
    #[case::one(1, 0)]
    #[case::few(2, 1)]
    #[case::many(5, 2)]
    #[case::teen(12, 2)]
    #[case::twenty_two(22, 1)]
    fn test_polish_rule(#[case] number: u32, #[case] expected: usize) {
        assert_that!(plural_index("pl", f64::from(number)), eq(expected));
    }

    /// `plural_index`: Arabic
    #[rstest]
    #[case::zero(0, 0)]
    #[case::one(1, 1)]
    #[case::two(2, 2)]
    #[case::few(5, 3)]
    #[case::many(15, 4)]
    #[case::other(100, 5)]
    fn test_arabic_rule(#[case] number: u32, #[case] expected: usize) {
        assert_that!(plural_index("ar", f64::from(number)), eq(expected));
    }

    /// `plural_index`: Slovenian
    #[rstest]
    #[case::one(1, 0)]
    #[case::two(2, 1)]
    #[case::few(4, 2)]
    #[case::other(5, 3)]
    #[case::hundred_one(101, 0)]
    fn test_slovenian_rule(#[case] number: u32, #[case] expected: usize) {
        assert_that!(plural_index("sl", f64::from(number)), eq(expected));
    }

    /// `plural_index`: Welsh
    #[rstest]
    #[case::one(1, 0)]
    #[case::two(2, 1)]
    #[case::eight(8, 2)]
    #[case::other(3, 3)]
    fn test_welsh_rule(#[case] number: u32, #[case] expected: usize) {
        assert_that!(plural_index("cy", f64::from(number)), eq(expected));
    }

    /// `plural_index`: other languages and locale normalization
    #[rstest]
    #[case::french_zero("fr", 0, 0)]
    #[case::french_two("fr", 2, 1)]
    #[case::brazilian_zero("pt_BR", 0, 0)]
    #[case::portuguese_zero("pt_PT", 0, 1)]
    #[case::hyphenated_region("pt-BR", 0, 0)]
    #[case::japanese("ja_JP", 5, 0)]
    #[case::czech_few("cs", 3, 1)]
    #[case::irish_two("ga", 2, 1)]
    #[case::latvian_zero("lv", 0, 0)]
    #[case::latvian_twenty_one("lv", 21, 1)]
    #[case::lithuanian_few("lt", 9, 1)]
    #[case::macedonian("mk", 11, 0)]
    #[case::maltese_teen("mt", 13, 2)]
    #[case::romanian_few("ro", 19, 1)]
    #[case::romanian_other("ro", 20, 2)]
    #[case::filipino("fil", 1, 0)]
    #[case::unknown_binary("xx", 2, 1)]
    fn test_language_rules(#[case] locale: &str, #[case] number: u32, #[case] expected: usize) {
        assert_that!(plural_index(locale, f64::from(number)), eq(expected));
    }

    /// `plural_index`: Czech and Slovak "few" covers every number from 2 to 4
    #[rstest]
    #[case::czech_two_and_a_half("cs", 2.5, 1)]
    #[case::slovak_four("sk", 4.0, 1)]
    #[case::czech_above_four("cs", 4.5, 2)]
    #[case::czech_one_and_a_half("cs", 1.5, 2)]
    fn test_plural_index_czech_fractions(
        #[case] locale: &str,
        #[case] number: f64,
        #[case] expected: usize,
    ) {
        assert_that!(plural_index(locale, number), eq(expected));
    }

    /// `Count`: collections count their length
    #[rstest]
    fn test_count_from_collections() {
        let items = vec!["a", "b", "c"];
        let map: HashMap<&str, i32> = HashMap::from([("a", 1)]);

        assert_that!(Count::from(&items).to_string(), eq("3"));
        assert_that!(Count::from(items.as_slice()).to_string(), eq("3"));
        assert_that!(Count::from(&map).to_string(), eq("1"));
        assert_that!(Count::from(2.5).to_string(), eq("2.5"));
    }
}
