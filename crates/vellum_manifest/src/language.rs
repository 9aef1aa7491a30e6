//! Language-tagged values and locale negotiation.
//!
//! IIIF text properties come in several shapes:
//!
//! ```text
//! "Book"                                       plain string (v2, untagged)
//! {"@value": "Book", "@language": "en"}        single tagged value (v2)
//! [{"@value": "Book", "@language": "en"}, …]   list of tagged values (v2)
//! {"en": ["Book"], "fr": ["Livre"]}            language map (v3)
//! ```
//!
//! All of them parse into a [`LanguageValue`]: an ordered list of
//! [`LanguageString`]s in source order. Shapes that fit none of the above are
//! kept as one opaque string rather than rejected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vellum_common::LocaleTag;

use crate::json;

/// Separator placed between several values of the same language when a
/// value is flattened for display. IIIF permits a small HTML subset in
/// values, so the line break is expressed as HTML.
pub const VALUE_SEPARATOR: &str = "<br/>";

/// Language-map key meaning "not in any particular language".
const NO_LANGUAGE: &str = "none";

/// One string with its (optional) language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageString {
    /// Language tag as written in the document, `None` when untagged.
    pub language: Option<String>,
    /// The text.
    pub value: String,
}

impl LanguageString {
    fn untagged(value: impl Into<String>) -> Self {
        Self {
            language: None,
            value: value.into(),
        }
    }

    fn same_language(&self, other: &LanguageString) -> bool {
        match (&self.language, &other.language) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// A parsed language-tagged property value, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageValue {
    entries: Vec<LanguageString>,
}

impl LanguageValue {
    /// Parses any of the supported shapes. `None` and `null` give an empty value.
    pub fn parse(value: Option<&Value>) -> Self {
        let mut entries = Vec::new();
        if let Some(value) = value {
            push_value(value, &mut entries);
        }
        Self { entries }
    }

    /// Returns the entries in source order.
    pub fn entries(&self) -> &[LanguageString] {
        &self.entries
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries ordered for `locale`.
    ///
    /// Entries whose tag equals the locale, or equals it once region subtags
    /// are stripped, come first; every other entry follows. Both groups keep
    /// source order. Without a locale the source order is returned unchanged.
    pub fn ordered(&self, locale: Option<&LocaleTag>) -> Vec<&LanguageString> {
        let Some(locale) = locale else {
            return self.entries.iter().collect();
        };
        let (mut preferred, rest): (Vec<_>, Vec<_>) = self.entries.iter().partition(|e| {
            e.language
                .as_deref()
                .is_some_and(|lang| locale.matches(lang))
        });
        preferred.extend(rest);
        preferred
    }

    /// Resolves to plain strings ordered for `locale`.
    pub fn resolve(&self, locale: Option<&LocaleTag>) -> Vec<String> {
        self.ordered(locale)
            .into_iter()
            .map(|e| e.value.clone())
            .collect()
    }

    /// Returns the most preferred string for `locale`.
    pub fn first(&self, locale: Option<&LocaleTag>) -> Option<String> {
        self.ordered(locale).first().map(|e| e.value.clone())
    }

    /// Returns `true` if some entry, in any language, has non-blank text.
    pub fn has_text(&self) -> bool {
        self.entries.iter().any(|e| !e.value.trim().is_empty())
    }

    /// Flattens to a single display string.
    ///
    /// Takes the language of the most preferred entry with text and joins
    /// every non-blank entry of that language with [`VALUE_SEPARATOR`], so a
    /// metadata value with three English lines and their French translations
    /// shows the three English lines. Blank entries never win the language.
    pub fn display(&self, locale: Option<&LocaleTag>) -> String {
        let ordered = self.ordered(locale);
        let Some(best) = ordered
            .iter()
            .copied()
            .find(|e| !e.value.trim().is_empty())
        else {
            return String::new();
        };
        ordered
            .iter()
            .filter(|e| e.same_language(best) && !e.value.trim().is_empty())
            .map(|e| e.value.as_str())
            .collect::<Vec<_>>()
            .join(VALUE_SEPARATOR)
    }

    /// Returns the distinct language tags present, in first-seen order.
    pub fn languages(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for lang in self.entries.iter().filter_map(|e| e.language.as_deref()) {
            if !seen.contains(&lang) {
                seen.push(lang);
            }
        }
        seen
    }
}

/// Resolves a raw property value for `locale` in one step.
pub fn resolve(value: Option<&Value>, locale: Option<&LocaleTag>) -> Vec<String> {
    LanguageValue::parse(value).resolve(locale)
}

fn push_value(value: &Value, out: &mut Vec<LanguageString>) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push(LanguageString::untagged(s.clone())),
        Value::Array(items) => {
            for item in items {
                push_item(item, out);
            }
        }
        Value::Object(map) => {
            if let Some(tagged) = tagged_value(value) {
                out.push(tagged);
            } else if is_language_map(map) {
                push_language_map(map, out);
            } else {
                out.push(LanguageString::untagged(value.to_string()));
            }
        }
        Value::Bool(_) | Value::Number(_) => out.push(LanguageString::untagged(value.to_string())),
    }
}

fn push_item(item: &Value, out: &mut Vec<LanguageString>) {
    match item {
        Value::Null => {}
        Value::String(s) => out.push(LanguageString::untagged(s.clone())),
        Value::Object(_) => match tagged_value(item) {
            Some(tagged) => out.push(tagged),
            None => push_value(item, out),
        },
        other => out.push(LanguageString::untagged(opaque(other))),
    }
}

/// Reads a `{"@value", "@language"}` object (keyword or plain keys).
fn tagged_value(value: &Value) -> Option<LanguageString> {
    let text = json::get(value, "@value").or_else(|| json::get(value, "value"))?;
    let language = json::get(value, "@language")
        .or_else(|| json::get(value, "language"))
        .and_then(Value::as_str)
        .filter(|l| !l.is_empty() && *l != NO_LANGUAGE && *l != "@none")
        .map(str::to_string);
    Some(LanguageString {
        language,
        value: opaque(text),
    })
}

/// An empty object counts as a language map with no entries.
fn is_language_map(map: &Map<String, Value>) -> bool {
    map.values().all(|v| match v {
        Value::String(_) => true,
        Value::Array(items) => items.iter().all(|i| !i.is_array() && !i.is_object()),
        _ => false,
    })
}

fn push_language_map(map: &Map<String, Value>, out: &mut Vec<LanguageString>) {
    for (key, values) in map {
        let language = if key == NO_LANGUAGE || key == "@none" {
            None
        } else {
            Some(key.clone())
        };
        for v in json::as_slice(values) {
            out.push(LanguageString {
                language: language.clone(),
                value: opaque(v),
            });
        }
    }
}

fn opaque(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A `{label, value}` pair as found in `metadata` and `requiredStatement`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelValue {
    /// The label, possibly empty.
    pub label: LanguageValue,
    /// The value, possibly empty.
    pub value: LanguageValue,
}

impl LabelValue {
    /// Reads a `{label, value}` object. Non-objects give an empty pair.
    pub fn from_json(value: &Value) -> Self {
        Self {
            label: LanguageValue::parse(json::get(value, "label")),
            value: LanguageValue::parse(json::get(value, "value")),
        }
    }
}
