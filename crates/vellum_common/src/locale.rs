//! Language tags and the matching rules used for locale negotiation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated language tag such as `en`, `fr`, or `en-GB`.
///
/// Tags are stored as given (after trimming and turning `_` into `-`), so
/// that a caller passing `en_GB` and one passing `en-GB` produce the same
/// cache key. Validation is deliberately loose: one to eight ASCII
/// alphanumerics per subtag, with an alphabetic primary subtag.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleTag(String);

impl LocaleTag {
    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the primary language subtag (`en-GB` → `en`).
    pub fn language(&self) -> &str {
        primary_subtag(&self.0)
    }

    /// Returns `true` if a value tagged `other` should be preferred for this
    /// locale: the tags are equal, or equal once region subtags are stripped.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
            || self.language().eq_ignore_ascii_case(primary_subtag(other))
    }

    /// Returns this tag with any region or script subtags removed.
    pub fn without_region(&self) -> LocaleTag {
        LocaleTag(self.language().to_string())
    }
}

/// Returns the part of a language tag before the first `-` or `_`.
pub fn primary_subtag(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocaleTag({})", self.0)
    }
}

/// Error type for parsing language tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLocaleError {
    /// The input string that failed to parse.
    pub input: String,
}

impl fmt::Display for ParseLocaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid language tag: '{}'", self.input)
    }
}

impl std::error::Error for ParseLocaleError {}

impl FromStr for LocaleTag {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-");
        let err = || ParseLocaleError {
            input: s.to_string(),
        };

        let mut subtags = normalized.split('-');
        let primary = subtags.next().ok_or_else(err)?;
        if primary.is_empty() || primary.len() > 8 || !primary.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(err());
        }
        for sub in subtags {
            if sub.is_empty() || sub.len() > 8 || !sub.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(err());
            }
        }
        Ok(LocaleTag(normalized))
    }
}

impl TryFrom<String> for LocaleTag {
    type Error = ParseLocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LocaleTag> for String {
    fn from(tag: LocaleTag) -> Self {
        tag.0
    }
}
