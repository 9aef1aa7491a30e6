//! Queries and the composite cache key they map to.

use std::fmt;

use vellum_common::{Ident, Interner, LocaleTag};

/// What a caller is asking about: a manifest (directly or through the window
/// showing it) under one effective locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Query<'q> {
    /// Explicit manifest id.
    pub manifest_id: Option<&'q str>,
    /// Window (or companion window) the query comes from.
    pub window_id: Option<&'q str>,
    /// Effective locale for this query.
    pub locale: Option<&'q LocaleTag>,
}

impl<'q> Query<'q> {
    /// A query about a manifest by id.
    pub fn manifest(manifest_id: &'q str) -> Self {
        Self {
            manifest_id: Some(manifest_id),
            ..Self::default()
        }
    }

    /// A query about whatever manifest a window shows.
    pub fn window(window_id: &'q str) -> Self {
        Self {
            window_id: Some(window_id),
            ..Self::default()
        }
    }

    /// Scopes the query to a window.
    pub fn in_window(mut self, window_id: &'q str) -> Self {
        self.window_id = Some(window_id);
        self
    }

    /// Sets the effective locale.
    pub fn with_locale(mut self, locale: Option<&'q LocaleTag>) -> Self {
        self.locale = locale;
        self
    }
}

/// Composite cache key: manifest, window and locale, each interned.
///
/// Two queries share cached results only if all three components are equal.
/// A query that names only a window keys on the window, not on the manifest
/// the window currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Interned manifest id.
    pub manifest: Option<Ident>,
    /// Interned window id.
    pub window: Option<Ident>,
    /// Interned locale tag.
    pub locale: Option<Ident>,
}

impl CacheKey {
    /// Builds the key for a query, interning each component.
    pub fn compose(interner: &Interner, query: &Query<'_>) -> Self {
        Self {
            manifest: query.manifest_id.map(|m| interner.get_or_intern(m)),
            window: query.window_id.map(|w| interner.get_or_intern(w)),
            locale: query.locale.map(|l| interner.get_or_intern(l.as_str())),
        }
    }

    /// Renders the key for logs.
    pub fn display<'a>(&'a self, interner: &'a Interner) -> KeyDisplay<'a> {
        KeyDisplay {
            key: self,
            interner,
        }
    }
}

/// Log rendering of a [`CacheKey`]: its components joined by ` - `, with
/// `-` for a missing component.
pub struct KeyDisplay<'a> {
    key: &'a CacheKey,
    interner: &'a Interner,
}

impl fmt::Display for KeyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |ident: Option<Ident>| {
            ident.and_then(|i| self.interner.resolve(i)).unwrap_or("-")
        };
        write!(
            f,
            "{} - {} - {}",
            part(self.key.manifest),
            part(self.key.window),
            part(self.key.locale)
        )
    }
}
