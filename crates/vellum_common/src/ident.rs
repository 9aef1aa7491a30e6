//! Interned strings for cache-key components.

use lasso::ThreadedRodeo;

/// A manifest id, window id, or locale tag after interning.
///
/// Manifest ids are long URLs; hashing a key built from `Ident`s hashes
/// three `u32`s instead.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Ident(u32);

// SAFETY: `try_from_usize` only yields values that round-trip through
// `into_usize` unchanged.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// Session-lifetime string table behind [`Ident`].
///
/// Interning takes `&self`, so a cache can intern key components while it
/// holds other borrows of itself. Strings are never released.
pub struct Interner {
    strings: ThreadedRodeo<Ident>,
}

impl Interner {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            strings: ThreadedRodeo::new(),
        }
    }

    /// The identifier for `s`, interning it on first sight.
    pub fn get_or_intern(&self, s: &str) -> Ident {
        self.strings.get_or_intern(s)
    }

    /// The string behind `ident`, or `None` if another table issued it.
    pub fn resolve(&self, ident: Ident) -> Option<&str> {
        self.strings.try_resolve(&ident)
    }

    /// Number of distinct strings held.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns `true` if nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_url_resolves_back() {
        let interner = Interner::new();
        let id = interner.get_or_intern("https://example.org/iiif/book1/manifest");
        assert_eq!(
            interner.resolve(id),
            Some("https://example.org/iiif/book1/manifest")
        );
    }

    #[test]
    fn repeated_component_shares_ident() {
        let interner = Interner::new();
        let window = interner.get_or_intern("window-1");
        assert_eq!(interner.get_or_intern("window-1"), window);
        assert_ne!(interner.get_or_intern("window-2"), window);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn foreign_ident_does_not_resolve() {
        let a = Interner::new();
        let b = Interner::new();
        a.get_or_intern("en");
        let fr = a.get_or_intern("fr");
        assert!(b.is_empty());
        assert_eq!(b.resolve(fr), None);
    }
}
