//! Fingerprints of derivation inputs that live outside the cache key.

use serde::{Deserialize, Serialize};
use std::fmt;
use xxhash_rust::xxh3::Xxh3;

/// A 64-bit XXH3 fingerprint of the auxiliary inputs to a derivation.
///
/// The composite cache key names *which* document and context a value belongs
/// to. Some derivations also read small side inputs (an explicit canvas index,
/// a configured thumbnail height, a provider override from the fetch record).
/// Those are folded into a `Fingerprint` so that a change in any of them is a
/// distinct memo entry rather than a stale hit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// The fingerprint of "no auxiliary inputs".
    pub const EMPTY: Fingerprint = Fingerprint(0);
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({:08x}..)", self.0 >> 32)
    }
}

/// Incremental builder for a [`Fingerprint`].
///
/// Every field is written with a one-byte tag so that `None` and an empty
/// string, or two adjacent strings split differently, never collide.
pub struct Fingerprinter {
    state: Xxh3,
    fields: usize,
}

impl Fingerprinter {
    /// Starts an empty fingerprint.
    pub fn new() -> Self {
        Self {
            state: Xxh3::new(),
            fields: 0,
        }
    }

    /// Adds an optional string field.
    pub fn str(mut self, value: Option<&str>) -> Self {
        match value {
            Some(s) => {
                self.state.update(&[1]);
                self.state.update(&(s.len() as u64).to_le_bytes());
                self.state.update(s.as_bytes());
            }
            None => self.state.update(&[0]),
        }
        self.fields += 1;
        self
    }

    /// Adds an optional unsigned integer field.
    pub fn num(mut self, value: Option<u64>) -> Self {
        match value {
            Some(n) => {
                self.state.update(&[1]);
                self.state.update(&n.to_le_bytes());
            }
            None => self.state.update(&[0]),
        }
        self.fields += 1;
        self
    }

    /// Adds a boolean field.
    pub fn flag(mut self, value: bool) -> Self {
        self.state.update(&[2, u8::from(value)]);
        self.fields += 1;
        self
    }

    /// Finishes the fingerprint. A builder with no fields yields
    /// [`Fingerprint::EMPTY`].
    pub fn finish(self) -> Fingerprint {
        if self.fields == 0 {
            Fingerprint::EMPTY
        } else {
            Fingerprint(self.state.digest())
        }
    }
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new()
    }
}
