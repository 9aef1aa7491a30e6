//! Shared foundational types used across the Vellum manifest toolkit.
//!
//! This crate provides interned identifiers for cache-key composition,
//! context fingerprints, and language-tag helpers used by locale negotiation.

#![warn(missing_docs)]

pub mod fingerprint;
pub mod ident;
pub mod locale;

pub use fingerprint::{Fingerprint, Fingerprinter};
pub use ident::{Ident, Interner};
pub use locale::{primary_subtag, LocaleTag, ParseLocaleError};
