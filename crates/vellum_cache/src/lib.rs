//! Fetch records and memoized manifest derivations.
//!
//! [`ManifestStore`] holds one [`ManifestRecord`] per referenced manifest
//! plus which manifest each window shows. [`ManifestCache`] answers
//! [`Query`]s against that store: it parses a resident document once per
//! composite [`CacheKey`] (manifest, window, locale) and memoizes every
//! [`Derivation`](vellum_derive::Derivation) under that key.
//!
//! Nothing here fails. A query about a manifest that is unknown, still
//! fetching, or failed yields each field's absent value, and the record's
//! [`FetchState`] tells the caller which of those it is.

#![warn(missing_docs)]

pub mod cache;
pub mod key;
pub mod list;
pub mod record;
pub mod store;

pub use cache::{CacheStats, ManifestCache};
pub use key::{CacheKey, KeyDisplay, Query};
pub use list::ListItem;
pub use record::{FetchState, ManifestRecord};
pub use store::ManifestStore;
