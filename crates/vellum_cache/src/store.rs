//! The table of fetch records and the window → manifest mapping.

use std::collections::HashMap;

use crate::key::Query;
use crate::record::ManifestRecord;

/// All fetch records known to a session.
#[derive(Debug, Default)]
pub struct ManifestStore {
    records: HashMap<String, ManifestRecord>,
    windows: HashMap<String, String>,
}

impl ManifestStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a record, keyed by its id.
    pub fn insert(&mut self, record: ManifestRecord) {
        self.records.insert(record.id.clone(), record);
    }

    /// Returns the record for `manifest_id`, creating a not-fetched one if
    /// the manifest has not been referenced before.
    pub fn reference(&mut self, manifest_id: &str) -> &mut ManifestRecord {
        self.records
            .entry(manifest_id.to_string())
            .or_insert_with(|| ManifestRecord::new(manifest_id))
    }

    /// Looks up a record by manifest id.
    pub fn get(&self, manifest_id: &str) -> Option<&ManifestRecord> {
        self.records.get(manifest_id)
    }

    /// Mutable lookup by manifest id.
    pub fn get_mut(&mut self, manifest_id: &str) -> Option<&mut ManifestRecord> {
        self.records.get_mut(manifest_id)
    }

    /// Records which manifest a window displays.
    pub fn show_in_window(&mut self, window_id: impl Into<String>, manifest_id: impl Into<String>) {
        self.windows.insert(window_id.into(), manifest_id.into());
    }

    /// The manifest a window displays.
    pub fn window_manifest(&self, window_id: &str) -> Option<&str> {
        self.windows.get(window_id).map(String::as_str)
    }

    /// Resolves the manifest id a query is about: the explicit manifest id,
    /// else the manifest of the query's window.
    pub fn manifest_id_for<'a>(&'a self, query: &Query<'a>) -> Option<&'a str> {
        query
            .manifest_id
            .or_else(|| query.window_id.and_then(|w| self.window_manifest(w)))
    }

    /// The record a query is about.
    pub fn record_for(&self, query: &Query<'_>) -> Option<&ManifestRecord> {
        self.manifest_id_for(query).and_then(|id| self.get(id))
    }

    /// Returns `true` if some window displays `manifest_id`.
    pub fn is_shown(&self, manifest_id: &str) -> bool {
        self.windows.values().any(|m| m == manifest_id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
