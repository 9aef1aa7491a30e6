//! Manifest fetch records and their lifecycle state.
//!
//! Records are written by whatever performs the fetch. This crate only reads
//! them; the transition helpers here exist so that writer can move a record
//! forward (not fetched → fetching → ready or failed) without ever moving it
//! back.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

/// Where a manifest is in its fetch lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "snake_case")]
pub enum FetchState {
    /// Referenced but no fetch has started.
    NotFetched,
    /// A fetch is in flight.
    Fetching,
    /// The fetch finished with an error.
    Failed(String),
    /// The document is resident.
    Ready,
}

/// The fetch record of one manifest.
#[derive(Debug, Clone, Default)]
pub struct ManifestRecord {
    /// Manifest URI.
    pub id: String,
    /// The fetched document, once resident. Never modified after it is set.
    pub json: Option<Arc<Value>>,
    /// `true` while a fetch is in flight.
    pub is_fetching: bool,
    /// The fetch error, if the fetch failed.
    pub error: Option<String>,
    /// A provider name supplied alongside the manifest reference.
    pub provider: Option<String>,
}

impl ManifestRecord {
    /// A record for a manifest that has only been referenced.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// A record whose document is already resident.
    pub fn ready(id: impl Into<String>, json: Value) -> Self {
        Self {
            id: id.into(),
            json: Some(Arc::new(json)),
            ..Self::default()
        }
    }

    /// Sets the provider override.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// The record's lifecycle state. A resident document wins over a stale
    /// error or in-flight flag.
    pub fn state(&self) -> FetchState {
        if self.json.is_some() {
            FetchState::Ready
        } else if let Some(error) = &self.error {
            FetchState::Failed(error.clone())
        } else if self.is_fetching {
            FetchState::Fetching
        } else {
            FetchState::NotFetched
        }
    }

    /// Returns `true` if a fetch should be requested for this record.
    pub fn needs_fetch(&self) -> bool {
        self.state() == FetchState::NotFetched
    }

    /// Marks the fetch as started. No effect once the record is settled.
    pub fn begin_fetch(&mut self) {
        if self.needs_fetch() {
            self.is_fetching = true;
        }
    }

    /// Stores the fetched document. No effect once the record is settled.
    pub fn complete(&mut self, json: Value) {
        if self.is_settled() {
            return;
        }
        self.json = Some(Arc::new(json));
        self.is_fetching = false;
    }

    /// Records a fetch failure. No effect once the record is settled.
    pub fn fail(&mut self, error: impl Into<String>) {
        if self.is_settled() {
            return;
        }
        self.error = Some(error.into());
        self.is_fetching = false;
    }

    fn is_settled(&self) -> bool {
        matches!(self.state(), FetchState::Ready | FetchState::Failed(_))
    }
}
