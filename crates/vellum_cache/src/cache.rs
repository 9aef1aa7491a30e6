//! Memoized parsing and derivation.
//!
//! Two tables, both keyed by [`CacheKey`]:
//!
//! - parsed documents, so a `(manifest, window, locale)` triple parses its
//!   raw JSON once;
//! - derived values, keyed additionally by the derivation and the
//!   fingerprint of its [`DeriveContext`].
//!
//! Each entry remembers the raw document it was computed from. A lookup is a
//! hit only if the record still holds that same document (pointer equality
//! on the shared JSON); otherwise the entry is recomputed in place. Entries
//! are never evicted.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};
use vellum_common::{Fingerprint, Interner};
use vellum_derive::{fields, Derivation, DeriveContext};
use vellum_manifest::Document;

use crate::key::{CacheKey, Query};
use crate::list::ListItem;
use crate::store::ManifestStore;

/// Counters for observing cache behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Documents parsed from raw JSON.
    pub parses: u64,
    /// Derivations answered from the memo table.
    pub hits: u64,
    /// Derivations computed.
    pub misses: u64,
    /// Entries recomputed because their source document changed.
    pub stale: u64,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} parses, {} hits, {} misses, {} stale",
            self.parses, self.hits, self.misses, self.stale
        )
    }
}

struct DocumentEntry {
    source: Arc<Value>,
    document: Document,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct MemoKey {
    derivation: TypeId,
    key: CacheKey,
    context: Fingerprint,
}

struct MemoEntry {
    source: Arc<Value>,
    value: Box<dyn Any>,
}

/// The session-wide manifest cache.
#[derive(Default)]
pub struct ManifestCache {
    store: ManifestStore,
    interner: Interner,
    documents: HashMap<CacheKey, DocumentEntry>,
    memo: HashMap<MemoKey, MemoEntry>,
    stats: CacheStats,
}

impl ManifestCache {
    /// Creates an empty cache with an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache over existing fetch records.
    pub fn with_store(store: ManifestStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    /// The fetch records.
    pub fn store(&self) -> &ManifestStore {
        &self.store
    }

    /// Mutable access to the fetch records, for the fetch collaborator.
    pub fn store_mut(&mut self) -> &mut ManifestStore {
        &mut self.store
    }

    /// Counters since creation.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of parsed documents held.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of memoized derived values held.
    pub fn memo_count(&self) -> usize {
        self.memo.len()
    }

    /// The composite key for a query.
    pub fn key(&self, query: &Query<'_>) -> CacheKey {
        CacheKey::compose(&self.interner, query)
    }

    fn source(&self, query: &Query<'_>) -> Option<Arc<Value>> {
        self.store.record_for(query).and_then(|r| r.json.clone())
    }

    /// The parsed document for a query, parsing at most once per key and
    /// source document. `None` while the document is not resident or when
    /// it is not a JSON object.
    pub fn document(&mut self, query: &Query<'_>) -> Option<Document> {
        let source = self.source(query)?;
        let key = self.key(query);
        if let Some(entry) = self.documents.get(&key) {
            if Arc::ptr_eq(&entry.source, &source) {
                return Some(entry.document.clone());
            }
            self.stats.stale += 1;
            debug!(key = %key.display(&self.interner), "source document changed; reparsing");
        }

        let document = Document::new(Arc::clone(&source), query.locale.cloned())?;
        self.stats.parses += 1;
        debug!(
            key = %key.display(&self.interner),
            version = %document.version(),
            "parsed manifest"
        );
        self.documents.insert(
            key,
            DocumentEntry {
                source,
                document: document.clone(),
            },
        );
        Some(document)
    }

    /// Derives one field for a query, answering from the memo table when the
    /// same key, context and source document were seen before.
    ///
    /// Without a resident document the field's absent value is returned. A
    /// provider override on the fetch record fills the context's override
    /// when the caller did not set one.
    pub fn derive<D: Derivation>(&mut self, query: &Query<'_>, ctx: &DeriveContext) -> D::Output {
        let Some(source) = self.source(query) else {
            trace!(field = D::NAME, "no resident document");
            return D::absent();
        };
        let ctx = self.effective_context(query, ctx);
        let memo_key = MemoKey {
            derivation: TypeId::of::<D>(),
            key: self.key(query),
            context: ctx.fingerprint(),
        };

        if let Some(entry) = self.memo.get(&memo_key) {
            if Arc::ptr_eq(&entry.source, &source) {
                if let Some(value) = entry.value.downcast_ref::<D::Output>() {
                    self.stats.hits += 1;
                    trace!(field = D::NAME, "memo hit");
                    return value.clone();
                }
            } else {
                self.stats.stale += 1;
            }
        }

        let Some(document) = self.document(query) else {
            return D::absent();
        };
        let value = D::derive(&document, &ctx);
        self.stats.misses += 1;
        trace!(
            field = D::NAME,
            key = %memo_key.key.display(&self.interner),
            context = %memo_key.context,
            "memo miss"
        );
        self.memo.insert(
            memo_key,
            MemoEntry {
                source,
                value: Box::new(value.clone()),
            },
        );
        value
    }

    fn effective_context(&self, query: &Query<'_>, ctx: &DeriveContext) -> DeriveContext {
        if ctx.provider_override.is_some() {
            return ctx.clone();
        }
        let provider = self.store.record_for(query).and_then(|r| r.provider.clone());
        ctx.clone().with_provider(provider)
    }

    /// The summary a manifest list shows for one entry.
    pub fn list_item(&mut self, query: &Query<'_>, ctx: &DeriveContext) -> Option<ListItem> {
        let record = self.store.record_for(query)?;
        let manifest_id = record.id.clone();
        let state = record.state();
        let active = self.store.is_shown(&manifest_id);

        let is_collection = self.derive::<fields::IsCollection>(query, ctx);
        Some(ListItem {
            manifest_id,
            state,
            active,
            title: self.derive::<fields::Title>(query, ctx),
            thumbnail: self.derive::<fields::Thumbnail>(query, ctx),
            logo: self.derive::<fields::Logo>(query, ctx),
            provider: self.derive::<fields::Provider>(query, ctx),
            size: self.derive::<fields::Size>(query, ctx),
            is_collection,
            is_multipart: is_collection && self.derive::<fields::IsMultipart>(query, ctx),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ManifestRecord;
    use serde_json::json;
    use vellum_common::LocaleTag;

    fn book() -> Value {
        json!({
            "id": "m",
            "type": "Manifest",
            "label": {"en": ["Book"], "fr": ["Livre"]},
            "items": [{"id": "c1", "type": "Canvas"}]
        })
    }

    fn cache_with(record: ManifestRecord) -> ManifestCache {
        let mut store = ManifestStore::new();
        store.insert(record);
        ManifestCache::with_store(store)
    }

    #[test]
    fn repeated_derivation_parses_once() {
        let mut cache = cache_with(ManifestRecord::ready("m", book()));
        let ctx = DeriveContext::default();
        let q = Query::manifest("m");
        let first = cache.derive::<fields::Title>(&q, &ctx);
        let second = cache.derive::<fields::Title>(&q, &ctx);
        assert_eq!(first, second);
        assert_eq!(cache.stats().parses, 1);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn different_fields_share_the_document() {
        let mut cache = cache_with(ManifestRecord::ready("m", book()));
        let ctx = DeriveContext::default();
        let q = Query::manifest("m");
        cache.derive::<fields::Title>(&q, &ctx);
        cache.derive::<fields::Canvases>(&q, &ctx);
        assert_eq!(cache.stats().parses, 1);
        assert_eq!(cache.stats().misses, 2);
        assert_eq!(cache.memo_count(), 2);
    }

    #[test]
    fn locale_is_part_of_the_key() {
        let mut cache = cache_with(ManifestRecord::ready("m", book()));
        let ctx = DeriveContext::default();
        let (en, fr): (LocaleTag, LocaleTag) = ("en".parse().unwrap(), "fr".parse().unwrap());
        let q_en = Query::manifest("m").with_locale(Some(&en));
        let q_fr = Query::manifest("m").with_locale(Some(&fr));
        assert_eq!(cache.derive::<fields::Title>(&q_fr, &ctx).as_deref(), Some("Livre"));
        assert_eq!(cache.derive::<fields::Title>(&q_en, &ctx).as_deref(), Some("Book"));
        assert_eq!(cache.derive::<fields::Title>(&q_fr, &ctx).as_deref(), Some("Livre"));
        assert_eq!(cache.stats().parses, 2);
        assert_eq!(cache.document_count(), 2);
    }

    #[test]
    fn absent_until_resident() {
        let mut cache = cache_with(ManifestRecord::new("m"));
        let ctx = DeriveContext::default();
        let q = Query::manifest("m");
        assert!(cache.derive::<fields::Title>(&q, &ctx).is_none());
        assert!(cache.derive::<fields::Canvases>(&q, &ctx).is_empty());
        assert!(cache.document(&q).is_none());
        assert_eq!(cache.stats(), CacheStats::default());

        cache.store_mut().get_mut("m").unwrap().complete(book());
        assert_eq!(cache.derive::<fields::Title>(&q, &ctx).as_deref(), Some("Book"));
    }

    #[test]
    fn window_query_follows_window_switch() {
        let mut store = ManifestStore::new();
        store.insert(ManifestRecord::ready("a", json!({"@id": "a", "label": "A"})));
        store.insert(ManifestRecord::ready("b", json!({"@id": "b", "label": "B"})));
        store.show_in_window("w", "a");
        let mut cache = ManifestCache::with_store(store);
        let ctx = DeriveContext::default();
        let q = Query::window("w");

        assert_eq!(cache.derive::<fields::Title>(&q, &ctx).as_deref(), Some("A"));
        cache.store_mut().show_in_window("w", "b");
        assert_eq!(cache.derive::<fields::Title>(&q, &ctx).as_deref(), Some("B"));
        assert_eq!(cache.stats().stale, 2);
    }

    #[test]
    fn context_fingerprint_separates_entries() {
        let mut cache = cache_with(ManifestRecord::ready("m", book()));
        let q = Query::manifest("m");
        let first = DeriveContext::default().with_canvas_index(Some(0));
        let none = DeriveContext::default();
        assert_eq!(
            cache.derive::<fields::StartCanvas>(&q, &first).unwrap().id.as_deref(),
            Some("c1")
        );
        assert!(cache.derive::<fields::StartCanvas>(&q, &none).is_none());
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn record_provider_fills_context() {
        let mut cache = cache_with(ManifestRecord::ready("m", book()).with_provider("Library"));
        let q = Query::manifest("m");
        assert_eq!(
            cache.derive::<fields::Provider>(&q, &DeriveContext::default()).as_deref(),
            Some("Library")
        );
    }

    #[test]
    fn non_object_document() {
        let mut cache = cache_with(ManifestRecord::ready("m", json!([1, 2])));
        let q = Query::manifest("m");
        assert!(cache.derive::<fields::Title>(&q, &DeriveContext::default()).is_none());
        assert_eq!(cache.stats().parses, 0);
    }

    #[test]
    fn stats_display() {
        let stats = CacheStats {
            parses: 1,
            hits: 2,
            misses: 3,
            stale: 0,
        };
        assert_eq!(stats.to_string(), "1 parses, 2 hits, 3 misses, 0 stale");
    }
}
