//! Cache behavior: parse counts, composite keys, stale sources, and the
//! fetch lifecycle as seen through derived values.

use serde_json::json;
use vellum_cache::{FetchState, ManifestCache, ManifestRecord, ManifestStore, Query};
use vellum_conformance::{
    language_map, locale, resident_cache, v2_manifest, v2_painted_canvas, v3_canvas, v3_manifest,
};
use vellum_derive::{fields, DeriveContext};

fn bilingual_book() -> serde_json::Value {
    v3_manifest(
        "https://x/book",
        language_map(&[("en", "Book"), ("fr", "Livre")]),
        vec![v3_canvas("c1", 100, 200), v3_canvas("c2", 100, 200)],
    )
}

#[test]
fn unchanged_document_is_parsed_once() {
    let mut cache = resident_cache(vec![bilingual_book()]);
    let ctx = DeriveContext::default();
    let en = locale("en");
    let query = Query::manifest("https://x/book").in_window("w1").with_locale(Some(&en));

    let first = cache.derive::<fields::Title>(&query, &ctx);
    let second = cache.derive::<fields::Title>(&query, &ctx);
    let canvases = cache.derive::<fields::Canvases>(&query, &ctx);
    let canvases_again = cache.derive::<fields::Canvases>(&query, &ctx);

    assert_eq!(first, second);
    assert_eq!(canvases, canvases_again);
    assert_eq!(canvases.len(), 2);
    assert_eq!(cache.stats().parses, 1);
    assert_eq!(cache.stats().hits, 2);
}

#[test]
fn locale_component_changes_title() {
    let mut cache = resident_cache(vec![bilingual_book()]);
    let ctx = DeriveContext::default();
    let (en, fr) = (locale("en"), locale("fr"));
    let title = |cache: &mut ManifestCache, tag| {
        let query = Query::manifest("https://x/book").with_locale(Some(tag));
        cache.derive::<fields::Title>(&query, &ctx)
    };

    assert_eq!(title(&mut cache, &fr).as_deref(), Some("Livre"));
    assert_eq!(title(&mut cache, &en).as_deref(), Some("Book"));
    assert_eq!(title(&mut cache, &fr).as_deref(), Some("Livre"));
    assert_eq!(cache.stats().parses, 2);
    assert_eq!(cache.stats().hits, 1);
}

#[test]
fn window_component_separates_entries() {
    let mut cache = resident_cache(vec![bilingual_book()]);
    let ctx = DeriveContext::default();
    let a = Query::manifest("https://x/book").in_window("a");
    let b = Query::manifest("https://x/book").in_window("b");
    assert_ne!(cache.key(&a), cache.key(&b));
    assert_eq!(cache.derive::<fields::Size>(&a, &ctx), 2);
    assert_eq!(cache.derive::<fields::Size>(&b, &ctx), 2);
    assert_eq!(cache.document_count(), 2);
}

#[test]
fn replaced_document_is_reparsed() {
    let mut cache = resident_cache(vec![bilingual_book()]);
    let ctx = DeriveContext::default();
    let query = Query::manifest("https://x/book");
    assert_eq!(cache.derive::<fields::Size>(&query, &ctx), 2);

    let mut revised = bilingual_book();
    revised["items"] = json!([v3_canvas("c1", 100, 200)]);
    cache
        .store_mut()
        .insert(ManifestRecord::ready("https://x/book", revised));

    assert_eq!(cache.derive::<fields::Size>(&query, &ctx), 1);
    assert_eq!(cache.stats().parses, 2);
    assert!(cache.stats().stale >= 1);
}

#[test]
fn fetch_lifecycle_gates_derivations() {
    let mut store = ManifestStore::new();
    store.insert(ManifestRecord::new("m"));
    let mut cache = ManifestCache::with_store(store);
    let ctx = DeriveContext::default();
    let query = Query::manifest("m");

    let record = cache.store().get("m").unwrap();
    assert!(record.needs_fetch());
    assert_eq!(record.state(), FetchState::NotFetched);

    cache.store_mut().get_mut("m").unwrap().begin_fetch();
    assert!(!cache.store().get("m").unwrap().needs_fetch());
    assert!(cache.derive::<fields::Title>(&query, &ctx).is_none());
    assert_eq!(
        cache.list_item(&query, &ctx).map(|item| item.state),
        Some(FetchState::Fetching)
    );

    cache
        .store_mut()
        .get_mut("m")
        .unwrap()
        .complete(v2_manifest("m", json!("Fetched"), vec![]));
    assert_eq!(cache.derive::<fields::Title>(&query, &ctx).as_deref(), Some("Fetched"));
}

#[test]
fn failed_fetch_reports_error() {
    let mut store = ManifestStore::new();
    store.insert(ManifestRecord::new("m"));
    store.get_mut("m").unwrap().begin_fetch();
    store.get_mut("m").unwrap().fail("404 Not Found");
    let mut cache = ManifestCache::with_store(store);

    let item = cache
        .list_item(&Query::manifest("m"), &DeriveContext::default())
        .unwrap();
    assert_eq!(item.state, FetchState::Failed("404 Not Found".to_string()));
    assert!(item.title.is_none());
    assert!(!cache.store().get("m").unwrap().needs_fetch());
}

#[test]
fn list_item_bundles_summary_fields() {
    let mut manifest = v2_manifest(
        "https://x/atlas",
        json!("Atlas"),
        vec![v2_painted_canvas("c1", "https://img/c1")],
    );
    manifest["logo"] = json!("https://x/logo.png");
    let mut store = ManifestStore::new();
    store.insert(ManifestRecord::ready("https://x/atlas", manifest).with_provider("Map Library"));
    store.show_in_window("w", "https://x/atlas");
    let mut cache = ManifestCache::with_store(store);

    let item = cache
        .list_item(&Query::window("w"), &DeriveContext::default())
        .unwrap();
    assert_eq!(item.manifest_id, "https://x/atlas");
    assert_eq!(item.state, FetchState::Ready);
    assert_eq!(item.title.as_deref(), Some("Atlas"));
    assert_eq!(item.provider.as_deref(), Some("Map Library"));
    assert_eq!(item.logo.as_deref(), Some("https://x/logo.png"));
    assert_eq!(item.size, 1);
    assert!(!item.is_collection);
    assert!(item
        .thumbnail
        .is_some_and(|t| t.url == "https://img/c1/full/,80/0/default.jpg"));
}

#[test]
fn collection_list_item() {
    let collection = json!({
        "@context": "http://iiif.io/api/presentation/3/context.json",
        "id": "https://x/set",
        "type": "Collection",
        "label": {"en": ["Set"]},
        "behavior": "multi-part",
        "items": [
            {"id": "https://x/v1", "type": "Manifest", "label": {"en": ["Volume 1"]}},
            {"id": "https://x/v2", "type": "Manifest"},
            {"id": "https://x/sub", "type": "Collection"}
        ]
    });
    let mut cache = resident_cache(vec![collection]);
    let ctx = DeriveContext::default();
    let query = Query::manifest("https://x/set");

    let item = cache.list_item(&query, &ctx).unwrap();
    assert!(item.is_collection);
    assert!(item.is_multipart);
    assert_eq!(item.size, 3);

    let listing = cache.derive::<fields::Collection>(&query, &ctx).unwrap();
    assert_eq!(listing.total_manifests(), 2);
    assert_eq!(listing.total_collections(), 1);
    assert_eq!(listing.manifests[1].label, "2");
}

#[test]
fn unknown_manifest_has_no_list_item() {
    let mut cache = ManifestCache::new();
    assert!(cache
        .list_item(&Query::manifest("nope"), &DeriveContext::default())
        .is_none());
    assert!(cache
        .derive::<fields::Behaviors>(&Query::window("nowhere"), &DeriveContext::default())
        .is_empty());
}
