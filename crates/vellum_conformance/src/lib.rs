//! Conformance test helpers for Vellum.
//!
//! Builds literal IIIF Presentation 2 and 3 documents and wires them through
//! the parser, the derivations and the manifest cache so the integration
//! tests can assert on observable behavior with small fixtures.

#![warn(missing_docs)]

use std::sync::Arc;

use serde_json::{json, Map, Value};
use vellum_cache::{ManifestCache, ManifestRecord, ManifestStore};
use vellum_common::LocaleTag;
use vellum_manifest::Document;

/// Image API 2 context, used on fixture image services.
pub const IMAGE_2_CONTEXT: &str = "http://iiif.io/api/image/2/context.json";

/// Parses a locale tag literal.
pub fn locale(tag: &str) -> LocaleTag {
    tag.parse().expect("fixture locale tag")
}

/// Wraps a fixture document for an optional locale.
pub fn document(value: Value, locale: Option<&str>) -> Document {
    Document::new(Arc::new(value), locale.map(self::locale)).expect("fixture is an object")
}

/// A v3 language map: `{"en": ["Book"], "fr": ["Livre"]}`.
pub fn language_map(entries: &[(&str, &str)]) -> Value {
    let mut map = Map::new();
    for (lang, text) in entries {
        map.insert((*lang).to_string(), json!([text]));
    }
    Value::Object(map)
}

/// A v2 multi-language value: a list of `@value`/`@language` objects.
pub fn v2_language_list(entries: &[(&str, &str)]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|(lang, text)| json!({"@value": text, "@language": lang}))
            .collect(),
    )
}

/// An Image API 2 service block.
pub fn image_service(id: &str) -> Value {
    json!({
        "@context": IMAGE_2_CONTEXT,
        "@id": id,
        "profile": "http://iiif.io/api/image/2/level1.json"
    })
}

/// A v2 canvas with dimensions and no image.
pub fn v2_canvas(id: &str, width: u32, height: u32) -> Value {
    json!({"@id": id, "@type": "sc:Canvas", "label": id, "width": width, "height": height})
}

/// A v2 canvas painted with one image backed by an image service.
pub fn v2_painted_canvas(id: &str, service_id: &str) -> Value {
    let mut canvas = v2_canvas(id, 2000, 1000);
    canvas["images"] = json!([{
        "@type": "oa:Annotation",
        "motivation": "sc:painting",
        "resource": {
            "@id": format!("{service_id}/full/full/0/default.jpg"),
            "@type": "dctypes:Image",
            "service": image_service(service_id)
        },
        "on": id
    }]);
    canvas
}

/// A v2 manifest with one sequence holding `canvases`.
pub fn v2_manifest(id: &str, label: Value, canvases: Vec<Value>) -> Value {
    json!({
        "@context": "http://iiif.io/api/presentation/2/context.json",
        "@id": id,
        "@type": "sc:Manifest",
        "label": label,
        "sequences": [{"@type": "sc:Sequence", "canvases": canvases}]
    })
}

/// A v3 canvas with dimensions and no image.
pub fn v3_canvas(id: &str, width: u32, height: u32) -> Value {
    json!({"id": id, "type": "Canvas", "width": width, "height": height})
}

/// A v3 canvas painted with one image backed by an image service.
pub fn v3_painted_canvas(id: &str, service_id: &str) -> Value {
    let mut canvas = v3_canvas(id, 2000, 1000);
    canvas["items"] = json!([{
        "id": format!("{id}/page"),
        "type": "AnnotationPage",
        "items": [{
            "id": format!("{id}/page/a1"),
            "type": "Annotation",
            "motivation": "painting",
            "target": id,
            "body": {
                "id": format!("{service_id}/full/max/0/default.jpg"),
                "type": "Image",
                "service": [{"id": service_id, "type": "ImageService2",
                             "profile": "level1"}]
            }
        }]
    }]);
    canvas
}

/// A v3 manifest holding `canvases` as its items.
pub fn v3_manifest(id: &str, label: Value, canvases: Vec<Value>) -> Value {
    json!({
        "@context": "http://iiif.io/api/presentation/3/context.json",
        "id": id,
        "type": "Manifest",
        "label": label,
        "items": canvases
    })
}

/// A cache over fetch records that are all resident.
pub fn resident_cache(manifests: Vec<Value>) -> ManifestCache {
    let mut store = ManifestStore::new();
    for manifest in manifests {
        let id = manifest
            .get("id")
            .or_else(|| manifest.get("@id"))
            .and_then(Value::as_str)
            .expect("fixture manifest has an id")
            .to_string();
        store.insert(ManifestRecord::ready(id, manifest));
    }
    ManifestCache::with_store(store)
}
