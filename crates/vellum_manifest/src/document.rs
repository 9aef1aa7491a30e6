//! The version-normalized document.
//!
//! [`Document`] is a tagged union over the two Presentation API schemas.
//! Questions whose answer lives in different places per version (the
//! description, the required statement, providers, canvases, child
//! resources, structures) are answered by [`V2Document`] and [`V3Document`]
//! and dispatched by [`Document`]; everything else is answered once, on the
//! shared raw JSON.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use vellum_common::LocaleTag;

use crate::canvas::{Canvas, Sequence};
use crate::collection::{self, ChildKind, ChildResource};
use crate::json;
use crate::language::{LabelValue, LanguageValue};
use crate::resource::{Agent, ImageRef, LinkedResource};
use crate::service::{self, Service};
use crate::structure::{self, RangeNode};
use crate::version::IiifVersion;

/// A Presentation 2 document.
#[derive(Debug, Clone)]
pub struct V2Document {
    json: Arc<Value>,
    locale: Option<LocaleTag>,
}

/// A Presentation 3 document.
#[derive(Debug, Clone)]
pub struct V3Document {
    json: Arc<Value>,
    locale: Option<LocaleTag>,
}

/// A parsed manifest or collection, tagged with its Presentation version.
#[derive(Debug, Clone)]
pub enum Document {
    /// Presentation API 2.x.
    V2(V2Document),
    /// Presentation API 3.0.
    V3(V3Document),
}

macro_rules! dispatch {
    ($self:expr, $doc:ident => $body:expr) => {
        match $self {
            Document::V2($doc) => $body,
            Document::V3($doc) => $body,
        }
    };
}

impl V2Document {
    /// The raw document.
    pub fn json(&self) -> &Arc<Value> {
        &self.json
    }

    /// The locale the document was parsed for.
    pub fn locale(&self) -> Option<&LocaleTag> {
        self.locale.as_ref()
    }

    fn description(&self) -> LanguageValue {
        LanguageValue::parse(json::get(&self.json, "description"))
    }

    /// v2 has a bare `attribution`; it becomes one pair with an empty label.
    fn required_statements(&self) -> Vec<LabelValue> {
        json::get(&self.json, "attribution")
            .map(|attribution| {
                vec![LabelValue {
                    label: LanguageValue::default(),
                    value: LanguageValue::parse(Some(attribution)),
                }]
            })
            .unwrap_or_default()
    }

    fn providers(&self) -> Vec<Agent> {
        Vec::new()
    }

    fn sequences(&self) -> Vec<Sequence<'_>> {
        json::list(&self.json, "sequences")
            .iter()
            .filter(|s| s.is_object())
            .map(|s| Sequence::from_v2(s, self.locale.as_ref()))
            .collect()
    }
}

impl V3Document {
    /// The raw document.
    pub fn json(&self) -> &Arc<Value> {
        &self.json
    }

    /// The locale the document was parsed for.
    pub fn locale(&self) -> Option<&LocaleTag> {
        self.locale.as_ref()
    }

    fn description(&self) -> LanguageValue {
        LanguageValue::parse(json::get(&self.json, "summary"))
    }

    fn required_statements(&self) -> Vec<LabelValue> {
        json::list(&self.json, "requiredStatement")
            .iter()
            .filter(|s| s.is_object())
            .map(LabelValue::from_json)
            .collect()
    }

    fn providers(&self) -> Vec<Agent> {
        json::list(&self.json, "provider")
            .iter()
            .filter_map(Agent::from_json)
            .collect()
    }

    fn sequences(&self) -> Vec<Sequence<'_>> {
        if json::has_type(&self.json, "Collection") {
            return Vec::new();
        }
        vec![Sequence::from_v3_items(&self.json, self.locale.as_ref())]
    }
}

impl Document {
    /// Wraps a raw document. Returns `None` unless it is a JSON object.
    pub fn new(json: Arc<Value>, locale: Option<LocaleTag>) -> Option<Document> {
        if !json.is_object() {
            debug!(kind = json::kind_name(&json), "not a manifest document");
            return None;
        }
        let version = IiifVersion::detect(&json);
        debug!(
            %version,
            id = json::id_of(&json).unwrap_or_default(),
            locale = locale.as_ref().map(LocaleTag::as_str).unwrap_or_default(),
            "wrapped manifest document"
        );
        Some(match version {
            IiifVersion::V2 => Document::V2(V2Document { json, locale }),
            IiifVersion::V3 => Document::V3(V3Document { json, locale }),
        })
    }

    /// The Presentation version this document follows.
    pub fn version(&self) -> IiifVersion {
        match self {
            Document::V2(_) => IiifVersion::V2,
            Document::V3(_) => IiifVersion::V3,
        }
    }

    /// The locale the document was parsed for.
    pub fn locale(&self) -> Option<&LocaleTag> {
        dispatch!(self, d => d.locale())
    }

    /// The shared raw document.
    pub fn json(&self) -> &Arc<Value> {
        dispatch!(self, d => d.json())
    }

    /// The document's `id`/`@id`.
    pub fn id(&self) -> Option<&str> {
        json::str_field(self.json(), "id")
    }

    /// Looks up a raw top-level property, accepting its `@` keyword form.
    pub fn property(&self, name: &str) -> Option<&Value> {
        json::get(self.json(), name)
    }

    /// The `label`.
    pub fn label(&self) -> LanguageValue {
        LanguageValue::parse(self.property("label"))
    }

    /// The v2 `description` or v3 `summary`.
    pub fn description(&self) -> LanguageValue {
        dispatch!(self, d => d.description())
    }

    /// The v3 `requiredStatement` pairs, or the v2 `attribution` as a pair
    /// with an empty label.
    pub fn required_statements(&self) -> Vec<LabelValue> {
        dispatch!(self, d => d.required_statements())
    }

    /// The top-level `metadata` pairs, unfiltered.
    pub fn metadata(&self) -> Vec<LabelValue> {
        json::list(self.json(), "metadata")
            .iter()
            .filter(|m| m.is_object())
            .map(LabelValue::from_json)
            .collect()
    }

    /// Services embedded under `service`, plus the v3 top-level `services`.
    pub fn services(&self) -> Vec<Service> {
        let mut services = Service::list(self.json());
        if self.version() == IiifVersion::V3 {
            services.extend(
                json::list(self.json(), "services")
                    .iter()
                    .filter_map(Service::from_json),
            );
        }
        services
    }

    /// The first embedded service declaring the capability `uri`.
    pub fn service(&self, uri: &str) -> Option<Service> {
        service::find(&self.services(), uri).cloned()
    }

    /// The document's own `thumbnail`.
    pub fn thumbnail(&self) -> Option<ImageRef> {
        ImageRef::first_of(self.property("thumbnail"))
    }

    /// The document's own `logo`, else the first logo of a v3 provider.
    pub fn logo(&self) -> Option<ImageRef> {
        ImageRef::first_of(self.property("logo"))
            .or_else(|| self.providers().into_iter().find_map(|p| p.logo))
    }

    /// The v3 `provider` agents. Always empty for v2.
    pub fn providers(&self) -> Vec<Agent> {
        dispatch!(self, d => d.providers())
    }

    /// Links under a linking property (`homepage`, `seeAlso`, `rendering`).
    pub fn links(&self, name: &str) -> Vec<LinkedResource> {
        LinkedResource::list(self.property(name))
    }

    /// The canvas containers: v2 `sequences`, or the one sequence
    /// synthesized from v3 `items`.
    pub fn sequences(&self) -> Vec<Sequence<'_>> {
        dispatch!(self, d => d.sequences())
    }

    /// The first canvas container.
    pub fn sequence(&self) -> Option<Sequence<'_>> {
        self.sequences().into_iter().next()
    }

    /// The canvases of the first sequence; empty when there is none.
    pub fn canvases(&self) -> Vec<Canvas<'_>> {
        self.sequence()
            .map(|s| s.canvases().to_vec())
            .unwrap_or_default()
    }

    /// Picks the canvas a viewer should open on.
    ///
    /// An explicit index wins, and an out-of-range index yields `None`.
    /// Otherwise the first declared of the sequence's `startCanvas`, the
    /// document's `start`, or the sequence's `start` is resolved against the
    /// canvas ids. A declared reference that matches nothing yields `None`;
    /// later declarations are not consulted.
    pub fn start_canvas(&self, explicit_index: Option<usize>) -> Option<Canvas<'_>> {
        let sequence = self.sequence()?;
        if let Some(index) = explicit_index {
            return sequence.canvas_by_index(index);
        }
        let candidates = [
            sequence.property("startCanvas"),
            self.property("start"),
            sequence.property("start"),
        ];
        let declared = candidates.into_iter().flatten().next()?;
        start_target(declared).and_then(|id| sequence.canvas_by_id(id))
    }

    /// The `behavior` values, as a list whatever the source shape.
    pub fn behaviors(&self) -> Vec<&str> {
        json::strings(self.json(), "behavior")
    }

    /// The document's own `viewingHint`.
    pub fn viewing_hint(&self) -> Option<&str> {
        json::str_field(self.json(), "viewingHint")
    }

    /// The document's own `viewingDirection`.
    pub fn viewing_direction(&self) -> Option<&str> {
        json::str_field(self.json(), "viewingDirection")
    }

    /// Returns `true` if the document is a collection.
    pub fn is_collection(&self) -> bool {
        json::has_type(self.json(), "Collection")
    }

    /// Child collections listed by a collection document.
    pub fn collections(&self) -> Vec<ChildResource> {
        collection::children(self.json(), self.version(), ChildKind::Collection)
    }

    /// Child manifests listed by a collection document.
    pub fn manifests(&self) -> Vec<ChildResource> {
        collection::children(self.json(), self.version(), ChildKind::Manifest)
    }

    /// The range tree from `structures`.
    pub fn structures(&self) -> Vec<RangeNode> {
        structure::build(json::list(self.json(), "structures"), self.version())
    }
}

/// Reads the canvas id a `start`/`startCanvas` value points at: a bare id,
/// a canvas reference, or a specific resource with a `source`.
fn start_target(value: &Value) -> Option<&str> {
    match json::get(value, "source") {
        Some(source) => json::id_of(source),
        None => json::id_of(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document::new(Arc::new(value), None).unwrap()
    }

    fn v2_manifest() -> Document {
        doc(json!({
            "@context": "http://iiif.io/api/presentation/2/context.json",
            "@id": "https://example.org/iiif/book1/manifest",
            "@type": "sc:Manifest",
            "label": "Book 1",
            "description": "A book",
            "attribution": "Provided by Example Organization",
            "license": "https://creativecommons.org/publicdomain/zero/1.0/",
            "logo": {"@id": "https://example.org/logos/logo.png"},
            "viewingHint": "paged",
            "metadata": [{"label": "Author", "value": "Anne Author"}],
            "service": {"@id": "https://example.org/search", "profile": "http://iiif.io/api/search/0/search"},
            "sequences": [{
                "@type": "sc:Sequence",
                "viewingDirection": "left-to-right",
                "startCanvas": "c2",
                "canvases": [{"@id": "c1"}, {"@id": "c2"}, {"@id": "c3"}]
            }],
            "structures": [{"@id": "r1", "@type": "sc:Range", "canvases": ["c1"]}]
        }))
    }

    fn v3_manifest() -> Document {
        doc(json!({
            "@context": "http://iiif.io/api/presentation/3/context.json",
            "id": "https://example.org/iiif/book1/manifest",
            "type": "Manifest",
            "label": {"en": ["Book 1"]},
            "summary": {"en": ["A book"]},
            "requiredStatement": {"label": {"en": ["Attribution"]}, "value": {"en": ["Example"]}},
            "behavior": "paged",
            "provider": [{
                "id": "https://example.org/about",
                "type": "Agent",
                "label": {"en": ["Example Organization"]},
                "logo": [{"id": "https://example.org/logo.png", "type": "Image"}]
            }],
            "start": {"type": "SpecificResource", "source": {"id": "c3", "type": "Canvas"}},
            "items": [
                {"id": "c1", "type": "Canvas"},
                {"id": "c2", "type": "Canvas"},
                {"id": "c3", "type": "Canvas"}
            ],
            "services": [{"id": "https://example.org/search", "type": "SearchService1"}]
        }))
    }

    #[test]
    fn rejects_non_objects() {
        assert!(Document::new(Arc::new(json!("x")), None).is_none());
        assert!(Document::new(Arc::new(Value::Null), None).is_none());
    }

    #[test]
    fn version_and_id() {
        assert_eq!(v2_manifest().version(), IiifVersion::V2);
        assert_eq!(v3_manifest().version(), IiifVersion::V3);
        assert_eq!(v2_manifest().id(), Some("https://example.org/iiif/book1/manifest"));
    }

    #[test]
    fn label_and_description_per_version() {
        for d in [v2_manifest(), v3_manifest()] {
            assert_eq!(d.label().first(None).as_deref(), Some("Book 1"));
            assert_eq!(d.description().first(None).as_deref(), Some("A book"));
        }
    }

    #[test]
    fn v2_attribution_is_unlabelled_pair() {
        let statements = v2_manifest().required_statements();
        assert_eq!(statements.len(), 1);
        assert!(statements[0].label.is_empty());
        assert_eq!(
            statements[0].value.first(None).as_deref(),
            Some("Provided by Example Organization")
        );
    }

    #[test]
    fn v3_required_statement() {
        let statements = v3_manifest().required_statements();
        assert_eq!(statements[0].label.first(None).as_deref(), Some("Attribution"));
    }

    #[test]
    fn logo_sources() {
        assert_eq!(v2_manifest().logo().unwrap().id, "https://example.org/logos/logo.png");
        assert_eq!(v3_manifest().logo().unwrap().id, "https://example.org/logo.png");
        assert!(v2_manifest().providers().is_empty());
    }

    #[test]
    fn services_in_both_places() {
        use crate::service::capability;
        assert!(v2_manifest().service(capability::SEARCH_0).is_some());
        assert!(v3_manifest().service(capability::SEARCH_1).is_some());
        assert!(v3_manifest().service(capability::SEARCH_0).is_none());
    }

    #[test]
    fn canvases_from_either_shape() {
        assert_eq!(v2_manifest().canvases().len(), 3);
        assert_eq!(v3_manifest().canvases().len(), 3);
        assert!(doc(json!({"@id": "empty"})).canvases().is_empty());
        assert!(doc(json!({"@id": "empty"})).sequence().is_none());
    }

    #[test]
    fn start_canvas_chain() {
        let v2 = v2_manifest();
        assert_eq!(v2.start_canvas(None).unwrap().id(), Some("c2"));
        assert_eq!(v2.start_canvas(Some(0)).unwrap().id(), Some("c1"));
        assert!(v2.start_canvas(Some(9)).is_none());

        let v3 = v3_manifest();
        assert_eq!(v3.start_canvas(None).unwrap().id(), Some("c3"));
    }

    #[test]
    fn start_canvas_unmatched() {
        let d = doc(json!({
            "@id": "m",
            "sequences": [{"startCanvas": "nope", "canvases": [{"@id": "c1"}]}]
        }));
        assert!(d.start_canvas(None).is_none());

        let shadowed = doc(json!({
            "@id": "m",
            "start": {"@id": "c1"},
            "sequences": [{"startCanvas": "nope", "canvases": [{"@id": "c1"}]}]
        }));
        assert!(shadowed.start_canvas(None).is_none());
    }

    #[test]
    fn hints_and_behaviors() {
        assert_eq!(v2_manifest().viewing_hint(), Some("paged"));
        assert_eq!(v3_manifest().behaviors(), vec!["paged"]);
        assert!(v2_manifest().behaviors().is_empty());
        assert!(v2_manifest().viewing_direction().is_none());
    }

    #[test]
    fn collection_members() {
        let c = doc(json!({
            "id": "coll",
            "type": "Collection",
            "items": [{"id": "m1", "type": "Manifest"}, {"id": "c1", "type": "Collection"}]
        }));
        assert!(c.is_collection());
        assert_eq!(c.manifests().len(), 1);
        assert_eq!(c.collections().len(), 1);
        assert!(c.canvases().is_empty());
        assert!(!v3_manifest().is_collection());
    }

    #[test]
    fn structures_and_metadata() {
        let d = v2_manifest();
        assert_eq!(d.structures().len(), 1);
        assert_eq!(d.metadata().len(), 1);
        assert!(v3_manifest().structures().is_empty());
    }

    #[test]
    fn missing_label_does_not_affect_metadata() {
        let d = doc(json!({"@id": "m", "metadata": [{"label": "k", "value": "v"}]}));
        assert!(d.label().is_empty());
        assert_eq!(d.metadata().len(), 1);
    }
}
