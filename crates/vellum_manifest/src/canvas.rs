//! Canvases and the sequence that orders them.
//!
//! Presentation 2 lists canvases under `sequences[0].canvases`; Presentation
//! 3 lists them directly under `items`. [`Sequence`] hides the difference: a
//! v3 document gets a synthesized sequence with no properties of its own.

use serde_json::Value;
use vellum_common::LocaleTag;

use crate::json;
use crate::language::LanguageValue;
use crate::resource::ImageRef;
use crate::version::IiifVersion;

/// A borrowed view of one canvas inside a document.
#[derive(Debug, Clone, Copy)]
pub struct Canvas<'a> {
    json: &'a Value,
    index: usize,
    version: IiifVersion,
    locale: Option<&'a LocaleTag>,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(
        json: &'a Value,
        index: usize,
        version: IiifVersion,
        locale: Option<&'a LocaleTag>,
    ) -> Self {
        Self {
            json,
            index,
            version,
            locale,
        }
    }

    /// Position of this canvas in its sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The raw canvas JSON.
    pub fn json(&self) -> &'a Value {
        self.json
    }

    /// The canvas id, if declared.
    pub fn id(&self) -> Option<&'a str> {
        json::id_of(self.json)
    }

    /// The canvas label.
    pub fn label(&self) -> LanguageValue {
        LanguageValue::parse(json::get(self.json, "label"))
    }

    /// The label resolved for the document locale, if any.
    pub fn display_label(&self) -> Option<String> {
        self.label().first(self.locale)
    }

    /// Declared width in canvas units.
    pub fn width(&self) -> Option<u32> {
        json::u32_field(self.json, "width")
    }

    /// Declared height in canvas units.
    pub fn height(&self) -> Option<u32> {
        json::u32_field(self.json, "height")
    }

    /// The canvas's own thumbnail.
    pub fn thumbnail(&self) -> Option<ImageRef> {
        ImageRef::first_of(json::get(self.json, "thumbnail"))
    }

    /// The image bodies painted onto this canvas, in document order.
    ///
    /// v2 reads `images[].resource`; v3 reads `items[].items[].body`. For a
    /// choice of images only the default (v2) or first (v3) option counts.
    pub fn images(&self) -> Vec<ImageRef> {
        let bodies: Vec<&Value> = match self.version {
            IiifVersion::V2 => json::list(self.json, "images")
                .iter()
                .filter_map(|anno| json::get(anno, "resource"))
                .map(|resource| json::get(resource, "default").unwrap_or(resource))
                .collect(),
            IiifVersion::V3 => json::list(self.json, "items")
                .iter()
                .flat_map(|page| json::list(page, "items"))
                .filter(|anno| {
                    json::str_field(anno, "motivation").map_or(true, |m| m == "painting")
                })
                .flat_map(|anno| json::list(anno, "body"))
                .map(|body| {
                    if json::has_type(body, "Choice") {
                        json::list(body, "items").first().unwrap_or(body)
                    } else {
                        body
                    }
                })
                .filter(|body| json::type_of(body).map_or(true, |t| t == "Image"))
                .collect(),
        };
        bodies.into_iter().filter_map(ImageRef::from_json).collect()
    }

    /// The first painted image that carries an IIIF Image API service.
    pub fn image_with_service(&self) -> Option<ImageRef> {
        self.images()
            .into_iter()
            .find(|img| img.services.iter().any(|s| s.is_image_service()))
    }
}

/// The ordered canvas container of a document.
#[derive(Debug, Clone)]
pub struct Sequence<'a> {
    json: Option<&'a Value>,
    canvases: Vec<Canvas<'a>>,
}

impl<'a> Sequence<'a> {
    /// Wraps a v2 `sequences[n]` object.
    pub(crate) fn from_v2(
        json: &'a Value,
        locale: Option<&'a LocaleTag>,
    ) -> Self {
        let canvases = json::list(json, "canvases")
            .iter()
            .filter(|c| c.is_object())
            .enumerate()
            .map(|(i, c)| Canvas::new(c, i, IiifVersion::V2, locale))
            .collect();
        Self {
            json: Some(json),
            canvases,
        }
    }

    /// Synthesizes a sequence from a v3 document's `items`.
    pub(crate) fn from_v3_items(
        document: &'a Value,
        locale: Option<&'a LocaleTag>,
    ) -> Self {
        let canvases = json::list(document, "items")
            .iter()
            .filter(|c| c.is_object() && json::type_of(c).map_or(true, |t| t == "Canvas"))
            .enumerate()
            .map(|(i, c)| Canvas::new(c, i, IiifVersion::V3, locale))
            .collect();
        Self {
            json: None,
            canvases,
        }
    }

    /// The canvases in order.
    pub fn canvases(&self) -> &[Canvas<'a>] {
        &self.canvases
    }

    /// The canvas at `index`, if in range.
    pub fn canvas_by_index(&self, index: usize) -> Option<Canvas<'a>> {
        self.canvases.get(index).copied()
    }

    /// The first canvas whose id equals `id`.
    pub fn canvas_by_id(&self, id: &str) -> Option<Canvas<'a>> {
        self.canvases.iter().find(|c| c.id() == Some(id)).copied()
    }

    /// Looks up a raw property on the sequence itself. Synthesized
    /// sequences have no properties.
    pub fn property(&self, name: &str) -> Option<&'a Value> {
        self.json.and_then(|json| json::get(json, name))
    }

    /// The viewing hint declared on the sequence.
    pub fn viewing_hint(&self) -> Option<&'a str> {
        self.property("viewingHint").and_then(Value::as_str)
    }

    /// The viewing direction declared on the sequence.
    pub fn viewing_direction(&self) -> Option<&'a str> {
        self.property("viewingDirection").and_then(Value::as_str)
    }
}
