//! Parsing of IIIF Presentation manifests into a version-normalized model.
//!
//! A raw JSON-LD document (Presentation API 2 or 3) is wrapped into a
//! [`Document`]: a tagged union over the two versions that answers the same
//! questions (label, services, canvases, structures, child resources) with
//! the same return shapes regardless of which schema the document uses.
//!
//! Nothing in this crate fails on a schema problem. A missing or oddly
//! shaped property yields `None` or an empty list for that property alone;
//! only [`parse_str`] reports errors, and only for text that is not a JSON
//! object at all.
//!
//! Language-tagged values are parsed into [`LanguageValue`] and resolved
//! against a requested locale by [`LanguageValue::resolve`].

#![warn(missing_docs)]

pub mod canvas;
pub mod collection;
pub mod document;
pub mod error;
pub mod json;
pub mod language;
pub mod resource;
pub mod service;
pub mod structure;
pub mod version;

use std::sync::Arc;

use serde_json::Value;
use vellum_common::LocaleTag;

pub use canvas::{Canvas, Sequence};
pub use collection::{ChildKind, ChildResource};
pub use document::{Document, V2Document, V3Document};
pub use error::ManifestError;
pub use language::{resolve, LabelValue, LanguageString, LanguageValue, VALUE_SEPARATOR};
pub use resource::{Agent, ImageRef, LinkedResource};
pub use service::{capability, Service};
pub use structure::RangeNode;
pub use version::IiifVersion;

/// Wraps a raw manifest document for the given locale.
///
/// Returns `None` when there is nothing to wrap: the document has not been
/// fetched yet (`json` is `None`), is JSON `null`, or is not an object.
pub fn parse(json: Option<Arc<Value>>, locale: Option<&LocaleTag>) -> Option<Document> {
    json.and_then(|json| Document::new(json, locale.cloned()))
}

/// Parses manifest text and wraps it for the given locale.
pub fn parse_str(text: &str, locale: Option<&LocaleTag>) -> Result<Document, ManifestError> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(ManifestError::NotAnObject {
            found: json::kind_name(&value),
        });
    }
    Document::new(Arc::new(value), locale.cloned()).ok_or(ManifestError::NotAnObject {
        found: "object",
    })
}
