//! Text fields: title, description, statements, metadata, rights, locales.

use serde::Serialize;
use vellum_common::LocaleTag;
use vellum_manifest::{json, Document, LabelValue};

/// A resolved `{label, value}` pair ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelValuePair {
    /// The label, absent when the source pair has none.
    pub label: Option<String>,
    /// The value, with same-language lines joined by `<br/>`.
    pub value: String,
}

impl LabelValuePair {
    fn resolve(pair: &LabelValue, locale: Option<&LocaleTag>) -> Self {
        Self {
            label: pair.label.first(locale).filter(|l| !l.is_empty()),
            value: pair.value.display(locale),
        }
    }
}

/// The most preferred `label` string.
pub fn title(doc: &Document) -> Option<String> {
    doc.label().first(doc.locale())
}

/// The most preferred description (v2) or summary (v3) string.
pub fn description(doc: &Document) -> Option<String> {
    doc.description().first(doc.locale())
}

/// The document's own URI.
pub fn manifest_url(doc: &Document) -> Option<String> {
    doc.id().map(str::to_string)
}

/// The locale the document was parsed for, reduced to its language subtag.
pub fn manifest_locale(doc: &Document) -> Option<LocaleTag> {
    doc.locale().map(LocaleTag::without_region)
}

/// The required statement pairs, without pairs whose value has no text in
/// any language.
pub fn required_statement(doc: &Document) -> Vec<LabelValuePair> {
    doc.required_statements()
        .iter()
        .filter(|pair| pair.value.has_text())
        .map(|pair| LabelValuePair::resolve(pair, doc.locale()))
        .collect()
}

/// Every top-level metadata pair, in document order.
pub fn metadata(doc: &Document) -> Vec<LabelValuePair> {
    doc.metadata()
        .iter()
        .map(|pair| LabelValuePair::resolve(pair, doc.locale()))
        .collect()
}

/// Rights URIs: `rights` when declared, else `license`.
pub fn rights(doc: &Document) -> Vec<String> {
    let uris = |name: &str| -> Vec<String> {
        doc.property(name)
            .map(json::as_slice)
            .unwrap_or(&[])
            .iter()
            .filter_map(json::id_of)
            .filter(|uri| !uri.is_empty())
            .map(str::to_string)
            .collect()
    };
    let rights = uris("rights");
    if rights.is_empty() {
        uris("license")
    } else {
        rights
    }
}

/// Language tags used anywhere in the metadata labels and values, in
/// first-seen order.
///
/// Both `@language` tags and v3 language-map keys count; `none` does not.
pub fn metadata_locales(doc: &Document) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for pair in doc.metadata() {
        for lang in pair.label.languages().into_iter().chain(pair.value.languages()) {
            if !seen.iter().any(|s| s == lang) {
                seen.push(lang.to_string());
            }
        }
    }
    seen
}
