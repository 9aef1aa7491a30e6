//! Child resources of a collection document.

use serde::Serialize;
use serde_json::Value;
use vellum_common::LocaleTag;

use crate::json;
use crate::language::LanguageValue;
use crate::version::IiifVersion;

/// What a collection member is.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildKind {
    /// A nested collection.
    Collection,
    /// A manifest.
    Manifest,
}

impl ChildKind {
    /// Classifies a member object by its declared type.
    pub fn of(value: &Value) -> Option<ChildKind> {
        if json::has_type(value, "Collection") {
            Some(ChildKind::Collection)
        } else if json::has_type(value, "Manifest") {
            Some(ChildKind::Manifest)
        } else {
            None
        }
    }
}

/// A collection member as listed by its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildResource {
    /// The member's id, if declared.
    pub id: Option<String>,
    /// Whether the member is a collection or a manifest.
    pub kind: ChildKind,
    /// The member's label as embedded in the parent.
    pub label: LanguageValue,
    /// Zero-based position among members of the same kind.
    pub index: usize,
}

impl ChildResource {
    fn from_json(value: &Value, kind: ChildKind, index: usize) -> Self {
        Self {
            id: json::id_of(value).map(str::to_string),
            kind,
            label: LanguageValue::parse(json::get(value, "label")),
            index,
        }
    }

    /// A label that is never empty: the resolved label, or the 1-based
    /// position when the member has none.
    pub fn usable_label(&self, locale: Option<&LocaleTag>) -> String {
        self.label
            .first(locale)
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| (self.index + 1).to_string())
    }
}

/// Lists the members of `kind` declared by a collection document.
///
/// v2 collections may list members under `collections`/`manifests` or under
/// a mixed `members` list; both are read, in that order. v3 collections
/// list members under `items`.
pub fn children(document: &Value, version: IiifVersion, kind: ChildKind) -> Vec<ChildResource> {
    let mut found: Vec<&Value> = Vec::new();
    match version {
        IiifVersion::V2 => {
            let key = match kind {
                ChildKind::Collection => "collections",
                ChildKind::Manifest => "manifests",
            };
            found.extend(json::list(document, key).iter());
            found.extend(
                json::list(document, "members")
                    .iter()
                    .filter(|m| ChildKind::of(m) == Some(kind)),
            );
        }
        IiifVersion::V3 => found.extend(
            json::list(document, "items")
                .iter()
                .filter(|m| ChildKind::of(m) == Some(kind)),
        ),
    }
    found
        .into_iter()
        .filter(|m| json::id_of(m).is_some())
        .enumerate()
        .map(|(i, m)| ChildResource::from_json(m, kind, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_of_member() {
        assert_eq!(ChildKind::of(&json!({"@type": "sc:Collection"})), Some(ChildKind::Collection));
        assert_eq!(ChildKind::of(&json!({"type": "Manifest"})), Some(ChildKind::Manifest));
        assert_eq!(ChildKind::of(&json!({"type": "Canvas"})), None);
    }

    #[test]
    fn v2_children_from_both_forms() {
        let doc = json!({
            "@type": "sc:Collection",
            "manifests": [{"@id": "m1", "@type": "sc:Manifest", "label": "One"}],
            "members": [
                {"@id": "c1", "@type": "sc:Collection"},
                {"@id": "m2", "@type": "sc:Manifest"}
            ]
        });
        let manifests = children(&doc, IiifVersion::V2, ChildKind::Manifest);
        assert_eq!(manifests.len(), 2);
        assert_eq!(manifests[1].id.as_deref(), Some("m2"));
        assert_eq!(manifests[1].index, 1);
        let collections = children(&doc, IiifVersion::V2, ChildKind::Collection);
        assert_eq!(collections.len(), 1);
    }

    #[test]
    fn v3_children_by_type() {
        let doc = json!({
            "type": "Collection",
            "items": [
                {"id": "m1", "type": "Manifest"},
                {"id": "c1", "type": "Collection"},
                {"id": "m2", "type": "Manifest"},
                {"type": "Manifest"}
            ]
        });
        assert_eq!(children(&doc, IiifVersion::V3, ChildKind::Manifest).len(), 2);
        assert_eq!(children(&doc, IiifVersion::V3, ChildKind::Collection).len(), 1);
    }

    #[test]
    fn usable_label_falls_back_to_position() {
        let doc = json!({"items": [
            {"id": "m1", "type": "Manifest", "label": {"en": ["First"]}},
            {"id": "m2", "type": "Manifest"}
        ]});
        let items = children(&doc, IiifVersion::V3, ChildKind::Manifest);
        assert_eq!(items[0].usable_label(None), "First");
        assert_eq!(items[1].usable_label(None), "2");
    }
}
