//! Presentation API version detection.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::json;

/// Context URI published by the Presentation API 3.0 specification.
pub const PRESENTATION_3_CONTEXT: &str = "http://iiif.io/api/presentation/3/context.json";

/// Context URI published by the Presentation API 2.x specifications.
pub const PRESENTATION_2_CONTEXT: &str = "http://iiif.io/api/presentation/2/context.json";

/// The Presentation API major version a document follows.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum IiifVersion {
    /// Presentation API 2.x (`sequences`, `@id`, `attribution`, `license`).
    V2,
    /// Presentation API 3.0 (`items`, `id`, `requiredStatement`, `rights`).
    V3,
}

impl IiifVersion {
    /// Sniffs the version of a raw document.
    ///
    /// The `@context` wins when it names a presentation context. Otherwise
    /// the document is V3 if it uses plain `id`/`type` keys without their
    /// JSON-LD keyword forms, and V2 in every other case.
    pub fn detect(document: &Value) -> IiifVersion {
        let contexts: Vec<&str> = json::list(document, "@context")
            .iter()
            .filter_map(Value::as_str)
            .collect();
        if contexts.iter().any(|c| c.contains("/presentation/3")) {
            return IiifVersion::V3;
        }
        if contexts.iter().any(|c| c.contains("/presentation/2")) {
            return IiifVersion::V2;
        }

        let Some(obj) = document.as_object() else {
            return IiifVersion::V2;
        };
        let plain = obj.contains_key("id") || obj.contains_key("type");
        let keyword = obj.contains_key("@id") || obj.contains_key("@type");
        if plain && !keyword {
            IiifVersion::V3
        } else {
            IiifVersion::V2
        }
    }

    /// Returns the major version number.
    pub fn number(self) -> u8 {
        match self {
            IiifVersion::V2 => 2,
            IiifVersion::V3 => 3,
        }
    }
}

impl fmt::Display for IiifVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IIIF Presentation {}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detect_v3_context() {
        let doc = json!({"@context": PRESENTATION_3_CONTEXT, "id": "m"});
        assert_eq!(IiifVersion::detect(&doc), IiifVersion::V3);
    }

    #[test]
    fn detect_v3_context_in_list() {
        let doc = json!({
            "@context": ["http://www.w3.org/ns/anno.jsonld", PRESENTATION_3_CONTEXT],
            "id": "m"
        });
        assert_eq!(IiifVersion::detect(&doc), IiifVersion::V3);
    }

    #[test]
    fn detect_v2_context() {
        let doc = json!({"@context": PRESENTATION_2_CONTEXT, "id": "odd"});
        assert_eq!(IiifVersion::detect(&doc), IiifVersion::V2);
    }

    #[test]
    fn detect_without_context() {
        assert_eq!(
            IiifVersion::detect(&json!({"id": "m", "type": "Manifest"})),
            IiifVersion::V3
        );
        assert_eq!(
            IiifVersion::detect(&json!({"@id": "m", "@type": "sc:Manifest"})),
            IiifVersion::V2
        );
        assert_eq!(IiifVersion::detect(&json!({})), IiifVersion::V2);
    }

    #[test]
    fn display() {
        assert_eq!(IiifVersion::V3.to_string(), "IIIF Presentation 3");
        assert_eq!(IiifVersion::V2.number(), 2);
    }
}
