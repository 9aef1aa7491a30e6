//! Embedded service descriptions and capability matching.

use serde::Serialize;
use serde_json::Value;

use crate::json;

/// Capability URIs this crate knows how to look for.
pub mod capability {
    /// Content Search API 0.9 search endpoint.
    pub const SEARCH_0: &str = "http://iiif.io/api/search/0/search";
    /// Content Search API 1.0 search endpoint.
    pub const SEARCH_1: &str = "http://iiif.io/api/search/1/search";
    /// Content Search API 0.9 autocomplete endpoint.
    pub const AUTOCOMPLETE_0: &str = "http://iiif.io/api/search/0/autocomplete";
    /// Content Search API 1.0 autocomplete endpoint.
    pub const AUTOCOMPLETE_1: &str = "http://iiif.io/api/search/1/autocomplete";

    /// Presentation 3 `type` values that stand for a capability URI.
    pub(crate) const TYPE_ALIASES: &[(&str, &str)] = &[
        ("SearchService1", SEARCH_1),
        ("AutoCompleteService1", AUTOCOMPLETE_1),
    ];
}

/// A service block attached to a resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    /// Service endpoint URI.
    pub id: Option<String>,
    /// Declared `profile` URIs.
    pub profiles: Vec<String>,
    /// Declared `type` (v3) or `@type`.
    pub kind: Option<String>,
    /// Declared `@context` URIs.
    pub contexts: Vec<String>,
    /// Services nested inside this one.
    pub services: Vec<Service>,
}

impl Service {
    /// Reads one service. Bare strings are a service with only an id.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self {
                id: Some(s.clone()),
                profiles: Vec::new(),
                kind: None,
                contexts: Vec::new(),
                services: Vec::new(),
            }),
            Value::Object(_) => Some(Self {
                id: json::id_of(value).map(str::to_string),
                profiles: json::strings(value, "profile")
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                kind: json::type_of(value).map(str::to_string),
                contexts: json::strings(value, "@context")
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                services: Service::list(value),
            }),
            _ => None,
        }
    }

    /// Reads every service declared under a resource's `service` property.
    pub fn list(resource: &Value) -> Vec<Self> {
        json::list(resource, "service")
            .iter()
            .filter_map(Self::from_json)
            .collect()
    }

    /// Returns `true` if this service declares the capability `uri`, either
    /// as a profile or through the equivalent v3 service type.
    pub fn conforms_to(&self, uri: &str) -> bool {
        if self.profiles.iter().any(|p| p == uri) {
            return true;
        }
        self.kind.as_deref().is_some_and(|kind| {
            capability::TYPE_ALIASES
                .iter()
                .any(|(alias, target)| *alias == kind && *target == uri)
        })
    }

    /// Finds a nested service declaring `uri`.
    pub fn service(&self, uri: &str) -> Option<&Service> {
        find(&self.services, uri)
    }

    /// Returns `true` if this is an IIIF Image API service.
    pub fn is_image_service(&self) -> bool {
        let mentions_image_api = |s: &String| s.contains("iiif.io/api/image");
        self.profiles.iter().any(mentions_image_api)
            || self.contexts.iter().any(mentions_image_api)
            || self
                .kind
                .as_deref()
                .is_some_and(|k| k.starts_with("ImageService"))
    }
}

/// Finds the first service in `services` declaring `uri`.
pub fn find<'a>(services: &'a [Service], uri: &str) -> Option<&'a Service> {
    services.iter().find(|s| s.conforms_to(uri))
}

/// Finds the first service declaring any of `uris`, trying them in order.
pub fn find_any<'a>(services: &'a [Service], uris: &[&str]) -> Option<&'a Service> {
    uris.iter().find_map(|uri| find(services, uri))
}
