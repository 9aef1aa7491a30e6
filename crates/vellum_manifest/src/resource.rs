//! Small referenced resources: images, agents, and links.

use serde_json::Value;

use crate::json;
use crate::language::LanguageValue;
use crate::service::Service;

/// A reference to an image: a thumbnail, a logo, or a painted image body.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    /// The image URL.
    pub id: String,
    /// Declared pixel width, if any.
    pub width: Option<u32>,
    /// Declared pixel height, if any.
    pub height: Option<u32>,
    /// Declared media type, if any.
    pub format: Option<String>,
    /// Image services attached to the image.
    pub services: Vec<Service>,
}

impl ImageRef {
    /// Reads a single image reference (a URL string or an object with an id).
    pub fn from_json(value: &Value) -> Option<Self> {
        let id = json::id_of(value)?.trim();
        if id.is_empty() {
            return None;
        }
        Some(Self {
            id: id.to_string(),
            width: json::u32_field(value, "width"),
            height: json::u32_field(value, "height"),
            format: json::str_field(value, "format").map(str::to_string),
            services: Service::list(value),
        })
    }

    /// Reads the first usable reference from a value that may be a list.
    pub fn first_of(value: Option<&Value>) -> Option<Self> {
        value
            .map(json::as_slice)
            .unwrap_or(&[])
            .iter()
            .find_map(Self::from_json)
    }
}

/// A v3 `provider` agent.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Agent URI.
    pub id: Option<String>,
    /// Agent name.
    pub label: LanguageValue,
    /// First usable logo.
    pub logo: Option<ImageRef>,
}

impl Agent {
    /// Reads an agent object. Bare strings are treated as an agent id.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self {
                id: Some(s.clone()),
                label: LanguageValue::default(),
                logo: None,
            }),
            Value::Object(_) => Some(Self {
                id: json::id_of(value).map(str::to_string),
                label: LanguageValue::parse(json::get(value, "label")),
                logo: ImageRef::first_of(json::get(value, "logo")),
            }),
            _ => None,
        }
    }
}

/// A link to an external resource (`homepage`, `seeAlso`, `rendering`).
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedResource {
    /// Target URL.
    pub id: Option<String>,
    /// Human-readable label.
    pub label: LanguageValue,
    /// Media type of the target.
    pub format: Option<String>,
}

impl LinkedResource {
    /// Reads one link. Bare strings are a link with only an id.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self {
                id: Some(s.clone()),
                label: LanguageValue::default(),
                format: None,
            }),
            Value::Object(_) => Some(Self {
                id: json::id_of(value).map(str::to_string),
                label: LanguageValue::parse(json::get(value, "label")),
                format: json::str_field(value, "format").map(str::to_string),
            }),
            _ => None,
        }
    }

    /// Reads every link in a value that may be one link or a list.
    pub fn list(value: Option<&Value>) -> Vec<Self> {
        value
            .map(json::as_slice)
            .unwrap_or(&[])
            .iter()
            .filter_map(Self::from_json)
            .collect()
    }
}
