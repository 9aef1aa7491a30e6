//! Error types for reading manifest text.

/// Errors produced when manifest text cannot be turned into a [`Document`](crate::Document).
///
/// These cover the text boundary only. Once a document is wrapped, every
/// accessor degrades to `None` or an empty list instead of failing.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The text is not valid JSON.
    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON value at the top level is not an object.
    #[error("manifest must be a JSON object, found {found}")]
    NotAnObject {
        /// The kind of JSON value that was found instead.
        found: &'static str,
    },
}
