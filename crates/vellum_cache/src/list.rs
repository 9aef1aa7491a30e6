//! The per-entry summary shown in a manifest list.

use serde::Serialize;
use vellum_derive::Thumbnail;

use crate::record::FetchState;

/// Everything a manifest list entry displays, derived in one call.
///
/// While the document is not resident every derived field is absent and
/// `state` says why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    /// The manifest this entry is about.
    pub manifest_id: String,
    /// Fetch lifecycle state of the record.
    pub state: FetchState,
    /// Whether some window currently displays this manifest.
    pub active: bool,
    /// Resolved title.
    pub title: Option<String>,
    /// Resolved thumbnail.
    pub thumbnail: Option<Thumbnail>,
    /// Logo URL.
    pub logo: Option<String>,
    /// Provider name, with the record override as fallback.
    pub provider: Option<String>,
    /// Member count for a collection, canvas count otherwise.
    pub size: usize,
    /// Whether the entry is a collection.
    pub is_collection: bool,
    /// Whether the entry is a multi-part collection.
    pub is_multipart: bool,
}
