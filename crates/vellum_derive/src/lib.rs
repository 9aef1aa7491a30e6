//! Display-ready values derived from a parsed manifest.
//!
//! Every derivation is a pure, total function of a
//! [`Document`](vellum_manifest::Document) and a [`DeriveContext`]: it never
//! fails, and a property the document lacks comes back as `None` or an empty
//! list for that field alone. Where "absent" and "present but empty" mean
//! different things to a caller (homepage, related content), the output is
//! an `Option<Vec<_>>` so the two stay apart.
//!
//! The free functions in each module do the work. The zero-sized types in
//! [`fields`] wrap them as [`Derivation`]s so the cache layer can memoize
//! each field under its own key.

#![warn(missing_docs)]

pub mod canvases;
pub mod context;
pub mod fields;
pub mod layout;
pub mod links;
pub mod services;
pub mod structure;
pub mod text;
pub mod thumbnail;

use serde::Serialize;
use vellum_manifest::Document;

pub use canvases::{canvases, start_canvas, CanvasSummary};
pub use context::DeriveContext;
pub use layout::{behaviors, is_multipart, viewing_direction, viewing_hint};
pub use links::{homepage, logo, provider, related_content, renderings, Link, RelatedLink};
pub use services::{autocomplete_service, search_service};
pub use structure::{
    collection_listing, size, tree_structure, CollectionListing, CollectionMember, TreeNode,
};
pub use text::{
    description, manifest_locale, manifest_url, metadata, metadata_locales, required_statement,
    rights, title, LabelValuePair,
};
pub use thumbnail::{thumbnail, Thumbnail, ThumbnailSource};

/// A named, memoizable derived field.
pub trait Derivation: 'static {
    /// The field's value shape.
    type Output: Clone + Default + Serialize + 'static;

    /// Stable field name, used in logs and CLI output.
    const NAME: &'static str;

    /// Computes the field.
    fn derive(doc: &Document, ctx: &DeriveContext) -> Self::Output;

    /// The value reported while no document is resident.
    fn absent() -> Self::Output {
        Self::Output::default()
    }
}
