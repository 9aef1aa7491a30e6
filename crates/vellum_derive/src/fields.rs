//! One zero-sized [`Derivation`] per derived field.
//!
//! These are the handles the cache layer memoizes on: each type names a
//! field, fixes its output shape, and points at the function that computes
//! it.

use vellum_common::LocaleTag;
use vellum_manifest::{Document, Service};

use crate::canvases::{self, CanvasSummary};
use crate::context::DeriveContext;
use crate::layout;
use crate::links::{self, Link, RelatedLink};
use crate::services;
use crate::structure::{self, CollectionListing, TreeNode};
use crate::text::{self, LabelValuePair};
use crate::thumbnail;
use crate::Derivation;

macro_rules! derivation {
    ($(#[$meta:meta])* $name:ident, $field:literal, $output:ty, |$doc:ident, $ctx:pat_param| $body:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Derivation for $name {
            type Output = $output;
            const NAME: &'static str = $field;

            fn derive($doc: &Document, $ctx: &DeriveContext) -> $output {
                $body
            }
        }
    };
}

derivation!(
    /// The resolved title.
    Title, "title", Option<String>, |doc, _| text::title(doc)
);

derivation!(
    /// The resolved description or summary.
    Description, "description", Option<String>, |doc, _| text::description(doc)
);

derivation!(
    /// The document's own URI.
    ManifestUrl, "manifest_url", Option<String>, |doc, _| text::manifest_url(doc)
);

derivation!(
    /// The parse locale without its region subtag.
    ManifestLocale, "manifest_locale", Option<LocaleTag>, |doc, _| text::manifest_locale(doc)
);

derivation!(
    /// The three-tier thumbnail.
    Thumbnail, "thumbnail", Option<thumbnail::Thumbnail>, |doc, ctx| thumbnail::thumbnail(doc, ctx)
);

derivation!(
    /// The logo URL.
    Logo, "logo", Option<String>, |doc, _| links::logo(doc)
);

derivation!(
    /// The provider name, falling back to the record override.
    Provider, "provider", Option<String>, |doc, ctx| links::provider(doc, ctx)
);

derivation!(
    /// Rights URIs.
    Rights, "rights", Vec<String>, |doc, _| text::rights(doc)
);

derivation!(
    /// Required statement pairs with non-empty values.
    RequiredStatement, "required_statement", Vec<LabelValuePair>, |doc, _| text::required_statement(doc)
);

derivation!(
    /// Homepage links.
    Homepage, "homepage", Option<Vec<Link>>, |doc, _| links::homepage(doc)
);

derivation!(
    /// `seeAlso` links.
    RelatedContent, "related_content", Option<Vec<RelatedLink>>, |doc, _| links::related_content(doc)
);

derivation!(
    /// Rendering links.
    Renderings, "renderings", Vec<Link>, |doc, _| links::renderings(doc)
);

derivation!(
    /// All metadata pairs.
    Metadata, "metadata", Vec<LabelValuePair>, |doc, _| text::metadata(doc)
);

derivation!(
    /// Language tags present in the metadata.
    MetadataLocales, "metadata_locales", Vec<String>, |doc, _| text::metadata_locales(doc)
);

derivation!(
    /// Behaviors as a list.
    Behaviors, "behaviors", Vec<String>, |doc, _| layout::behaviors(doc)
);

derivation!(
    /// Whether the document is multi-part.
    IsMultipart, "is_multipart", bool, |doc, _| layout::is_multipart(doc)
);

derivation!(
    /// The effective viewing hint.
    ViewingHint, "viewing_hint", Option<String>, |doc, _| layout::viewing_hint(doc)
);

derivation!(
    /// The effective viewing direction.
    ViewingDirection, "viewing_direction", Option<String>, |doc, _| layout::viewing_direction(doc)
);

derivation!(
    /// The Content Search service.
    SearchService, "search_service", Option<Service>, |doc, ctx| services::search_service(doc, ctx)
);

derivation!(
    /// The autocomplete service nested in the search service.
    AutocompleteService, "autocomplete_service", Option<Service>, |doc, ctx| services::autocomplete_service(doc, ctx)
);

derivation!(
    /// Canvas summaries.
    Canvases, "canvases", Vec<CanvasSummary>, |doc, _| canvases::canvases(doc)
);

derivation!(
    /// The start canvas.
    StartCanvas, "start_canvas", Option<CanvasSummary>, |doc, ctx| canvases::start_canvas(doc, ctx)
);

derivation!(
    /// Whether the document is a collection.
    IsCollection, "is_collection", bool, |doc, _| doc.is_collection()
);

derivation!(
    /// A collection's members.
    Collection, "collection", Option<CollectionListing>, |doc, _| structure::collection_listing(doc)
);

derivation!(
    /// Member count for collections, canvas count otherwise.
    Size, "size", usize, |doc, _| structure::size(doc)
);

derivation!(
    /// The structure tree.
    TreeStructure, "tree_structure", Vec<TreeNode>, |doc, _| structure::tree_structure(doc)
);
