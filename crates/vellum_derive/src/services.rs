//! Content Search service discovery.

use vellum_manifest::{service, Document, Service};

use crate::context::DeriveContext;

/// The document's search service, trying each search revision in the
/// context's order.
pub fn search_service(doc: &Document, ctx: &DeriveContext) -> Option<Service> {
    service::find_any(&doc.services(), &ctx.search_order()).cloned()
}

/// The autocomplete service nested inside the search service, trying each
/// autocomplete revision in the context's order.
pub fn autocomplete_service(doc: &Document, ctx: &DeriveContext) -> Option<Service> {
    let search = search_service(doc, ctx)?;
    service::find_any(&search.services, &ctx.autocomplete_order()).cloned()
}
