//! Links out of the manifest: homepage, related content, renderings,
//! logo, and provider.

use serde::Serialize;
use vellum_manifest::{Document, LinkedResource};

use crate::context::DeriveContext;

/// A resolved link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// The link text, if the source declares one.
    pub label: Option<String>,
    /// The target URL.
    pub value: Option<String>,
}

/// A resolved `seeAlso` link, which also carries its media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedLink {
    /// Media type of the target.
    pub format: Option<String>,
    /// The link text, if the source declares one.
    pub label: Option<String>,
    /// The target URL.
    pub value: Option<String>,
}

fn resolve_links(doc: &Document, links: Vec<LinkedResource>) -> Vec<Link> {
    links
        .into_iter()
        .map(|link| Link {
            label: link.label.first(doc.locale()),
            value: link.id,
        })
        .collect()
}

/// The v3 `homepage` links; `None` when the property is absent.
pub fn homepage(doc: &Document) -> Option<Vec<Link>> {
    doc.property("homepage")?;
    Some(resolve_links(doc, doc.links("homepage")))
}

/// The `seeAlso` links; `None` when the property is absent.
pub fn related_content(doc: &Document) -> Option<Vec<RelatedLink>> {
    doc.property("seeAlso")?;
    Some(
        doc.links("seeAlso")
            .into_iter()
            .map(|link| RelatedLink {
                format: link.format,
                label: link.label.first(doc.locale()),
                value: link.id,
            })
            .collect(),
    )
}

/// The `rendering` links (alternative downloads), possibly empty.
pub fn renderings(doc: &Document) -> Vec<Link> {
    resolve_links(doc, doc.links("rendering"))
}

/// The logo URL: the document's own `logo`, else a v3 provider's logo.
pub fn logo(doc: &Document) -> Option<String> {
    doc.logo().map(|image| image.id)
}

/// The provider name: the first v3 provider's resolved label, else the
/// override supplied alongside the fetch record.
pub fn provider(doc: &Document, ctx: &DeriveContext) -> Option<String> {
    doc.providers()
        .first()
        .and_then(|agent| agent.label.first(doc.locale()))
        .filter(|name| !name.is_empty())
        .or_else(|| ctx.provider_override.clone())
}
