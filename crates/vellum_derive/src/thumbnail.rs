//! Thumbnail resolution.
//!
//! Three tiers, tried strictly in order; the first that yields a URL wins:
//!
//! 1. the document's own `thumbnail`;
//! 2. the first canvas's `thumbnail`;
//! 3. a scaled Image API request built from the first canvas's painted image
//!    service: `{service}/full/,{height}/0/default.{format}`.

use serde::Serialize;
use vellum_manifest::{Canvas, Document, ImageRef};

use crate::context::DeriveContext;

/// Where a resolved thumbnail came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbnailSource {
    /// The document's `thumbnail` property.
    Manifest,
    /// The first canvas's `thumbnail` property.
    Canvas,
    /// Synthesized from the first canvas's image service.
    ImageService,
}

/// A resolved thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    /// Image URL.
    pub url: String,
    /// Known or expected pixel width.
    pub width: Option<u32>,
    /// Known or requested pixel height.
    pub height: Option<u32>,
    /// Which tier produced it.
    pub source: ThumbnailSource,
}

impl Thumbnail {
    fn declared(image: ImageRef, source: ThumbnailSource) -> Self {
        Self {
            url: image.id,
            width: image.width,
            height: image.height,
            source,
        }
    }
}

/// Resolves the thumbnail to show for a document.
pub fn thumbnail(doc: &Document, ctx: &DeriveContext) -> Option<Thumbnail> {
    if let Some(image) = doc.thumbnail() {
        return Some(Thumbnail::declared(image, ThumbnailSource::Manifest));
    }
    let canvases = doc.canvases();
    let first = canvases.first()?;
    if let Some(image) = first.thumbnail() {
        return Some(Thumbnail::declared(image, ThumbnailSource::Canvas));
    }
    synthesize(first, ctx)
}

fn synthesize(canvas: &Canvas<'_>, ctx: &DeriveContext) -> Option<Thumbnail> {
    let image = canvas.image_with_service()?;
    let service = image.services.iter().find(|s| s.is_image_service())?;
    let base = service.id.as_deref()?.trim_end_matches('/');
    if base.is_empty() {
        return None;
    }
    let height = ctx.thumbnail_height;
    Some(Thumbnail {
        url: format!(
            "{base}/full/,{height}/0/default.{}",
            ctx.thumbnail_format.extension()
        ),
        width: scaled_width(canvas.width(), canvas.height(), height),
        height: Some(height),
        source: ThumbnailSource::ImageService,
    })
}

fn scaled_width(width: Option<u32>, height: Option<u32>, target: u32) -> Option<u32> {
    match (width, height) {
        (Some(w), Some(h)) if h > 0 => {
            let scaled = (f64::from(target) * f64::from(w) / f64::from(h)).round();
            Some(scaled as u32)
        }
        _ => None,
    }
}
