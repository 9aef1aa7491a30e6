//! Canvas listings and the start canvas.

use serde::Serialize;
use vellum_manifest::{Canvas, Document};

use crate::context::DeriveContext;

/// What a canvas list or navigation control needs about one canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanvasSummary {
    /// Position in the first sequence.
    pub index: usize,
    /// Canvas id, if declared.
    pub id: Option<String>,
    /// Resolved label, if any.
    pub label: Option<String>,
    /// Declared width.
    pub width: Option<u32>,
    /// Declared height.
    pub height: Option<u32>,
}

impl CanvasSummary {
    fn of(canvas: &Canvas<'_>) -> Self {
        Self {
            index: canvas.index(),
            id: canvas.id().map(str::to_string),
            label: canvas.display_label(),
            width: canvas.width(),
            height: canvas.height(),
        }
    }
}

/// Every canvas of the first sequence, in order. Empty, never absent, when
/// the document has no canvases.
pub fn canvases(doc: &Document) -> Vec<CanvasSummary> {
    doc.canvases().iter().map(CanvasSummary::of).collect()
}

/// The canvas to open on: the context's selected index when set, else the
/// document's declared start. `None` stands for the empty record.
pub fn start_canvas(doc: &Document, ctx: &DeriveContext) -> Option<CanvasSummary> {
    doc.start_canvas(ctx.canvas_index)
        .as_ref()
        .map(CanvasSummary::of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn doc(value: Value) -> Document {
        Document::new(Arc::new(value), None).unwrap()
    }

    fn v2_with_start(start: Option<&str>) -> Document {
        let mut sequence = json!({"canvases": [
            {"@id": "c1", "label": "one", "width": 10, "height": 20},
            {"@id": "c2", "label": "two"},
            {"@id": "c3"}
        ]});
        if let Some(start) = start {
            sequence["startCanvas"] = json!(start);
        }
        doc(json!({"@id": "m", "sequences": [sequence]}))
    }

    #[test]
    fn summaries() {
        let list = canvases(&v2_with_start(None));
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].label.as_deref(), Some("one"));
        assert_eq!(list[0].width, Some(10));
        assert_eq!(list[2].index, 2);
        assert!(list[2].label.is_none());
        assert!(canvases(&doc(json!({"@id": "m"}))).is_empty());
    }

    #[test]
    fn declared_start() {
        let start = start_canvas(&v2_with_start(Some("c2")), &DeriveContext::default()).unwrap();
        assert_eq!(start.id.as_deref(), Some("c2"));
        assert_eq!(start.index, 1);
    }

    #[test]
    fn selected_index_wins() {
        let ctx = DeriveContext::default().with_canvas_index(Some(2));
        let start = start_canvas(&v2_with_start(Some("c2")), &ctx).unwrap();
        assert_eq!(start.id.as_deref(), Some("c3"));
        let out_of_range = DeriveContext::default().with_canvas_index(Some(7));
        assert!(start_canvas(&v2_with_start(None), &out_of_range).is_none());
    }

    #[test]
    fn no_start_is_empty_record() {
        assert!(start_canvas(&v2_with_start(None), &DeriveContext::default()).is_none());
        assert!(start_canvas(&v2_with_start(Some("c9")), &DeriveContext::default()).is_none());
    }
}
