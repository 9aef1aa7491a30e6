//! Layout hints: behaviors, viewing hint, viewing direction.

use vellum_manifest::Document;

const MULTI_PART: &str = "multi-part";

/// The `behavior` values as a list, whether declared as one string or many.
pub fn behaviors(doc: &Document) -> Vec<String> {
    doc.behaviors().into_iter().map(str::to_string).collect()
}

/// Returns `true` if the document declares itself multi-part, through the
/// v3 behavior or the v2 viewing hint.
pub fn is_multipart(doc: &Document) -> bool {
    doc.behaviors().contains(&MULTI_PART) || doc.viewing_hint() == Some(MULTI_PART)
}

/// The viewing hint of the first sequence, else of the document.
pub fn viewing_hint(doc: &Document) -> Option<String> {
    doc.sequence()
        .and_then(|s| s.viewing_hint())
        .or_else(|| doc.viewing_hint())
        .map(str::to_string)
}

/// The viewing direction of the first sequence, else of the document.
pub fn viewing_direction(doc: &Document) -> Option<String> {
    doc.sequence()
        .and_then(|s| s.viewing_direction())
        .or_else(|| doc.viewing_direction())
        .map(str::to_string)
}
