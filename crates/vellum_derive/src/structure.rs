//! Hierarchy views: the range tree and collection listings.

use serde::Serialize;
use vellum_manifest::{ChildKind, ChildResource, Document, RangeNode};

/// A range with its label resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Range id, if declared.
    pub id: Option<String>,
    /// Resolved label, if any.
    pub label: Option<String>,
    /// Canvas ids the range points at directly.
    pub canvases: Vec<String>,
    /// Child ranges.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn resolve(node: &RangeNode, doc: &Document) -> Self {
        Self {
            id: node.id.clone(),
            label: node.label.first(doc.locale()),
            canvases: node.canvases.clone(),
            children: node
                .children
                .iter()
                .map(|child| TreeNode::resolve(child, doc))
                .collect(),
        }
    }
}

/// The structure tree; empty when the document declares no ranges.
pub fn tree_structure(doc: &Document) -> Vec<TreeNode> {
    doc.structures()
        .iter()
        .map(|node| TreeNode::resolve(node, doc))
        .collect()
}

/// One member of a collection, ready for a picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionMember {
    /// The member's id.
    pub id: Option<String>,
    /// Collection or manifest.
    pub kind: ChildKind,
    /// The member's label, or its 1-based position when unlabelled.
    pub label: String,
}

impl CollectionMember {
    fn of(child: &ChildResource, doc: &Document) -> Self {
        Self {
            id: child.id.clone(),
            kind: child.kind,
            label: child.usable_label(doc.locale()),
        }
    }
}

/// The members of a collection, split by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionListing {
    /// Nested collections.
    pub collections: Vec<CollectionMember>,
    /// Manifests.
    pub manifests: Vec<CollectionMember>,
}

impl CollectionListing {
    /// Number of nested collections.
    pub fn total_collections(&self) -> usize {
        self.collections.len()
    }

    /// Number of manifests.
    pub fn total_manifests(&self) -> usize {
        self.manifests.len()
    }

    /// Number of members of either kind.
    pub fn total_items(&self) -> usize {
        self.total_collections() + self.total_manifests()
    }
}

/// Lists a collection's members; `None` for a manifest.
pub fn collection_listing(doc: &Document) -> Option<CollectionListing> {
    if !doc.is_collection() {
        return None;
    }
    let members = |children: Vec<ChildResource>| -> Vec<CollectionMember> {
        children
            .iter()
            .map(|child| CollectionMember::of(child, doc))
            .collect()
    };
    Some(CollectionListing {
        collections: members(doc.collections()),
        manifests: members(doc.manifests()),
    })
}

/// The number of things a list entry should report: total members for a
/// collection, canvases otherwise.
pub fn size(doc: &Document) -> usize {
    match collection_listing(doc) {
        Some(listing) => listing.total_items(),
        None => doc.canvases().len(),
    }
}
