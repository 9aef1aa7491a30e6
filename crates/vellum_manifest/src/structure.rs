//! Range trees built from a document's `structures`.
//!
//! v3 ranges nest directly: a range's `items` holds canvases and child
//! ranges. v2 ranges are flat and point at each other by id through
//! `ranges`/`members`. Both shapes are read into the same [`RangeNode`]
//! tree. References that would revisit a range already on the current path
//! are dropped, so a cyclic document still yields a finite tree.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::json;
use crate::language::LanguageValue;
use crate::version::IiifVersion;

/// One range in the structure tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeNode {
    /// Range id, if declared.
    pub id: Option<String>,
    /// Range label.
    pub label: LanguageValue,
    /// Ids of the canvases this range points at directly, in order.
    pub canvases: Vec<String>,
    /// Child ranges, in order.
    pub children: Vec<RangeNode>,
}

enum Member<'a> {
    Canvas(&'a str),
    Range(&'a Value),
}

struct Builder<'a> {
    version: IiifVersion,
    by_id: HashMap<&'a str, &'a Value>,
}

/// Builds the range tree of a document's `structures` list.
pub fn build(structures: &[Value], version: IiifVersion) -> Vec<RangeNode> {
    let ranges: Vec<&Value> = structures.iter().filter(|r| r.is_object()).collect();
    let builder = Builder {
        version,
        by_id: ranges
            .iter()
            .filter_map(|r| json::id_of(r).map(|id| (id, *r)))
            .collect(),
    };

    let mut path = Vec::new();
    builder
        .roots(&ranges)
        .into_iter()
        .filter_map(|r| builder.node(r, &mut path))
        .collect()
}

impl<'a> Builder<'a> {
    fn roots(&self, ranges: &[&'a Value]) -> Vec<&'a Value> {
        if self.version == IiifVersion::V2 {
            let top: Vec<&Value> = ranges
                .iter()
                .copied()
                .filter(|r| json::str_field(r, "viewingHint") == Some("top"))
                .collect();
            if !top.is_empty() {
                return top;
            }
        }

        let referenced: HashSet<&str> = ranges
            .iter()
            .flat_map(|r| self.members(*r))
            .filter_map(|m| match m {
                Member::Range(child) => json::id_of(child),
                Member::Canvas(_) => None,
            })
            .collect();
        let unreferenced: Vec<&Value> = ranges
            .iter()
            .copied()
            .filter(|r| json::id_of(r).map_or(true, |id| !referenced.contains(id)))
            .collect();
        if unreferenced.is_empty() {
            ranges.to_vec()
        } else {
            unreferenced
        }
    }

    fn members(&self, range: &'a Value) -> Vec<Member<'a>> {
        match self.version {
            IiifVersion::V3 => json::list(range, "items")
                .iter()
                .filter_map(v3_member)
                .collect(),
            IiifVersion::V2 => {
                let members = json::list(range, "members");
                if !members.is_empty() {
                    return members.iter().filter_map(v2_member).collect();
                }
                let canvases = json::list(range, "canvases")
                    .iter()
                    .filter_map(json::id_of)
                    .map(Member::Canvas);
                let ranges = json::list(range, "ranges").iter().map(Member::Range);
                canvases.chain(ranges).collect()
            }
        }
    }

    /// Follows a bare reference to the full range declared at top level.
    fn dereference(&self, range: &'a Value) -> &'a Value {
        let is_stub = match range {
            Value::String(_) => true,
            Value::Object(obj) => !["items", "canvases", "ranges", "members", "label"]
                .iter()
                .any(|k| obj.contains_key(*k)),
            _ => false,
        };
        if !is_stub {
            return range;
        }
        json::id_of(range)
            .and_then(|id| self.by_id.get(id).copied())
            .unwrap_or(range)
    }

    fn node(&self, range: &'a Value, path: &mut Vec<&'a str>) -> Option<RangeNode> {
        let range = self.dereference(range);
        let id = json::id_of(range);
        if let Some(id) = id {
            if path.contains(&id) {
                return None;
            }
            path.push(id);
        }

        let mut node = RangeNode {
            id: id.map(str::to_string),
            label: LanguageValue::parse(json::get(range, "label")),
            ..RangeNode::default()
        };
        for member in self.members(range) {
            match member {
                Member::Canvas(canvas) => node.canvases.push(canvas.to_string()),
                Member::Range(child) => {
                    if let Some(child) = self.node(child, path) {
                        node.children.push(child);
                    }
                }
            }
        }

        if id.is_some() {
            path.pop();
        }
        Some(node)
    }
}

fn v3_member(item: &Value) -> Option<Member<'_>> {
    if json::has_type(item, "Range") {
        return Some(Member::Range(item));
    }
    if json::has_type(item, "SpecificResource") {
        return json::get(item, "source")
            .and_then(json::id_of)
            .map(Member::Canvas);
    }
    json::id_of(item).map(Member::Canvas)
}

fn v2_member(item: &Value) -> Option<Member<'_>> {
    if json::has_type(item, "Range") {
        Some(Member::Range(item))
    } else {
        json::id_of(item).map(Member::Canvas)
    }
}
