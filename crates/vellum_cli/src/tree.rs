//! `vellum tree`: the structure tree as an indented outline.

use std::error::Error;

use vellum_derive::{fields, TreeNode};

use crate::session::Session;
use crate::{GlobalArgs, OutputFormat, ViewArgs};

/// Runs the `vellum tree` command.
pub fn run(args: &ViewArgs, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let mut session = Session::open(&args.file, global)?;
    let tree = session.derive::<fields::TreeStructure>();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tree)?),
        OutputFormat::Text => {
            if tree.is_empty() {
                println!("no structures");
            }
            let mut out = String::new();
            for node in &tree {
                outline(node, 0, &mut out);
            }
            print!("{out}");
        }
    }

    session.finish();
    Ok(0)
}

fn outline(node: &TreeNode, depth: usize, out: &mut String) {
    let label = node
        .label
        .as_deref()
        .or(node.id.as_deref())
        .unwrap_or("(untitled)");
    out.push_str(&"  ".repeat(depth));
    out.push_str(label);
    if !node.canvases.is_empty() {
        out.push_str(&format!(" [{} canvases]", node.canvases.len()));
    }
    out.push('\n');
    for child in &node.children {
        outline(child, depth + 1, out);
    }
}
