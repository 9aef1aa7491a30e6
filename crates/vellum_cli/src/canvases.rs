//! `vellum canvases`: the canvas list with the start canvas marked.

use std::error::Error;

use serde_json::json;
use vellum_derive::{fields, CanvasSummary};

use crate::session::Session;
use crate::{CanvasArgs, GlobalArgs, OutputFormat};

/// Runs the `vellum canvases` command.
pub fn run(args: &CanvasArgs, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let mut session = Session::open(&args.view.file, global)?;
    session.ctx = session.ctx.clone().with_canvas_index(args.index);

    let canvases = session.derive::<fields::Canvases>();
    let start = session.derive::<fields::StartCanvas>();

    match args.view.format {
        OutputFormat::Json => {
            let out = json!({
                "canvases": canvases,
                "start": start.as_ref().map(|c| c.index),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            if canvases.is_empty() {
                println!("no canvases");
            }
            let start_index = start.as_ref().map(|c| c.index);
            for canvas in &canvases {
                println!("{}", line(canvas, start_index == Some(canvas.index)));
            }
        }
    }

    session.finish();
    Ok(0)
}

fn line(canvas: &CanvasSummary, is_start: bool) -> String {
    let marker = if is_start { '>' } else { ' ' };
    let size = match (canvas.width, canvas.height) {
        (Some(w), Some(h)) => format!("{w}x{h}"),
        _ => "-".to_string(),
    };
    format!(
        "{marker} {:>4}  {:<24} {:>11}  {}",
        canvas.index + 1,
        canvas.label.as_deref().unwrap_or("-"),
        size,
        canvas.id.as_deref().unwrap_or("-"),
    )
}
