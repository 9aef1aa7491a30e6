//! `vellum locales`: languages available in the metadata.

use std::error::Error;

use vellum_derive::fields;

use crate::session::Session;
use crate::{GlobalArgs, OutputFormat, ViewArgs};

/// Runs the `vellum locales` command.
pub fn run(args: &ViewArgs, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let mut session = Session::open(&args.file, global)?;
    let locales = session.derive::<fields::MetadataLocales>();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&locales)?),
        OutputFormat::Text if locales.is_empty() => println!("no language-tagged metadata"),
        OutputFormat::Text => locales.iter().for_each(|l| println!("{l}")),
    }

    session.finish();
    Ok(0)
}
