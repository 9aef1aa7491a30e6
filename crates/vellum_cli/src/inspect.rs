//! `vellum inspect`: every display field of one manifest.

use std::error::Error;
use std::fmt::Display;

use serde_json::json;
use vellum_derive::{fields, Link};

use crate::session::Session;
use crate::{GlobalArgs, OutputFormat, ViewArgs};

/// Runs the `vellum inspect` command.
pub fn run(args: &ViewArgs, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let mut session = Session::open(&args.file, global)?;
    let version = session.document().map(|d| d.version());
    let Some(item) = session.list_item() else {
        return Err(format!("no record for {}", session.manifest_id()).into());
    };

    let description = session.derive::<fields::Description>();
    let url = session.derive::<fields::ManifestUrl>();
    let locale = session.derive::<fields::ManifestLocale>();
    let rights = session.derive::<fields::Rights>();
    let required = session.derive::<fields::RequiredStatement>();
    let homepage = session.derive::<fields::Homepage>();
    let related = session.derive::<fields::RelatedContent>();
    let renderings = session.derive::<fields::Renderings>();
    let metadata = session.derive::<fields::Metadata>();
    let behaviors = session.derive::<fields::Behaviors>();
    let hint = session.derive::<fields::ViewingHint>();
    let direction = session.derive::<fields::ViewingDirection>();
    let search = session.derive::<fields::SearchService>();
    let autocomplete = session.derive::<fields::AutocompleteService>();
    let collection = session.derive::<fields::Collection>();

    match args.format {
        OutputFormat::Json => {
            let out = json!({
                "version": version.map(|v| v.number()),
                "item": item,
                "url": url,
                "locale": locale,
                "description": description,
                "rights": rights,
                "required_statement": required,
                "homepage": homepage,
                "related_content": related,
                "renderings": renderings,
                "metadata": metadata,
                "behaviors": behaviors,
                "viewing_hint": hint,
                "viewing_direction": direction,
                "search_service": search.as_ref().and_then(|s| s.id.clone()),
                "autocomplete_service": autocomplete.as_ref().and_then(|s| s.id.clone()),
                "collection": collection,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            field("Title", item.title.as_deref());
            field("Version", version);
            field("URL", url.as_deref());
            field("Locale", locale.as_ref());
            field("Description", description.as_deref());
            field("Provider", item.provider.as_deref());
            field("Logo", item.logo.as_deref());
            field("Thumbnail", item.thumbnail.as_ref().map(|t| &t.url));
            field("Rights", join(&rights));
            for pair in &required {
                field(pair.label.as_deref().unwrap_or("Attribution"), Some(&pair.value));
            }
            if let Some(links) = &homepage {
                links.iter().for_each(|l| link("Homepage", l));
            }
            for entry in related.iter().flatten() {
                let label = entry.label.as_deref().or(entry.format.as_deref());
                field("See also", entry.value.as_deref().map(|v| with_label(v, label)));
            }
            renderings.iter().for_each(|l| link("Rendering", l));
            for pair in &metadata {
                field(pair.label.as_deref().unwrap_or("-"), Some(&pair.value));
            }
            field("Behaviors", join(&behaviors));
            field("Viewing hint", hint.as_deref());
            field("Direction", direction.as_deref());
            field("Search", search.as_ref().and_then(|s| s.id.as_deref()));
            field("Autocomplete", autocomplete.as_ref().and_then(|s| s.id.as_deref()));
            if let Some(listing) = &collection {
                field("Collections", Some(listing.total_collections()));
                field("Manifests", Some(listing.total_manifests()));
                if item.is_multipart {
                    field("Multi-part", Some("yes"));
                }
            } else {
                field("Canvases", Some(item.size));
            }
        }
    }

    session.finish();
    Ok(0)
}

fn field(label: &str, value: Option<impl Display>) {
    match value {
        Some(value) => println!("{label:>14}: {value}"),
        None => println!("{label:>14}: -"),
    }
}

fn link(label: &str, link: &Link) {
    field(
        label,
        link.value
            .as_deref()
            .map(|v| with_label(v, link.label.as_deref())),
    );
}

fn with_label(value: &str, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{value} ({label})"),
        None => value.to_string(),
    }
}

fn join(values: &[String]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_empty_is_absent() {
        assert!(join(&[]).is_none());
        assert_eq!(join(&["a".into(), "b".into()]).as_deref(), Some("a, b"));
    }

    #[test]
    fn labels_in_parentheses() {
        assert_eq!(with_label("https://x", Some("Home")), "https://x (Home)");
        assert_eq!(with_label("https://x", None), "https://x");
    }

    #[test]
    fn run_on_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        std::fs::write(
            &path,
            r#"{"@id": "m", "label": "Book", "sequences": [{"canvases": [{"@id": "c1"}]}]}"#,
        )
        .unwrap();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: None,
            locale: None,
        };
        for format in [OutputFormat::Text, OutputFormat::Json] {
            let args = ViewArgs {
                file: path.clone(),
                format,
            };
            assert_eq!(run(&args, &global).unwrap(), 0);
        }
    }
}
