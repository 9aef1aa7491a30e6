//! Vellum CLI: inspect IIIF manifests from the command line.
//!
//! Each subcommand reads one manifest file, stores it as a resident fetch
//! record, and prints values derived through the same cache a viewer would
//! use: `vellum inspect` for the display fields, `vellum canvases` for the
//! canvas list, `vellum tree` for the structure tree, and `vellum locales`
//! for the languages found in the metadata.

#![warn(missing_docs)]

mod canvases;
mod inspect;
mod locales;
mod session;
mod tree;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Vellum — locale-aware views of IIIF Presentation manifests.
#[derive(Parser, Debug)]
#[command(name = "vellum", version, about = "Vellum IIIF manifest inspector")]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) logging and print cache statistics.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a `vellum.toml` file or a directory containing one.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Locale to resolve language-tagged values for (e.g. `fr`, `en-GB`).
    /// Overrides the configured default.
    #[arg(short, long, global = true)]
    pub locale: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the display fields of a manifest or collection.
    Inspect(ViewArgs),
    /// List the canvases of a manifest and mark the start canvas.
    Canvases(CanvasArgs),
    /// Print the structure (range) tree.
    Tree(ViewArgs),
    /// List the languages used in the metadata.
    Locales(ViewArgs),
}

/// Arguments shared by every subcommand.
#[derive(Parser, Debug)]
pub struct ViewArgs {
    /// Path to a manifest JSON file.
    pub file: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for `vellum canvases`.
#[derive(Parser, Debug)]
pub struct CanvasArgs {
    /// The manifest to read.
    #[command(flatten)]
    pub view: ViewArgs,

    /// Treat this canvas index as already selected.
    #[arg(long)]
    pub index: Option<usize>,
}

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error logging.
    pub quiet: bool,
    /// Whether to print debug logging and cache statistics.
    pub verbose: bool,
    /// Optional path to a config file or directory.
    pub config: Option<PathBuf>,
    /// Optional locale override.
    pub locale: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
        locale: cli.locale,
    };
    init_tracing(&global);

    let result = match cli.command {
        Command::Inspect(ref args) => inspect::run(args, &global),
        Command::Canvases(ref args) => canvases::run(args, &global),
        Command::Tree(ref args) => tree::run(args, &global),
        Command::Locales(ref args) => locales::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// The log filter used when `RUST_LOG` is not set.
fn default_filter(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "warn"
    }
}

fn init_tracing(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(global)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn global(quiet: bool, verbose: bool) -> GlobalArgs {
        GlobalArgs {
            quiet,
            verbose,
            config: None,
            locale: None,
        }
    }

    #[test]
    fn parse_inspect_default() {
        let cli = Cli::parse_from(["vellum", "inspect", "manifest.json"]);
        match cli.command {
            Command::Inspect(ref args) => {
                assert_eq!(args.file, PathBuf::from("manifest.json"));
                assert_eq!(args.format, OutputFormat::Text);
            }
            _ => panic!("expected Inspect command"),
        }
        assert!(cli.locale.is_none());
    }

    #[test]
    fn parse_inspect_json_with_locale() {
        let cli = Cli::parse_from(["vellum", "--locale", "fr", "inspect", "m.json", "--format", "json"]);
        assert_eq!(cli.locale.as_deref(), Some("fr"));
        match cli.command {
            Command::Inspect(ref args) => assert_eq!(args.format, OutputFormat::Json),
            _ => panic!("expected Inspect command"),
        }
    }

    #[test]
    fn parse_canvases_with_index() {
        let cli = Cli::parse_from(["vellum", "canvases", "m.json", "--index", "3"]);
        match cli.command {
            Command::Canvases(ref args) => {
                assert_eq!(args.index, Some(3));
                assert_eq!(args.view.file, PathBuf::from("m.json"));
            }
            _ => panic!("expected Canvases command"),
        }
    }

    #[test]
    fn parse_tree_and_locales() {
        let cli = Cli::parse_from(["vellum", "tree", "m.json"]);
        assert!(matches!(cli.command, Command::Tree(_)));
        let cli = Cli::parse_from(["vellum", "locales", "m.json", "-f", "json"]);
        assert!(matches!(cli.command, Command::Locales(ref a) if a.format == OutputFormat::Json));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["vellum", "--quiet", "--config", "/etc/vellum.toml", "tree", "m.json"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/vellum.toml")));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["vellum", "inspect", "m.json", "--verbose", "-l", "de"]);
        assert!(cli.verbose);
        assert_eq!(cli.locale.as_deref(), Some("de"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Cli::try_parse_from(["vellum", "inspect"]).is_err());
    }

    #[test]
    fn log_filter_levels() {
        assert_eq!(default_filter(&global(false, false)), "warn");
        assert_eq!(default_filter(&global(false, true)), "debug");
        assert_eq!(default_filter(&global(true, true)), "error");
    }
}
