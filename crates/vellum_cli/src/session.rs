//! Shared setup: configuration, locale, and a cache holding one manifest.

use std::error::Error;
use std::fs;
use std::path::Path;

use tracing::{debug, info};
use vellum_cache::{FetchState, ListItem, ManifestCache, ManifestRecord, Query};
use vellum_common::LocaleTag;
use vellum_config::{ViewerConfig, CONFIG_FILE_NAME};
use vellum_derive::{Derivation, DeriveContext};
use vellum_manifest::Document;

use crate::GlobalArgs;

/// One manifest file loaded into a fresh cache.
pub struct Session {
    cache: ManifestCache,
    manifest_id: String,
    locale: Option<LocaleTag>,
    /// The derivation context built from configuration.
    pub ctx: DeriveContext,
    verbose: bool,
}

impl Session {
    /// Loads configuration and the manifest at `path`.
    pub fn open(path: &Path, global: &GlobalArgs) -> Result<Self, Box<dyn Error>> {
        let config = load_config(global)?;
        let cli_locale = global
            .locale
            .as_deref()
            .map(str::parse::<LocaleTag>)
            .transpose()?;
        let locale = config.effective_locale(cli_locale.as_ref()).cloned();

        let text = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let document = vellum_manifest::parse_str(&text, None)?;
        let manifest_id = document
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        debug!(manifest = %manifest_id, version = %document.version(), "loaded manifest file");

        let mut cache = ManifestCache::new();
        cache
            .store_mut()
            .reference(&manifest_id)
            .complete(document.json().as_ref().clone());

        Ok(Self {
            cache,
            manifest_id,
            locale,
            ctx: DeriveContext::from_config(&config),
            verbose: global.verbose,
        })
    }

    /// The manifest id the session is about.
    pub fn manifest_id(&self) -> &str {
        &self.manifest_id
    }

    /// Derives one field through the cache.
    pub fn derive<D: Derivation>(&mut self) -> D::Output {
        let query = Query::manifest(&self.manifest_id).with_locale(self.locale.as_ref());
        self.cache.derive::<D>(&query, &self.ctx)
    }

    /// The parsed document, for version information.
    pub fn document(&mut self) -> Option<Document> {
        let query = Query::manifest(&self.manifest_id).with_locale(self.locale.as_ref());
        self.cache.document(&query)
    }

    /// The manifest list entry.
    pub fn list_item(&mut self) -> Option<ListItem> {
        let query = Query::manifest(&self.manifest_id).with_locale(self.locale.as_ref());
        self.cache.list_item(&query, &self.ctx)
    }

    /// The fetch state of the loaded record.
    pub fn state(&self) -> FetchState {
        self.cache
            .store()
            .get(&self.manifest_id)
            .map(ManifestRecord::state)
            .unwrap_or(FetchState::NotFetched)
    }

    /// Reports cache statistics on stderr under `--verbose`.
    pub fn finish(&self) {
        if self.verbose {
            eprintln!("cache: {}", self.cache.stats());
        }
    }
}

/// Loads configuration from `--config` (a file or a directory), else from
/// `vellum.toml` in the working directory when present, else defaults.
fn load_config(global: &GlobalArgs) -> Result<ViewerConfig, Box<dyn Error>> {
    match &global.config {
        Some(path) if path.is_dir() => Ok(vellum_config::load_config(path)?),
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            Ok(vellum_config::load_config_from_str(&text)?)
        }
        None => {
            let cwd = std::env::current_dir()?;
            if cwd.join(CONFIG_FILE_NAME).is_file() {
                info!(dir = %cwd.display(), "using {CONFIG_FILE_NAME}");
                Ok(vellum_config::load_config(&cwd)?)
            } else {
                Ok(ViewerConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use vellum_derive::fields;

    fn global(config: Option<PathBuf>, locale: Option<&str>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            config,
            locale: locale.map(str::to_string),
        }
    }

    fn write_manifest(dir: &Path) -> PathBuf {
        let path = dir.join("manifest.json");
        fs::write(
            &path,
            r#"{"id": "https://x/m", "type": "Manifest",
                "label": {"en": ["Book"], "fr": ["Livre"]},
                "items": [{"id": "c1", "type": "Canvas"}]}"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn open_and_derive() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path());
        let mut session = Session::open(&path, &global(None, Some("fr"))).unwrap();
        assert_eq!(session.manifest_id(), "https://x/m");
        assert_eq!(session.state(), FetchState::Ready);
        assert_eq!(session.derive::<fields::Title>().as_deref(), Some("Livre"));
    }

    #[test]
    fn config_default_locale() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path());
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[locale]\ndefault = \"fr\"\n").unwrap();
        let mut session = Session::open(&path, &global(Some(dir.path().to_path_buf()), None)).unwrap();
        assert_eq!(session.derive::<fields::Title>().as_deref(), Some("Livre"));

        let mut overridden =
            Session::open(&path, &global(Some(dir.path().to_path_buf()), Some("en"))).unwrap();
        assert_eq!(overridden.derive::<fields::Title>().as_deref(), Some("Book"));
    }

    #[test]
    fn config_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path());
        let config = dir.path().join("custom.toml");
        fs::write(&config, "[thumbnail]\nheight = 200\n").unwrap();
        let session = Session::open(&path, &global(Some(config), None)).unwrap();
        assert_eq!(session.ctx.thumbnail_height, 200);
    }

    #[test]
    fn errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(Session::open(&missing, &global(None, None)).is_err());

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "[1, 2]").unwrap();
        let err = Session::open(&bad, &global(None, None)).err().unwrap();
        assert!(err.to_string().contains("must be a JSON object"));

        let path = write_manifest(dir.path());
        assert!(Session::open(&path, &global(None, Some("not a tag"))).is_err());
    }
}
