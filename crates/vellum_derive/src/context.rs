//! Inputs a derivation needs besides the document itself.

use vellum_common::{Fingerprint, Fingerprinter};
use vellum_config::{ImageFormat, ViewerConfig, DEFAULT_THUMBNAIL_HEIGHT};
use vellum_manifest::capability;

/// Per-query settings passed to every derivation.
///
/// The document locale is not part of the context: it travels with the
/// [`Document`](vellum_manifest::Document) and with the cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeriveContext {
    /// Height of a thumbnail synthesized from an image service.
    pub thumbnail_height: u32,
    /// Format requested from the image service.
    pub thumbnail_format: ImageFormat,
    /// Try the newer search revision first.
    pub prefer_newest_search: bool,
    /// Provider name supplied alongside the fetch record.
    pub provider_override: Option<String>,
    /// Canvas index the caller already has selected, if any.
    pub canvas_index: Option<usize>,
}

impl Default for DeriveContext {
    fn default() -> Self {
        Self {
            thumbnail_height: DEFAULT_THUMBNAIL_HEIGHT,
            thumbnail_format: ImageFormat::default(),
            prefer_newest_search: true,
            provider_override: None,
            canvas_index: None,
        }
    }
}

impl DeriveContext {
    /// Builds a context from viewer configuration.
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            thumbnail_height: config.thumbnail.height,
            thumbnail_format: config.thumbnail.format,
            prefer_newest_search: config.search.prefer_newest,
            ..Self::default()
        }
    }

    /// Sets the provider override.
    pub fn with_provider(mut self, provider: Option<String>) -> Self {
        self.provider_override = provider;
        self
    }

    /// Sets the selected canvas index.
    pub fn with_canvas_index(mut self, index: Option<usize>) -> Self {
        self.canvas_index = index;
        self
    }

    /// Search capability URIs in the order they should be tried.
    pub fn search_order(&self) -> [&'static str; 2] {
        if self.prefer_newest_search {
            [capability::SEARCH_1, capability::SEARCH_0]
        } else {
            [capability::SEARCH_0, capability::SEARCH_1]
        }
    }

    /// Autocomplete capability URIs in the order they should be tried.
    pub fn autocomplete_order(&self) -> [&'static str; 2] {
        if self.prefer_newest_search {
            [capability::AUTOCOMPLETE_1, capability::AUTOCOMPLETE_0]
        } else {
            [capability::AUTOCOMPLETE_0, capability::AUTOCOMPLETE_1]
        }
    }

    /// A stable digest of every field, used to keep memoized results
    /// computed under different settings apart.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprinter::new()
            .num(Some(u64::from(self.thumbnail_height)))
            .str(Some(self.thumbnail_format.extension()))
            .flag(self.prefer_newest_search)
            .str(self.provider_override.as_deref())
            .num(self.canvas_index.map(|i| i as u64))
            .finish()
    }
}
