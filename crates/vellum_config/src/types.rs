//! Configuration types deserialized from `vellum.toml`.

use serde::Deserialize;
use std::fmt;
use vellum_common::LocaleTag;

/// Target height of a thumbnail synthesized from canvas image content.
pub const DEFAULT_THUMBNAIL_HEIGHT: u32 = 80;

/// The top-level viewer configuration parsed from `vellum.toml`.
///
/// Every section is optional; an empty file yields [`ViewerConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewerConfig {
    /// Global locale settings.
    #[serde(default)]
    pub locale: LocaleConfig,
    /// Thumbnail synthesis settings.
    #[serde(default)]
    pub thumbnail: ThumbnailConfig,
    /// Search service discovery settings.
    #[serde(default)]
    pub search: SearchConfig,
}

impl ViewerConfig {
    /// Picks the effective locale for one query: a per-context override if
    /// given, else the configured default.
    pub fn effective_locale<'a>(&'a self, context: Option<&'a LocaleTag>) -> Option<&'a LocaleTag> {
        context.or(self.locale.default.as_ref())
    }
}

/// Global language configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleConfig {
    /// The language used when no per-context locale is supplied.
    #[serde(default)]
    pub default: Option<LocaleTag>,
}

/// Settings for the canvas-derived thumbnail fallback.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThumbnailConfig {
    /// Requested height in pixels; width is left unconstrained.
    #[serde(default = "default_thumbnail_height")]
    pub height: u32,
    /// Output format requested from the image service.
    #[serde(default)]
    pub format: ImageFormat,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_THUMBNAIL_HEIGHT,
            format: ImageFormat::default(),
        }
    }
}

fn default_thumbnail_height() -> u32 {
    DEFAULT_THUMBNAIL_HEIGHT
}

/// Image formats an IIIF Image API service can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// JPEG (the Image API default).
    #[default]
    Jpg,
    /// PNG.
    Png,
    /// WebP.
    Webp,
    /// GIF.
    Gif,
}

impl ImageFormat {
    /// Returns the file extension used in an Image API request.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
            ImageFormat::Gif => "gif",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Search service discovery settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Try the newer search revision before the older one.
    #[serde(default = "default_true")]
    pub prefer_newest: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            prefer_newest: true,
        }
    }
}

fn default_true() -> bool {
    true
}
