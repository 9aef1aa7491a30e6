//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ViewerConfig;
use std::path::Path;

/// Name of the configuration file looked up in a directory.
pub const CONFIG_FILE_NAME: &str = "vellum.toml";

/// Largest thumbnail height accepted, in pixels.
const MAX_THUMBNAIL_HEIGHT: u32 = 4096;

/// Loads and validates a `vellum.toml` configuration from a directory.
///
/// Reads `<dir>/vellum.toml`, parses it, and validates value ranges.
pub fn load_config(dir: &Path) -> Result<ViewerConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a `vellum.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ViewerConfig, ConfigError> {
    let config: ViewerConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configured values are in range.
fn validate_config(config: &ViewerConfig) -> Result<(), ConfigError> {
    let height = config.thumbnail.height;
    if height == 0 {
        return Err(ConfigError::Invalid {
            field: "thumbnail.height",
            reason: "must be positive".to_string(),
        });
    }
    if height > MAX_THUMBNAIL_HEIGHT {
        return Err(ConfigError::Invalid {
            field: "thumbnail.height",
            reason: format!("{height} exceeds {MAX_THUMBNAIL_HEIGHT}"),
        });
    }
    Ok(())
}
