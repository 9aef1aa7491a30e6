//! Parsing and validation of `vellum.toml` viewer configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`ViewerConfig`] holding the global default locale, thumbnail synthesis
//! settings, and search-service discovery preferences.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
