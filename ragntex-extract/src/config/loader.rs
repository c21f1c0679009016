//! Configuration loading from files and environment variables.

use std::path::Path;

use config::{Config, Environment, File};

use crate::error::{ExtractionError, ExtractionResult};

use super::ExtractConfig;

/// Default configuration file stem, looked up in the working directory
const DEFAULT_CONFIG_NAME: &str = "ragntex";

/// Load configuration from file and env vars, then validate it.
///
/// An explicit `path` must exist; the default `ragntex.{toml,json,...}` is optional.
pub fn load_config(path: Option<&Path>) -> ExtractionResult<ExtractConfig> {
    let file_source = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let config: ExtractConfig = Config::builder()
        .add_source(file_source)
        .add_source(
            Environment::with_prefix("RAGNTEX")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| ExtractionError::Config {
            message: format!("Failed to build config: {}", e),
        })?
        .try_deserialize()
        .map_err(|e| ExtractionError::Config {
            message: format!("Failed to deserialize config: {}", e),
        })?;

    config.validate()?;
    Ok(config)
}
