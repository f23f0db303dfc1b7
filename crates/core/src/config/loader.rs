use figment::{
    providers::{Env, Format, Json, Toml},
    Figment,
};
use std::path::Path;
use tracing::debug;

use super::{types::Config, ConfigError};

/// Prefix of environment variables that override file values.
pub const ENV_PREFIX: &str = "WEBPX_";

/// Load configuration from file with environment variable overrides.
///
/// `.json` files are read as JSON, anything else as TOML.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    debug!(path = %path.display(), json = is_json, "Loading configuration");

    let figment = if is_json {
        Figment::new().merge(Json::file(path))
    } else {
        Figment::new().merge(Toml::file(path))
    };

    let config: Config = figment
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from a JSON string, the format the plugin stores.
pub fn load_config_from_json(json_str: &str) -> Result<Config, ConfigError> {
    serde_json::from_str(json_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
