use std::collections::HashSet;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Converter ids are not empty
/// - Converter ids are unique
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for (index, converter) in config.converters().iter().enumerate() {
        if converter.id.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "converters[{index}] has an empty id"
            )));
        }
        if !seen.insert(converter.id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "converter '{}' is listed more than once",
                converter.id
            )));
        }
    }

    Ok(())
}
