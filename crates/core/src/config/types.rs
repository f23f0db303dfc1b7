use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::converter::{self, Converter};

/// Root configuration.
///
/// Only the converter list is interpreted here; every other key is kept in
/// `other` so a config can be loaded and written back without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Converters in priority order. `None` when the key is missing or does
    /// not hold a list.
    #[serde(
        default,
        deserialize_with = "lenient_converters",
        skip_serializing_if = "Option::is_none"
    )]
    pub converters: Option<Vec<Converter>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Config {
    pub fn with_converters(converters: Vec<Converter>) -> Self {
        Self {
            converters: Some(converters),
            other: Map::new(),
        }
    }

    /// The configured converters, empty when none are configured.
    pub fn converters(&self) -> &[Converter] {
        self.converters.as_deref().unwrap_or_default()
    }

    /// Configured converters followed by every built-in converter the
    /// config does not mention yet.
    pub fn effective_converters(&self) -> Vec<Converter> {
        converter::merge_converters(self.converters(), converter::default_converters())
    }
}

// Individual entries must be well formed, but a `converters` value of the
// wrong shape counts as "no converters".
fn lenient_converters<'de, D>(deserializer: D) -> Result<Option<Vec<Converter>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => converter::parse_entries(&items)
            .map(Some)
            .map_err(serde::de::Error::custom),
        Value::Null => Ok(None),
        other => {
            warn!(
                kind = converter::value_kind(&other),
                "Ignoring `converters`: expected a sequence"
            );
            Ok(None)
        }
    }
}
