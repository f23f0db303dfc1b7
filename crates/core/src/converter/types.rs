//! Types for the converter module.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ConverterError;
use super::options::{ConverterOptions, TypedOptions};

/// A converter entry in canonical form.
///
/// On the wire the id is stored under the `converter` key. Keys other than
/// the ones modelled here (for instance an `error` left by a health check)
/// are carried in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Converter {
    #[serde(rename = "converter")]
    pub id: String,
    #[serde(default)]
    pub options: ConverterOptions,
    /// Result of the last health check; absent means assumed working.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working: Option<bool>,
    /// Explicitly disabled by the user; absent means active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivated: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Converter {
    /// Creates an entry with no options and no status flags.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            options: ConverterOptions::new(),
            working: None,
            deactivated: None,
            extra: Map::new(),
        }
    }

    pub fn with_options(mut self, options: ConverterOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets a single option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key, value);
        self
    }

    pub fn with_working(mut self, working: bool) -> Self {
        self.working = Some(working);
        self
    }

    pub fn with_deactivated(mut self, deactivated: bool) -> Self {
        self.deactivated = Some(deactivated);
        self
    }

    /// Id of this converter.
    pub fn converter_id(&self) -> &str {
        &self.id
    }

    /// Only an explicit `working: false` marks a converter as broken.
    pub fn is_working(&self) -> bool {
        self.working != Some(false)
    }

    /// Only an explicit `deactivated: true` disables a converter.
    pub fn is_active(&self) -> bool {
        self.deactivated != Some(true)
    }

    /// Reads the options as the typed view for this converter id.
    pub fn typed_options(&self) -> Result<TypedOptions, ConverterError> {
        TypedOptions::parse(&self.id, &self.options)
    }
}

/// A converter list element as found in user input: either a bare id or a
/// record whose `options` may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawConverterEntry {
    Id(String),
    Entry(Converter),
}

impl RawConverterEntry {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Entry(converter) => &converter.id,
        }
    }

    /// Resolves the entry into canonical form.
    pub fn into_converter(self) -> Converter {
        match self {
            Self::Id(id) => Converter::new(id),
            Self::Entry(converter) => converter,
        }
    }
}

impl From<String> for RawConverterEntry {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for RawConverterEntry {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<Converter> for RawConverterEntry {
    fn from(converter: Converter) -> Self {
        Self::Entry(converter)
    }
}

impl From<&Converter> for RawConverterEntry {
    fn from(converter: &Converter) -> Self {
        Self::Entry(converter.clone())
    }
}
