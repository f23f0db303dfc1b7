//! Converter option maps and per-converter typed views.
//!
//! Every converter carries its own option set with no schema shared across
//! converter ids. The raw map is kept as-is so unknown keys survive a
//! load/save cycle; typed views read the keys a given converter understands.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::error::ConverterError;
use super::ids;

/// String-keyed option map of a single converter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConverterOptions(Map<String, Value>);

impl ConverterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets an option, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Whether the key is present with an explicit null value.
    pub fn is_null(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(Value::Null))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ConverterOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ConverterOptions {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// Configs written by PHP encode an empty options map as `[]`, and a null
// options value counts as "not set".
impl<'de> Deserialize<'de> for ConverterOptions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            Value::Array(items) if items.is_empty() => Ok(Self::default()),
            other => Err(serde::de::Error::custom(format!(
                "options must be a map, got {}",
                value_kind(&other)
            ))),
        }
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "map",
    }
}

/// Options understood by the `cwebp` binary converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CwebpOptions {
    /// Run the binary through `nice`.
    pub use_nice: bool,
    pub try_common_system_paths: bool,
    /// Fall back to the precompiled binary bundled for the host OS.
    pub try_supplied_binary_for_os: bool,
    /// Compression method, 0 (fast) to 6 (slowest, smallest).
    pub method: u8,
    /// Target size relative to the source; `None` disables size targeting.
    pub size_in_percentage: Option<u32>,
    pub low_memory: bool,
    /// Extra raw arguments appended to the command line.
    pub command_line_options: String,
}

impl Default for CwebpOptions {
    fn default() -> Self {
        Self {
            use_nice: true,
            try_common_system_paths: true,
            try_supplied_binary_for_os: true,
            method: 6,
            size_in_percentage: None,
            low_memory: true,
            command_line_options: String::new(),
        }
    }
}

/// Options understood by the `vips` library converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct VipsOptions {
    pub smart_subsample: bool,
    /// Encoder preset name ("none", "default", "picture", "photo", ...).
    pub preset: String,
}

impl Default for VipsOptions {
    fn default() -> Self {
        Self {
            smart_subsample: false,
            preset: "none".to_string(),
        }
    }
}

/// Options shared by the `imagemagick` and `graphicsmagick` binaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MagickOptions {
    pub use_nice: bool,
}

impl Default for MagickOptions {
    fn default() -> Self {
        Self { use_nice: true }
    }
}

/// Options understood by the `gd` extension converter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GdOptions {
    pub skip_pngs: bool,
}

/// Typed view over a converter's options, selected by converter id.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedOptions {
    Cwebp(CwebpOptions),
    Vips(VipsOptions),
    ImageMagick(MagickOptions),
    GraphicsMagick(MagickOptions),
    Gd(GdOptions),
    /// Converters without declared option defaults (wpc, ewww, imagick,
    /// gmagick and any custom id).
    Generic(ConverterOptions),
}

impl TypedOptions {
    /// Reads `options` as the typed view belonging to converter `id`.
    pub fn parse(id: &str, options: &ConverterOptions) -> Result<Self, ConverterError> {
        Ok(match id {
            ids::CWEBP => Self::Cwebp(read_view(id, options)?),
            ids::VIPS => Self::Vips(read_view(id, options)?),
            ids::IMAGEMAGICK => Self::ImageMagick(read_view(id, options)?),
            ids::GRAPHICSMAGICK => Self::GraphicsMagick(read_view(id, options)?),
            ids::GD => Self::Gd(read_view(id, options)?),
            _ => Self::Generic(options.clone()),
        })
    }
}

fn read_view<T>(id: &str, options: &ConverterOptions) -> Result<T, ConverterError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(Value::Object(options.as_map().clone()))
        .map_err(|e| ConverterError::invalid_options(id, e.to_string()))
}
