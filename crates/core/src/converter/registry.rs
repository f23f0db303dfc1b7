//! Operations over converter lists and configs.
//!
//! Everything here is a pure function: inputs are borrowed, results are new
//! vectors (or borrows into the input). Lookups over a config degrade to an
//! empty list or `None` when the config has no converter list.

use serde_json::Value;
use tracing::debug;

use super::defaults::{DEFAULT_CONVERTERS, LEGACY_ALIASES};
use super::error::ConverterError;
use super::options::value_kind;
use super::types::{Converter, RawConverterEntry};
use crate::config::Config;

/// The built-in converters in priority order.
pub fn default_converters() -> &'static [Converter] {
    &DEFAULT_CONVERTERS
}

/// Ids of the built-in converters, in declared order.
pub fn default_converter_names() -> Vec<&'static str> {
    DEFAULT_CONVERTERS.iter().map(|c| c.id.as_str()).collect()
}

/// Ids of the normalized form of `converters`, in the same order.
pub fn converter_names<I, T>(converters: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<RawConverterEntry>,
{
    normalize(converters).into_iter().map(|c| c.id).collect()
}

/// Promotes bare ids to records and fills in missing options.
///
/// The output is one-to-one with the input and keeps its order. Normalizing
/// an already normalized list returns it unchanged.
pub fn normalize<I, T>(converters: I) -> Vec<Converter>
where
    I: IntoIterator<Item = T>,
    T: Into<RawConverterEntry>,
{
    converters
        .into_iter()
        .map(|entry| entry.into().into_converter())
        .collect()
}

/// Normalizes an untyped converter list.
///
/// Fails on the first element that is neither a string nor a record with a
/// string `converter` key.
pub fn normalize_value(value: &Value) -> Result<Vec<Converter>, ConverterError> {
    match value {
        Value::Array(items) => parse_entries(items),
        other => Err(ConverterError::NotASequence {
            kind: value_kind(other),
        }),
    }
}

pub(crate) fn parse_entries(items: &[Value]) -> Result<Vec<Converter>, ConverterError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_entry(index, item))
        .collect()
}

fn parse_entry(index: usize, item: &Value) -> Result<Converter, ConverterError> {
    match item {
        Value::String(id) => Ok(Converter::new(id.as_str())),
        Value::Object(record) => match record.get("converter") {
            Some(Value::String(_)) => serde_json::from_value(item.clone())
                .map_err(|e| ConverterError::malformed_entry(index, e.to_string())),
            Some(other) => Err(ConverterError::malformed_entry(
                index,
                format!("`converter` must be a string, got {}", value_kind(other)),
            )),
            None => Err(ConverterError::malformed_entry(
                index,
                "record has no `converter` key",
            )),
        },
        other => Err(ConverterError::malformed_entry(
            index,
            format!("expected an id or a record, got {}", value_kind(other)),
        )),
    }
}

/// Appends the entries of `second` whose id is not already in `first`.
///
/// `first` is kept as-is and in order; new entries follow in `second`'s
/// order. An entry replaced by a legacy id already present in `first` is
/// skipped as well.
pub fn merge_converters<I, T>(first: &[Converter], second: I) -> Vec<Converter>
where
    I: IntoIterator<Item = T>,
    T: Into<RawConverterEntry>,
{
    let ids_in_first: Vec<&str> = first.iter().map(|c| c.id.as_str()).collect();
    let mut merged = first.to_vec();

    for converter in normalize(second) {
        let shadowed_by_legacy = LEGACY_ALIASES.iter().find(|alias| {
            alias.replaced_id == converter.id && ids_in_first.contains(&alias.legacy_id)
        });
        if let Some(alias) = shadowed_by_legacy {
            debug!(
                converter = %converter.id,
                legacy_id = alias.legacy_id,
                "Skipping converter replaced by legacy entry"
            );
            continue;
        }
        if ids_in_first.contains(&converter.id.as_str()) {
            debug!(converter = %converter.id, "Converter already present, keeping existing entry");
            continue;
        }
        debug!(converter = %converter.id, "Appending converter");
        merged.push(converter);
    }

    merged
}

/// First entry of the config whose id equals `id`.
pub fn converter_by_id<'a>(config: &'a Config, id: &str) -> Option<&'a Converter> {
    config.converters().iter().find(|c| c.id == id)
}

/// Entries not explicitly marked as broken, in order.
pub fn working_converters(config: &Config) -> Vec<&Converter> {
    config
        .converters()
        .iter()
        .filter(|c| c.is_working())
        .collect()
}

pub fn working_converter_ids(config: &Config) -> Vec<&str> {
    working_converters(config)
        .into_iter()
        .map(converter_id)
        .collect()
}

/// Entries that are neither marked broken nor deactivated, in order.
pub fn working_and_active_converters(config: &Config) -> Vec<&Converter> {
    config
        .converters()
        .iter()
        .filter(|c| c.is_active() && c.is_working())
        .collect()
}

pub fn converter_id(converter: &Converter) -> &str {
    converter.converter_id()
}

/// The converter a conversion should use: the first working and active one.
pub fn first_working_and_active_converter(config: &Config) -> Option<&Converter> {
    let selected = config
        .converters()
        .iter()
        .find(|c| c.is_active() && c.is_working());
    match selected {
        Some(c) => debug!(converter = %c.id, "Selected converter"),
        None => debug!("No working and active converter"),
    }
    selected
}

pub fn first_working_and_active_converter_id(config: &Config) -> Option<&str> {
    first_working_and_active_converter(config).map(converter_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(converters: Vec<Converter>) -> Config {
        Config::with_converters(converters)
    }

    #[test]
    fn test_default_converter_names() {
        assert_eq!(
            default_converter_names(),
            vec![
                "cwebp",
                "vips",
                "imagemagick",
                "graphicsmagick",
                "wpc",
                "ewww",
                "imagick",
                "gmagick",
                "gd"
            ]
        );
        assert_eq!(default_converters().len(), 9);
    }

    #[test]
    fn test_normalize_promotes_bare_ids() {
        let normalized = normalize(["cwebp", "gd"]);
        assert_eq!(normalized, vec![Converter::new("cwebp"), Converter::new("gd")]);
        assert!(normalized.iter().all(|c| c.options.is_empty()));
    }

    #[test]
    fn test_normalize_keeps_records_and_order() {
        let vips = Converter::new("vips").with_option("preset", "photo");
        let normalized = normalize(vec![
            RawConverterEntry::from("ewww"),
            RawConverterEntry::from(vips.clone()),
            RawConverterEntry::from("wpc"),
        ]);
        let ids: Vec<&str> = normalized.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["ewww", "vips", "wpc"]);
        assert_eq!(normalized[1], vips);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(vec![
            RawConverterEntry::from("cwebp"),
            RawConverterEntry::from(Converter::new("gd").with_working(false)),
        ]);
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize(Vec::<RawConverterEntry>::new()).is_empty());
    }

    #[test]
    fn test_converter_names_match_normalized_ids() {
        let input = vec![
            RawConverterEntry::from("gmagick"),
            RawConverterEntry::from(Converter::new("imagick")),
        ];
        let expected: Vec<String> = normalize(input.clone()).into_iter().map(|c| c.id).collect();
        assert_eq!(converter_names(input), expected);
        assert_eq!(expected, ["gmagick", "imagick"]);
    }

    #[test]
    fn test_normalize_value_mixed_shapes() {
        let converters = normalize_value(&json!([
            "cwebp",
            { "converter": "vips" },
            { "converter": "gd", "options": [], "deactivated": true }
        ]))
        .unwrap();
        assert_eq!(converters.len(), 3);
        assert!(converters[1].options.is_empty());
        assert!(!converters[2].is_active());
    }

    #[test]
    fn test_normalize_value_fails_fast_on_malformed_entry() {
        let err = normalize_value(&json!(["cwebp", { "options": {} }, 7])).unwrap_err();
        assert!(matches!(err, ConverterError::MalformedEntry { index: 1, .. }));

        let err = normalize_value(&json!(["cwebp", 7])).unwrap_err();
        assert!(matches!(err, ConverterError::MalformedEntry { index: 1, .. }));

        let err = normalize_value(&json!([{ "converter": false }])).unwrap_err();
        assert!(err.to_string().contains("boolean"));
    }

    #[test]
    fn test_normalize_value_rejects_non_sequence() {
        let err = normalize_value(&json!({ "converter": "cwebp" })).unwrap_err();
        assert!(matches!(err, ConverterError::NotASequence { kind: "map" }));
    }

    #[test]
    fn test_merge_appends_missing_in_second_order() {
        let first = vec![Converter::new("gd"), Converter::new("cwebp")];
        let merged = merge_converters(&first, ["vips", "cwebp", "ewww"]);
        let ids: Vec<&str> = merged.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["gd", "cwebp", "vips", "ewww"]);
    }

    #[test]
    fn test_merge_keeps_first_options() {
        let first = vec![Converter::new("cwebp").with_option("method", 2)];
        let merged = merge_converters(&first, default_converters());
        assert_eq!(merged.len(), 9);
        assert_eq!(merged[0], first[0]);
        assert_eq!(merged[0].options.len(), 1);
        assert_eq!(merged.iter().filter(|c| c.id == "cwebp").count(), 1);
    }

    #[test]
    fn test_merge_does_not_touch_first() {
        let first = vec![Converter::new("vips")];
        let snapshot = first.clone();
        let _ = merge_converters(&first, ["gd"]);
        assert_eq!(first, snapshot);
    }

    #[test]
    fn test_merge_skips_graphicsmagick_after_gmagickbinary() {
        let first = vec![Converter::new("gmagickbinary")];
        let merged = merge_converters(&first, [Converter::new("graphicsmagick")]);
        assert_eq!(merged, first);
    }

    #[test]
    fn test_merge_skips_imagemagick_after_imagickbinary() {
        let first = vec![Converter::new("imagickbinary")];
        let merged = merge_converters(&first, ["imagemagick", "imagick"]);
        let ids: Vec<&str> = merged.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["imagickbinary", "imagick"]);
    }

    #[test]
    fn test_merge_alias_only_applies_to_its_pair() {
        let first = vec![Converter::new("gmagickbinary")];
        let merged = merge_converters(&first, ["imagemagick"]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_with_defaults_bounded_length() {
        let first = vec![Converter::new("custom"), Converter::new("wpc")];
        let merged = merge_converters(&first, default_converters());
        assert!(merged.len() <= first.len() + default_converters().len());
        assert_eq!(merged.len(), 10);
        assert_eq!(&merged[..2], &first[..]);
    }

    #[test]
    fn test_converter_by_id() {
        let cfg = config(vec![
            Converter::new("cwebp").with_option("method", 4),
            Converter::new("gd"),
        ]);
        let found = converter_by_id(&cfg, "cwebp").unwrap();
        assert_eq!(found.options.get_i64("method"), Some(4));
        assert!(converter_by_id(&cfg, "vips").is_none());
    }

    #[test]
    fn test_converter_by_id_returns_first_match() {
        let cfg = config(vec![
            Converter::new("gd").with_option("skip-pngs", true),
            Converter::new("gd"),
        ]);
        let found = converter_by_id(&cfg, "gd").unwrap();
        assert_eq!(found.options.get_bool("skip-pngs"), Some(true));
    }

    #[test]
    fn test_lookups_without_converters() {
        let cfg = Config::default();
        assert!(converter_by_id(&cfg, "cwebp").is_none());
        assert!(working_converters(&cfg).is_empty());
        assert!(working_converter_ids(&cfg).is_empty());
        assert!(working_and_active_converters(&cfg).is_empty());
        assert!(first_working_and_active_converter(&cfg).is_none());
        assert!(first_working_and_active_converter_id(&cfg).is_none());
    }

    #[test]
    fn test_working_converters() {
        let cfg = config(vec![
            Converter::new("a"),
            Converter::new("b").with_working(false),
            Converter::new("c").with_working(true),
        ]);
        let working = working_converters(&cfg);
        assert_eq!(
            working,
            vec![&Converter::new("a"), &Converter::new("c").with_working(true)]
        );
        assert_eq!(working_converter_ids(&cfg), ["a", "c"]);
    }

    #[test]
    fn test_working_ignores_deactivated() {
        let cfg = config(vec![Converter::new("a").with_deactivated(true)]);
        assert_eq!(working_converter_ids(&cfg), ["a"]);
    }

    #[test]
    fn test_working_and_active_excludes_deactivated() {
        let cfg = config(vec![
            Converter::new("a").with_deactivated(true),
            Converter::new("b").with_deactivated(true).with_working(true),
            Converter::new("c").with_working(false),
            Converter::new("d").with_deactivated(false),
            Converter::new("e"),
        ]);
        let ids: Vec<&str> = working_and_active_converters(&cfg)
            .into_iter()
            .map(converter_id)
            .collect();
        assert_eq!(ids, ["d", "e"]);
    }

    #[test]
    fn test_first_working_and_active() {
        let cfg = config(vec![
            Converter::new("cwebp").with_working(false),
            Converter::new("vips").with_deactivated(true),
            Converter::new("gd"),
            Converter::new("ewww"),
        ]);
        assert_eq!(first_working_and_active_converter(&cfg).map(|c| c.id.as_str()), Some("gd"));
        assert_eq!(first_working_and_active_converter_id(&cfg), Some("gd"));
    }

    #[test]
    fn test_first_working_and_active_empty_list() {
        let cfg = config(vec![]);
        assert_eq!(first_working_and_active_converter_id(&cfg), None);
    }

    #[test]
    fn test_first_working_and_active_single() {
        let cfg = config(vec![Converter::new("cwebp")]);
        assert_eq!(first_working_and_active_converter_id(&cfg), Some("cwebp"));
    }

    #[test]
    fn test_first_working_and_active_none_eligible() {
        let cfg = config(vec![
            Converter::new("cwebp").with_working(false),
            Converter::new("gd").with_deactivated(true),
        ]);
        assert!(first_working_and_active_converter(&cfg).is_none());
    }
}
