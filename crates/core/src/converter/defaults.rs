//! Built-in converter table and legacy id aliases.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use super::options::ConverterOptions;
use super::types::Converter;

/// Ids of the built-in converters.
pub mod ids {
    pub const CWEBP: &str = "cwebp";
    pub const VIPS: &str = "vips";
    pub const IMAGEMAGICK: &str = "imagemagick";
    pub const GRAPHICSMAGICK: &str = "graphicsmagick";
    pub const WPC: &str = "wpc";
    pub const EWWW: &str = "ewww";
    pub const IMAGICK: &str = "imagick";
    pub const GMAGICK: &str = "gmagick";
    pub const GD: &str = "gd";

    /// Pre-rename ids of the magick binaries, still found in older configs.
    pub const GMAGICKBINARY: &str = "gmagickbinary";
    pub const IMAGICKBINARY: &str = "imagickbinary";
}

/// A legacy id that, when present in a list, stands in for a current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyAlias {
    pub legacy_id: &'static str,
    pub replaced_id: &'static str,
}

/// Consulted by merges so a migrated config does not end up with both the
/// legacy and the current entry.
pub const LEGACY_ALIASES: &[LegacyAlias] = &[
    LegacyAlias {
        legacy_id: ids::GMAGICKBINARY,
        replaced_id: ids::GRAPHICSMAGICK,
    },
    LegacyAlias {
        legacy_id: ids::IMAGICKBINARY,
        replaced_id: ids::IMAGEMAGICK,
    },
];

/// Default converters in priority order.
pub static DEFAULT_CONVERTERS: Lazy<Vec<Converter>> = Lazy::new(|| {
    vec![
        with_defaults(
            ids::CWEBP,
            [
                ("use-nice", json!(true)),
                ("try-common-system-paths", json!(true)),
                ("try-supplied-binary-for-os", json!(true)),
                ("method", json!(6)),
                ("size-in-percentage", Value::Null),
                ("low-memory", json!(true)),
                ("command-line-options", json!("")),
            ],
        ),
        with_defaults(
            ids::VIPS,
            [("smart-subsample", json!(false)), ("preset", json!("none"))],
        ),
        with_defaults(ids::IMAGEMAGICK, [("use-nice", json!(true))]),
        with_defaults(ids::GRAPHICSMAGICK, [("use-nice", json!(true))]),
        // wpc negotiates its api version with the remote end; no defaults here
        Converter::new(ids::WPC),
        Converter::new(ids::EWWW),
        Converter::new(ids::IMAGICK),
        Converter::new(ids::GMAGICK),
        with_defaults(ids::GD, [("skip-pngs", json!(false))]),
    ]
});

fn with_defaults<const N: usize>(id: &str, options: [(&str, Value); N]) -> Converter {
    Converter::new(id).with_options(options.into_iter().collect::<ConverterOptions>())
}
