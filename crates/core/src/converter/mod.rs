//! Converter registry for WebP conversion.
//!
//! A converter is a backend able to produce WebP images: a command line
//! binary (cwebp, imagemagick, graphicsmagick), a PHP/library binding (vips,
//! imagick, gmagick, gd) or a remote API (wpc, ewww). This module holds the
//! built-in converter table and the list operations used to pick one:
//!
//! - normalizing user lists that mix bare ids and records
//! - merging a user list with the defaults, honoring legacy ids
//! - selecting by id, by health status and by activation
//!
//! # Example
//!
//! ```
//! use webpx_core::converter::{first_working_and_active_converter_id, Converter};
//! use webpx_core::Config;
//!
//! let config = Config::with_converters(vec![
//!     Converter::new("cwebp").with_working(false),
//!     Converter::new("vips"),
//! ]);
//! assert_eq!(first_working_and_active_converter_id(&config), Some("vips"));
//! ```

mod defaults;
mod error;
mod options;
mod registry;
mod types;

pub use defaults::{ids, LegacyAlias, DEFAULT_CONVERTERS, LEGACY_ALIASES};
pub use error::ConverterError;
pub use options::{
    ConverterOptions, CwebpOptions, GdOptions, MagickOptions, TypedOptions, VipsOptions,
};
pub use registry::{
    converter_by_id, converter_id, converter_names, default_converter_names, default_converters,
    first_working_and_active_converter, first_working_and_active_converter_id, merge_converters,
    normalize, normalize_value, working_and_active_converters, working_converter_ids,
    working_converters,
};
pub use types::{Converter, RawConverterEntry};

pub(crate) use options::value_kind;
pub(crate) use registry::parse_entries;
