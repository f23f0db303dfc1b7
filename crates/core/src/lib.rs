pub mod config;
pub mod converter;

pub use config::{
    load_config, load_config_from_json, load_config_from_str, validate_config, Config,
    ConfigError,
};
pub use converter::{
    converter_by_id, converter_id, converter_names, default_converter_names, default_converters,
    first_working_and_active_converter, first_working_and_active_converter_id, merge_converters,
    normalize, normalize_value, working_and_active_converters, working_converter_ids,
    working_converters, Converter, ConverterError, ConverterOptions, RawConverterEntry,
    TypedOptions,
};
