pub mod toml_config;

pub use toml_config::{ExportConfig, DEFAULT_DATE_FORMAT, DEFAULT_PRIVATE_PREFIX};
