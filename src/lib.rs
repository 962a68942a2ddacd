pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::core::context::ExportContext;
pub use crate::core::export::{export_model, to_value, to_value_with};
pub use crate::core::serialize::{Serde, Serialized};
pub use config::ExportConfig;
pub use domain::{fields::Fields, ports::Export, ports::Model};
pub use utils::error::{ExportError, Result};
