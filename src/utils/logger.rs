use crate::utils::error::{ExportError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    /// Structured output for log aggregation.
    Json,
}

pub fn init_logger(verbose: bool) -> Result<()> {
    let default_directive = if verbose {
        "model_export=trace,info"
    } else {
        "model_export=info"
    };
    init_with_format(LogFormat::Compact, default_directive)
}

pub fn init_json_logger() -> Result<()> {
    init_with_format(LogFormat::Json, "model_export=info")
}

/// Installs the global subscriber; `RUST_LOG` overrides `default_directive`.
pub fn init_with_format(format: LogFormat, default_directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
    };

    installed.map_err(|e| ExportError::ConfigError {
        message: format!("Logger already initialised: {}", e),
    })
}
