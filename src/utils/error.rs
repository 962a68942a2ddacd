use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Cyclic structure detected while exporting {type_name}")]
    CyclicStructure { type_name: &'static str },

    #[error("Export depth limit of {limit} exceeded")]
    DepthLimitExceeded { limit: usize },

    #[error("Cannot export non-finite number: {value}")]
    NonFiniteNumber { value: String },

    #[error("Lock poisoned while exporting {type_name}")]
    PoisonedLock { type_name: &'static str },

    #[error("{type_name} is already borrowed elsewhere")]
    BorrowConflict { type_name: &'static str },

    #[error("pre_output hook of {model} failed: {message}")]
    HookError { model: &'static str, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Structure,
    Hook,
    Encoding,
    Configuration,
    System,
}

impl ExportError {
    /// Builds the error a `pre_output` hook returns for model `M`.
    pub fn hook<M: ?Sized>(message: impl Into<String>) -> Self {
        ExportError::HookError {
            model: std::any::type_name::<M>(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ExportError::CyclicStructure { .. }
            | ExportError::DepthLimitExceeded { .. }
            | ExportError::BorrowConflict { .. } => ErrorCategory::Structure,
            ExportError::HookError { .. } => ErrorCategory::Hook,
            ExportError::NonFiniteNumber { .. } | ExportError::SerializationError(_) => {
                ErrorCategory::Encoding
            }
            ExportError::ConfigError { .. } | ExportError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ExportError::PoisonedLock { .. } | ExportError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Structure => {
                "Break the reference cycle or raise max_depth in the export configuration"
            }
            ErrorCategory::Hook => "Check the state the model's pre_output hook depends on",
            ErrorCategory::Encoding => "Make sure every exported value is representable as JSON",
            ErrorCategory::Configuration => "Fix the export configuration and try again",
            ErrorCategory::System => "Inspect the underlying system error",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
