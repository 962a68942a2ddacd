use crate::utils::error::{ExportError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_PRIVATE_PREFIX: &str = "_";

/// Options controlling how models are flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// chrono strftime pattern applied to every date/time value.
    pub date_format: String,
    /// Field names starting with this prefix are never exported. Empty disables the filter.
    pub private_prefix: String,
    /// Maximum nesting of mappings and sequences; the top-level model counts as 1.
    pub max_depth: Option<usize>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            private_prefix: DEFAULT_PRIVATE_PREFIX.to_string(),
            max_depth: None,
        }
    }
}

impl ExportConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ExportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let config: Self =
            toml::from_str(&processed_content).map_err(|e| ExportError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        config.validate()?;

        tracing::debug!("Loaded export config: {:?}", config);
        Ok(config)
    }

    /// 替換環境變數 (例如 ${DATE_FORMAT})，未設定的變數保留原文
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ExportError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    pub fn with_private_prefix(mut self, private_prefix: impl Into<String>) -> Self {
        self.private_prefix = private_prefix.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Whether a field with this name stays out of the output.
    pub fn is_private(&self, name: &str) -> bool {
        !self.private_prefix.is_empty() && name.starts_with(&self.private_prefix)
    }
}

impl Validate for ExportConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("date_format", &self.date_format)?;
        validation::validate_strftime("date_format", &self.date_format)?;

        if let Some(max_depth) = self.max_depth {
            validation::validate_positive_number("max_depth", max_depth, 1)?;
        }

        Ok(())
    }
}
