use crate::core::context::ExportContext;
use crate::domain::ports::Export;
use crate::utils::error::{ExportError, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone};
use serde_json::Value;
use std::fmt::{Display, Write};

// chrono reports a bad pattern as a fmt::Error while rendering.
fn render(formatted: impl Display, pattern: &str) -> Result<Value> {
    let mut out = String::new();
    write!(out, "{}", formatted).map_err(|_| ExportError::InvalidConfigValueError {
        field: "date_format".to_string(),
        value: pattern.to_string(),
        reason: "Not a valid strftime pattern".to_string(),
    })?;
    Ok(Value::String(out))
}

impl Export for NaiveDateTime {
    fn export(&mut self, cx: &mut ExportContext<'_>) -> Result<Value> {
        let pattern = cx.config().date_format.as_str();
        render(self.format(pattern), pattern)
    }
}

/// Rendered in the value's own timezone; the offset itself is not part of the
/// default pattern.
impl<Tz: TimeZone> Export for DateTime<Tz>
where
    Tz::Offset: Display,
{
    fn export(&mut self, cx: &mut ExportContext<'_>) -> Result<Value> {
        let pattern = cx.config().date_format.as_str();
        render(self.format(pattern), pattern)
    }
}
