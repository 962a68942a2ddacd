use crate::config::ExportConfig;
use crate::core::context::ExportContext;
use crate::core::export::export_model;
use crate::core::serialize::Serialized;
use crate::domain::fields::Fields;
use crate::utils::error::Result;
use serde_json::{Map, Value};

/// A value that can be flattened into plain JSON data.
///
/// Implemented for primitives, strings, sequences, string-keyed mappings,
/// chrono date/time types, shared containers and every [`Model`]. Anything
/// else must be wrapped explicitly (see [`crate::Serde`]).
pub trait Export {
    fn export(&mut self, cx: &mut ExportContext<'_>) -> Result<Value>;
}

/// A domain object whose declared fields are exposed as plain data.
///
/// Implementors list their exportable fields in [`Model::export_fields`], in
/// declaration order. Names starting with the configured private prefix
/// (`_` by default) are dropped even when listed.
pub trait Model {
    /// Declares the fields to export, e.g. `fields.field("id", &mut self.id)?;`.
    fn export_fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<()>;

    /// Runs once per `to_map` call on this instance, before its fields are read.
    /// Nested models run their own hook when they are exported.
    fn pre_output(&mut self) -> Result<()> {
        Ok(())
    }

    fn to_map(&mut self) -> Result<Map<String, Value>> {
        let config = ExportConfig::default();
        self.to_map_with(&config)
    }

    fn to_map_with(&mut self, config: &ExportConfig) -> Result<Map<String, Value>> {
        tracing::debug!("Exporting {}", std::any::type_name::<Self>());
        let mut cx = ExportContext::new(config);
        let map = export_model(self, &mut cx)?;
        tracing::debug!(
            "Exported {} with {} fields",
            std::any::type_name::<Self>(),
            map.len()
        );
        Ok(map)
    }

    /// Same data as [`Model::to_map`], as a JSON value.
    fn json_serialize(&mut self) -> Result<Value> {
        self.to_map().map(Value::Object)
    }

    /// Adapter that lets any `serde` serializer encode this model directly.
    fn serializable(&mut self) -> Serialized<'_, Self>
    where
        Self: Sized,
    {
        Serialized::new(self)
    }

    fn to_json_string(&mut self) -> Result<String> {
        let value = self.json_serialize()?;
        Ok(serde_json::to_string(&value)?)
    }

    fn to_json_string_pretty(&mut self) -> Result<String> {
        let value = self.json_serialize()?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

impl<M: Model> Export for M {
    fn export(&mut self, cx: &mut ExportContext<'_>) -> Result<Value> {
        export_model(self, cx).map(Value::Object)
    }
}
