use crate::core::context::ExportContext;
use crate::domain::ports::Export;
use crate::utils::error::Result;
use serde_json::{Map, Value};

/// Collects a model's declared fields into an ordered output mapping.
pub struct Fields<'a, 'c> {
    cx: &'a mut ExportContext<'c>,
    map: Map<String, Value>,
}

impl<'a, 'c> Fields<'a, 'c> {
    pub(crate) fn new(cx: &'a mut ExportContext<'c>) -> Self {
        Self {
            cx,
            map: Map::new(),
        }
    }

    /// Exports `value` under `name` unless the name is private.
    pub fn field<T: Export + ?Sized>(&mut self, name: &str, value: &mut T) -> Result<&mut Self> {
        if self.cx.config().is_private(name) {
            tracing::trace!("Skipping private field {}", name);
            return Ok(self);
        }

        let exported = value.export(self.cx)?;
        self.map.insert(name.to_string(), exported);
        Ok(self)
    }

    /// Exports a value that is not stored on the model, e.g. a derived total.
    pub fn computed<T: Export>(&mut self, name: &str, mut value: T) -> Result<&mut Self> {
        self.field(name, &mut value)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub(crate) fn finish(self) -> Map<String, Value> {
        self.map
    }
}
