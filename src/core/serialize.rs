use crate::config::ExportConfig;
use crate::core::context::ExportContext;
use crate::domain::ports::{Export, Model};
use crate::utils::error::Result;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

/// `serde::Serialize` adapter over a model.
///
/// Serializing runs the model's `to_map_with`, hook included, so the model is
/// held mutably for the adapter's lifetime.
pub struct Serialized<'a, M: Model> {
    model: RefCell<&'a mut M>,
    config: Option<&'a ExportConfig>,
}

impl<'a, M: Model> Serialized<'a, M> {
    pub fn new(model: &'a mut M) -> Self {
        Self {
            model: RefCell::new(model),
            config: None,
        }
    }

    pub fn with_config(model: &'a mut M, config: &'a ExportConfig) -> Self {
        Self {
            model: RefCell::new(model),
            config: Some(config),
        }
    }
}

impl<M: Model> Serialize for Serialized<'_, M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut model = self.model.try_borrow_mut().map_err(S::Error::custom)?;

        let default_config;
        let config = match self.config {
            Some(config) => config,
            None => {
                default_config = ExportConfig::default();
                &default_config
            }
        };

        let map = model.to_map_with(config).map_err(S::Error::custom)?;
        map.serialize(serializer)
    }
}

/// Opt-in export for any `serde::Serialize` type that is not a model.
///
/// The value goes through `serde_json::to_value`, so its own serde attributes
/// (renames, skips, date encodings) apply instead of the model rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Serde<T>(pub T);

impl<T> Serde<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Serde<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Serde<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T> From<T> for Serde<T> {
    fn from(value: T) -> Self {
        Serde(value)
    }
}

impl<T: Serialize> Export for Serde<T> {
    fn export(&mut self, _cx: &mut ExportContext<'_>) -> Result<Value> {
        Ok(serde_json::to_value(&self.0)?)
    }
}
