use crate::config::ExportConfig;
use crate::core::context::ExportContext;
use crate::domain::fields::Fields;
use crate::domain::ports::{Export, Model};
use crate::utils::error::{ExportError, Result};
use serde_json::{Map, Number, Value};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::Display;
use std::rc::Rc;
use std::sync::{Arc, Mutex, RwLock, TryLockError};

/// Runs the model's hook, then flattens its declared fields one level down.
pub fn export_model<M: Model + ?Sized>(
    model: &mut M,
    cx: &mut ExportContext<'_>,
) -> Result<Map<String, Value>> {
    cx.nested(|cx| {
        model.pre_output()?;

        let mut fields = Fields::new(cx);
        model.export_fields(&mut fields)?;
        Ok(fields.finish())
    })
}

/// Flattens any exportable value with the default configuration.
pub fn to_value<T: Export + ?Sized>(value: &mut T) -> Result<Value> {
    let config = ExportConfig::default();
    to_value_with(value, &config)
}

pub fn to_value_with<T: Export + ?Sized>(value: &mut T, config: &ExportConfig) -> Result<Value> {
    let mut cx = ExportContext::new(config);
    value.export(&mut cx)
}

macro_rules! impl_export_integer {
    ($($ty:ty),*) => {
        $(
            impl Export for $ty {
                fn export(&mut self, _cx: &mut ExportContext<'_>) -> Result<Value> {
                    Ok(Value::from(*self))
                }
            }
        )*
    };
}

impl_export_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

fn export_float(value: f64) -> Result<Value> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| ExportError::NonFiniteNumber {
            value: value.to_string(),
        })
}

impl Export for f64 {
    fn export(&mut self, _cx: &mut ExportContext<'_>) -> Result<Value> {
        export_float(*self)
    }
}

impl Export for f32 {
    fn export(&mut self, _cx: &mut ExportContext<'_>) -> Result<Value> {
        export_float(f64::from(*self))
    }
}

impl Export for bool {
    fn export(&mut self, _cx: &mut ExportContext<'_>) -> Result<Value> {
        Ok(Value::Bool(*self))
    }
}

impl Export for char {
    fn export(&mut self, _cx: &mut ExportContext<'_>) -> Result<Value> {
        Ok(Value::String(self.to_string()))
    }
}

impl Export for str {
    fn export(&mut self, _cx: &mut ExportContext<'_>) -> Result<Value> {
        Ok(Value::String(self.to_string()))
    }
}

impl Export for String {
    fn export(&mut self, _cx: &mut ExportContext<'_>) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }
}

// Already plain data; object keys are left untouched.
impl Export for Value {
    fn export(&mut self, _cx: &mut ExportContext<'_>) -> Result<Value> {
        Ok(self.clone())
    }
}

impl Export for Map<String, Value> {
    fn export(&mut self, _cx: &mut ExportContext<'_>) -> Result<Value> {
        Ok(Value::Object(self.clone()))
    }
}

impl<T: Export> Export for Option<T> {
    fn export(&mut self, cx: &mut ExportContext<'_>) -> Result<Value> {
        match self {
            Some(value) => value.export(cx),
            None => Ok(Value::Null),
        }
    }
}

fn export_sequence<'v, T, I>(items: I, cx: &mut ExportContext<'_>) -> Result<Value>
where
    T: Export + 'v,
    I: IntoIterator<Item = &'v mut T>,
{
    cx.nested(|cx| {
        items
            .into_iter()
            .map(|item| item.export(cx))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    })
}

impl<T: Export> Export for [T] {
    fn export(&mut self, cx: &mut ExportContext<'_>) -> Result<Value> {
        export_sequence(self.iter_mut(), cx)
    }
}

impl<T: Export, const N: usize> Export for [T; N] {
    fn export(&mut self, cx: &mut ExportContext<'_>) -> Result<Value> {
        export_sequence(self.iter_mut(), cx)
    }
}

impl<T: Export> Export for Vec<T> {
    fn export(&mut self, cx: &mut ExportContext<'_>) -> Result<Value> {
        export_sequence(self.iter_mut(), cx)
    }
}

impl<T: Export> Export for VecDeque<T> {
    fn export(&mut self, cx: &mut ExportContext<'_>) -> Result<Value> {
        export_sequence(self.iter_mut(), cx)
    }
}

fn export_entries<'v, K, T, I>(entries: I, cx: &mut ExportContext<'_>) -> Result<Value>
where
    K: Display + 'v,
    T: Export + 'v,
    I: IntoIterator<Item = (&'v K, &'v mut T)>,
{
    cx.nested(|cx| {
        let mut map = Map::new();
        for (key, value) in entries {
            map.insert(key.to_string(), value.export(cx)?);
        }
        Ok(Value::Object(map))
    })
}

impl<K: Display, T: Export, S> Export for HashMap<K, T, S> {
    fn export(&mut self, cx: &mut ExportContext<'_>) -> Result<Value> {
        export_entries(self.iter_mut(), cx)
    }
}

impl<K: Display, T: Export> Export for BTreeMap<K, T> {
    fn export(&mut self, cx: &mut ExportContext<'_>) -> Result<Value> {
        export_entries(self.iter_mut(), cx)
    }
}

impl<T: Export + ?Sized> Export for Rc<RefCell<T>> {
    fn export(&mut self, cx: &mut ExportContext<'_>) -> Result<Value> {
        let type_name = std::any::type_name::<T>();
        let address = Rc::as_ptr(self) as *const () as usize;

        cx.shared(address, type_name, |cx| {
            let mut inner = self
                .try_borrow_mut()
                .map_err(|_| ExportError::BorrowConflict { type_name })?;
            let value = inner.export(cx)?;
            Ok(value)
        })
    }
}

// A held lock is reported, never waited on.
fn lock_error<G>(error: TryLockError<G>, type_name: &'static str) -> ExportError {
    match error {
        TryLockError::WouldBlock => ExportError::BorrowConflict { type_name },
        TryLockError::Poisoned(_) => ExportError::PoisonedLock { type_name },
    }
}

impl<T: Export + ?Sized> Export for Arc<Mutex<T>> {
    fn export(&mut self, cx: &mut ExportContext<'_>) -> Result<Value> {
        let type_name = std::any::type_name::<T>();
        let address = Arc::as_ptr(self) as *const () as usize;

        cx.shared(address, type_name, |cx| {
            let mut inner = self
                .try_lock()
                .map_err(|e| lock_error(e, type_name))?;
            let value = inner.export(cx)?;
            Ok(value)
        })
    }
}

impl<T: Export + ?Sized> Export for Arc<RwLock<T>> {
    fn export(&mut self, cx: &mut ExportContext<'_>) -> Result<Value> {
        let type_name = std::any::type_name::<T>();
        let address = Arc::as_ptr(self) as *const () as usize;

        cx.shared(address, type_name, |cx| {
            let mut inner = self
                .try_write()
                .map_err(|e| lock_error(e, type_name))?;
            let value = inner.export(cx)?;
            Ok(value)
        })
    }
}
