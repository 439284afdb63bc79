//! Extension methods on [`Object`] backed by the global [`Reflector`].
//!
//! The `try_*` variants turn "member not found" into `false` / `None`; every
//! other error still propagates.

use memberwise_core::{IntoValue, MemberwiseError, Object, Value};
use memberwise_registry::LookupOptions;

use crate::Reflector;

/// Member access on objects through [`Reflector::global`].
pub trait ObjectExt {
    /// Write `values` to the named members.
    fn set_members<S: AsRef<str>>(&self, names: &[S], values: &[Value])
    -> Result<(), MemberwiseError>;

    /// Read the named members.
    fn get_members<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Value>, MemberwiseError>;

    fn set_field(&self, name: &str, value: impl IntoValue) -> Result<(), MemberwiseError>;

    fn get_field(&self, name: &str) -> Result<Value, MemberwiseError>;

    fn set_property(&self, name: &str, value: impl IntoValue) -> Result<(), MemberwiseError>;

    fn get_property(&self, name: &str) -> Result<Value, MemberwiseError>;

    /// Like [`set_field`](Self::set_field); `Ok(false)` if no such field.
    fn try_set_field(&self, name: &str, value: impl IntoValue) -> Result<bool, MemberwiseError> {
        found(self.set_field(name, value)).map(|set| set.is_some())
    }

    /// Like [`get_field`](Self::get_field); `Ok(None)` if no such field.
    fn try_get_field(&self, name: &str) -> Result<Option<Value>, MemberwiseError> {
        found(self.get_field(name))
    }

    /// Like [`set_property`](Self::set_property); `Ok(false)` if no such
    /// property.
    fn try_set_property(&self, name: &str, value: impl IntoValue) -> Result<bool, MemberwiseError> {
        found(self.set_property(name, value)).map(|set| set.is_some())
    }

    /// Like [`get_property`](Self::get_property); `Ok(None)` if no such
    /// property.
    fn try_get_property(&self, name: &str) -> Result<Option<Value>, MemberwiseError> {
        found(self.get_property(name))
    }
}

fn found<T>(result: Result<T, MemberwiseError>) -> Result<Option<T>, MemberwiseError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

impl ObjectExt for Object {
    fn set_members<S: AsRef<str>>(
        &self,
        names: &[S],
        values: &[Value],
    ) -> Result<(), MemberwiseError> {
        Reflector::global().set_members(self, names, values)
    }

    fn get_members<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Value>, MemberwiseError> {
        Reflector::global().get_members(self, names)
    }

    fn set_field(&self, name: &str, value: impl IntoValue) -> Result<(), MemberwiseError> {
        Reflector::global().set_member(self, name, LookupOptions::new().fields_only(), value)
    }

    fn get_field(&self, name: &str) -> Result<Value, MemberwiseError> {
        Reflector::global().get_member(self, name, LookupOptions::new().fields_only())
    }

    fn set_property(&self, name: &str, value: impl IntoValue) -> Result<(), MemberwiseError> {
        Reflector::global().set_member(self, name, LookupOptions::new().properties_only(), value)
    }

    fn get_property(&self, name: &str) -> Result<Value, MemberwiseError> {
        Reflector::global().get_member(self, name, LookupOptions::new().properties_only())
    }
}
