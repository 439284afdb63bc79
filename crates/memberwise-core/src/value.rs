//! Dynamic values passed to and returned from compiled accessors.

use std::fmt;

use crate::Object;

/// A dynamic value stored in an accessor's value array.
///
/// All integer widths are carried as `i64` and both float widths as `f64`;
/// conversion to the member's declared type happens in
/// [`FromValue`](crate::FromValue) with range checks.
#[derive(Clone, Default)]
pub enum Value {
    /// Void/empty, also used for unresolved positions in bulk reads
    #[default]
    Void,
    /// Null reference
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (i8, i16, i32, i64, u8, u16, u32, u64 all stored as i64)
    Int(i64),
    /// Floating point value (f32, f64 both stored as f64)
    Float(f64),
    /// String value (owned)
    String(String),
    /// Handle to a registered object
    Object(Object),
}

impl Value {
    /// Get a human-readable name for this value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Void => "void",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Object(obj) => obj.type_name(),
        }
    }

    /// Check if this value is void.
    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => write!(f, "Void"),
            Value::Null => write!(f, "Null"),
            Value::Bool(v) => write!(f, "Bool({})", v),
            Value::Int(v) => write!(f, "Int({})", v),
            Value::Float(v) => write!(f, "Float({})", v),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Object(obj) => write!(f, "Object({})", obj.type_name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            // Objects compare by identity
            (Value::Object(a), Value::Object(b)) => Object::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// ```
/// use memberwise_core::{values, Value};
///
/// let vals = values![3, 4.5, "name", true];
/// assert_eq!(vals[0], Value::Int(3));
/// assert_eq!(vals[2], Value::String("name".to_string()));
/// ```
#[macro_export]
macro_rules! values {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::IntoValue::into_value($value)),*]
    };
}
