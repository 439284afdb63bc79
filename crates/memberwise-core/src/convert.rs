//! Conversion traits between Rust member types and dynamic [`Value`]s.
//!
//! - [`FromValue`]: extract a member value from a [`Value`]
//! - [`IntoValue`]: wrap a member value into a [`Value`]
//!
//! ## Supported Types
//!
//! - Integers: `i8`, `i16`, `i32`, `i64`, `u8`, `u16`, `u32`, `u64`
//! - Floats: `f32`, `f64` (integers widen)
//! - `bool`, `char`, `String`
//! - `Option<T>` (`Null`/`Void` map to `None`)
//! - [`Object`] handles and raw [`Value`]s
//! - Derived value types (via [`object_from_value`])
//!
//! ## Example
//!
//! ```
//! use memberwise_core::{FromValue, IntoValue, Value};
//!
//! let value = Value::Int(42);
//! let n: i32 = i32::from_value(&value).unwrap();
//! assert_eq!(n.into_value(), Value::Int(42));
//! ```

use crate::{ConversionError, Object, Reflect, Value};

/// Extract a typed value from a dynamic [`Value`].
pub trait FromValue: Sized {
    /// Convert the given value.
    ///
    /// Returns a `ConversionError` if the value has an incompatible type or
    /// does not fit the target type.
    fn from_value(value: &Value) -> Result<Self, ConversionError>;
}

/// Convert a typed value into a dynamic [`Value`].
pub trait IntoValue {
    /// Convert this value.
    fn into_value(self) -> Value;
}

/// Everything a field or property type needs to be compiled into an accessor.
pub trait MemberValue: Reflect + FromValue + IntoValue + Clone + Send + Sync {}

impl<T> MemberValue for T where T: Reflect + FromValue + IntoValue + Clone + Send + Sync {}

fn mismatch(expected: &'static str, value: &Value) -> ConversionError {
    match value {
        Value::Null => ConversionError::NullValue {
            target_type: expected,
        },
        _ => ConversionError::TypeMismatch {
            expected,
            actual: value.type_name(),
        },
    }
}

// ============================================================================
// Integer implementations
// ============================================================================

macro_rules! impl_from_value_int {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self, ConversionError> {
                    match value {
                        Value::Int(v) => <$ty>::try_from(*v).map_err(|_| {
                            ConversionError::IntegerOverflow {
                                value: *v,
                                target_type: stringify!($ty),
                            }
                        }),
                        other => Err(mismatch("int", other)),
                    }
                }
            }
        )*
    };
}

macro_rules! impl_into_value_int {
    ($($ty:ty),*) => {
        $(
            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::Int(i64::from(self))
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64, u8, u16, u32, u64);
impl_into_value_int!(i8, i16, i32, i64, u8, u16, u32);

// Above i64::MAX the magnitude is kept as a float.
impl IntoValue for u64 {
    fn into_value(self) -> Value {
        i64::try_from(self).map_or(Value::Float(self as f64), Value::Int)
    }
}

// ============================================================================
// Float implementations
// ============================================================================

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float(v) => {
                if !v.is_finite() || (*v <= f32::MAX as f64 && *v >= f32::MIN as f64) {
                    Ok(*v as f32)
                } else {
                    Err(ConversionError::FloatConversion {
                        value: *v,
                        target_type: "f32",
                    })
                }
            }
            Value::Int(v) => Ok(*v as f32),
            other => Err(mismatch("float", other)),
        }
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::Float(self as f64)
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float(v) => Ok(*v),
            Value::Int(v) => Ok(*v as f64),
            other => Err(mismatch("float", other)),
        }
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

// ============================================================================
// Bool, char and string implementations
// ============================================================================

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Bool(v) => Ok(*v),
            other => Err(mismatch("bool", other)),
        }
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl FromValue for char {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(ConversionError::TypeMismatch {
                        expected: "char",
                        actual: "string",
                    }),
                }
            }
            Value::Int(v) => u32::try_from(*v)
                .ok()
                .and_then(char::from_u32)
                .ok_or(ConversionError::IntegerOverflow {
                    value: *v,
                    target_type: "char",
                }),
            other => Err(mismatch("char", other)),
        }
    }
}

impl IntoValue for char {
    fn into_value(self) -> Value {
        Value::String(self.to_string())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(mismatch("string", other)),
        }
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::String(self.to_string())
    }
}

// ============================================================================
// Optional, object and passthrough implementations
// ============================================================================

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null | Value::Void => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}

impl FromValue for Object {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Object(obj) => Ok(obj.clone()),
            other => Err(mismatch("object", other)),
        }
    }
}

impl IntoValue for Object {
    fn into_value(self) -> Value {
        Value::Object(self)
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for () {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Void => Ok(()),
            other => Err(mismatch("void", other)),
        }
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Void
    }
}

/// Copy a registered value type out of an [`Object`] value.
///
/// Used by derived `FromValue` implementations of value types.
pub fn object_from_value<T: Reflect + Clone>(value: &Value) -> Result<T, ConversionError> {
    match value {
        Value::Object(obj) => obj.get::<T>().ok_or(ConversionError::TypeMismatch {
            expected: T::type_name(),
            actual: obj.type_name(),
        }),
        other => Err(mismatch(T::type_name(), other)),
    }
}
