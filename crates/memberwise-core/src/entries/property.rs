//! Property entries.
//!
//! Properties are accessed like fields but are backed by getter and setter
//! functions. Either accessor may be missing.

use std::any::Any;
use std::sync::Arc;

use super::{BaseLink, MemberReader, MemberWriter};
use crate::{DataType, MemberError, MemberKind, MemberValue, Reflect, TypeHash, Value, Visibility};

/// A property declared on a class.
#[derive(Debug, Clone)]
pub struct PropertyEntry {
    /// Member identity (declaring type + kind + name).
    pub id: TypeHash,
    /// Property name.
    pub name: String,
    /// Declaring type.
    pub owner: TypeHash,
    /// Declaring type name.
    pub owner_name: &'static str,
    /// Property type.
    pub data_type: DataType,
    /// Property visibility.
    pub visibility: Visibility,
    /// Property is static.
    pub is_static: bool,
    /// Getter, if the property is readable.
    pub getter: Option<MemberReader>,
    /// Setter, if the property is writable.
    pub setter: Option<MemberWriter>,
}

impl PropertyEntry {
    fn build<T: Reflect, F: Reflect>(
        name: impl Into<String>,
        is_static: bool,
        getter: Option<MemberReader>,
        setter: Option<MemberWriter>,
    ) -> Self {
        let name = name.into();
        Self {
            id: TypeHash::from_member(T::type_hash(), MemberKind::Property, &name),
            name,
            owner: T::type_hash(),
            owner_name: T::type_name(),
            data_type: DataType::of::<F>(),
            visibility: Visibility::Public,
            is_static,
            getter,
            setter,
        }
    }

    /// Create a read-write instance property.
    pub fn read_write<T, F>(
        name: impl Into<String>,
        get: impl Fn(&T) -> F + Send + Sync + 'static,
        set: impl Fn(&mut T, F) + Send + Sync + 'static,
    ) -> Self
    where
        T: Reflect,
        F: MemberValue,
    {
        Self::build::<T, F>(name, false, Some(instance_getter(get)), Some(instance_setter(set)))
    }

    /// Create a read-only instance property.
    pub fn read_only<T, F>(name: impl Into<String>, get: impl Fn(&T) -> F + Send + Sync + 'static) -> Self
    where
        T: Reflect,
        F: MemberValue,
    {
        Self::build::<T, F>(name, false, Some(instance_getter(get)), None)
    }

    /// Create a write-only instance property.
    pub fn write_only<T, F>(name: impl Into<String>, set: impl Fn(&mut T, F) + Send + Sync + 'static) -> Self
    where
        T: Reflect,
        F: MemberValue,
    {
        Self::build::<T, F>(name, false, None, Some(instance_setter(set)))
    }

    /// Create a read-write static property.
    pub fn static_read_write<T, F>(
        name: impl Into<String>,
        get: impl Fn() -> F + Send + Sync + 'static,
        set: impl Fn(F) + Send + Sync + 'static,
    ) -> Self
    where
        T: Reflect,
        F: MemberValue,
    {
        let getter = MemberReader::Static(Arc::new(move || get().into_value()));
        let setter = MemberWriter::Static(Arc::new(
            move |value: &Value| -> Result<(), MemberError> {
                set(F::from_value(value)?);
                Ok(())
            },
        ));
        Self::build::<T, F>(name, true, Some(getter), Some(setter))
    }

    /// Create a read-only static property.
    pub fn static_read_only<T, F>(name: impl Into<String>, get: impl Fn() -> F + Send + Sync + 'static) -> Self
    where
        T: Reflect,
        F: MemberValue,
    {
        let getter = MemberReader::Static(Arc::new(move || get().into_value()));
        Self::build::<T, F>(name, true, Some(getter), None)
    }

    /// Set the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Check if this property is read-only.
    pub fn is_read_only(&self) -> bool {
        self.getter.is_some() && self.setter.is_none()
    }

    /// Check if this property is write-only.
    pub fn is_write_only(&self) -> bool {
        self.getter.is_none() && self.setter.is_some()
    }

    /// Check if this property is read-write.
    pub fn is_read_write(&self) -> bool {
        self.getter.is_some() && self.setter.is_some()
    }

    /// Copy of this property that accepts instances of the linked derived type.
    pub fn rebase(&self, link: &BaseLink) -> Self {
        Self {
            getter: self.getter.as_ref().map(|g| g.rebase(link)),
            setter: self.setter.as_ref().map(|s| s.rebase(link)),
            ..self.clone()
        }
    }
}

fn instance_getter<T: Reflect, F: MemberValue>(
    get: impl Fn(&T) -> F + Send + Sync + 'static,
) -> MemberReader {
    MemberReader::Instance(Arc::new(
        move |receiver: &dyn Any| -> Result<Value, MemberError> {
            let target = receiver
                .downcast_ref::<T>()
                .ok_or(MemberError::ReceiverMismatch {
                    expected: T::type_name(),
                })?;
            Ok(get(target).into_value())
        },
    ))
}

fn instance_setter<T: Reflect, F: MemberValue>(
    set: impl Fn(&mut T, F) + Send + Sync + 'static,
) -> MemberWriter {
    MemberWriter::Instance(Arc::new(
        move |receiver: &mut dyn Any, value: &Value| -> Result<(), MemberError> {
            let converted = F::from_value(value)?;
            let target = receiver
                .downcast_mut::<T>()
                .ok_or(MemberError::ReceiverMismatch {
                    expected: T::type_name(),
                })?;
            set(target, converted);
            Ok(())
        },
    ))
}
