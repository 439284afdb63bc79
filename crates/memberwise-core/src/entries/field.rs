//! Field entries.
//!
//! A field is direct storage on an instance (or, for statics, a shared cell).
//! Instance fields are described by a pair of projections from the declaring
//! type to the field:
//!
//! ```
//! use memberwise_core::{FieldEntry, Reflect, TypeHash};
//!
//! struct Point { x: i32 }
//!
//! impl Reflect for Point {
//!     fn type_hash() -> TypeHash { TypeHash::from_name("Point") }
//!     fn type_name() -> &'static str { "Point" }
//! }
//!
//! let x = FieldEntry::instance::<Point, i32>("x", |p| &p.x, |p| &mut p.x);
//! assert!(!x.is_read_only);
//! ```

use std::any::Any;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{BaseLink, MemberReader, MemberWriter};
use crate::{DataType, MemberError, MemberKind, MemberValue, Reflect, TypeHash, Value, Visibility};

/// A field declared on a class.
#[derive(Debug, Clone)]
pub struct FieldEntry {
    /// Member identity (declaring type + kind + name).
    pub id: TypeHash,
    /// Field name.
    pub name: String,
    /// Declaring type.
    pub owner: TypeHash,
    /// Declaring type name.
    pub owner_name: &'static str,
    /// Declared field type.
    pub data_type: DataType,
    /// Field visibility.
    pub visibility: Visibility,
    /// Field is static (shared by all instances).
    pub is_static: bool,
    /// Field cannot be assigned after construction.
    pub is_read_only: bool,
    /// Field is a compile-time literal.
    pub is_constant: bool,
    /// Read capability.
    pub reader: MemberReader,
    /// Write capability, absent for read-only and constant fields.
    pub writer: Option<MemberWriter>,
}

impl FieldEntry {
    fn build<T: Reflect, F: Reflect>(
        name: impl Into<String>,
        reader: MemberReader,
        writer: Option<MemberWriter>,
    ) -> Self {
        let name = name.into();
        Self {
            id: TypeHash::from_member(T::type_hash(), MemberKind::Field, &name),
            name,
            owner: T::type_hash(),
            owner_name: T::type_name(),
            data_type: DataType::of::<F>(),
            visibility: Visibility::Public,
            is_static: reader.is_static(),
            is_read_only: writer.is_none(),
            is_constant: false,
            reader,
            writer,
        }
    }

    /// Create a read-write instance field.
    pub fn instance<T: Reflect, F: MemberValue>(
        name: impl Into<String>,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        Self::build::<T, F>(name, instance_reader(get), Some(instance_writer(get_mut)))
    }

    /// Create a read-only instance field.
    pub fn read_only<T: Reflect, F: MemberValue>(name: impl Into<String>, get: fn(&T) -> &F) -> Self {
        Self::build::<T, F>(name, instance_reader(get), None)
    }

    /// Create a static field backed by a shared cell.
    pub fn static_cell<T: Reflect, F: MemberValue>(
        name: impl Into<String>,
        cell: Arc<RwLock<F>>,
    ) -> Self {
        let read_cell = Arc::clone(&cell);
        let reader = MemberReader::Static(Arc::new(move || read_cell.read().clone().into_value()));
        let writer = MemberWriter::Static(Arc::new(
            move |value: &Value| -> Result<(), MemberError> {
                *cell.write() = F::from_value(value)?;
                Ok(())
            },
        ));
        Self::build::<T, F>(name, reader, Some(writer))
    }

    /// Create a read-only static field backed by a shared cell.
    pub fn static_read_only<T: Reflect, F: MemberValue>(
        name: impl Into<String>,
        cell: Arc<RwLock<F>>,
    ) -> Self {
        let reader = MemberReader::Static(Arc::new(move || cell.read().clone().into_value()));
        Self::build::<T, F>(name, reader, None)
    }

    /// Create a constant (static literal) field.
    pub fn constant<T: Reflect, F: MemberValue>(name: impl Into<String>, value: F) -> Self {
        let reader = MemberReader::Static(Arc::new(move || value.clone().into_value()));
        Self {
            is_constant: true,
            ..Self::build::<T, F>(name, reader, None)
        }
    }

    /// Set the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Copy of this field that accepts instances of the linked derived type.
    pub fn rebase(&self, link: &BaseLink) -> Self {
        Self {
            reader: self.reader.rebase(link),
            writer: self.writer.as_ref().map(|w| w.rebase(link)),
            ..self.clone()
        }
    }
}

fn instance_reader<T: Reflect, F: MemberValue>(get: fn(&T) -> &F) -> MemberReader {
    MemberReader::Instance(Arc::new(
        move |receiver: &dyn Any| -> Result<Value, MemberError> {
            let target = receiver
                .downcast_ref::<T>()
                .ok_or(MemberError::ReceiverMismatch {
                    expected: T::type_name(),
                })?;
            Ok(get(target).clone().into_value())
        },
    ))
}

fn instance_writer<T: Reflect, F: MemberValue>(get_mut: fn(&mut T) -> &mut F) -> MemberWriter {
    MemberWriter::Instance(Arc::new(
        move |receiver: &mut dyn Any, value: &Value| -> Result<(), MemberError> {
            let converted = F::from_value(value)?;
            let target = receiver
                .downcast_mut::<T>()
                .ok_or(MemberError::ReceiverMismatch {
                    expected: T::type_name(),
                })?;
            *get_mut(target) = converted;
            Ok(())
        },
    ))
}
