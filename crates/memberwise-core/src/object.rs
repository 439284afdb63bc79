//! Type-erased object handles.
//!
//! An [`Object`] is the "instance" a compiled accessor operates on. It owns a
//! boxed Rust value behind a lock together with the registered type identity
//! and the type's memory semantics:
//!
//! - **Reference semantics** ([`Object::reference`]): clones of the handle
//!   share the value and accessors mutate it in place.
//! - **Value semantics** ([`Object::boxed`]): the handle is an indirection
//!   cell holding a boxed copy. Accessors copy the value out with
//!   [`Object::snapshot`], mutate the copy and write it back with
//!   [`Object::store`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{ClassEntry, Describe, Reflect, TypeHash, TypeKind};

/// Boxed, type-erased instance storage.
pub type Boxed = Box<dyn Any + Send + Sync>;

/// Copies the value behind a `&dyn Any` into a new box.
///
/// Returns `None` when the value is not of the expected type.
pub type CopyFn = fn(&dyn Any) -> Option<Boxed>;

/// Copy behaviour for any `Clone` type, usable as a [`CopyFn`].
pub fn copy_value<T: Clone + Send + Sync + 'static>(value: &dyn Any) -> Option<Boxed> {
    value
        .downcast_ref::<T>()
        .map(|v| Box::new(v.clone()) as Boxed)
}

struct ObjectInner {
    type_hash: TypeHash,
    type_name: &'static str,
    kind: TypeKind,
    copy: Option<CopyFn>,
    data: RwLock<Boxed>,
}

/// Cloneable handle to a registered instance.
#[derive(Clone)]
pub struct Object {
    inner: Arc<ObjectInner>,
}

impl Object {
    /// Wrap a value with reference semantics.
    pub fn reference<T: Reflect + Send + Sync>(value: T) -> Self {
        Self::from_parts(Box::new(value), T::type_hash(), T::type_name(), TypeKind::Reference, None)
    }

    /// Wrap a value in a value-semantics indirection cell.
    pub fn boxed<T: Reflect + Clone + Send + Sync>(value: T) -> Self {
        Self::from_parts(
            Box::new(value),
            T::type_hash(),
            T::type_name(),
            TypeKind::value(),
            Some(copy_value::<T>),
        )
    }

    /// Wrap a value using the semantics its description declares.
    ///
    /// Builds the type's [`ClassEntry`] to read them; when an entry is
    /// already at hand use [`Object::described`].
    pub fn new<T: Describe>(value: T) -> Self {
        Self::described(value, &T::describe())
    }

    /// Wrap a value with the kind and copy behaviour of `entry`.
    pub fn described<T: Reflect + Send + Sync>(value: T, entry: &ClassEntry) -> Self {
        Self::from_parts(
            Box::new(value),
            T::type_hash(),
            T::type_name(),
            entry.type_kind,
            entry.copy,
        )
    }

    /// Build an object from already-erased parts.
    pub fn from_parts(
        value: Boxed,
        type_hash: TypeHash,
        type_name: &'static str,
        kind: TypeKind,
        copy: Option<CopyFn>,
    ) -> Self {
        Self {
            inner: Arc::new(ObjectInner {
                type_hash,
                type_name,
                kind,
                copy,
                data: RwLock::new(value),
            }),
        }
    }

    pub fn type_hash(&self) -> TypeHash {
        self.inner.type_hash
    }

    pub fn type_name(&self) -> &'static str {
        self.inner.type_name
    }

    pub fn kind(&self) -> TypeKind {
        self.inner.kind
    }

    /// Check if this handle is a value-semantics cell.
    pub fn is_value_type(&self) -> bool {
        self.inner.kind.is_value()
    }

    /// Check if the stored value is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        (**self.inner.data.read()).is::<T>()
    }

    /// Run `f` against the stored value if it is a `T`.
    pub fn read<T: 'static, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.inner.data.read();
        (**guard).downcast_ref::<T>().map(f)
    }

    /// Run `f` against the stored value mutably if it is a `T`.
    pub fn write<T: 'static, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut guard = self.inner.data.write();
        (**guard).downcast_mut::<T>().map(f)
    }

    /// Clone the stored value out if it is a `T`.
    pub fn get<T: Clone + 'static>(&self) -> Option<T> {
        self.read(T::clone)
    }

    /// Lock the stored value for reading.
    pub fn lock_read(&self) -> RwLockReadGuard<'_, Boxed> {
        self.inner.data.read()
    }

    /// Lock the stored value for writing.
    pub fn lock_write(&self) -> RwLockWriteGuard<'_, Boxed> {
        self.inner.data.write()
    }

    /// Copy the current value out of the cell.
    ///
    /// Returns `None` if the type has no copy behaviour.
    pub fn snapshot(&self) -> Option<Boxed> {
        let copy = self.inner.copy?;
        let guard = self.inner.data.read();
        copy(&**guard)
    }

    /// Replace the stored value.
    pub fn store(&self, value: Boxed) {
        *self.inner.data.write() = value;
    }

    /// Create an independent cell holding a copy of this value.
    pub fn detach(&self) -> Option<Object> {
        let value = self.snapshot()?;
        Some(Self::from_parts(
            value,
            self.inner.type_hash,
            self.inner.type_name,
            self.inner.kind,
            self.inner.copy,
        ))
    }

    /// Check whether two handles share storage.
    pub fn ptr_eq(a: &Object, b: &Object) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("type_name", &self.inner.type_name)
            .field("type_hash", &self.inner.type_hash)
            .field("kind", &self.inner.kind)
            .finish_non_exhaustive()
    }
}
