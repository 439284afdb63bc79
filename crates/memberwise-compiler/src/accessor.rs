//! Compiled bulk accessors.
//!
//! A compiled accessor is a flat list of pre-selected member closures plus a
//! receiver strategy chosen once at compile time:
//!
//! - [`Receiver::Static`] - no instance; every slot is a static member.
//! - [`Receiver::Reference`] - the instance is locked once for the batch and
//!   every slot operates on it in place.
//! - [`Receiver::Value`] - the instance is a value cell. The setter copies the
//!   value out, applies every write to the copy and stores it back. If any
//!   slot fails the cell is left untouched.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use memberwise_core::{AccessError, MemberReader, MemberWriter, Object, TypeHash, Value};

/// How a compiled accessor reaches its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    Static,
    Reference,
    Value,
}

impl Receiver {
    pub fn needs_instance(self) -> bool {
        !matches!(self, Receiver::Static)
    }
}

/// Shared invocation target data.
#[derive(Debug)]
pub(crate) struct Target {
    pub hash: TypeHash,
    pub name: String,
    pub receiver: Receiver,
}

impl Target {
    /// Validate the supplied instance against the compiled target.
    fn check<'o>(&self, instance: Option<&'o Object>) -> Result<&'o Object, AccessError> {
        let object = instance.ok_or_else(|| AccessError::MissingInstance {
            type_name: self.name.clone(),
        })?;
        if object.type_hash() != self.hash {
            return Err(AccessError::InstanceTypeMismatch {
                expected: self.name.clone(),
                actual: object.type_name().to_string(),
            });
        }
        Ok(object)
    }
}

// ============================================================================
// Setter
// ============================================================================

/// One resolved setter slot.
pub(crate) struct SetStep {
    pub name: String,
    pub target_type: &'static str,
    pub write: MemberWriter,
}

struct SetterInner {
    target: Target,
    steps: Vec<Option<SetStep>>,
}

/// A compiled bulk setter.
///
/// `values[i]` is written to slot `i`; unresolved slots consume their value
/// without effect.
#[derive(Clone)]
pub struct MultiSetter {
    inner: Arc<SetterInner>,
}

impl MultiSetter {
    pub(crate) fn new(target: Target, steps: Vec<Option<SetStep>>) -> Self {
        Self {
            inner: Arc::new(SetterInner { target, steps }),
        }
    }

    /// Write `values` to the compiled members of `instance`.
    ///
    /// Static accessors ignore `instance`.
    pub fn set(&self, instance: Option<&Object>, values: &[Value]) -> Result<(), AccessError> {
        let inner = &*self.inner;
        if values.len() != inner.steps.len() {
            return Err(AccessError::ArityMismatch {
                expected: inner.steps.len(),
                got: values.len(),
            });
        }

        match inner.target.receiver {
            Receiver::Static => self.apply(None, values),
            Receiver::Reference => {
                let object = inner.target.check(instance)?;
                let mut guard = object.lock_write();
                let target: &mut dyn Any = &mut **guard;
                self.apply(Some(target), values)
            }
            Receiver::Value => {
                let object = inner.target.check(instance)?;
                let mut scratch = object.snapshot().ok_or_else(|| AccessError::NotCopyable {
                    type_name: object.type_name().to_string(),
                })?;
                let target: &mut dyn Any = &mut *scratch;
                self.apply(Some(target), values)?;
                object.store(scratch);
                Ok(())
            }
        }
    }

    fn apply(&self, mut receiver: Option<&mut dyn Any>, values: &[Value]) -> Result<(), AccessError> {
        for (index, (step, value)) in self.inner.steps.iter().zip(values).enumerate() {
            let Some(step) = step else {
                continue;
            };
            let result = match (&step.write, receiver.as_deref_mut()) {
                (MemberWriter::Static(write), _) => write(value),
                (MemberWriter::Instance(write), Some(target)) => write(target, value),
                (MemberWriter::Instance(_), None) => {
                    return Err(AccessError::MissingInstance {
                        type_name: self.inner.target.name.clone(),
                    });
                }
            };
            result.map_err(|e| AccessError::at_slot(index, &step.name, step.target_type, e))?;
        }
        Ok(())
    }

    /// Number of values [`set`](Self::set) expects.
    pub fn slot_count(&self) -> usize {
        self.inner.steps.len()
    }

    pub fn is_static(&self) -> bool {
        self.inner.target.receiver == Receiver::Static
    }

    pub fn receiver(&self) -> Receiver {
        self.inner.target.receiver
    }

    pub fn target(&self) -> TypeHash {
        self.inner.target.hash
    }

    /// Check whether two handles share one compiled accessor.
    pub fn ptr_eq(a: &MultiSetter, b: &MultiSetter) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for MultiSetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots: Vec<_> = self
            .inner
            .steps
            .iter()
            .map(|s| s.as_ref().map(|s| s.name.as_str()))
            .collect();
        f.debug_struct("MultiSetter")
            .field("target", &self.inner.target.name)
            .field("receiver", &self.inner.target.receiver)
            .field("slots", &slots)
            .finish()
    }
}

// ============================================================================
// Getter
// ============================================================================

/// One resolved getter slot.
pub(crate) struct GetStep {
    pub name: String,
    pub read: MemberReader,
}

struct GetterInner {
    target: Target,
    steps: Vec<Option<GetStep>>,
}

/// A compiled bulk getter.
///
/// Produces one value per slot; unresolved slots yield [`Value::Void`].
#[derive(Clone)]
pub struct MultiGetter {
    inner: Arc<GetterInner>,
}

impl MultiGetter {
    pub(crate) fn new(target: Target, steps: Vec<Option<GetStep>>) -> Self {
        Self {
            inner: Arc::new(GetterInner { target, steps }),
        }
    }

    /// Read the compiled members of `instance`.
    ///
    /// Value cells are read in place; no copy is taken.
    pub fn get(&self, instance: Option<&Object>) -> Result<Vec<Value>, AccessError> {
        let inner = &*self.inner;
        if !inner.target.receiver.needs_instance() {
            return self.collect(None);
        }
        let object = inner.target.check(instance)?;
        let guard = object.lock_read();
        let target: &dyn Any = &**guard;
        self.collect(Some(target))
    }

    fn collect(&self, receiver: Option<&dyn Any>) -> Result<Vec<Value>, AccessError> {
        let mut values = Vec::with_capacity(self.inner.steps.len());
        for (index, step) in self.inner.steps.iter().enumerate() {
            let Some(step) = step else {
                values.push(Value::Void);
                continue;
            };
            let value = match (&step.read, receiver) {
                (MemberReader::Static(read), _) => read(),
                (MemberReader::Instance(read), Some(target)) => read(target).map_err(|e| {
                    AccessError::Member {
                        index,
                        member: step.name.clone(),
                        source: e,
                    }
                })?,
                (MemberReader::Instance(_), None) => {
                    return Err(AccessError::MissingInstance {
                        type_name: self.inner.target.name.clone(),
                    });
                }
            };
            values.push(value);
        }
        Ok(values)
    }

    /// Number of values [`get`](Self::get) returns.
    pub fn slot_count(&self) -> usize {
        self.inner.steps.len()
    }

    pub fn is_static(&self) -> bool {
        self.inner.target.receiver == Receiver::Static
    }

    pub fn receiver(&self) -> Receiver {
        self.inner.target.receiver
    }

    pub fn target(&self) -> TypeHash {
        self.inner.target.hash
    }

    /// Check whether two handles share one compiled accessor.
    pub fn ptr_eq(a: &MultiGetter, b: &MultiGetter) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for MultiGetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots: Vec<_> = self
            .inner
            .steps
            .iter()
            .map(|s| s.as_ref().map(|s| s.name.as_str()))
            .collect();
        f.debug_struct("MultiGetter")
            .field("target", &self.inner.target.name)
            .field("receiver", &self.inner.target.receiver)
            .field("slots", &slots)
            .finish()
    }
}
