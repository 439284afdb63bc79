//! Type-erased member readers and writers.
//!
//! Every field and property entry carries pre-built closures that read or
//! write the member on an erased receiver. Instance closures downcast the
//! receiver to the declaring type; inherited members are re-based through a
//! [`BaseLink`] so that they accept the derived type instead.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{ClassEntry, Describe, MemberError, Reflect, TypeHash, Value};

/// Reads a member from an erased instance.
pub type InstanceGetFn = Arc<dyn Fn(&dyn Any) -> Result<Value, MemberError> + Send + Sync>;

/// Writes a member on an erased instance.
pub type InstanceSetFn = Arc<dyn Fn(&mut dyn Any, &Value) -> Result<(), MemberError> + Send + Sync>;

/// Reads a static member.
pub type StaticGetFn = Arc<dyn Fn() -> Value + Send + Sync>;

/// Writes a static member.
pub type StaticSetFn = Arc<dyn Fn(&Value) -> Result<(), MemberError> + Send + Sync>;

/// Read capability of a member.
#[derive(Clone)]
pub enum MemberReader {
    Instance(InstanceGetFn),
    Static(StaticGetFn),
}

impl MemberReader {
    pub fn is_static(&self) -> bool {
        matches!(self, MemberReader::Static(_))
    }

    /// Re-target an instance reader at a type that embeds the declaring type.
    pub fn rebase(&self, link: &BaseLink) -> Self {
        match self {
            MemberReader::Static(_) => self.clone(),
            MemberReader::Instance(read) => {
                let read = Arc::clone(read);
                let upcast = Arc::clone(&link.upcast);
                let derived = link.derived_name;
                MemberReader::Instance(Arc::new(
                    move |receiver: &dyn Any| -> Result<Value, MemberError> {
                        let base = upcast
                            .upcast(receiver)
                            .ok_or(MemberError::ReceiverMismatch { expected: derived })?;
                        read(base)
                    },
                ))
            }
        }
    }
}

impl fmt::Debug for MemberReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberReader::Instance(_) => f.write_str("MemberReader::Instance"),
            MemberReader::Static(_) => f.write_str("MemberReader::Static"),
        }
    }
}

/// Write capability of a member.
#[derive(Clone)]
pub enum MemberWriter {
    Instance(InstanceSetFn),
    Static(StaticSetFn),
}

impl MemberWriter {
    pub fn is_static(&self) -> bool {
        matches!(self, MemberWriter::Static(_))
    }

    /// Re-target an instance writer at a type that embeds the declaring type.
    pub fn rebase(&self, link: &BaseLink) -> Self {
        match self {
            MemberWriter::Static(_) => self.clone(),
            MemberWriter::Instance(write) => {
                let write = Arc::clone(write);
                let upcast = Arc::clone(&link.upcast);
                let derived = link.derived_name;
                MemberWriter::Instance(Arc::new(
                    move |receiver: &mut dyn Any, value: &Value| -> Result<(), MemberError> {
                        let base = upcast
                            .upcast_mut(receiver)
                            .ok_or(MemberError::ReceiverMismatch { expected: derived })?;
                        write(base, value)
                    },
                ))
            }
        }
    }
}

impl fmt::Debug for MemberWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberWriter::Instance(_) => f.write_str("MemberWriter::Instance"),
            MemberWriter::Static(_) => f.write_str("MemberWriter::Static"),
        }
    }
}

/// Projects an erased derived instance onto its embedded base.
pub trait Upcast: Send + Sync {
    fn upcast<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any>;

    fn upcast_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any>;
}

/// [`Upcast`] through a pair of field projections.
pub struct FieldUpcast<D, B> {
    get: fn(&D) -> &B,
    get_mut: fn(&mut D) -> &mut B,
}

impl<D: 'static, B: 'static> Upcast for FieldUpcast<D, B> {
    fn upcast<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any> {
        value.downcast_ref::<D>().map(|d| (self.get)(d) as &dyn Any)
    }

    fn upcast_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        value
            .downcast_mut::<D>()
            .map(|d| (self.get_mut)(d) as &mut dyn Any)
    }
}

/// Inheritance by composition: a derived type embeds its base type.
///
/// Members declared on the base are visible on the derived type; their
/// instance closures are re-based through this link.
#[derive(Clone)]
pub struct BaseLink {
    /// Hash of the base type.
    pub base: TypeHash,
    /// Registered name of the base type.
    pub base_name: &'static str,
    /// Registered name of the derived type.
    pub derived_name: &'static str,
    /// Produces the base's class entry, when the base is self-describing.
    pub describe: Option<fn() -> ClassEntry>,
    upcast: Arc<dyn Upcast>,
}

impl BaseLink {
    /// Link to a self-describing base; registering the derived type also
    /// registers the base.
    pub fn new<D: Reflect, B: Describe>(get: fn(&D) -> &B, get_mut: fn(&mut D) -> &mut B) -> Self {
        Self {
            describe: Some(B::describe),
            ..Self::manual(get, get_mut)
        }
    }

    /// Link to a base that must already be registered.
    pub fn manual<D: Reflect, B: Reflect>(get: fn(&D) -> &B, get_mut: fn(&mut D) -> &mut B) -> Self {
        Self {
            base: B::type_hash(),
            base_name: B::type_name(),
            derived_name: D::type_name(),
            describe: None,
            upcast: Arc::new(FieldUpcast { get, get_mut }),
        }
    }

    pub fn upcast<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any> {
        self.upcast.upcast(value)
    }

    pub fn upcast_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        self.upcast.upcast_mut(value)
    }

    /// Compose two links: `self` projects derived to middle, `inner` projects
    /// middle to base.
    pub fn then(&self, inner: &BaseLink) -> BaseLink {
        BaseLink {
            base: inner.base,
            base_name: inner.base_name,
            derived_name: self.derived_name,
            describe: inner.describe,
            upcast: Arc::new(ChainUpcast {
                outer: Arc::clone(&self.upcast),
                inner: Arc::clone(&inner.upcast),
            }),
        }
    }
}

impl fmt::Debug for BaseLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseLink")
            .field("base", &self.base_name)
            .field("derived", &self.derived_name)
            .finish_non_exhaustive()
    }
}

struct ChainUpcast {
    outer: Arc<dyn Upcast>,
    inner: Arc<dyn Upcast>,
}

impl Upcast for ChainUpcast {
    fn upcast<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any> {
        self.inner.upcast(self.outer.upcast(value)?)
    }

    fn upcast_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        self.inner.upcast_mut(self.outer.upcast_mut(value)?)
    }
}
