//! Uniform view over fields and properties.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::{BaseLink, FieldEntry, MemberReader, MemberWriter, PropertyEntry};
use crate::{DataType, TypeHash, Visibility};

/// The kind of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Field => write!(f, "field"),
            MemberKind::Property => write!(f, "property"),
        }
    }
}

/// A field or a property.
///
/// Equality and hashing go by member identity only, so two members compare
/// equal when they name the same declaration even if one was re-based onto a
/// derived type.
#[derive(Debug, Clone)]
pub enum Member {
    Field(FieldEntry),
    Property(PropertyEntry),
}

impl Member {
    pub fn id(&self) -> TypeHash {
        match self {
            Member::Field(f) => f.id,
            Member::Property(p) => p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Member::Field(f) => &f.name,
            Member::Property(p) => &p.name,
        }
    }

    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Field(_) => MemberKind::Field,
            Member::Property(_) => MemberKind::Property,
        }
    }

    /// The type that declares this member.
    pub fn owner(&self) -> TypeHash {
        match self {
            Member::Field(f) => f.owner,
            Member::Property(p) => p.owner,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            Member::Field(f) => f.is_static,
            Member::Property(p) => p.is_static,
        }
    }

    pub fn is_instance(&self) -> bool {
        !self.is_static()
    }

    pub fn declared_type(&self) -> DataType {
        match self {
            Member::Field(f) => f.data_type,
            Member::Property(p) => p.data_type,
        }
    }

    pub fn visibility(&self) -> Visibility {
        match self {
            Member::Field(f) => f.visibility,
            Member::Property(p) => p.visibility,
        }
    }

    /// Every field is readable; a property needs a getter.
    pub fn is_readable(&self) -> bool {
        self.reader().is_some()
    }

    /// A field is writable unless read-only or constant; a property needs a
    /// setter.
    pub fn is_writable(&self) -> bool {
        self.writer().is_some()
    }

    pub fn reader(&self) -> Option<&MemberReader> {
        match self {
            Member::Field(f) => Some(&f.reader),
            Member::Property(p) => p.getter.as_ref(),
        }
    }

    pub fn writer(&self) -> Option<&MemberWriter> {
        match self {
            Member::Field(f) => f.writer.as_ref(),
            Member::Property(p) => p.setter.as_ref(),
        }
    }

    /// Re-target this member at a derived type.
    pub fn rebase(&self, link: &BaseLink) -> Member {
        match self {
            Member::Field(f) => Member::Field(f.rebase(link)),
            Member::Property(p) => Member::Property(p.rebase(link)),
        }
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Member {}

impl Hash for Member {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl From<FieldEntry> for Member {
    fn from(field: FieldEntry) -> Self {
        Member::Field(field)
    }
}

impl From<PropertyEntry> for Member {
    fn from(property: PropertyEntry) -> Self {
        Member::Property(property)
    }
}

/// Compare a declared member name with a requested one.
///
/// Exact matches always succeed. With `ignore_case` the comparison is ASCII
/// case-insensitive and a single leading underscore on either side is
/// dropped, so `_count`, `Count` and `count` all match.
pub fn names_match(declared: &str, requested: &str, ignore_case: bool) -> bool {
    if declared == requested {
        return true;
    }
    if !ignore_case {
        return false;
    }
    fn trim(name: &str) -> &str {
        name.strip_prefix('_').unwrap_or(name)
    }
    trim(declared).eq_ignore_ascii_case(trim(requested))
}
