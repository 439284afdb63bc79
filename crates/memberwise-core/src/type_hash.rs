//! Deterministic hash-based identity for types and members.
//!
//! [`TypeHash`] is a 64-bit hash computed from names. Unlike sequential IDs,
//! hashes are derived deterministically, which gives:
//!
//! - No registration order dependencies
//! - Same name = same hash across registries
//! - Cheap structural equality for request descriptors
//!
//! # Hash Computation
//!
//! Uses XXHash64 with domain-specific mixing constants so that a type named
//! `x` and a field named `x` never share a hash.
//!
//! # Examples
//!
//! ```
//! use memberwise_core::{MemberKind, TypeHash};
//!
//! let point = TypeHash::from_name("Point");
//! assert_eq!(point, TypeHash::from_name("Point"));
//!
//! let x_field = TypeHash::from_member(point, MemberKind::Field, "x");
//! let x_prop = TypeHash::from_member(point, MemberKind::Property, "x");
//! assert_ne!(x_field, x_prop);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

use crate::MemberKind;

/// Domain-specific mixing constants for hash computation.
pub mod hash_constants {
    /// Separator constant for chained components
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for type hashes
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for field hashes
    pub const FIELD: u64 = 0x7d3c8b4a92e15f6d;

    /// Domain marker for property hashes
    pub const PROPERTY: u64 = 0x3e9f5d2a8c7b1403;
}

/// A deterministic 64-bit hash identifying a type or a member.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a type name.
    ///
    /// ```
    /// use memberwise_core::TypeHash;
    ///
    /// assert_eq!(TypeHash::from_name("int"), TypeHash::from_name("int"));
    /// assert_ne!(TypeHash::from_name("int"), TypeHash::from_name("float"));
    /// ```
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a member hash from its declaring type, kind and name.
    ///
    /// The owner is mixed in with a multiply so that `A.b` and `B.a` style
    /// swaps do not collide.
    #[inline]
    pub fn from_member(owner: TypeHash, kind: MemberKind, name: &str) -> Self {
        let domain = match kind {
            MemberKind::Field => hash_constants::FIELD,
            MemberKind::Property => hash_constants::PROPERTY,
        };
        let hash = owner
            .0
            .wrapping_mul(hash_constants::SEP)
            .wrapping_add(domain ^ xxh64(name.as_bytes(), 0));
        TypeHash(hash)
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
