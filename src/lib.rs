//! Compiled, cached bulk field and property accessors.
//!
//! Given a registered type and an ordered list of member names, memberwise
//! resolves each name to a field or property, compiles one accessor that
//! writes (or reads) all of them in a single call, and caches it so that the
//! same request never compiles twice.
//!
//! ## Crates
//!
//! - `memberwise-core`: type identity, values, objects, member entries, errors
//! - `memberwise-registry`: type registry, lookup flags, member resolution
//! - `memberwise-compiler`: request descriptors, accessor compiler, cache
//! - `memberwise-macros`: `#[derive(Reflect)]`
//!
//! ## Example
//!
//! ```
//! use memberwise::{ObjectExt, Reflect, Reflector, Value, values};
//!
//! #[derive(Debug, Clone, PartialEq, Reflect)]
//! #[memberwise(value)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let point = Reflector::global().wrap(Point { x: 0, y: 0 }).unwrap();
//! point.set_members(&["x", "y"], &values![3, 4]).unwrap();
//! assert_eq!(point.get::<Point>(), Some(Point { x: 3, y: 4 }));
//! assert_eq!(point.get_field("y").unwrap(), Value::Int(4));
//! ```

extern crate self as memberwise;

mod ext;
mod reflector;

pub use ext::ObjectExt;
pub use reflector::Reflector;

pub use memberwise_compiler::{
    AccessMode, AccessRequest, AccessorCache, AccessorCompiler, MemberSlot, MultiGetter,
    MultiSetter, Receiver,
};
pub use memberwise_core::{
    AccessError, BaseLink, Boxed, ClassEntry, ConversionError, CopyFn, DataType, Describe,
    FieldEntry, FromValue, IntoValue, Member, MemberError, MemberKind, MemberValue,
    MemberwiseError, Object, PropertyEntry, Reflect, RegistrationError, RequestError, TypeHash,
    TypeKind, Value, Visibility, copy_value, names_match, object_from_value, values,
};
pub use memberwise_macros::Reflect;
pub use memberwise_registry::{
    LookupFlags, LookupOptions, MemberFilter, MemberResolver, ScopeFilter, TypeRegistry,
    VisibilityFilter,
};

/// Result alias for facade operations.
pub type Result<T, E = MemberwiseError> = std::result::Result<T, E>;
