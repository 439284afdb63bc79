//! Core data model for memberwise accessors.
//!
//! This crate holds everything the registry and the accessor compiler share:
//!
//! - [`TypeHash`] - deterministic identity for types and members
//! - [`Value`] and [`Object`] - dynamic values and type-erased instances
//! - [`FromValue`] / [`IntoValue`] - conversions to declared member types
//! - [`Reflect`] / [`Describe`] - type identity and class descriptions
//! - [`ClassEntry`], [`FieldEntry`], [`PropertyEntry`], [`Member`] - registry entries
//! - Error types for every phase

mod convert;
mod data_type;
pub mod entries;
mod error;
mod object;
mod reflect;
mod type_hash;
mod type_kind;
mod value;
mod visibility;

pub use convert::{FromValue, IntoValue, MemberValue, object_from_value};
pub use data_type::DataType;
pub use entries::{
    BaseLink, ClassEntry, FieldEntry, FieldUpcast, InstanceGetFn, InstanceSetFn, Member,
    MemberKind, MemberReader, MemberWriter, PropertyEntry, StaticGetFn, StaticSetFn, Upcast,
    names_match,
};
pub use error::{
    AccessError, ConversionError, MemberError, MemberwiseError, RegistrationError, RequestError,
};
pub use object::{Boxed, CopyFn, Object, copy_value};
pub use reflect::{Describe, Reflect};
pub use type_hash::{TypeHash, hash_constants};
pub use type_kind::TypeKind;
pub use value::Value;
pub use visibility::Visibility;
