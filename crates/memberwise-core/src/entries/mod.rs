//! Registry entries describing types and their members.
//!
//! - [`ClassEntry`] - a registered type with its fields, properties and base
//! - [`FieldEntry`] - direct storage on an instance or a static cell
//! - [`PropertyEntry`] - getter/setter backed member
//! - [`Member`] - uniform view over both member kinds
//! - [`BaseLink`] - inheritance by composition

mod access;
mod class;
mod field;
mod member;
mod property;

pub use access::{
    BaseLink, FieldUpcast, InstanceGetFn, InstanceSetFn, MemberReader, MemberWriter, StaticGetFn,
    StaticSetFn, Upcast,
};
pub use class::ClassEntry;
pub use field::FieldEntry;
pub use member::{Member, MemberKind, names_match};
pub use property::PropertyEntry;
