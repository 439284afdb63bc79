//! Type identity and class description traits.
//!
//! [`Reflect`] gives a Rust type a registered name and [`TypeHash`].
//! [`Describe`] additionally produces the [`ClassEntry`] that lists the
//! type's fields and properties. Both are normally generated by
//! `#[derive(Reflect)]`.

use crate::{ClassEntry, Object, TypeHash, Value};

/// A type with a stable registered identity.
pub trait Reflect: 'static {
    /// The type's hash, derived from its registered name.
    fn type_hash() -> TypeHash;

    /// The type's registered name.
    fn type_name() -> &'static str;
}

/// A type that can describe its members to a registry.
///
/// The returned entry is the only place a type's memory semantics are
/// declared: `ClassEntry::value` makes objects of the type copy-in/copy-out
/// cells, `ClassEntry::reference` makes them shared.
pub trait Describe: Reflect + Send + Sync + Sized {
    /// Build the class entry for this type.
    fn describe() -> ClassEntry;
}

macro_rules! impl_reflect_primitive {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Reflect for $ty {
                #[inline]
                fn type_hash() -> TypeHash {
                    TypeHash::from_name($name)
                }

                #[inline]
                fn type_name() -> &'static str {
                    $name
                }
            }
        )*
    };
}

impl_reflect_primitive! {
    bool => "bool",
    i8 => "int8",
    i16 => "int16",
    i32 => "int",
    i64 => "int64",
    u8 => "uint8",
    u16 => "uint16",
    u32 => "uint",
    u64 => "uint64",
    f32 => "float",
    f64 => "double",
    String => "string",
    char => "char",
    Object => "object",
    Value => "value",
}

// Optional members share the identity of the wrapped type.
impl<T: Reflect> Reflect for Option<T> {
    fn type_hash() -> TypeHash {
        T::type_hash()
    }

    fn type_name() -> &'static str {
        T::type_name()
    }
}
