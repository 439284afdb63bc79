//! Type kind for memory semantics.

/// Type kind determines how instances of a registered type are stored and
/// mutated through an [`Object`](crate::Object).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeKind {
    /// Value type - copied on assignment.
    ///
    /// An instance handed to an accessor is an indirection cell holding a
    /// boxed copy. Mutations go through a scratch copy that is written back
    /// into the cell.
    Value,

    /// Reference type - shared storage, mutated in place.
    #[default]
    Reference,
}

impl TypeKind {
    pub const fn value() -> Self {
        TypeKind::Value
    }

    pub const fn reference() -> Self {
        TypeKind::Reference
    }

    /// Check if this is a value type.
    pub fn is_value(&self) -> bool {
        matches!(self, TypeKind::Value)
    }

    /// Check if this is a reference type.
    pub fn is_reference(&self) -> bool {
        matches!(self, TypeKind::Reference)
    }
}
