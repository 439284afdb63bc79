//! DataType - the declared type of a field or property.

use std::fmt::{self, Display, Formatter};

use crate::{Reflect, TypeHash};

/// The declared type of a member.
///
/// Carries the registered name alongside the hash so that conversion errors
/// can report the target type without a registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    /// Hash of the declared type.
    pub type_hash: TypeHash,
    /// Registered name of the declared type.
    pub type_name: &'static str,
}

impl DataType {
    /// Create a data type from its parts.
    pub const fn new(type_hash: TypeHash, type_name: &'static str) -> Self {
        Self {
            type_hash,
            type_name,
        }
    }

    /// The data type of a reflected Rust type.
    pub fn of<T: Reflect>() -> Self {
        Self::new(T::type_hash(), T::type_name())
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}
