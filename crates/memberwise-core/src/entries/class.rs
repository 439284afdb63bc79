//! Class type entry.
//!
//! This module provides `ClassEntry`, the registry description of a Rust
//! type: its identity, memory semantics, optional base and declared members.

use rustc_hash::FxHashSet;

use super::{BaseLink, FieldEntry, PropertyEntry};
use crate::{CopyFn, Reflect, RegistrationError, TypeHash, TypeKind, copy_value};

/// Registry entry for a class type.
#[derive(Debug, Clone)]
pub struct ClassEntry {
    /// Registered name.
    pub name: String,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Type kind (value or reference).
    pub type_kind: TypeKind,
    /// Copy behaviour for value types.
    pub copy: Option<CopyFn>,

    // === Inheritance ===
    /// Embedded base type.
    pub base: Option<BaseLink>,

    // === Members ===
    /// Direct field members.
    pub fields: Vec<FieldEntry>,
    /// Properties.
    pub properties: Vec<PropertyEntry>,
}

impl ClassEntry {
    /// Create an entry for a value type (copied in and out of object cells).
    pub fn value<T: Reflect + Clone + Send + Sync>() -> Self {
        Self {
            name: T::type_name().to_string(),
            type_hash: T::type_hash(),
            type_kind: TypeKind::value(),
            copy: Some(copy_value::<T>),
            base: None,
            fields: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Create an entry for a reference type (mutated in place).
    pub fn reference<T: Reflect>() -> Self {
        Self {
            name: T::type_name().to_string(),
            type_hash: T::type_hash(),
            type_kind: TypeKind::reference(),
            copy: None,
            base: None,
            fields: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Set the base link.
    pub fn with_base(mut self, base: BaseLink) -> Self {
        self.base = Some(base);
        self
    }

    /// Add a field.
    pub fn with_field(mut self, field: FieldEntry) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a property.
    pub fn with_property(mut self, property: PropertyEntry) -> Self {
        self.properties.push(property);
        self
    }

    /// Check if this is a value type.
    pub fn is_value_type(&self) -> bool {
        self.type_kind.is_value()
    }

    /// Check if this is a reference type.
    pub fn is_reference_type(&self) -> bool {
        self.type_kind.is_reference()
    }

    /// Find a declared field by exact name.
    pub fn find_field(&self, name: &str) -> Option<&FieldEntry> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Find a declared property by exact name.
    pub fn find_property(&self, name: &str) -> Option<&PropertyEntry> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Reject entries that declare the same member name twice or name
    /// themselves as their base.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if let Some(link) = &self.base
            && link.base == self.type_hash
        {
            return Err(RegistrationError::CyclicBase {
                type_name: self.name.clone(),
                base: link.base_name.to_string(),
            });
        }

        let mut seen = FxHashSet::default();
        let names = self
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .chain(self.properties.iter().map(|p| p.name.as_str()));
        for name in names {
            if !seen.insert(name) {
                return Err(RegistrationError::DuplicateMember {
                    type_name: self.name.clone(),
                    member: name.to_string(),
                });
            }
        }
        Ok(())
    }
}
