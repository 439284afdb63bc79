//! TypeRegistry - storage for class descriptions.
//!
//! The registry plays the role of runtime metadata: a type is described once
//! (by hand through [`ClassEntry`] builders or by `#[derive(Reflect)]`) and
//! looked up by hash or by name afterwards.
//!
//! # Thread Safety
//!
//! `TypeRegistry` is not synchronized. Registration is expected to happen up
//! front; callers sharing a registry across threads wrap it in a lock.
//!
//! # Example
//!
//! ```
//! use memberwise_core::{ClassEntry, FieldEntry, Reflect, TypeHash};
//! use memberwise_registry::TypeRegistry;
//!
//! struct Point { x: i32 }
//!
//! impl Reflect for Point {
//!     fn type_hash() -> TypeHash { TypeHash::from_name("Point") }
//!     fn type_name() -> &'static str { "Point" }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry
//!     .register(
//!         ClassEntry::reference::<Point>()
//!             .with_field(FieldEntry::instance::<Point, i32>("x", |p| &p.x, |p| &mut p.x)),
//!     )
//!     .unwrap();
//!
//! assert!(registry.get_by_name("Point").is_some());
//! ```

use log::debug;
use rustc_hash::FxHashMap;

use memberwise_core::{BaseLink, ClassEntry, Describe, RegistrationError, TypeHash};

/// One level of a type hierarchy.
#[derive(Debug, Clone)]
pub struct HierarchyLevel<'a> {
    /// The class at this level.
    pub class: &'a ClassEntry,
    /// Projection from the most derived type to this level; `None` for the
    /// most derived type itself.
    pub link: Option<BaseLink>,
}

/// Registry of class descriptions.
#[derive(Default)]
pub struct TypeRegistry {
    /// Classes by type hash (primary storage).
    classes: FxHashMap<TypeHash, ClassEntry>,
    /// Reverse index: name -> hash.
    names: FxHashMap<String, TypeHash>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a class entry.
    ///
    /// A self-describing base that is not yet registered is registered first.
    pub fn register(&mut self, entry: ClassEntry) -> Result<(), RegistrationError> {
        let mut pending = Vec::new();
        self.register_linked(entry, &mut pending)
    }

    // `pending` holds the derived types whose base is being registered.
    fn register_linked(
        &mut self,
        entry: ClassEntry,
        pending: &mut Vec<TypeHash>,
    ) -> Result<(), RegistrationError> {
        if self.classes.contains_key(&entry.type_hash) || self.names.contains_key(&entry.name) {
            return Err(RegistrationError::DuplicateType(entry.name));
        }
        entry.validate()?;

        if let Some(link) = &entry.base
            && !self.classes.contains_key(&link.base)
        {
            if pending.contains(&link.base) {
                return Err(RegistrationError::CyclicBase {
                    type_name: entry.name,
                    base: link.base_name.to_string(),
                });
            }
            match link.describe {
                Some(describe) => {
                    pending.push(entry.type_hash);
                    let result = self.register_linked(describe(), pending);
                    pending.pop();
                    result?;
                }
                None => {
                    return Err(RegistrationError::UnknownBase {
                        type_name: entry.name,
                        base: link.base,
                    });
                }
            }
        }

        debug!(
            "registered type '{}' ({} field(s), {} property(ies))",
            entry.name,
            entry.fields.len(),
            entry.properties.len()
        );
        self.names.insert(entry.name.clone(), entry.type_hash);
        self.classes.insert(entry.type_hash, entry);
        Ok(())
    }

    /// Register a self-describing type. Registering the same type again is a
    /// no-op.
    pub fn register_type<T: Describe>(&mut self) -> Result<TypeHash, RegistrationError> {
        let hash = T::type_hash();
        if !self.classes.contains_key(&hash) {
            self.register(T::describe())?;
        }
        Ok(hash)
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Get a class by hash.
    pub fn get(&self, hash: TypeHash) -> Option<&ClassEntry> {
        self.classes.get(&hash)
    }

    /// Get a class by registered name.
    pub fn get_by_name(&self, name: &str) -> Option<&ClassEntry> {
        self.names.get(name).and_then(|hash| self.classes.get(hash))
    }

    pub fn contains(&self, hash: TypeHash) -> bool {
        self.classes.contains_key(&hash)
    }

    /// Iterate over all registered classes.
    pub fn classes(&self) -> impl Iterator<Item = &ClassEntry> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Get a class and its base chain, most derived first.
    ///
    /// Each base level carries the composed link from the most derived type
    /// down to that base. Returns `None` if `hash` is not registered.
    pub fn hierarchy(&self, hash: TypeHash) -> Option<Vec<HierarchyLevel<'_>>> {
        let mut current = self.get(hash)?;
        let mut levels = vec![HierarchyLevel {
            class: current,
            link: None,
        }];
        let mut link: Option<BaseLink> = None;

        while let Some(base_link) = &current.base
            && let Some(base) = self.get(base_link.base)
        {
            let composed = match &link {
                Some(outer) => outer.then(base_link),
                None => base_link.clone(),
            };
            levels.push(HierarchyLevel {
                class: base,
                link: Some(composed.clone()),
            });
            link = Some(composed);
            current = base;
        }

        Some(levels)
    }
}
