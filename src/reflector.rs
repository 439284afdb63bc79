//! The `Reflector` facade: a registry and an accessor cache behind one API.

use std::sync::OnceLock;

use parking_lot::{RwLock, RwLockReadGuard};

use memberwise_compiler::{AccessMode, AccessRequest, AccessorCache, MultiGetter, MultiSetter};
use memberwise_core::{
    ClassEntry, Describe, IntoValue, MemberwiseError, Object, RegistrationError, RequestError,
    TypeHash, Value,
};
use memberwise_registry::{LookupFlags, LookupOptions, TypeRegistry};

/// Registry plus accessor cache.
///
/// Every `Reflector` owns its cache. Accessors compiled against one registry
/// are never handed out for another.
#[derive(Default)]
pub struct Reflector {
    registry: RwLock<TypeRegistry>,
    cache: AccessorCache,
}

impl Reflector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lazily created process-wide reflector used by
    /// [`ObjectExt`](crate::ObjectExt).
    pub fn global() -> &'static Reflector {
        static GLOBAL: OnceLock<Reflector> = OnceLock::new();
        GLOBAL.get_or_init(Reflector::new)
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a self-describing type (and its bases). Idempotent.
    pub fn register<T: Describe>(&self) -> Result<TypeHash, RegistrationError> {
        let hash = T::type_hash();
        if self.registry.read().contains(hash) {
            return Ok(hash);
        }
        self.registry.write().register_type::<T>()
    }

    /// Register a hand-built class entry.
    pub fn register_entry(&self, entry: ClassEntry) -> Result<(), RegistrationError> {
        self.registry.write().register(entry)
    }

    /// Register `T` and wrap `value` with the semantics of its registered
    /// class entry, so the object always matches what compiled accessors
    /// expect.
    pub fn wrap<T: Describe>(&self, value: T) -> Result<Object, RegistrationError> {
        let hash = self.register::<T>()?;
        let registry = self.registry.read();
        Ok(match registry.get(hash) {
            Some(entry) => Object::described(value, entry),
            None => Object::new(value),
        })
    }

    /// Read access to the underlying registry.
    pub fn registry(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.registry.read()
    }

    pub fn cache(&self) -> &AccessorCache {
        &self.cache
    }

    // ==========================================================================
    // Accessor generation
    // ==========================================================================

    /// Resolve a request against the registry.
    pub fn request<S: AsRef<str>>(
        &self,
        target: TypeHash,
        names: &[S],
        options: impl Into<LookupFlags>,
        mode: AccessMode,
    ) -> Result<AccessRequest, RequestError> {
        let registry = self.registry.read();
        AccessRequest::resolve(&registry, target, names, options, mode)
    }

    /// Get the cached bulk setter for `names` on `target`.
    pub fn setter<S: AsRef<str>>(
        &self,
        target: TypeHash,
        names: &[S],
        options: impl Into<LookupFlags>,
    ) -> Result<MultiSetter, RequestError> {
        let request = self.request(target, names, options, AccessMode::Set)?;
        self.cache.get_or_compile_setter(&request)
    }

    /// Get the cached bulk getter for `names` on `target`.
    pub fn getter<S: AsRef<str>>(
        &self,
        target: TypeHash,
        names: &[S],
        options: impl Into<LookupFlags>,
    ) -> Result<MultiGetter, RequestError> {
        let request = self.request(target, names, options, AccessMode::Get)?;
        self.cache.get_or_compile_getter(&request)
    }

    /// [`setter`](Self::setter) for a self-describing type, registering it
    /// on first use.
    pub fn setter_for<T: Describe, S: AsRef<str>>(
        &self,
        names: &[S],
        options: impl Into<LookupFlags>,
    ) -> Result<MultiSetter, MemberwiseError> {
        let target = self.register::<T>()?;
        Ok(self.setter(target, names, options)?)
    }

    /// [`getter`](Self::getter) for a self-describing type, registering it
    /// on first use.
    pub fn getter_for<T: Describe, S: AsRef<str>>(
        &self,
        names: &[S],
        options: impl Into<LookupFlags>,
    ) -> Result<MultiGetter, MemberwiseError> {
        let target = self.register::<T>()?;
        Ok(self.getter(target, names, options)?)
    }

    // ==========================================================================
    // One-shot access
    // ==========================================================================

    /// Write `values` to the named members of `object`.
    pub fn set_members<S: AsRef<str>>(
        &self,
        object: &Object,
        names: &[S],
        values: &[Value],
    ) -> Result<(), MemberwiseError> {
        let setter = self.setter(object.type_hash(), names, LookupFlags::DEFAULT)?;
        Ok(setter.set(Some(object), values)?)
    }

    /// Read the named members of `object`.
    pub fn get_members<S: AsRef<str>>(
        &self,
        object: &Object,
        names: &[S],
    ) -> Result<Vec<Value>, MemberwiseError> {
        let getter = self.getter(object.type_hash(), names, LookupFlags::DEFAULT)?;
        Ok(getter.get(Some(object))?)
    }

    /// Write `values` to static members of `T`.
    pub fn set_static_members<T: Describe, S: AsRef<str>>(
        &self,
        names: &[S],
        values: &[Value],
    ) -> Result<(), MemberwiseError> {
        let setter = self.setter_for::<T, S>(names, LookupOptions::new().static_only())?;
        Ok(setter.set(None, values)?)
    }

    /// Read static members of `T`.
    pub fn get_static_members<T: Describe, S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Vec<Value>, MemberwiseError> {
        let getter = self.getter_for::<T, S>(names, LookupOptions::new().static_only())?;
        Ok(getter.get(None)?)
    }

    /// Write one member of `object`.
    ///
    /// Fails with [`RequestError::MemberNotFound`] when no usable member of
    /// the selected kind has that name.
    pub fn set_member(
        &self,
        object: &Object,
        name: &str,
        options: LookupOptions,
        value: impl IntoValue,
    ) -> Result<(), MemberwiseError> {
        let setter = self
            .setter(object.type_hash(), &[name], options)
            .map_err(|e| single(e, name))?;
        Ok(setter.set(Some(object), &[value.into_value()])?)
    }

    /// Read one member of `object`.
    ///
    /// Fails with [`RequestError::MemberNotFound`] when no usable member of
    /// the selected kind has that name.
    pub fn get_member(
        &self,
        object: &Object,
        name: &str,
        options: LookupOptions,
    ) -> Result<Value, MemberwiseError> {
        let getter = self
            .getter(object.type_hash(), &[name], options)
            .map_err(|e| single(e, name))?;
        let mut values = getter.get(Some(object))?;
        Ok(values.pop().unwrap_or_default())
    }
}

// Single-member call sites report the name that was asked for.
fn single(error: RequestError, name: &str) -> RequestError {
    match error {
        RequestError::NoResolvableMembers { type_name, .. } => RequestError::MemberNotFound {
            type_name,
            name: name.to_string(),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memberwise_core::{FieldEntry, PropertyEntry, Reflect};

    #[derive(Debug, Clone, PartialEq)]
    struct Size {
        width: u32,
        height: u32,
    }

    impl Reflect for Size {
        fn type_hash() -> TypeHash {
            TypeHash::from_name("Size")
        }

        fn type_name() -> &'static str {
            "Size"
        }
    }

    impl Describe for Size {
        fn describe() -> ClassEntry {
            ClassEntry::value::<Size>()
                .with_field(FieldEntry::instance::<Size, u32>(
                    "width",
                    |s| &s.width,
                    |s| &mut s.width,
                ))
                .with_field(FieldEntry::instance::<Size, u32>(
                    "height",
                    |s| &s.height,
                    |s| &mut s.height,
                ))
                .with_property(PropertyEntry::read_only::<Size, i64>("Area", |s| {
                    i64::from(s.width) * i64::from(s.height)
                }))
                .with_field(FieldEntry::constant::<Size, u32>("MAX", 4096))
        }
    }

    #[test]
    fn wrap_registers_and_uses_declared_semantics() {
        let reflector = Reflector::new();
        let size = reflector.wrap(Size { width: 1, height: 1 }).unwrap();
        assert!(size.is_value_type());
        assert!(reflector.registry().contains(Size::type_hash()));
    }

    #[test]
    fn hand_written_value_description_writes_back() {
        let reflector = Reflector::new();
        let size = reflector.wrap(Size { width: 1, height: 1 }).unwrap();
        assert!(size.kind().is_value());

        let setter = reflector
            .setter_for::<Size, _>(&["width"], LookupFlags::DEFAULT)
            .unwrap();
        assert_eq!(setter.receiver(), memberwise_compiler::Receiver::Value);
        setter.set(Some(&size), &[Value::Int(5)]).unwrap();
        assert_eq!(size.get::<Size>(), Some(Size { width: 5, height: 1 }));
    }

    #[test]
    fn set_and_get_members() {
        let reflector = Reflector::new();
        let size = reflector.wrap(Size { width: 1, height: 1 }).unwrap();

        reflector
            .set_members(&size, &["width", "height"], &[Value::Int(3), Value::Int(5)])
            .unwrap();
        assert_eq!(
            reflector.get_members(&size, &["Area", "width"]).unwrap(),
            [Value::Int(15), Value::Int(3)]
        );
    }

    #[test]
    fn accessors_are_cached_per_reflector() {
        let reflector = Reflector::new();
        let a = reflector
            .setter_for::<Size, _>(&["width"], LookupFlags::DEFAULT)
            .unwrap();
        let b = reflector
            .setter_for::<Size, _>(&["width", "depth"], LookupFlags::DEFAULT)
            .unwrap();
        assert!(MultiSetter::ptr_eq(&a, &b));
        assert_eq!(reflector.cache().setter_count(), 1);

        let other = Reflector::new();
        let c = other
            .setter_for::<Size, _>(&["width"], LookupFlags::DEFAULT)
            .unwrap();
        assert!(!MultiSetter::ptr_eq(&a, &c));
    }

    #[test]
    fn static_members() {
        let reflector = Reflector::new();
        assert_eq!(
            reflector.get_static_members::<Size, _>(&["MAX"]).unwrap(),
            [Value::Int(4096)]
        );
        // constants are never writable
        let err = reflector
            .set_static_members::<Size, _>(&["MAX"], &[Value::Int(1)])
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn single_member_errors_name_the_member() {
        let reflector = Reflector::new();
        let size = reflector.wrap(Size { width: 1, height: 1 }).unwrap();
        let err = reflector
            .get_member(&size, "depth", LookupOptions::new().fields_only())
            .unwrap_err();
        assert_eq!(
            err,
            MemberwiseError::Request(RequestError::MemberNotFound {
                type_name: "Size".to_string(),
                name: "depth".to_string(),
            })
        );
    }

    #[test]
    fn unregistered_object_type_is_an_error() {
        let reflector = Reflector::new();
        let size = Object::new(Size { width: 1, height: 1 });
        let err = reflector.get_members(&size, &["width"]).unwrap_err();
        assert_eq!(
            err,
            MemberwiseError::Request(RequestError::UnknownType(Size::type_hash()))
        );
    }
}
