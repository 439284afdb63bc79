//! Accessor cache.
//!
//! Maps request descriptors to compiled accessors so that structurally
//! equal requests share one accessor for the life of the process.
//!
//! Compilation runs outside the map lock. When two threads race on the same
//! descriptor both compile, the first to store wins and the other discards
//! its result and returns the stored accessor.

use std::sync::OnceLock;

use log::{debug, trace};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use memberwise_core::RequestError;

use crate::{AccessRequest, AccessorCompiler, MultiGetter, MultiSetter};

/// Process-wide store of compiled accessors.
#[derive(Debug, Default)]
pub struct AccessorCache {
    setters: RwLock<FxHashMap<AccessRequest, MultiSetter>>,
    getters: RwLock<FxHashMap<AccessRequest, MultiGetter>>,
    compiler: AccessorCompiler,
}

impl AccessorCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lazily created process-wide cache.
    pub fn global() -> &'static AccessorCache {
        static GLOBAL: OnceLock<AccessorCache> = OnceLock::new();
        GLOBAL.get_or_init(AccessorCache::new)
    }

    /// Get the setter for `request`, compiling it on first use.
    pub fn get_or_compile_setter(
        &self,
        request: &AccessRequest,
    ) -> Result<MultiSetter, RequestError> {
        get_or_compile(&self.setters, request, |r| self.compiler.compile_setter(r))
    }

    /// Get the getter for `request`, compiling it on first use.
    pub fn get_or_compile_getter(
        &self,
        request: &AccessRequest,
    ) -> Result<MultiGetter, RequestError> {
        get_or_compile(&self.getters, request, |r| self.compiler.compile_getter(r))
    }

    /// Number of cached setters.
    pub fn setter_count(&self) -> usize {
        self.setters.read().len()
    }

    /// Number of cached getters.
    pub fn getter_count(&self) -> usize {
        self.getters.read().len()
    }
}

fn get_or_compile<V: Clone>(
    map: &RwLock<FxHashMap<AccessRequest, V>>,
    request: &AccessRequest,
    compile: impl FnOnce(&AccessRequest) -> Result<V, RequestError>,
) -> Result<V, RequestError> {
    if let Some(found) = map.read().get(request) {
        trace!(
            "accessor cache hit for '{}' ({} access)",
            request.target_name(),
            request.mode()
        );
        return Ok(found.clone());
    }

    let compiled = compile(request)?;
    debug!(
        "accessor cache miss for '{}' ({} access, {} slot(s))",
        request.target_name(),
        request.mode(),
        request.slot_count()
    );
    Ok(map.write().entry(request.clone()).or_insert(compiled).clone())
}
