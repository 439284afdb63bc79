//! Accessor compilation for memberwise.
//!
//! ## Modules
//!
//! - [`request`]: Request descriptors (resolution, trimming, identity)
//! - [`compiler`]: Turns descriptors into compiled accessors
//! - [`accessor`]: Compiled bulk setters and getters
//! - [`cache`]: Process-wide descriptor to accessor cache
//!
//! ## Example
//!
//! ```
//! use memberwise_compiler::{AccessMode, AccessRequest, AccessorCache};
//! use memberwise_core::{ClassEntry, FieldEntry, Object, Reflect, TypeHash};
//! use memberwise_registry::{LookupOptions, TypeRegistry};
//!
//! struct Player { hp: i32, name: String }
//!
//! impl Reflect for Player {
//!     fn type_hash() -> TypeHash { TypeHash::from_name("Player") }
//!     fn type_name() -> &'static str { "Player" }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry
//!     .register(
//!         ClassEntry::reference::<Player>()
//!             .with_field(FieldEntry::instance::<Player, i32>("hp", |p| &p.hp, |p| &mut p.hp))
//!             .with_field(FieldEntry::instance::<Player, String>(
//!                 "name",
//!                 |p| &p.name,
//!                 |p| &mut p.name,
//!             )),
//!     )
//!     .unwrap();
//!
//! let request = AccessRequest::resolve(
//!     &registry,
//!     Player::type_hash(),
//!     &["hp", "name"],
//!     LookupOptions::default(),
//!     AccessMode::Set,
//! )
//! .unwrap();
//! let setter = AccessorCache::global().get_or_compile_setter(&request).unwrap();
//!
//! let player = Object::reference(Player { hp: 0, name: String::new() });
//! setter
//!     .set(Some(&player), &memberwise_core::values![100, "hero"])
//!     .unwrap();
//! assert_eq!(player.read(|p: &Player| p.hp), Some(100));
//! ```

pub mod accessor;
pub mod cache;
pub mod compiler;
pub mod request;

#[cfg(test)]
mod fixtures;

pub use accessor::{MultiGetter, MultiSetter, Receiver};
pub use cache::AccessorCache;
pub use compiler::AccessorCompiler;
pub use request::{AccessMode, AccessRequest, MemberSlot};
